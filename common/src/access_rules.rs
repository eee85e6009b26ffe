use crate::{
    auth::Auth,
    constants::{AUTHORITY_ADMIN, AUTHORITY_SERVICE, AUTHORITY_USER},
    entities::report::Report,
};

pub trait AccessRules<Object, Subject> {
    fn get_access(&self, object: Object, subject: Subject) -> bool;
}

pub struct Read;

pub struct Edit;

pub struct Delete;

pub struct Download;

impl<'a> AccessRules<&'a Auth, ()> for Read {
    fn get_access(&self, auth: &'a Auth, _: ()) -> bool {
        auth.is_authenticated()
    }
}

impl<'a, 'b> AccessRules<&'a Auth, &'b Report> for Read {
    fn get_access(&self, auth: &'a Auth, _report: &'b Report) -> bool {
        auth.is_authenticated()
    }
}

impl<'a> AccessRules<&'a Auth, ()> for Edit {
    fn get_access(&self, auth: &'a Auth, _: ()) -> bool {
        auth.has_any_authority(&[AUTHORITY_USER, AUTHORITY_ADMIN, AUTHORITY_SERVICE])
    }
}

impl<'a, 'b> AccessRules<&'a Auth, &'b Report> for Edit {
    fn get_access(&self, auth: &'a Auth, _report: &'b Report) -> bool {
        match auth {
            Auth::Service(_) | Auth::Admin(_) | Auth::User(_) => true,
            Auth::None => false,
        }
    }
}

impl<'a, 'b> AccessRules<&'a Auth, &'b Report> for Delete {
    fn get_access(&self, auth: &'a Auth, _report: &'b Report) -> bool {
        match auth {
            Auth::Service(_) | Auth::Admin(_) | Auth::User(_) => true,
            Auth::None => false,
        }
    }
}

impl<'a> AccessRules<&'a Auth, ()> for Download {
    fn get_access(&self, auth: &'a Auth, _: ()) -> bool {
        auth.is_authenticated()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn anonymous_callers_are_rejected() {
        assert!(!Read.get_access(&Auth::None, ()));
        assert!(!Edit.get_access(&Auth::None, ()));
        assert!(!Download.get_access(&Auth::None, ()));
    }

    #[test]
    fn users_may_edit() {
        let auth = Auth::User("user".to_string());
        assert!(Edit.get_access(&auth, ()));
        assert!(Read.get_access(&auth, ()));
    }
}
