//! Landing page: greets the signed-in account or offers to sign in.

use crate::shared::{
    authority::{has_any_authority, Account},
    login::LoginModal,
};

pub struct HomePage {
    account: Option<Account>,
    login_modal: LoginModal,
}

impl HomePage {
    pub fn new(login_modal: LoginModal) -> Self {
        Self {
            account: None,
            login_modal,
        }
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.account.is_some()
    }

    pub fn has_any_authority(&self, authorities: &[&str]) -> bool {
        has_any_authority(self.account.as_ref(), authorities)
    }

    pub fn login_modal(&mut self) -> &mut LoginModal {
        &mut self.login_modal
    }

    /// Opens the login modal.
    pub fn login(&mut self) {
        self.login_modal.open();
    }

    /// Submits the modal's credentials; the account is kept on success.
    pub async fn submit_login(&mut self) -> bool {
        if let Some(account) = self.login_modal.login().await {
            self.account = Some(account);
        }
        self.is_authenticated()
    }

    pub fn logout(&mut self) {
        self.account = None;
    }
}
