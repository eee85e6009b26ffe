//! Reusable pieces shared by every page.

pub mod alert;
pub mod authority;
pub mod form;
pub mod http;
pub mod language;
pub mod login;
pub mod navigation;

pub use alert::{Alert, AlertError, AlertService, AlertType};
pub use authority::{has_any_authority, Account, HasAnyAuthority};
pub use form::{FileInputEvent, FormGroup, SelectedFile};
pub use http::{EntityResponse, HttpErrorResponse, HttpResult};
pub use language::find_language_from_key;
pub use login::{Credentials, LoginModal, LoginService};
pub use navigation::{History, Router};
