use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use super::{authority::Account, http::HttpErrorResponse, navigation::Router};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub remember_me: bool,
}

#[async_trait]
pub trait LoginService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<Account, HttpErrorResponse>;
}

/// Pages a user may be on while not yet signed in; a successful login leaves them.
const ACCOUNT_FLOW_PAGES: [&str; 2] = ["/account/register", "/account/activate"];

pub struct LoginModal {
    pub credentials: Credentials,
    pub authentication_error: bool,
    open: bool,
    dismiss_reason: Option<String>,
    login_service: Arc<dyn LoginService>,
    router: Arc<dyn Router>,
}

impl LoginModal {
    pub fn new(login_service: Arc<dyn LoginService>, router: Arc<dyn Router>) -> Self {
        Self {
            credentials: Credentials::default(),
            authentication_error: false,
            open: false,
            dismiss_reason: None,
            login_service,
            router,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn dismiss_reason(&self) -> Option<&str> {
        self.dismiss_reason.as_deref()
    }

    pub fn open(&mut self) {
        self.open = true;
        self.dismiss_reason = None;
    }

    fn dismiss(&mut self, reason: &str) {
        self.open = false;
        self.dismiss_reason = Some(reason.to_string());
    }

    pub fn cancel(&mut self) {
        self.credentials = Credentials::default();
        self.authentication_error = false;
        self.dismiss("cancel");
    }

    pub async fn login(&mut self) -> Option<Account> {
        match self.login_service.login(&self.credentials).await {
            Ok(account) => {
                self.authentication_error = false;
                self.dismiss("login success");

                let url = self.router.url();
                if ACCOUNT_FLOW_PAGES.iter().any(|page| url.starts_with(page)) {
                    self.router.navigate("");
                }

                log::info!("Authenticated as {}", account.login);
                Some(account)
            }
            Err(err) => {
                log::debug!("Authentication failed: {}", err);
                self.authentication_error = true;
                None
            }
        }
    }

    pub fn request_reset_password(&mut self) {
        self.dismiss("to state requestReset");
        self.router.navigate("/account/reset/request");
    }
}
