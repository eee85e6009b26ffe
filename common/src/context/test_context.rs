use std::sync::Arc;

use crate::auth::Auth;

use super::effectfull_context::ServiceState;

#[derive(Clone)]
pub struct TestContext {
    pub state: Arc<ServiceState>,
    pub user_auth: Auth,
}

impl TestContext {
    pub fn new(state: Arc<ServiceState>, user_auth: Auth) -> Self {
        Self { state, user_auth }
    }
}
