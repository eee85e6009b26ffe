use std::sync::Arc;

use common::{
    auth::Auth,
    context::effectfull_context::ServiceState,
    entities::report::Report,
    repository::{test_repository::TestRepository, RepositoryObject},
};

pub fn test_state() -> Arc<ServiceState> {
    std::env::set_var("JWT_SECRET", "report-test-secret");

    let mut state = ServiceState::new("report");
    let reports: RepositoryObject<Report> = Arc::new(TestRepository::<Report>::new());
    state.insert(reports);
    Arc::new(state)
}

pub fn bearer(auth: Auth) -> (&'static str, String) {
    let token = auth.to_token().unwrap();
    ("Authorization", format!("Bearer {}", token))
}
