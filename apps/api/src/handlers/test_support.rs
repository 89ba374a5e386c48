use std::sync::Arc;

use warden_application::{AuthorizationService, MembershipService};
use warden_infrastructure::InMemoryAuthorizationRepository;

use crate::state::AppState;

pub(crate) const TEST_SERVICE_TOKEN: &str = "test-service-token-0123456789abcdef";

pub(crate) async fn in_memory_repository() -> Arc<InMemoryAuthorizationRepository> {
    match InMemoryAuthorizationRepository::with_baseline_catalog().await {
        Ok(repository) => Arc::new(repository),
        Err(error) => panic!("baseline catalog should seed: {error}"),
    }
}

pub(crate) fn state_for(repository: &Arc<InMemoryAuthorizationRepository>) -> AppState {
    let authorization_service = AuthorizationService::new(
        repository.clone(),
        repository.clone(),
        repository.clone(),
        repository.clone(),
    );
    AppState {
        membership_service: MembershipService::new(
            authorization_service.clone(),
            repository.clone(),
        ),
        authorization_service,
        postgres_pool: None,
        service_token: TEST_SERVICE_TOKEN.to_owned(),
    }
}

pub(crate) async fn in_memory_state() -> AppState {
    state_for(&in_memory_repository().await)
}
