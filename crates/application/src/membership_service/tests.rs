use std::sync::Arc;

use warden_core::{AppError, UserIdentity};
use warden_domain::{RoleId, Subject, UserId};

use crate::MembershipService;
use crate::test_support::{FakeStore, authorization_service};

fn service(store: &Arc<FakeStore>) -> MembershipService {
    MembershipService::new(authorization_service(store), store.clone())
}

fn admin() -> UserIdentity {
    UserIdentity::new(1, "admin")
}

#[tokio::test]
async fn default_role_is_assigned_on_onboarding() {
    let store = FakeStore::seeded().await;

    let membership = service(&store).assign_default_role(UserId::new(42)).await;

    assert!(matches!(membership, Ok(value) if value.role_id == RoleId::new(7)));
    assert_eq!(store.membership_count().await, 1);
}

#[tokio::test]
async fn missing_default_role_is_unavailable() {
    let store = Arc::new(FakeStore::default());

    let membership = service(&store).assign_default_role(UserId::new(42)).await;

    assert!(matches!(membership, Err(AppError::Unavailable(_))));
}

#[tokio::test]
async fn assign_role_requires_write_on_role_membership_object() {
    let store = FakeStore::seeded().await;
    store
        .add_grant(Subject::User(UserId::new(1)), "adm", Some("admRoleUser"), "READ")
        .await;

    let result = service(&store)
        .assign_role(&admin(), RoleId::new(7), UserId::new(42))
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert_eq!(store.membership_count().await, 0);
}

#[tokio::test]
async fn assign_role_adds_membership_for_authorized_actor() {
    let store = FakeStore::seeded().await;
    store
        .add_grant(Subject::User(UserId::new(1)), "adm", Some("admRoleUser"), "WRITE")
        .await;

    let result = service(&store)
        .assign_role(&admin(), RoleId::new(7), UserId::new(42))
        .await;

    assert!(result.is_ok());
    assert_eq!(store.membership_count().await, 1);
}

#[tokio::test]
async fn assign_role_rejects_unknown_role_and_duplicates() {
    let store = FakeStore::seeded().await;
    store.add_superuser(1).await;
    let service = service(&store);

    let unknown = service
        .assign_role(&admin(), RoleId::new(99), UserId::new(42))
        .await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    let first = service
        .assign_role(&admin(), RoleId::new(7), UserId::new(42))
        .await;
    assert!(first.is_ok());

    let duplicate = service
        .assign_role(&admin(), RoleId::new(7), UserId::new(42))
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn unassign_role_requires_delete_and_existing_membership() {
    let store = FakeStore::seeded().await;
    store.add_member(7, 42).await;
    store
        .add_grant(Subject::User(UserId::new(1)), "adm", Some("admRoleUser"), "WRITE")
        .await;
    let service = service(&store);

    let forbidden = service
        .unassign_role(&admin(), RoleId::new(7), UserId::new(42))
        .await;
    assert!(matches!(forbidden, Err(AppError::Forbidden(_))));

    store
        .add_grant(Subject::User(UserId::new(1)), "adm", Some("admRoleUser"), "DELETE")
        .await;

    let removed = service
        .unassign_role(&admin(), RoleId::new(7), UserId::new(42))
        .await;
    assert!(removed.is_ok());
    assert_eq!(store.membership_count().await, 0);

    let missing = service
        .unassign_role(&admin(), RoleId::new(7), UserId::new(42))
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}
