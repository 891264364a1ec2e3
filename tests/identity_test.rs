mod common;

use std::sync::Arc;

use common::{ScriptedGateway, auth, login_request};
use edustream_sync::db::{MemoryTokenStore, TokenStore};
use edustream_sync::models::{RegisterRequest, Role, SubscriptionPlan};
use edustream_sync::services::IdentityService;
use edustream_sync::{AppError, GatewayError, Session};

#[tokio::test]
async fn test_instructor_login_with_gateway_failure_uses_placeholder() {
    let gateway = Arc::new(ScriptedGateway::down());
    let tokens = Arc::new(MemoryTokenStore::default());
    let identity = IdentityService::new(gateway.clone(), tokens.clone());

    let user = identity.login(&login_request("", "secret", Role::Instructor)).await;

    assert_eq!(user.role, Role::Instructor);
    assert_eq!(user.id, "t1");
    assert_eq!(user.name, "Sarah Jenkins");
    assert_eq!(user.email, "sarah@edustream.com");
    assert_eq!(user.avatar, "https://i.pravatar.cc/150?u=teacher");
    assert_eq!(user.subscription, None);
    assert_eq!(tokens.get().await.expect("Failed to read token"), None);
}

#[tokio::test]
async fn test_placeholder_keeps_provided_email() {
    let gateway = Arc::new(ScriptedGateway::down());
    let identity = IdentityService::new(gateway.clone(), Arc::new(MemoryTokenStore::default()));

    let user = identity.login(&login_request("kim@example.com", "secret", Role::Learner)).await;

    assert_eq!(gateway.calls_to("login"), 1);
    assert_eq!(user.id, "s1");
    assert_eq!(user.email, "kim@example.com");
    assert_eq!(user.subscription, Some(SubscriptionPlan::Pro));
    assert_eq!(user.avatar, "https://i.pravatar.cc/150?u=student");
}

#[tokio::test]
async fn test_administrator_placeholder() {
    let gateway = Arc::new(ScriptedGateway::down());
    let identity = IdentityService::new(gateway, Arc::new(MemoryTokenStore::default()));

    let user = identity.login(&login_request("", "", Role::Administrator)).await;

    assert_eq!(user.id, "a1");
    assert_eq!(user.name, "Admin User");
    assert_eq!(user.email, "admin@edustream.com");
    assert_eq!(user.role, Role::Administrator);
}

#[tokio::test]
async fn test_missing_credentials_skip_the_remote_call() {
    let gateway = Arc::new(ScriptedGateway::down().with_login(Ok(auth("tok", Role::Learner))));
    let tokens = Arc::new(MemoryTokenStore::default());
    let identity = IdentityService::new(gateway.clone(), tokens.clone());

    let user = identity.login(&login_request("kim@example.com", "", Role::Learner)).await;

    assert_eq!(gateway.calls_to("login"), 0);
    assert_eq!(user.id, "s1");
    assert_eq!(tokens.get().await.expect("Failed to read token"), None);
}

#[tokio::test]
async fn test_rejected_credentials_still_produce_a_session() {
    let gateway = Arc::new(ScriptedGateway::down().with_login(Err(GatewayError::Rejected {
        status: 401,
        message: "Invalid credentials".to_string(),
    })));
    let tokens = Arc::new(MemoryTokenStore::default());
    let session = Session::new(gateway, tokens.clone());

    let user = session.login(&login_request("kim@example.com", "wrong", Role::Learner)).await;
    let state = session.snapshot().await;

    assert_eq!(user.id, "s1");
    assert_eq!(state.identity, Some(user));
    assert_eq!(tokens.get().await.expect("Failed to read token"), None);
}

#[tokio::test]
async fn test_successful_login_persists_token() {
    let gateway = Arc::new(ScriptedGateway::down().with_login(Ok(auth("jwt-123", Role::Instructor))));
    let tokens = Arc::new(MemoryTokenStore::default());
    let session = Session::new(gateway, tokens.clone());

    let user = session.login(&login_request("dana@example.com", "pw", Role::Learner)).await;

    assert_eq!(user.name, "Dana Remote");
    assert_eq!(user.role, Role::Instructor);
    assert_eq!(tokens.get().await.expect("Failed to read token").as_deref(), Some("jwt-123"));
}

#[tokio::test]
async fn test_logout_clears_identity_enrollments_and_token() {
    let gateway = Arc::new(ScriptedGateway::down().with_login(Ok(auth("jwt-123", Role::Learner))));
    let tokens = Arc::new(MemoryTokenStore::default());
    let session = Session::new(gateway, tokens.clone());

    session.login(&login_request("dana@example.com", "pw", Role::Learner)).await;
    session.enroll("1").await.expect("Enroll should be accepted");
    session.logout().await;

    let state = session.snapshot().await;
    assert!(state.identity.is_none());
    assert!(state.enrolled.is_empty());
    assert_eq!(tokens.get().await.expect("Failed to read token"), None);
}

fn register_request(name: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: "pw".to_string(),
    }
}

#[tokio::test]
async fn test_register_conflict_is_surfaced() {
    let gateway = Arc::new(ScriptedGateway::down().with_register(Err(GatewayError::Rejected {
        status: 409,
        message: "Email already exists".to_string(),
    })));
    let session = Session::new(gateway, Arc::new(MemoryTokenStore::default()));

    let result = session.register(&register_request("Kim", "kim@example.com")).await;

    match result {
        Err(AppError::Conflict(message)) => assert_eq!(message, "Email already exists"),
        other => panic!("expected conflict, got {:?}", other),
    }
    assert!(session.snapshot().await.identity.is_none());
}

#[tokio::test]
async fn test_register_unreachable_uses_placeholder() {
    let gateway = Arc::new(ScriptedGateway::down());
    let tokens = Arc::new(MemoryTokenStore::default());
    let session = Session::new(gateway, tokens.clone());

    let user = session
        .register(&register_request("", "kim@example.com"))
        .await
        .expect("Unreachable service should degrade");

    assert_eq!(user.id, "s1");
    assert_eq!(user.name, "Alex Student");
    assert_eq!(user.email, "kim@example.com");
    assert_eq!(user.role, Role::Learner);
    assert_eq!(user.avatar, "https://i.pravatar.cc/150?u=kim@example.com");
    assert_eq!(user.subscription, Some(SubscriptionPlan::Free));
    assert_eq!(tokens.get().await.expect("Failed to read token"), None);
}

#[tokio::test]
async fn test_register_success_persists_token() {
    let gateway = Arc::new(ScriptedGateway::down().with_register(Ok(auth("jwt-new", Role::Learner))));
    let tokens = Arc::new(MemoryTokenStore::default());
    let session = Session::new(gateway, tokens.clone());

    let user = session
        .register(&register_request("Dana", "dana@example.com"))
        .await
        .expect("Registration should succeed");

    assert_eq!(user.email, "dana@example.com");
    assert_eq!(tokens.get().await.expect("Failed to read token").as_deref(), Some("jwt-new"));
}
