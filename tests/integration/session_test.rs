use crate::common::{init, MockBackend, ACCESS_TOKEN, REFRESH_TOKEN};
use petopia_lib::domain::{
    entities::AuthState,
    error::DomainError,
    events::{LogoutReason, SessionEvent},
    repositories::TokenStore,
    services::SessionService,
};
use petopia_lib::infrastructure::{
    config::ApiEndpoints,
    gateway::ApiGatewayClient,
    repositories::{HttpAuthRepository, InMemoryTokenStore},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn session_against(
    backend: &MockBackend,
    store: Arc<InMemoryTokenStore>,
) -> anyhow::Result<SessionService> {
    let auth = HttpAuthRepository::new(
        ApiGatewayClient::new(backend.uri())?,
        ApiEndpoints::default(),
    );
    Ok(SessionService::restore(store, Arc::new(auth)).await?)
}

#[tokio::test]
async fn test_login_persists_tokens_and_username() -> anyhow::Result<()> {
    init();
    let backend = MockBackend::start().await;
    backend.accept_login("mochi", "hunter2").await;

    let store = Arc::new(InMemoryTokenStore::new());
    let session = session_against(&backend, store.clone()).await?;
    let mut state = session.subscribe();
    assert_eq!(*state.borrow(), AuthState::Unauthenticated);

    session.login_with_credentials("mochi", "hunter2").await?;

    assert!(state.has_changed()?);
    assert_eq!(*state.borrow_and_update(), AuthState::Authenticated);
    let tokens = store.get().await?;
    assert_eq!(tokens.access.as_deref(), Some(ACCESS_TOKEN));
    assert_eq!(tokens.refresh.as_deref(), Some(REFRESH_TOKEN));
    assert_eq!(session.stored_username().await?.as_deref(), Some("mochi"));
    Ok(())
}

#[tokio::test]
async fn test_bad_credentials_leave_session_unauthenticated() -> anyhow::Result<()> {
    init();
    let backend = MockBackend::start().await;
    backend.reject_login().await;

    let store = Arc::new(InMemoryTokenStore::new());
    let session = session_against(&backend, store.clone()).await?;

    let result = session.login_with_credentials("mochi", "wrong").await;
    assert!(matches!(result, Err(DomainError::ApiError { status: 401, .. })));
    assert!(!session.is_authenticated());
    assert!(!store.get().await?.is_present());
    Ok(())
}

#[tokio::test]
async fn test_refresh_keeps_refresh_token_when_not_rotated() -> anyhow::Result<()> {
    init();
    let backend = MockBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .and(body_json(json!({ "refresh": "R" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "A2" })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let store = Arc::new(InMemoryTokenStore::with_tokens("A", "R"));
    let session = session_against(&backend, store.clone()).await?;
    let before = session.generation();

    session.refresh_session().await?;

    assert_eq!(session.access_token().as_deref(), Some("A2"));
    assert!(session.generation() > before);
    let tokens = store.get().await?;
    assert_eq!(tokens.access.as_deref(), Some("A2"));
    assert_eq!(tokens.refresh.as_deref(), Some("R"));
    Ok(())
}

#[tokio::test]
async fn test_rejected_refresh_logs_out_once() -> anyhow::Result<()> {
    init();
    let backend = MockBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is invalid or expired",
            "code": "token_not_valid"
        })))
        .mount(&backend.server)
        .await;

    let store = Arc::new(InMemoryTokenStore::with_tokens("A", "R"));
    let session = session_against(&backend, store.clone()).await?;
    let mut events = session.events();

    assert_eq!(session.refresh_session().await, Err(DomainError::SessionExpired));
    assert!(!session.is_authenticated());
    assert!(!store.get().await?.is_present());

    match events.recv().await? {
        SessionEvent::LoggedOut { reason, .. } => assert_eq!(reason, LogoutReason::SessionExpired),
        other => panic!("unexpected event: {:?}", other),
    }
    assert!(events.try_recv().is_err());
    Ok(())
}
