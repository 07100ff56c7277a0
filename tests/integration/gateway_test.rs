use crate::common::init;
use petopia_lib::domain::{
    entities::NotificationFilter, error::DomainError, repositories::NotificationRepository,
};
use petopia_lib::infrastructure::{
    config::ApiEndpoints, gateway::ApiGatewayClient, repositories::HttpNotificationRepository,
};
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn repository_answering(status: u16, body: serde_json::Value) -> (MockServer, HttpNotificationRepository) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notifications/"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    let repository = HttpNotificationRepository::new(
        ApiGatewayClient::new(server.uri()).unwrap(),
        ApiEndpoints::default(),
    );
    (server, repository)
}

#[test_case(401, json!({"detail": "Authentication credentials were not provided."}) ; "401 is always expiry")]
#[test_case(403, json!({"detail": "Given token not valid", "code": "token_not_valid"}) ; "403 token_not_valid")]
#[tokio::test]
async fn test_rejected_tokens_are_session_expired(status: u16, body: serde_json::Value) {
    init();
    let (_server, repository) = repository_answering(status, body).await;
    let result = repository
        .find_all(&NotificationFilter::unread(), "stale")
        .await;
    assert_eq!(result, Err(DomainError::SessionExpired));
}

#[tokio::test]
async fn test_not_found_keeps_server_message() {
    init();
    let (_server, repository) =
        repository_answering(404, json!({"detail": "Notification not found"})).await;
    let result = repository
        .find_all(&NotificationFilter::default(), "token")
        .await;
    assert_eq!(result, Err(DomainError::api(404, "Notification not found")));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    init();
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let repository = HttpNotificationRepository::new(
        ApiGatewayClient::new(uri).unwrap(),
        ApiEndpoints::default(),
    );

    let result = repository
        .find_all(&NotificationFilter::unread(), "token")
        .await;
    assert!(matches!(result, Err(DomainError::NetworkError(_))));
}
