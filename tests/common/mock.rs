use super::test_utils::{unread_feed, user_json, ACCESS_TOKEN, REFRESH_TOKEN};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Stub of the Petopia backend endpoints used by the client.
pub struct MockBackend {
    pub server: MockServer,
}

impl MockBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub async fn accept_login(&self, username: &str, password: &str) {
        Mock::given(method("POST"))
            .and(path("/api/token/"))
            .and(body_json(json!({ "username": username, "password": password })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access": ACCESS_TOKEN,
                "refresh": REFRESH_TOKEN
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn reject_login(&self) {
        Mock::given(method("POST"))
            .and(path("/api/token/"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "detail": "No active account found with the given credentials"
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn serve_unread(&self, ids: &[i64]) {
        self.serve_unread_body(unread_feed(ids)).await;
    }

    pub async fn serve_unread_body(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path("/api/notifications/"))
            .and(query_param("read_status", "unread"))
            .and(header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn accept_mark_read(&self) {
        Mock::given(method("POST"))
            .and(path_regex(r"^/api/notifications/\d+/mark_as_read/$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .mount(&self.server)
            .await;
    }

    pub async fn accept_delete(&self) {
        Mock::given(method("DELETE"))
            .and(path_regex(r"^/api/notifications/\d+/$"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;
    }

    pub async fn serve_user(&self, display_name: &str) {
        Mock::given(method("GET"))
            .and(path("/api/user/details/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(display_name)))
            .mount(&self.server)
            .await;
    }

    /// Every notifications call answers 401 from now on.
    pub async fn expire_tokens(&self) {
        self.server.reset().await;
        Mock::given(path_regex(r"^/api/notifications/"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "detail": "Given token not valid for any token type",
                "code": "token_not_valid"
            })))
            .mount(&self.server)
            .await;
    }
}
