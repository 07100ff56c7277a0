use crate::domain::error::{DomainError, DomainResult};
use reqwest::{header, Client, ClientBuilder, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("petopia/", env!("CARGO_PKG_VERSION"));

/// Authenticated HTTP access to the Petopia backend.
///
/// This is the single place where responses are classified. A 401, or any
/// error body that reports an invalid or expired token, becomes
/// [`DomainError::SessionExpired`]. Nothing here retries.
#[derive(Debug, Clone)]
pub struct ApiGatewayClient {
    client: Client,
    base_url: String,
}

impl ApiGatewayClient {
    pub fn new(base_url: impl Into<String>) -> DomainResult<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> ApiGatewayClientBuilder {
        ApiGatewayClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts a request against `endpoint`, attaching the bearer token when given.
    pub fn request(&self, method: Method, endpoint: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");

        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        request
    }

    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> DomainResult<T> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            DomainError::InternalError(format!("Failed to decode response: {}", e))
        })
    }

    pub async fn send_empty(&self, request: RequestBuilder) -> DomainResult<()> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> DomainResult<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                DomainError::NetworkError(format!("Request timed out: {}", e))
            } else {
                DomainError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = classify_failure(status, &body);
        if error.is_session_expired() {
            warn!("Backend rejected the session token ({})", status);
        }
        Err(error)
    }
}

/// Maps a non-2xx response to the error taxonomy.
pub fn classify_failure(status: StatusCode, body: &str) -> DomainError {
    let json: Option<Value> = serde_json::from_str(body).ok();
    let message = json.as_ref().and_then(extract_message);

    if status == StatusCode::UNAUTHORIZED {
        return DomainError::SessionExpired;
    }

    let code_says_expired = json
        .as_ref()
        .and_then(|v| v.get("code"))
        .and_then(Value::as_str)
        .is_some_and(|code| code == "token_not_valid");

    if code_says_expired || message.as_deref().is_some_and(mentions_expiry) {
        return DomainError::SessionExpired;
    }

    let message = message
        .or_else(|| {
            let text = body.trim();
            (json.is_none() && !text.is_empty() && text.len() <= 200).then(|| text.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    DomainError::api(status.as_u16(), message)
}

fn extract_message(value: &Value) -> Option<String> {
    ["detail", "message", "error"].iter().find_map(|key| {
        match value.get(*key)? {
            Value::String(text) => Some(text.clone()),
            Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    })
}

// Only messages about the token itself count; a business error that merely
// says "expired" is an ordinary API error.
fn mentions_expiry(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("token")
        && (message.contains("expired")
            || message.contains("not valid")
            || message.contains("invalid"))
}

#[derive(Default)]
pub struct ApiGatewayClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiGatewayClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Per-request timeout. The backend contract defines none, so this is off by default.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> DomainResult<ApiGatewayClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| DomainError::ValidationError("base_url is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new()
            .user_agent(self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()));

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;
        Ok(ApiGatewayClient { client, base_url })
    }
}
