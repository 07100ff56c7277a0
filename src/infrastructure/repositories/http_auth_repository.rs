use crate::domain::{
    entities::TokenPair,
    error::{DomainError, DomainResult},
    repositories::AuthRepository,
};
use crate::infrastructure::{config::ApiEndpoints, gateway::ApiGatewayClient};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

#[derive(Debug, Clone)]
pub struct HttpAuthRepository {
    client: ApiGatewayClient,
    endpoints: ApiEndpoints,
}

impl HttpAuthRepository {
    pub fn new(client: ApiGatewayClient, endpoints: ApiEndpoints) -> Self {
        Self { client, endpoints }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn obtain_token(&self, username: &str, password: &str) -> DomainResult<TokenPair> {
        let request = self
            .client
            .request(Method::POST, &self.endpoints.token, None)
            .json(&json!({ "username": username, "password": password }));
        // No session exists yet, so a 401 here means bad credentials.
        self.client.send_json(request).await.map_err(|e| match e {
            DomainError::SessionExpired => DomainError::api(401, "Invalid username or password"),
            other => other,
        })
    }

    async fn refresh_token(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let request = self
            .client
            .request(Method::POST, &self.endpoints.token_refresh, None)
            .json(&json!({ "refresh": refresh_token }));
        self.client.send_json(request).await
    }
}
