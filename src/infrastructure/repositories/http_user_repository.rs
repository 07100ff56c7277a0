use crate::domain::{
    entities::{UserSummary, UserUpdate},
    error::DomainResult,
    repositories::UserRepository,
};
use crate::infrastructure::{config::ApiEndpoints, gateway::ApiGatewayClient};
use async_trait::async_trait;
use reqwest::Method;

#[derive(Debug, Clone)]
pub struct HttpUserRepository {
    client: ApiGatewayClient,
    endpoints: ApiEndpoints,
}

impl HttpUserRepository {
    pub fn new(client: ApiGatewayClient, endpoints: ApiEndpoints) -> Self {
        Self { client, endpoints }
    }
}

#[async_trait]
impl UserRepository for HttpUserRepository {
    async fn find_current(&self, token: &str) -> DomainResult<UserSummary> {
        let request = self
            .client
            .request(Method::GET, &self.endpoints.user_details, Some(token));
        self.client.send_json(request).await
    }

    async fn update_current(&self, update: &UserUpdate, token: &str) -> DomainResult<UserSummary> {
        let request = self
            .client
            .request(Method::PATCH, &self.endpoints.user_details, Some(token))
            .json(update);
        self.client.send_json(request).await
    }
}
