use crate::domain::{
    entities::{Notification, NotificationFilter},
    error::DomainResult,
    repositories::NotificationRepository,
};
use crate::infrastructure::{config::ApiEndpoints, gateway::ApiGatewayClient};
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NotificationPage {
    List(Vec<Notification>),
    Paged { results: Vec<Notification> },
}

impl From<NotificationPage> for Vec<Notification> {
    fn from(page: NotificationPage) -> Self {
        match page {
            NotificationPage::List(items) => items,
            NotificationPage::Paged { results } => results,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpNotificationRepository {
    client: ApiGatewayClient,
    endpoints: ApiEndpoints,
}

impl HttpNotificationRepository {
    pub fn new(client: ApiGatewayClient, endpoints: ApiEndpoints) -> Self {
        Self { client, endpoints }
    }
}

#[async_trait]
impl NotificationRepository for HttpNotificationRepository {
    async fn find_all(
        &self,
        filter: &NotificationFilter,
        token: &str,
    ) -> DomainResult<Vec<Notification>> {
        let request = self
            .client
            .request(Method::GET, &self.endpoints.notifications, Some(token))
            .query(&filter.query_pairs());
        let page: NotificationPage = self.client.send_json(request).await?;
        Ok(page.into())
    }

    async fn mark_as_read(&self, id: i64, token: &str) -> DomainResult<()> {
        let request = self.client.request(
            Method::POST,
            &self.endpoints.notification_mark_read(id),
            Some(token),
        );
        self.client.send_empty(request).await
    }

    async fn delete(&self, id: i64, token: &str) -> DomainResult<()> {
        let request = self
            .client
            .request(Method::DELETE, &self.endpoints.notification(id), Some(token));
        self.client.send_empty(request).await
    }
}
