use crate::domain::{
    entities::{Notification, NotificationFilter},
    error::DomainResult,
};
use async_trait::async_trait;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

/// Remote notifications resource. Every call carries the caller's bearer token.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_all(
        &self,
        filter: &NotificationFilter,
        token: &str,
    ) -> DomainResult<Vec<Notification>>;
    async fn mark_as_read(&self, id: i64, token: &str) -> DomainResult<()>;
    async fn delete(&self, id: i64, token: &str) -> DomainResult<()>;
}

pub type DynNotificationRepository = Arc<dyn NotificationRepository>;
