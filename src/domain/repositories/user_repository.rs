use crate::domain::{
    entities::{UserSummary, UserUpdate},
    error::DomainResult,
};
use async_trait::async_trait;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_current(&self, token: &str) -> DomainResult<UserSummary>;
    async fn update_current(&self, update: &UserUpdate, token: &str) -> DomainResult<UserSummary>;
}

pub type DynUserRepository = Arc<dyn UserRepository>;
