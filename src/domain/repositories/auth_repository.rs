use crate::domain::{entities::TokenPair, error::DomainResult};
use async_trait::async_trait;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn obtain_token(&self, username: &str, password: &str) -> DomainResult<TokenPair>;
    async fn refresh_token(&self, refresh_token: &str) -> DomainResult<TokenPair>;
}

pub type DynAuthRepository = Arc<dyn AuthRepository>;
