use crate::domain::{entities::StoredTokens, error::DomainResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USERNAME_KEY: &str = "username";

const TOKEN_EVENT_CAPACITY: usize = 16;

/// Change signal emitted by `set`/`clear`, visible inside the same process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStoreEvent {
    Updated,
    Cleared,
}

/// Durable client-local storage for the session tokens.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self) -> DomainResult<StoredTokens>;
    async fn set(&self, access: String, refresh: Option<String>) -> DomainResult<()>;
    async fn clear(&self) -> DomainResult<()>;
    async fn username(&self) -> DomainResult<Option<String>>;
    async fn set_username(&self, username: String) -> DomainResult<()>;
    fn subscribe(&self) -> broadcast::Receiver<TokenStoreEvent>;
}

pub type DynTokenStore = Arc<dyn TokenStore>;

/// Shared sender used by the store implementations.
#[derive(Debug, Clone)]
pub struct TokenStoreSignal {
    sender: broadcast::Sender<TokenStoreEvent>,
}

impl Default for TokenStoreSignal {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(TOKEN_EVENT_CAPACITY);
        Self { sender }
    }
}

impl TokenStoreSignal {
    pub fn emit(&self, event: TokenStoreEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TokenStoreEvent> {
        self.sender.subscribe()
    }
}
