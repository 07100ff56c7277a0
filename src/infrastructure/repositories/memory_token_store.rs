use crate::domain::{
    entities::StoredTokens,
    error::DomainResult,
    repositories::{TokenStore, TokenStoreEvent, TokenStoreSignal},
};
use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::broadcast;

#[derive(Debug, Default)]
struct Entries {
    tokens: StoredTokens,
    username: Option<String>,
}

/// Non-durable token store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    entries: RwLock<Entries>,
    signal: TokenStoreSignal,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let store = Self::default();
        store.entries.write().tokens = StoredTokens {
            access: Some(access.to_string()),
            refresh: Some(refresh.to_string()),
        };
        store
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn get(&self) -> DomainResult<StoredTokens> {
        Ok(self.entries.read().tokens.clone())
    }

    async fn set(&self, access: String, refresh: Option<String>) -> DomainResult<()> {
        self.entries.write().tokens = StoredTokens {
            access: Some(access),
            refresh,
        };
        self.signal.emit(TokenStoreEvent::Updated);
        Ok(())
    }

    async fn clear(&self) -> DomainResult<()> {
        *self.entries.write() = Entries::default();
        self.signal.emit(TokenStoreEvent::Cleared);
        Ok(())
    }

    async fn username(&self) -> DomainResult<Option<String>> {
        Ok(self.entries.read().username.clone())
    }

    async fn set_username(&self, username: String) -> DomainResult<()> {
        self.entries.write().username = Some(username);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<TokenStoreEvent> {
        self.signal.subscribe()
    }
}
