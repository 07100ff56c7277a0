use crate::domain::{
    entities::StoredTokens,
    error::DomainResult,
    repositories::{
        token_store::{AUTH_TOKEN_KEY, REFRESH_TOKEN_KEY, USERNAME_KEY},
        TokenStore, TokenStoreEvent, TokenStoreSignal,
    },
};
use crate::infrastructure::repositories::SqliteLocalStorage;
use async_trait::async_trait;
use std::path::Path;
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug)]
pub struct SqliteTokenStore {
    storage: SqliteLocalStorage,
    signal: TokenStoreSignal,
}

impl SqliteTokenStore {
    pub fn new<P: AsRef<Path>>(path: P) -> DomainResult<Self> {
        Ok(Self::with_storage(SqliteLocalStorage::new(path)?))
    }

    pub fn with_storage(storage: SqliteLocalStorage) -> Self {
        Self {
            storage,
            signal: TokenStoreSignal::default(),
        }
    }
}

#[async_trait]
impl TokenStore for SqliteTokenStore {
    async fn get(&self) -> DomainResult<StoredTokens> {
        Ok(StoredTokens {
            access: self.storage.get_item(AUTH_TOKEN_KEY).await?,
            refresh: self.storage.get_item(REFRESH_TOKEN_KEY).await?,
        })
    }

    async fn set(&self, access: String, refresh: Option<String>) -> DomainResult<()> {
        self.storage
            .set_items(&[
                (AUTH_TOKEN_KEY, Some(access.as_str())),
                (REFRESH_TOKEN_KEY, refresh.as_deref()),
            ])
            .await?;
        debug!("Stored session tokens");
        self.signal.emit(TokenStoreEvent::Updated);
        Ok(())
    }

    async fn clear(&self) -> DomainResult<()> {
        self.storage
            .set_items(&[
                (AUTH_TOKEN_KEY, None),
                (REFRESH_TOKEN_KEY, None),
                (USERNAME_KEY, None),
            ])
            .await?;
        debug!("Cleared session tokens");
        self.signal.emit(TokenStoreEvent::Cleared);
        Ok(())
    }

    async fn username(&self) -> DomainResult<Option<String>> {
        self.storage.get_item(USERNAME_KEY).await
    }

    async fn set_username(&self, username: String) -> DomainResult<()> {
        self.storage.set_item(USERNAME_KEY, &username).await
    }

    fn subscribe(&self) -> broadcast::Receiver<TokenStoreEvent> {
        self.signal.subscribe()
    }
}
