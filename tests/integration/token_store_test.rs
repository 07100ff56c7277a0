use crate::common::init;
use petopia_lib::domain::repositories::{TokenStore, TokenStoreEvent};
use petopia_lib::infrastructure::repositories::{SqliteLocalStorage, SqliteTokenStore};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[tokio::test]
async fn test_tokens_survive_reopen() -> anyhow::Result<()> {
    init();
    let dir = tempdir()?;
    let path = dir.path().join("session.db");

    {
        let store = SqliteTokenStore::new(&path)?;
        store.set("A".into(), Some("R".into())).await?;
        store.set_username("mochi".into()).await?;
    }

    let reopened = SqliteTokenStore::new(&path)?;
    let tokens = reopened.get().await?;
    assert_eq!(tokens.access.as_deref(), Some("A"));
    assert_eq!(tokens.refresh.as_deref(), Some("R"));
    assert_eq!(reopened.username().await?.as_deref(), Some("mochi"));

    reopened.clear().await?;
    let tokens = SqliteTokenStore::new(&path)?.get().await?;
    assert!(!tokens.is_present());
    Ok(())
}

#[tokio::test]
async fn test_store_uses_local_storage_keys() -> anyhow::Result<()> {
    init();
    let dir = tempdir()?;
    let path = dir.path().join("session.db");

    let store = SqliteTokenStore::new(&path)?;
    store.set("A".into(), None).await?;
    store.set_username("rex".into()).await?;

    let storage = SqliteLocalStorage::new(&path)?;
    assert_eq!(storage.get_item("authToken").await?.as_deref(), Some("A"));
    assert_eq!(storage.get_item("refreshToken").await?, None);
    assert_eq!(storage.get_item("username").await?.as_deref(), Some("rex"));
    Ok(())
}

#[tokio::test]
async fn test_subscribers_see_changes() -> anyhow::Result<()> {
    init();
    let store = SqliteTokenStore::with_storage(SqliteLocalStorage::in_memory()?);
    let mut events = store.subscribe();

    store.set("A".into(), Some("R".into())).await?;
    store.clear().await?;

    assert_eq!(events.recv().await?, TokenStoreEvent::Updated);
    assert_eq!(events.recv().await?, TokenStoreEvent::Cleared);
    Ok(())
}
