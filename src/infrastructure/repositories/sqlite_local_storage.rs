use crate::domain::error::{DomainError, DomainResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// String key/value storage with `localStorage` semantics, persisted in SQLite.
#[derive(Debug, Clone)]
pub struct SqliteLocalStorage {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteLocalStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> DomainResult<Self> {
        let connection = Connection::open(path)
            .map_err(|e| DomainError::StorageError(format!("Failed to open database: {}", e)))?;
        Self::init(connection)
    }

    pub fn in_memory() -> DomainResult<Self> {
        let connection = Connection::open_in_memory()
            .map_err(|e| DomainError::StorageError(format!("Failed to open database: {}", e)))?;
        Self::init(connection)
    }

    fn init(connection: Connection) -> DomainResult<Self> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    pub async fn get_item(&self, key: &str) -> DomainResult<Option<String>> {
        let conn = self.connection.lock().await;
        let value = conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub async fn set_item(&self, key: &str, value: &str) -> DomainResult<()> {
        self.set_items(&[(key, Some(value))]).await
    }

    /// Writes or removes several keys in one transaction. `None` removes the key.
    pub async fn set_items(&self, items: &[(&str, Option<&str>)]) -> DomainResult<()> {
        let mut conn = self.connection.lock().await;
        let tx = conn.transaction()?;
        for (key, value) in items {
            match value {
                Some(value) => {
                    tx.execute(
                        "INSERT OR REPLACE INTO local_storage (key, value) VALUES (?1, ?2)",
                        params![key, value],
                    )?;
                }
                None => {
                    tx.execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}
