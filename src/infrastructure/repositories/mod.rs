pub mod http_auth_repository;
pub mod http_notification_repository;
pub mod http_user_repository;
pub mod memory_token_store;
pub mod sqlite_local_storage;
pub mod sqlite_token_store;

pub use http_auth_repository::HttpAuthRepository;
pub use http_notification_repository::HttpNotificationRepository;
pub use http_user_repository::HttpUserRepository;
pub use memory_token_store::InMemoryTokenStore;
pub use sqlite_local_storage::SqliteLocalStorage;
pub use sqlite_token_store::SqliteTokenStore;
