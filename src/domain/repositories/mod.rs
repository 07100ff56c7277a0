pub mod auth_repository;
pub mod notification_repository;
pub mod token_store;
pub mod user_repository;

pub use auth_repository::{AuthRepository, DynAuthRepository};
pub use notification_repository::{DynNotificationRepository, NotificationRepository};
pub use token_store::{DynTokenStore, TokenStore, TokenStoreEvent, TokenStoreSignal};
pub use user_repository::{DynUserRepository, UserRepository};

#[cfg(test)]
pub use auth_repository::MockAuthRepository;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
