pub mod entities;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

pub use entities::{
    AuthState, Notification, NotificationFeedState, NotificationFilter, PetStatus, ReadStatus,
    Session, StoredTokens, TokenPair, UserSummary, UserUpdate,
};

pub use error::{DomainError, DomainResult};

pub use repositories::{
    AuthRepository, DynAuthRepository, DynNotificationRepository, DynTokenStore,
    DynUserRepository, NotificationRepository, TokenStore, UserRepository,
};

pub use services::{
    DynNotificationSyncService, DynSessionService, DynUserDetailsService,
    NotificationSyncService, SessionService, UserDetailsService,
};
