pub mod notification;
pub mod session;

pub use notification::{
    Notification, NotificationFeedState, NotificationFilter, PetStatus, ReadStatus,
};

pub use session::{AuthState, Session, StoredTokens, TokenPair, UserSummary, UserUpdate};
