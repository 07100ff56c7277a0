pub mod background;
pub mod notification_sync;
pub mod session_service;
pub mod user_details_service;

pub use notification_sync::{DynNotificationSyncService, NotificationSyncService};
pub use session_service::{DynSessionService, SessionCredentials, SessionService};
pub use user_details_service::{DynUserDetailsService, UserDetailsService};
