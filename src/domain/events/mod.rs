pub mod publisher;
pub mod session_events;

pub use publisher::{BroadcastEventPublisher, EventPublisher};
pub use session_events::{LogoutReason, SessionEvent};
