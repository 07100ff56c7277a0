pub mod notification_controller;
pub mod session_controller;
pub mod user_controller;

pub use notification_controller::NotificationController;
pub use session_controller::SessionController;
pub use user_controller::UserController;
