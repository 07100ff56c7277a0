pub mod controllers;
pub mod dtos;
pub mod middleware;

pub use controllers::{NotificationController, SessionController, UserController};
pub use dtos::{
    ErrorNotice, LoginRequest, NotificationFeedResponse, NotificationFilterRequest,
    NotificationListResponse, NotificationResponse, SessionStatusResponse, UpdateUserRequest,
    UserResponse,
};
pub use middleware::{
    validate_command, validate_request, ValidatedCommand, ValidationMiddlewareError,
};
