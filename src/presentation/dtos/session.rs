use crate::domain::entities::{UserSummary, UserUpdate};
use crate::presentation::middleware::ValidatedCommand;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 150, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl ValidatedCommand for LoginRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl From<UserSummary> for UserResponse {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            email: user.email,
            avatar_url: user.avatar_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub username: Option<String>,
    pub user: Option<UserResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Display name must be between 1 and 100 characters"
    ))]
    pub display_name: Option<String>,
    #[validate(email(message = "Email must be valid"))]
    pub email: Option<String>,
    #[validate(url(message = "Avatar URL must be valid"))]
    pub avatar_url: Option<String>,
}

impl ValidatedCommand for UpdateUserRequest {}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            display_name: request.display_name,
            email: request.email,
            avatar_url: request.avatar_url,
        }
    }
}
