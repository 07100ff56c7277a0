use crate::domain::entities::{
    Notification, NotificationFeedState, NotificationFilter, PetStatus, ReadStatus,
};
use crate::presentation::middleware::ValidatedCommand;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationResponse {
    pub id: i64,
    pub message: String,
    pub is_read: bool,
    pub pet_status: PetStatus,
    pub created_at: String,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            message: notification.message,
            is_read: notification.is_read,
            pet_status: notification.pet_status,
            created_at: notification.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationFeedResponse {
    pub notifications: Vec<NotificationResponse>,
    pub unread_count: usize,
}

impl From<NotificationFeedState> for NotificationFeedResponse {
    fn from(state: NotificationFeedState) -> Self {
        Self {
            notifications: state.items.into_iter().map(Into::into).collect(),
            unread_count: state.unread_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NotificationFilterRequest {
    #[validate(custom(function = "validate_known_pet_status"))]
    pub pet_status: Option<PetStatus>,
    pub read_status: Option<ReadStatus>,
}

impl ValidatedCommand for NotificationFilterRequest {}

fn validate_known_pet_status(status: &PetStatus) -> Result<(), ValidationError> {
    if *status == PetStatus::Other {
        let mut error = ValidationError::new("pet_status");
        error.message = Some("Pet status must be one of lost, found or adopt".into());
        return Err(error);
    }
    Ok(())
}

impl From<NotificationFilterRequest> for NotificationFilter {
    fn from(request: NotificationFilterRequest) -> Self {
        Self {
            pet_status: request.pet_status,
            read_status: request.read_status,
        }
    }
}
