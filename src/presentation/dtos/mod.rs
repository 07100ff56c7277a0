pub mod ai_flows;
pub mod error;
pub mod notification;
pub mod session;

pub use ai_flows::{
    CareAssistantRequest, CareAssistantResponse, PetMatchRequest, PetMatchResponse, PetSuggestion,
};

pub use error::ErrorNotice;

pub use notification::{
    NotificationFeedResponse, NotificationFilterRequest, NotificationListResponse,
    NotificationResponse,
};

pub use session::{LoginRequest, SessionStatusResponse, UpdateUserRequest, UserResponse};
