//! Request/response contracts for the AI-assisted flows.
//!
//! Both flows exchange camelCase JSON with the model host. Only the shapes
//! and their validation live here.

use crate::presentation::middleware::ValidatedCommand;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetMatchRequest {
    #[validate(length(min = 1, message = "Lifestyle is required"))]
    pub lifestyle: String,
    #[validate(length(min = 1, message = "Preferences are required"))]
    pub preferences: String,
}

impl ValidatedCommand for PetMatchRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetSuggestion {
    #[validate(length(min = 1))]
    pub pet_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub breed: String,
    pub age: String,
    pub description: String,
    #[validate(url(message = "Image URL must be valid"))]
    pub image_url: String,
    #[validate(length(min = 1, message = "Each suggestion needs a match reason"))]
    pub match_reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetMatchResponse {
    #[validate(
        length(min = 3, message = "At least three suggestions are required"),
        nested
    )]
    pub suggestions: Vec<PetSuggestion>,
}

impl ValidatedCommand for PetMatchResponse {}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CareAssistantRequest {
    #[validate(length(min = 1, message = "Pet type is required"))]
    pub pet_type: String,
    #[validate(length(min = 1, message = "Pet age is required"))]
    pub pet_age: String,
    #[validate(length(min = 1, message = "Pet breed is required"))]
    pub pet_breed: String,
    #[validate(length(min = 1, message = "Owner lifestyle is required"))]
    pub owner_lifestyle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_needs: Option<String>,
}

impl ValidatedCommand for CareAssistantRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CareAssistantResponse {
    #[validate(length(min = 1, message = "Care tips are required"))]
    pub care_tips: String,
    pub feeding_schedule: String,
    pub exercise_schedule: String,
    pub grooming_schedule: String,
    pub health_tips: String,
}

impl ValidatedCommand for CareAssistantResponse {}
