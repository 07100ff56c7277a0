use crate::{
    domain::services::DynUserDetailsService,
    presentation::dtos::{ErrorNotice, UpdateUserRequest, UserResponse},
};

pub struct UserController {
    user_details: DynUserDetailsService,
}

impl UserController {
    pub fn new(user_details: DynUserDetailsService) -> Self {
        Self { user_details }
    }

    pub async fn current_user(&self) -> Option<UserResponse> {
        self.user_details.get().await.map(Into::into)
    }

    pub async fn refresh(&self) -> Result<UserResponse, ErrorNotice> {
        Ok(self.user_details.refresh().await?.into())
    }

    pub async fn update(&self, request: UpdateUserRequest) -> Result<UserResponse, ErrorNotice> {
        Ok(self.user_details.update(&request.into()).await?.into())
    }
}
