use crate::{
    domain::services::{DynSessionService, DynUserDetailsService},
    presentation::dtos::{ErrorNotice, LoginRequest, SessionStatusResponse},
};
use tracing::warn;

pub struct SessionController {
    session: DynSessionService,
    user_details: DynUserDetailsService,
}

impl SessionController {
    pub fn new(session: DynSessionService, user_details: DynUserDetailsService) -> Self {
        Self {
            session,
            user_details,
        }
    }

    /// Exchanges credentials for tokens, then loads the profile.
    ///
    /// A failed profile fetch does not undo the login.
    pub async fn login(&self, request: LoginRequest) -> Result<SessionStatusResponse, ErrorNotice> {
        self.session
            .login_with_credentials(&request.username, &request.password)
            .await?;

        if let Err(e) = self.user_details.refresh().await {
            warn!("Logged in but failed to load user details: {}", e);
        }
        self.status().await
    }

    pub async fn logout(&self) -> Result<SessionStatusResponse, ErrorNotice> {
        self.session.logout().await?;
        self.status().await
    }

    pub async fn status(&self) -> Result<SessionStatusResponse, ErrorNotice> {
        let authenticated = self.session.is_authenticated();
        let username = if authenticated {
            self.session.stored_username().await?
        } else {
            None
        };
        let user = self.user_details.get().await.map(Into::into);

        Ok(SessionStatusResponse {
            authenticated,
            username,
            user,
        })
    }
}
