use crate::domain::{
    entities::{UserSummary, UserUpdate},
    error::{DomainError, DomainResult},
    repositories::DynUserRepository,
    services::session_service::{DynSessionService, SessionCredentials},
};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Current user's profile, cached per session generation.
///
/// Keying by generation means a profile fetched for one session is never
/// served to the next one, even before `invalidate` runs.
pub struct UserDetailsService {
    repository: DynUserRepository,
    session: DynSessionService,
    cache: Cache<u64, UserSummary>,
}

pub type DynUserDetailsService = Arc<UserDetailsService>;

impl UserDetailsService {
    pub fn new(repository: DynUserRepository, session: DynSessionService, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(4).time_to_live(ttl).build();
        Self {
            repository,
            session,
            cache,
        }
    }

    /// Cached profile, falling back to the copy held by the session.
    /// Never touches the network.
    pub async fn get(&self) -> Option<UserSummary> {
        let generation = self.session.credentials()?.generation;
        if let Some(user) = self.cache.get(&generation).await {
            return Some(user);
        }

        let user = self.session.user()?;
        if self.session.generation() == generation {
            self.cache.insert(generation, user.clone()).await;
        }
        Some(user)
    }

    pub async fn refresh(&self) -> DomainResult<UserSummary> {
        let credentials = self.require_credentials()?;
        let user = self
            .guard(
                &credentials,
                self.repository.find_current(&credentials.token).await,
            )
            .await?;
        self.store(&credentials, user.clone()).await;
        Ok(user)
    }

    pub async fn update(&self, update: &UserUpdate) -> DomainResult<UserSummary> {
        let credentials = self.require_credentials()?;
        let user = self
            .guard(
                &credentials,
                self.repository
                    .update_current(update, &credentials.token)
                    .await,
            )
            .await?;
        self.store(&credentials, user.clone()).await;
        if let Err(e) = self.session.announce_user_update(user.id).await {
            warn!("Failed to announce profile update: {}", e);
        }
        Ok(user)
    }

    pub fn invalidate(&self) {
        debug!("Invalidating cached user details");
        self.cache.invalidate_all();
    }

    async fn store(&self, credentials: &SessionCredentials, user: UserSummary) {
        if self.session.set_user(credentials.generation, user.clone()) {
            self.cache.insert(credentials.generation, user).await;
        } else {
            debug!("Session changed while fetching user details, result dropped");
        }
    }

    fn require_credentials(&self) -> DomainResult<SessionCredentials> {
        self.session
            .credentials()
            .ok_or(DomainError::SessionExpired)
    }

    async fn guard<T>(
        &self,
        credentials: &SessionCredentials,
        result: DomainResult<T>,
    ) -> DomainResult<T> {
        if let Err(DomainError::SessionExpired) = &result {
            if let Err(e) = self.session.expire_session(credentials.generation).await {
                error!("Failed to clear session after expiry: {}", e);
            }
        }
        result
    }
}
