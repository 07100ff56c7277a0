use crate::domain::{
    entities::{AuthState, Session, UserSummary},
    error::{DomainError, DomainResult},
    events::{BroadcastEventPublisher, EventPublisher, LogoutReason, SessionEvent},
    repositories::{DynAuthRepository, DynTokenStore},
};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::{broadcast, watch, Mutex};
use tracing::{debug, info, warn};

/// Token plus the session generation it was read under.
///
/// Results of a call made with these credentials are only applied while
/// `generation` is still current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    pub token: String,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct SessionInner {
    session: Session,
    generation: u64,
}

/// Owns the authenticated/unauthenticated state of the running app.
///
/// Every mutation goes through `mutation`, so the token store and the
/// in-memory session never disagree; the last login or logout wins.
/// Readers use the synchronous accessors and never hold a lock across an
/// await point.
pub struct SessionService {
    token_store: DynTokenStore,
    auth_repository: DynAuthRepository,
    inner: RwLock<SessionInner>,
    mutation: Mutex<()>,
    state: watch::Sender<AuthState>,
    events: BroadcastEventPublisher,
}

pub type DynSessionService = Arc<SessionService>;

impl SessionService {
    /// Resolves the initial state from the token store. No network round-trip.
    pub async fn restore(
        token_store: DynTokenStore,
        auth_repository: DynAuthRepository,
    ) -> DomainResult<Self> {
        let tokens = token_store.get().await?;
        let session = Session::from_tokens(tokens);
        let initial = session.state();
        info!("Restored session state: {:?}", initial);

        let (state, _) = watch::channel(initial);
        Ok(Self {
            token_store,
            auth_repository,
            inner: RwLock::new(SessionInner {
                session,
                generation: 0,
            }),
            mutation: Mutex::new(()),
            state,
            events: BroadcastEventPublisher::new(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().session.state().is_authenticated()
    }

    pub fn auth_state(&self) -> AuthState {
        self.inner.read().session.state()
    }

    pub fn user(&self) -> Option<UserSummary> {
        self.inner.read().session.user.clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.read().session.access_token.clone()
    }

    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    pub fn credentials(&self) -> Option<SessionCredentials> {
        let inner = self.inner.read();
        inner
            .session
            .access_token
            .clone()
            .map(|token| SessionCredentials {
                token,
                generation: inner.generation,
            })
    }

    /// Runs `apply` only if the session is still authenticated under
    /// `generation`. The read lock is held for the duration of `apply`, so a
    /// concurrent logout cannot interleave with it.
    pub fn run_if_current<R>(&self, generation: u64, apply: impl FnOnce() -> R) -> Option<R> {
        let inner = self.inner.read();
        if inner.generation != generation || !inner.session.state().is_authenticated() {
            return None;
        }
        Some(apply())
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn stored_username(&self) -> DomainResult<Option<String>> {
        self.token_store.username().await
    }

    /// Stores the profile for the session that fetched it. Returns `false`
    /// when that session has already ended or been replaced.
    pub fn set_user(&self, generation: u64, user: UserSummary) -> bool {
        let mut inner = self.inner.write();
        if inner.generation != generation || !inner.session.state().is_authenticated() {
            return false;
        }
        inner.session.user = Some(user);
        true
    }

    pub async fn announce_user_update(&self, user_id: i64) -> DomainResult<()> {
        self.events
            .publish_event(SessionEvent::user_updated(user_id))
            .await
    }

    pub async fn login(
        &self,
        access_token: String,
        refresh_token: Option<String>,
        user: Option<UserSummary>,
    ) -> DomainResult<()> {
        let username = user.as_ref().map(|u| u.username.clone());
        self.begin_session(access_token, refresh_token, user, username)
            .await
    }

    pub async fn login_with_credentials(&self, username: &str, password: &str) -> DomainResult<()> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(DomainError::ValidationError(
                "Username and password are required".to_string(),
            ));
        }

        let pair = self.auth_repository.obtain_token(username, password).await?;
        self.begin_session(pair.access, pair.refresh, None, Some(username.to_string()))
            .await
    }

    // Tokens and username are written under one hold of `mutation`, so a
    // concurrent logout either clears both or runs before either is written.
    async fn begin_session(
        &self,
        access_token: String,
        refresh_token: Option<String>,
        user: Option<UserSummary>,
        username: Option<String>,
    ) -> DomainResult<()> {
        if access_token.is_empty() {
            return Err(DomainError::ValidationError(
                "Access token must not be empty".to_string(),
            ));
        }

        let _guard = self.mutation.lock().await;
        self.token_store
            .set(access_token.clone(), refresh_token.clone())
            .await?;
        if let Some(username) = &username {
            self.token_store.set_username(username.clone()).await?;
        }

        let generation = {
            let mut inner = self.inner.write();
            inner.generation += 1;
            inner.session = Session {
                access_token: Some(access_token),
                refresh_token,
                user,
            };
            inner.generation
        };

        info!("Session authenticated (generation {})", generation);
        // Sent even when already authenticated: a login over an existing
        // session is still a new session for every subscriber.
        self.state.send_replace(AuthState::Authenticated);
        self.events
            .publish_event(SessionEvent::logged_in(username, generation))
            .await
    }

    /// Returns `true` when this call performed the transition.
    pub async fn logout(&self) -> DomainResult<bool> {
        let _guard = self.mutation.lock().await;
        self.end_session(LogoutReason::UserRequested).await
    }

    /// Forced logout after the backend rejected a token read under `generation`.
    ///
    /// Overlapping failures from the same generation collapse into a single
    /// logout; a failure from a superseded generation is ignored.
    pub async fn expire_session(&self, generation: u64) -> DomainResult<bool> {
        let _guard = self.mutation.lock().await;
        if self.generation() != generation {
            debug!(
                "Ignoring expiry for stale generation {} (current {})",
                generation,
                self.generation()
            );
            return Ok(false);
        }
        self.end_session(LogoutReason::SessionExpired).await
    }

    /// Exchanges the stored refresh token for a new pair. Caller-initiated only.
    pub async fn refresh_session(&self) -> DomainResult<()> {
        let (refresh_token, generation) = {
            let inner = self.inner.read();
            if !inner.session.state().is_authenticated() {
                return Err(DomainError::SessionExpired);
            }
            let refresh_token = inner.session.refresh_token.clone().ok_or_else(|| {
                DomainError::ValidationError("No refresh token available".to_string())
            })?;
            (refresh_token, inner.generation)
        };

        let pair = match self.auth_repository.refresh_token(&refresh_token).await {
            Ok(pair) => pair,
            Err(DomainError::SessionExpired) => {
                self.expire_session(generation).await?;
                return Err(DomainError::SessionExpired);
            }
            Err(e) => return Err(e),
        };

        let _guard = self.mutation.lock().await;
        if self.generation() != generation || !self.is_authenticated() {
            debug!("Discarding refreshed tokens for a session that ended");
            return Err(DomainError::SessionExpired);
        }

        let refresh = pair.refresh.or(Some(refresh_token));
        self.token_store
            .set(pair.access.clone(), refresh.clone())
            .await?;

        let generation = {
            let mut inner = self.inner.write();
            inner.generation += 1;
            inner.session.access_token = Some(pair.access);
            inner.session.refresh_token = refresh;
            inner.generation
        };

        info!("Session tokens refreshed (generation {})", generation);
        self.events
            .publish_event(SessionEvent::tokens_refreshed(generation))
            .await
    }

    // Caller must hold `mutation`.
    async fn end_session(&self, reason: LogoutReason) -> DomainResult<bool> {
        if !self.is_authenticated() {
            return Ok(false);
        }

        let cleared = self.token_store.clear().await;

        let generation = {
            let mut inner = self.inner.write();
            inner.generation += 1;
            inner.session = Session::default();
            inner.generation
        };

        match reason {
            LogoutReason::SessionExpired => warn!("Session expired, logged out"),
            LogoutReason::UserRequested => info!("Logged out"),
        }
        self.state.send_replace(AuthState::Unauthenticated);
        self.events
            .publish_event(SessionEvent::logged_out(reason, generation))
            .await?;

        cleared.map(|_| true)
    }
}
