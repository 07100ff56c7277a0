use crate::domain::{
    entities::{AuthState, Notification, NotificationFeedState, NotificationFilter},
    error::{DomainError, DomainResult},
    repositories::DynNotificationRepository,
    services::{
        background::{PollOutcome, Poller},
        session_service::{DynSessionService, SessionCredentials},
    },
};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Keeps the unread notification feed in sync with the backend.
///
/// Every result is applied through [`SessionService::run_if_current`], so a
/// response that arrives after logout (or after a new login) is dropped.
///
/// [`SessionService::run_if_current`]: super::SessionService::run_if_current
pub struct NotificationSyncService {
    repository: DynNotificationRepository,
    session: DynSessionService,
    feed: watch::Sender<NotificationFeedState>,
    poller: Poller,
    poll_interval: Duration,
}

pub type DynNotificationSyncService = Arc<NotificationSyncService>;

impl NotificationSyncService {
    pub fn new(
        repository: DynNotificationRepository,
        session: DynSessionService,
        poll_interval: Duration,
    ) -> Self {
        let (feed, _) = watch::channel(NotificationFeedState::default());
        Self {
            repository,
            session,
            feed,
            poller: Poller::new("notification-sync"),
            poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    pub fn state(&self) -> NotificationFeedState {
        self.feed.borrow().clone()
    }

    pub fn unread_count(&self) -> usize {
        self.feed.borrow().unread_count
    }

    pub fn subscribe(&self) -> watch::Receiver<NotificationFeedState> {
        self.feed.subscribe()
    }

    /// Replaces any running poller. The first fetch happens right away.
    pub fn start_polling(self: &Arc<Self>, interval: Duration) {
        let service: Weak<Self> = Arc::downgrade(self);
        self.poller.start(interval, move || {
            let service = service.clone();
            async move {
                match service.upgrade() {
                    Some(service) => service.poll_tick().await,
                    None => PollOutcome::Stop,
                }
            }
        });
    }

    pub fn stop_polling(&self) {
        self.poller.stop();
    }

    pub fn on_session_change(self: &Arc<Self>, state: AuthState) {
        match state {
            AuthState::Authenticated => {
                info!("Session active, starting notification sync");
                self.feed.send_replace(NotificationFeedState::default());
                self.start_polling(self.poll_interval);
            }
            AuthState::Unauthenticated => {
                info!("Session ended, stopping notification sync");
                self.stop_polling();
                self.feed.send_replace(NotificationFeedState::default());
            }
        }
    }

    /// One fetch on demand. Unlike a poll tick, failures reach the caller.
    pub async fn refresh(&self) -> DomainResult<()> {
        let credentials = self.require_credentials()?;
        self.sync(&credentials).await
    }

    pub async fn mark_as_read(&self, id: i64) -> DomainResult<()> {
        let credentials = self.require_credentials()?;
        self.guard(
            &credentials,
            self.repository.mark_as_read(id, &credentials.token).await,
        )
        .await?;

        let applied = self.session.run_if_current(credentials.generation, || {
            self.feed.send_if_modified(|feed| {
                let had_item = feed.items.iter().any(|n| n.id == id);
                feed.apply_mark_read(id);
                had_item
            })
        });
        if applied.is_none() {
            debug!("Session changed before mark-read of {} was applied", id);
        }
        Ok(())
    }

    pub async fn delete_notification(&self, id: i64) -> DomainResult<()> {
        let credentials = self.require_credentials()?;
        self.guard(
            &credentials,
            self.repository.delete(id, &credentials.token).await,
        )
        .await?;

        let applied = self.session.run_if_current(credentials.generation, || {
            self.feed
                .send_if_modified(|feed| feed.apply_delete(id).is_some())
        });
        if applied.is_none() {
            debug!("Session changed before delete of {} was applied", id);
        }
        Ok(())
    }

    /// Filtered listing for a full feed view. The unread feed is left alone.
    pub async fn fetch_notifications(
        &self,
        filter: &NotificationFilter,
    ) -> DomainResult<Vec<Notification>> {
        let credentials = self.require_credentials()?;
        self.guard(
            &credentials,
            self.repository.find_all(filter, &credentials.token).await,
        )
        .await
    }

    async fn poll_tick(&self) -> PollOutcome {
        let Some(credentials) = self.session.credentials() else {
            debug!("No active session, notification polling stops");
            return PollOutcome::Stop;
        };

        match self.sync(&credentials).await {
            Ok(()) => PollOutcome::Continue,
            Err(DomainError::SessionExpired) => PollOutcome::Stop,
            Err(e) => {
                warn!("Notification poll failed, keeping last snapshot: {}", e);
                PollOutcome::Continue
            }
        }
    }

    async fn sync(&self, credentials: &SessionCredentials) -> DomainResult<()> {
        let items = self
            .guard(
                credentials,
                self.repository
                    .find_all(&NotificationFilter::unread(), &credentials.token)
                    .await,
            )
            .await?;

        let count = items.len();
        let applied = self.session.run_if_current(credentials.generation, || {
            self.feed
                .send_replace(NotificationFeedState::from_server(items));
        });
        match applied {
            Some(()) => debug!("Notification feed updated with {} items", count),
            None => debug!(
                "Discarding notifications fetched under generation {}",
                credentials.generation
            ),
        }
        Ok(())
    }

    fn require_credentials(&self) -> DomainResult<SessionCredentials> {
        self.session
            .credentials()
            .ok_or(DomainError::SessionExpired)
    }

    // A rejected token ends the session it was read under, then the error
    // still goes back to the caller.
    async fn guard<T>(
        &self,
        credentials: &SessionCredentials,
        result: DomainResult<T>,
    ) -> DomainResult<T> {
        if let Err(DomainError::SessionExpired) = &result {
            self.force_logout(credentials.generation).await;
        }
        result
    }

    // The poller belongs to whichever session is current, so it is only
    // stopped when this call actually ended that session.
    async fn force_logout(&self, generation: u64) {
        match self.session.expire_session(generation).await {
            Ok(true) => {
                self.poller.stop();
                info!("Forced logout after the backend rejected the session");
            }
            Ok(false) => debug!("Session already ended, skipping forced logout"),
            Err(e) => error!("Failed to clear session after expiry: {}", e),
        }
    }
}
