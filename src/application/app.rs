use crate::{
    domain::{
        entities::AuthState,
        error::DomainResult,
        repositories::DynTokenStore,
        services::{
            DynNotificationSyncService, DynSessionService, DynUserDetailsService,
            NotificationSyncService, SessionService, UserDetailsService,
        },
    },
    infrastructure::{
        config::ClientConfig,
        gateway::ApiGatewayClient,
        repositories::{HttpAuthRepository, HttpNotificationRepository, HttpUserRepository},
    },
    presentation::controllers::{NotificationController, SessionController, UserController},
};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

struct Bridge {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Wires the gateway, repositories and services together.
///
/// `start` connects session transitions to the notification poller and the
/// user cache; nothing polls before it is called.
pub struct PetopiaApp {
    config: ClientConfig,
    session: DynSessionService,
    notifications: DynNotificationSyncService,
    user_details: DynUserDetailsService,
    bridge: Mutex<Option<Bridge>>,
}

impl PetopiaApp {
    pub async fn new(config: ClientConfig, token_store: DynTokenStore) -> DomainResult<Self> {
        let client = ApiGatewayClient::builder()
            .base_url(config.api_base_url.clone())
            .timeout(config.request_timeout)
            .build()?;

        let auth_repository = Arc::new(HttpAuthRepository::new(
            client.clone(),
            config.endpoints.clone(),
        ));
        let notification_repository = Arc::new(HttpNotificationRepository::new(
            client.clone(),
            config.endpoints.clone(),
        ));
        let user_repository = Arc::new(HttpUserRepository::new(client, config.endpoints.clone()));

        let session = Arc::new(SessionService::restore(token_store, auth_repository).await?);
        let notifications = Arc::new(NotificationSyncService::new(
            notification_repository,
            session.clone(),
            config.poll_interval,
        ));
        let user_details = Arc::new(UserDetailsService::new(
            user_repository,
            session.clone(),
            config.user_cache_ttl,
        ));

        info!("Petopia client configured for {}", config.api_base_url);
        Ok(Self {
            config,
            session,
            notifications,
            user_details,
            bridge: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> DynSessionService {
        self.session.clone()
    }

    pub fn notifications(&self) -> DynNotificationSyncService {
        self.notifications.clone()
    }

    pub fn user_details(&self) -> DynUserDetailsService {
        self.user_details.clone()
    }

    pub fn session_controller(&self) -> SessionController {
        SessionController::new(self.session.clone(), self.user_details.clone())
    }

    pub fn notification_controller(&self) -> NotificationController {
        NotificationController::new(self.notifications.clone())
    }

    pub fn user_controller(&self) -> UserController {
        UserController::new(self.user_details.clone())
    }

    pub fn is_started(&self) -> bool {
        self.bridge.lock().is_some()
    }

    /// Applies the current session state, then follows every transition.
    /// Calling it again while started does nothing.
    pub fn start(&self) {
        let mut bridge = self.bridge.lock();
        if bridge.is_some() {
            debug!("Session bridge already running");
            return;
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_bridge(
            self.session.subscribe(),
            self.notifications.clone(),
            self.user_details.clone(),
            cancel.clone(),
        ));
        *bridge = Some(Bridge { cancel, handle });
        info!("Session bridge started");
    }

    pub async fn shutdown(&self) {
        let bridge = self.bridge.lock().take();
        if let Some(Bridge { cancel, handle }) = bridge {
            cancel.cancel();
            if let Err(e) = handle.await {
                warn!("Session bridge ended abnormally: {}", e);
            }
        }
        self.notifications.stop_polling();
        info!("Petopia client shut down");
    }
}

async fn run_bridge(
    mut states: watch::Receiver<AuthState>,
    notifications: DynNotificationSyncService,
    user_details: DynUserDetailsService,
    cancel: CancellationToken,
) {
    let apply = |state: AuthState| {
        debug!("Session transition: {:?}", state);
        if !state.is_authenticated() {
            user_details.invalidate();
        }
        notifications.on_session_change(state);
    };

    let initial = *states.borrow_and_update();
    apply(initial);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = *states.borrow_and_update();
                apply(state);
            }
        }
    }
}
