use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

/// What a tick tells the poller to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerStatus {
    Stopped,
    Running { run_id: Uuid, interval: Duration },
}

#[derive(Debug)]
enum PollerState {
    Stopped,
    Running {
        run_id: Uuid,
        interval: Duration,
        cancel: CancellationToken,
    },
}

/// Recurring timer with an explicit Stopped/Running state machine.
///
/// At most one run is active: `start` cancels the previous run before
/// spawning the next one. The first tick fires immediately.
#[derive(Debug, Clone)]
pub struct Poller {
    name: &'static str,
    state: Arc<Mutex<PollerState>>,
}

impl Poller {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Arc::new(Mutex::new(PollerState::Stopped)),
        }
    }

    pub fn status(&self) -> PollerStatus {
        match &*self.state.lock() {
            PollerState::Stopped => PollerStatus::Stopped,
            PollerState::Running {
                run_id, interval, ..
            } => PollerStatus::Running {
                run_id: *run_id,
                interval: *interval,
            },
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.status(), PollerStatus::Running { .. })
    }

    pub fn start<F, Fut>(&self, interval: Duration, tick: F) -> Uuid
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = PollOutcome> + Send + 'static,
    {
        let run_id = Uuid::new_v4();
        let cancel = CancellationToken::new();

        {
            let mut state = self.state.lock();
            if let PollerState::Running {
                run_id: previous,
                cancel: previous_cancel,
                ..
            } = &*state
            {
                debug!("{}: replacing poller run {}", self.name, previous);
                previous_cancel.cancel();
            }
            *state = PollerState::Running {
                run_id,
                interval,
                cancel: cancel.clone(),
            };
        }

        info!(
            "{}: poller run {} started, interval {:?}",
            self.name, run_id, interval
        );

        let name = self.name;
        let state = self.state.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                if tick().await == PollOutcome::Stop {
                    info!("{}: poller run {} stopped itself", name, run_id);
                    let mut state = state.lock();
                    if matches!(&*state, PollerState::Running { run_id: current, .. } if *current == run_id)
                    {
                        *state = PollerState::Stopped;
                    }
                    break;
                }

                if cancel.is_cancelled() {
                    break;
                }
            }

            debug!("{}: poller run {} exited", name, run_id);
        });

        run_id
    }

    /// Returns `true` if a run was active.
    pub fn stop(&self) -> bool {
        let mut state = self.state.lock();
        match std::mem::replace(&mut *state, PollerState::Stopped) {
            PollerState::Running { run_id, cancel, .. } => {
                cancel.cancel();
                info!("{}: poller run {} stopped", self.name, run_id);
                true
            }
            PollerState::Stopped => false,
        }
    }
}
