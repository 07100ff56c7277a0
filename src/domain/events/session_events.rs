use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogoutReason {
    UserRequested,
    SessionExpired,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SessionEvent {
    LoggedIn {
        username: Option<String>,
        generation: u64,
        logged_in_at: DateTime<Utc>,
    },
    LoggedOut {
        reason: LogoutReason,
        generation: u64,
        logged_out_at: DateTime<Utc>,
    },
    TokensRefreshed {
        generation: u64,
        refreshed_at: DateTime<Utc>,
    },
    UserUpdated {
        user_id: i64,
        updated_at: DateTime<Utc>,
    },
}

impl SessionEvent {
    pub fn logged_in(username: Option<String>, generation: u64) -> Self {
        Self::LoggedIn {
            username,
            generation,
            logged_in_at: Utc::now(),
        }
    }

    pub fn logged_out(reason: LogoutReason, generation: u64) -> Self {
        Self::LoggedOut {
            reason,
            generation,
            logged_out_at: Utc::now(),
        }
    }

    pub fn tokens_refreshed(generation: u64) -> Self {
        Self::TokensRefreshed {
            generation,
            refreshed_at: Utc::now(),
        }
    }

    pub fn user_updated(user_id: i64) -> Self {
        Self::UserUpdated {
            user_id,
            updated_at: Utc::now(),
        }
    }

    pub fn is_logout(&self) -> bool {
        matches!(self, Self::LoggedOut { .. })
    }
}
