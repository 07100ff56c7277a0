use crate::domain::error::{DomainError, DomainResult};
use crate::infrastructure::env::get_env_or;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Five minutes. The interval is always configurable; this is only the fallback.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(300);
pub const DEFAULT_USER_CACHE_TTL: Duration = Duration::from_secs(600);

/// Backend paths, relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEndpoints {
    pub token: String,
    pub token_refresh: String,
    pub notifications: String,
    pub user_details: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            token: "/api/token/".to_string(),
            token_refresh: "/api/token/refresh/".to_string(),
            notifications: "/api/notifications/".to_string(),
            user_details: "/api/user/details/".to_string(),
        }
    }
}

impl ApiEndpoints {
    pub fn notification(&self, id: i64) -> String {
        format!("{}{}/", self.notifications, id)
    }

    pub fn notification_mark_read(&self, id: i64) -> String {
        format!("{}{}/mark_as_read/", self.notifications, id)
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub endpoints: ApiEndpoints,
    pub poll_interval: Duration,
    pub request_timeout: Option<Duration>,
    pub user_cache_ttl: Duration,
    pub storage_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            endpoints: ApiEndpoints::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: None,
            user_cache_ttl: DEFAULT_USER_CACHE_TTL,
            storage_path: None,
        }
    }
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Reads `PETOPIA_*` variables, falling back to defaults for anything unset.
    pub fn from_env() -> DomainResult<Self> {
        let defaults = Self::default();

        let poll_secs = parse_secs(
            "PETOPIA_POLL_INTERVAL_SECS",
            &get_env_or(
                "PETOPIA_POLL_INTERVAL_SECS",
                &defaults.poll_interval.as_secs().to_string(),
            ),
        )?;
        if poll_secs == 0 {
            return Err(DomainError::ValidationError(
                "PETOPIA_POLL_INTERVAL_SECS must be greater than 0".to_string(),
            ));
        }

        let timeout_secs = get_env_or("PETOPIA_REQUEST_TIMEOUT_SECS", "");
        let request_timeout = if timeout_secs.is_empty() {
            None
        } else {
            Some(Duration::from_secs(parse_secs(
                "PETOPIA_REQUEST_TIMEOUT_SECS",
                &timeout_secs,
            )?))
        };

        let cache_secs = parse_secs(
            "PETOPIA_USER_CACHE_TTL_SECS",
            &get_env_or(
                "PETOPIA_USER_CACHE_TTL_SECS",
                &defaults.user_cache_ttl.as_secs().to_string(),
            ),
        )?;

        let storage_path = get_env_or("PETOPIA_STORAGE_PATH", "");

        Ok(Self {
            api_base_url: get_env_or("PETOPIA_API_URL", DEFAULT_API_URL),
            endpoints: ApiEndpoints::default(),
            poll_interval: Duration::from_secs(poll_secs),
            request_timeout,
            user_cache_ttl: Duration::from_secs(cache_secs),
            storage_path: (!storage_path.is_empty()).then(|| PathBuf::from(storage_path)),
        })
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_user_cache_ttl(mut self, ttl: Duration) -> Self {
        self.user_cache_ttl = ttl;
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    /// Token database location: the configured path, else the platform data dir.
    pub fn resolve_storage_path(&self) -> DomainResult<PathBuf> {
        if let Some(path) = &self.storage_path {
            return Ok(path.clone());
        }
        let dirs = directories::ProjectDirs::from("com", "petopia", "petopia").ok_or_else(|| {
            DomainError::StorageError("Failed to get project directories".to_string())
        })?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;
        Ok(data_dir.join("session.db"))
    }
}

fn parse_secs(key: &str, value: &str) -> DomainResult<u64> {
    value.trim().parse::<u64>().map_err(|_| {
        DomainError::ValidationError(format!("{} must be a whole number of seconds", key))
    })
}
