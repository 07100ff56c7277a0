use petopia_lib::infrastructure::config::ClientConfig;
use serde_json::{json, Value};
use std::time::Duration;

pub const ACCESS_TOKEN: &str = "access-token-1";
pub const REFRESH_TOKEN: &str = "refresh-token-1";

pub fn notification_json(id: i64, pet_status: &str, is_read: bool) -> Value {
    json!({
        "id": id,
        "message": format!("Update on pet #{}", id),
        "is_read": is_read,
        "pet_status": pet_status,
        "created_at": "2024-05-01T10:00:00Z"
    })
}

pub fn unread_feed(ids: &[i64]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| notification_json(*id, "lost", false))
            .collect(),
    )
}

pub fn user_json(display_name: &str) -> Value {
    json!({
        "id": 42,
        "username": "mochi",
        "display_name": display_name,
        "email": "mochi@example.com",
        "avatar_url": null
    })
}

/// Config pointed at a stub backend, with a short poll interval.
pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig::new(base_url)
        .with_poll_interval(Duration::from_secs(3600))
        .with_request_timeout(Duration::from_secs(5))
}

/// Polls `condition` until it holds or five seconds pass.
pub async fn eventually<F>(mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
