use std::env;

/// Returns the value of an environment variable or a default value if not found.
///
/// # Examples
///
/// ```rust
/// let url = petopia_lib::infrastructure::env::get_env_or("PETOPIA_API_URL", "http://localhost:8000");
/// assert!(!url.is_empty());
/// ```
pub fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Like [`get_env_or`], but blank values count as unset.
pub fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
