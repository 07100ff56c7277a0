use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

#[derive(Deserialize)]
struct RawUserSummary {
    id: i64,
    username: String,
    #[serde(default, alias = "displayName")]
    display_name: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    email: String,
    #[serde(default, alias = "avatarUrl", alias = "profile_picture")]
    avatar_url: Option<String>,
}

// The backend sometimes omits display_name and sends first/last name instead.
impl<'de> Deserialize<'de> for UserSummary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawUserSummary::deserialize(deserializer)?;
        let display_name = raw
            .display_name
            .filter(|name| !name.trim().is_empty())
            .or_else(|| {
                let full = [raw.first_name, raw.last_name]
                    .into_iter()
                    .flatten()
                    .filter(|part| !part.trim().is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                (!full.is_empty()).then_some(full)
            })
            .unwrap_or_else(|| raw.username.clone());

        Ok(UserSummary {
            id: raw.id,
            username: raw.username,
            display_name,
            email: raw.email,
            avatar_url: raw.avatar_url.filter(|url| !url.is_empty()),
        })
    }
}

/// Fields accepted by the profile update endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredTokens {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

impl StoredTokens {
    pub fn is_present(&self) -> bool {
        self.access.as_deref().is_some_and(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated)
    }
}

/// In-memory session bundle. `access_token` is present iff authenticated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserSummary>,
}

impl Session {
    pub fn from_tokens(tokens: StoredTokens) -> Self {
        if !tokens.is_present() {
            return Self::default();
        }
        Self {
            access_token: tokens.access,
            refresh_token: tokens.refresh,
            user: None,
        }
    }

    pub fn state(&self) -> AuthState {
        if self.access_token.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_user_summary_prefers_display_name() {
        let user: UserSummary = serde_json::from_value(json!({
            "id": 7,
            "username": "mochi",
            "display_name": "Mochi Owner",
            "email": "mochi@example.com",
            "avatar_url": "https://cdn.example.com/mochi.png"
        }))
        .unwrap();
        assert_eq!(user.display_name, "Mochi Owner");
        assert_eq!(
            user.avatar_url.as_deref(),
            Some("https://cdn.example.com/mochi.png")
        );
    }

    #[test]
    fn test_user_summary_falls_back_to_names() {
        let user: UserSummary = serde_json::from_value(json!({
            "id": 7,
            "username": "mochi",
            "first_name": "Ana",
            "last_name": "Lopez",
            "email": "ana@example.com",
            "avatar_url": ""
        }))
        .unwrap();
        assert_eq!(user.display_name, "Ana Lopez");
        assert_eq!(user.avatar_url, None);

        let user: UserSummary =
            serde_json::from_value(json!({"id": 8, "username": "rex"})).unwrap();
        assert_eq!(user.display_name, "rex");
    }

    #[test]
    fn test_session_from_tokens() {
        let session = Session::from_tokens(StoredTokens {
            access: Some("A".into()),
            refresh: Some("R".into()),
        });
        assert_eq!(session.state(), AuthState::Authenticated);

        let session = Session::from_tokens(StoredTokens {
            access: Some(String::new()),
            refresh: Some("R".into()),
        });
        assert_eq!(session.state(), AuthState::Unauthenticated);
        assert_eq!(session.refresh_token, None);
    }
}
