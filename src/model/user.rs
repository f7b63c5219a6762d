use serde::{Deserialize, Serialize};

/// Backend identifier for any entity. Treated as opaque by the client.
pub type EntityId = i64;

/// A user reference as embedded in projects and tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: EntityId,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserSummary {
    /// Full name when the backend has one, otherwise the username.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

/// An authenticated session as returned by the sign-in endpoint.
///
/// The session is an explicit value: it is loaded once and handed to the
/// API client, never looked up from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(alias = "accessToken")]
    pub token: String,
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Session {
    /// Roles without the `ROLE_` prefix, for display.
    pub fn display_roles(&self) -> Vec<String> {
        self.roles
            .iter()
            .map(|r| r.strip_prefix("ROLE_").unwrap_or(r).to_string())
            .collect()
    }
}
