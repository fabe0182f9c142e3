/// Types exchanged with the hosted auth and REST backend
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Supervisor,
    Admin,
}

/// Account details shared by the remote and local sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub level: Option<u8>,
}

/// Payload accepted by signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub level: Option<u8>,
}

/// Payload accepted by login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User object as returned by the auth service
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RemoteUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: RemoteUserMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct RemoteUserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub level: Option<u8>,
}

/// Token/signup response; signup without auto-confirm returns the bare user
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RemoteAuthResponse {
    Session { user: RemoteUser },
    User(RemoteUser),
}

impl RemoteAuthResponse {
    pub fn into_profile(self, fallback_email: &str) -> UserProfile {
        let user = match self {
            RemoteAuthResponse::Session { user } => user,
            RemoteAuthResponse::User(user) => user,
        };

        UserProfile {
            id: user.id,
            email: user.email.unwrap_or_else(|| fallback_email.to_string()),
            full_name: user.user_metadata.full_name.unwrap_or_default(),
            role: user.user_metadata.role.unwrap_or_default(),
            level: user.user_metadata.level,
        }
    }
}
