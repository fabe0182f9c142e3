/// Records kept in the local store
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::remote::UserProfile;

/// A cached account. Only the password hash is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalUser {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl LocalUser {
    pub fn new(profile: UserProfile, password: &str) -> Self {
        Self {
            profile,
            password_hash: hash_password(password),
            created_at: Utc::now(),
        }
    }

    pub fn password_matches(&self, password: &str) -> bool {
        self.password_hash == hash_password(password)
    }
}

/// Hex-encoded SHA-256 of a password.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let h1 = hash_password("hunter2");
        assert_eq!(h1, hash_password("hunter2"));
        assert_ne!(h1, hash_password("hunter3"));
        assert_eq!(h1.len(), 64);
    }
}
