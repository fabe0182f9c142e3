//! Error types for the registrar portal.

use thiserror::Error;

/// Errors that can occur while serving portal operations.
#[derive(Debug, Error)]
pub enum PortalError {
    /// Network/HTTP request to the hosted backend failed
    #[error("Network error: {message}")]
    Network { message: String },

    /// The hosted backend answered with a non-success status
    #[error("Remote returned {status}: {message}")]
    Remote { status: u16, message: String },

    /// No remote backend is configured
    #[error("Remote backend not configured")]
    RemoteUnavailable,

    /// Login failed against every available source
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Signup attempted for an email that is already registered
    #[error("User already exists: {email}")]
    UserAlreadyExists { email: String },

    /// The local fallback store could not be read or written
    #[error("Local store error: {message}")]
    LocalStore { message: String },

    /// A payload could not be encoded or decoded
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Configuration was missing or malformed
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// URL parsing/construction failed
    #[error("URL error: {message}")]
    UrlError { message: String },
}

impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        PortalError::Network {
            message: err.to_string(),
        }
    }
}

impl From<rusqlite::Error> for PortalError {
    fn from(err: rusqlite::Error) -> Self {
        PortalError::LocalStore {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for PortalError {
    fn from(err: url::ParseError) -> Self {
        PortalError::UrlError {
            message: err.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, PortalError>;
