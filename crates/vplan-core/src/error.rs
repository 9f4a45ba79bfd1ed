//! Core error types for vplan-core.
//!
//! Mirrors the failure taxonomy of the app: network failures are always
//! recoverable and mapped to a user-visible notice, auth failures are
//! surfaced to the caller, config failures abort before any network call,
//! and storage failures degrade to "value absent". Nothing in this crate
//! terminates the process.

use thiserror::Error;

/// Core error type for vplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Network-related errors (timeout, refused connection, DNS)
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Authentication errors (bad credentials, server-rejected login)
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// User-entered configuration errors (school id, server URL)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Persisted store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Network-specific errors. Always recovered locally.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// The fixed request timeout elapsed
    #[error("request timed out")]
    Timeout,

    /// Connection-level failure (refused, DNS, TLS)
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other transport failure
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_connect() {
            NetworkError::Connect(err.to_string())
        } else {
            NetworkError::Request(err.to_string())
        }
    }
}

/// Authentication-specific errors. Surfaced to the caller of `authenticate`.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The server rejected the login exchange
    #[error("login rejected by server (status {status})")]
    Rejected { status: u16 },

    /// The login exchange succeeded but returned no usable session id
    #[error("login response carried no session id")]
    MissingSessionId,
}

/// Errors in user-entered login data. Caught before any network call.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Username field left empty
    #[error("username must not be empty")]
    MissingUsername,

    /// Password field left empty
    #[error("password must not be empty")]
    MissingPassword,

    /// School id input carries no leading digit sequence
    #[error("invalid school id: {0:?}")]
    InvalidSchoolId(String),

    /// Server URL is not an absolute HTTPS origin
    #[error("invalid server URL: {0:?}")]
    InvalidServerUrl(String),

    /// A login was attempted with no server URL persisted
    #[error("no server URL configured")]
    MissingServerUrl,
}

/// Persisted-store errors. Consumers treat these as "value absent".
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing store rejected or failed the operation
    #[error("credential store failure: {0}")]
    Backend(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
