//! Error types for the WeChat Pay client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, PayError>;

/// Main error type for client operations
///
/// These errors surface from construction, signing and the endpoint helpers
/// that build requests. [`crate::PayClient::execute`] never returns them;
/// it folds every failure into a [`crate::PayResponse`].
#[derive(Error, Debug)]
pub enum PayError {
    /// A signing or verification operation was attempted without the key it needs
    #[error("Missing key material: no {key} key configured")]
    MissingKeyMaterial { key: &'static str },

    /// Key material could not be parsed
    #[error("Invalid key: {message}")]
    InvalidKey { message: String },

    /// The request path handed to the signer is not path+query
    #[error("Invalid request path '{path}': expected path and query only")]
    InvalidPath { path: String },

    /// An order or refund number that cannot stand as one path segment
    #[error("Invalid id '{id}': must be a non-empty path segment other than '.' or '..'")]
    InvalidId { id: String },

    /// URL parse error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The RSA primitive failed
    #[error("Signing error: {message}")]
    Signing { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PayError {
    /// Create a missing private key error
    pub fn missing_private_key() -> Self {
        Self::MissingKeyMaterial { key: "private" }
    }

    /// Create a missing public key error
    pub fn missing_public_key() -> Self {
        Self::MissingKeyMaterial { key: "public" }
    }

    /// Create an invalid key error
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey {
            message: message.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create an invalid id error
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId { id: id.into() }
    }

    /// Create a signing error
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error means a key was never configured
    pub fn is_missing_key_material(&self) -> bool {
        matches!(self, Self::MissingKeyMaterial { .. })
    }
}
