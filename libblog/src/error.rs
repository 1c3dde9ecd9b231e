//! Error types for Blogcast

use thiserror::Error;

use crate::types::PostId;

pub type Result<T> = std::result::Result<T, BlogError>;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Post not found: {0}")]
    NotFound(PostId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl BlogError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BlogError::InvalidInput(_) => 3,
            BlogError::NotFound(_) => 4,
            BlogError::Remote(_) => 1,
            BlogError::Config(_) => 1,
        }
    }

    /// True when the remote store answered with 404
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BlogError::NotFound(_) | BlogError::Remote(RemoteError::Api { status: 404, .. })
        )
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Error, Debug, Clone)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteError::Parse(err.to_string())
        } else {
            RemoteError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Parse(err.to_string())
    }
}
