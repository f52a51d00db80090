//! Error types for uploader client construction

use blobup_core::UploadError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for uploader client operations
pub type Result<T> = std::result::Result<T, UploaderClientError>;

/// Errors that can occur while setting up an uploader client
///
/// Failures of an upload itself are reported as [`UploadError`] so the
/// handler can render them.
#[derive(Error, Debug)]
pub enum UploaderClientError {
    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Map a reqwest failure raised while sending or reading a request
pub(crate) fn transport_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        UploadError::Transport("Request timed out".to_string())
    } else if err.is_connect() {
        UploadError::Transport(format!("Connection failed: {}", err))
    } else {
        UploadError::Transport(err.to_string())
    }
}
