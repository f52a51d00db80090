//! Error types for upload invocations

use thiserror::Error;

/// Validation message shown when the handler is triggered with no files
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one file to upload.";

/// Message used when a failed response carries no `error` field
pub const UPLOAD_FAILED_FALLBACK: &str = "Upload failed";

/// Result type for upload operations
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors that can end an upload invocation
///
/// None of these escape [`crate::UploadHandler::handle_upload`]; they are
/// converted into error text on the display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// No files were selected, detected before any network call
    #[error("{}", EMPTY_SELECTION_MESSAGE)]
    EmptySelection,

    /// Connection failure, timeout, or any other network-level error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Response body could not be interpreted
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl UploadError {
    /// Create a server error, falling back to [`UPLOAD_FAILED_FALLBACK`]
    /// when the server did not provide a usable message.
    pub fn server(status: u16, message: Option<String>) -> Self {
        Self::Server {
            status,
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UPLOAD_FAILED_FALLBACK.to_string()),
        }
    }

    /// The text shown to the user after the `"Error: "` prefix.
    ///
    /// For [`UploadError::EmptySelection`] this is the complete validation
    /// message, which is rendered without a prefix.
    pub fn display_message(&self) -> String {
        match self {
            UploadError::EmptySelection => EMPTY_SELECTION_MESSAGE.to_string(),
            UploadError::Transport(msg) => msg.clone(),
            UploadError::Server { message, .. } => message.clone(),
            UploadError::Parse(msg) => msg.clone(),
        }
    }

    /// HTTP status associated with this error, if the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            UploadError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
