//! UploadTransport trait - the network seam of the upload handler

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{UploadError, UploadResult};
use crate::models::FileSelection;

/// Body of a successful upload response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Human-readable message, shown verbatim
    pub message: String,
}

/// Body of a failed upload response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Sends a file selection to the upload endpoint
///
/// Implementations issue exactly one request per call, carrying every file
/// of the selection in order, and map whatever comes back (or fails to come
/// back) onto [`UploadResult`].
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn upload(&self, selection: &FileSelection) -> UploadResult<UploadResponse>;
}

/// Interpret the status and raw body of an upload response.
///
/// A success status requires a JSON body with a string `message`. Any other
/// status becomes [`UploadError::Server`] carrying the body's `error` field,
/// or the fallback message when the body has none or is not JSON.
///
/// On a failure status a body that does not parse is not reported as
/// [`UploadError::Parse`]; the parse error is dropped in favour of the
/// fallback message.
pub fn parse_upload_reply(status: u16, body: &[u8]) -> UploadResult<UploadResponse> {
    if (200..300).contains(&status) {
        serde_json::from_slice::<UploadResponse>(body)
            .map_err(|e| UploadError::Parse(e.to_string()))
    } else {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error);
        Err(UploadError::server(status, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_reply() {
        let reply = parse_upload_reply(200, br#"{"message":"2 files uploaded"}"#).unwrap();
        assert_eq!(reply.message, "2 files uploaded");

        let reply = parse_upload_reply(201, br#"{"message":"OK","extra":1}"#).unwrap();
        assert_eq!(reply.message, "OK");
    }

    #[test]
    fn test_success_reply_without_message() {
        let err = parse_upload_reply(200, br#"{"status":"ok"}"#).unwrap_err();
        assert!(matches!(err, UploadError::Parse(_)));
    }

    #[test]
    fn test_success_reply_not_json() {
        let err = parse_upload_reply(200, b"<html>ok</html>").unwrap_err();
        assert!(matches!(err, UploadError::Parse(_)));
    }

    #[test]
    fn test_failure_reply_with_error() {
        let err = parse_upload_reply(413, br#"{"error":"too large"}"#).unwrap_err();
        assert_eq!(
            err,
            UploadError::Server {
                status: 413,
                message: "too large".to_string()
            }
        );
    }

    #[test]
    fn test_failure_reply_fallbacks() {
        let err = parse_upload_reply(500, b"{}").unwrap_err();
        assert_eq!(err.display_message(), "Upload failed");

        let err = parse_upload_reply(502, b"Bad Gateway").unwrap_err();
        assert_eq!(err.display_message(), "Upload failed");

        let err = parse_upload_reply(400, br#"{"error":42}"#).unwrap_err();
        assert_eq!(err.display_message(), "Upload failed");
    }
}
