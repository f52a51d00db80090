//! blobup-core - Core types and the upload handler for blobup
//!
//! This crate holds the parts of the upload flow that do not depend on a
//! concrete HTTP stack: the file selection and display models, the
//! [`UploadTransport`] seam, and the [`UploadHandler`] that drives one
//! upload-and-report invocation.

pub mod error;
pub mod handler;
pub mod models;
pub mod transport;

pub use error::{
    UploadError, UploadResult, EMPTY_SELECTION_MESSAGE, UPLOAD_FAILED_FALLBACK,
};
pub use handler::UploadHandler;
pub use models::*;
pub use transport::{parse_upload_reply, ErrorBody, UploadResponse, UploadTransport};
