//! blobup client library
//!
//! Provides a reqwest-based transport that posts a file selection to the
//! blob uploader endpoint as one multipart request.
//!
//! # Example
//!
//! ```rust,no_run
//! use blobup_client::UploaderClient;
//! use blobup_core::{FileSelection, OutcomeDisplay, UploadHandler};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = UploaderClient::for_server("http://localhost:7071")?;
//!     let handler = UploadHandler::from_transport(client);
//!
//!     let mut selection = FileSelection::from_paths(&["report.csv"]).await?;
//!     let mut display = OutcomeDisplay::new();
//!     let outcome = handler.handle_upload(&mut selection, &mut display).await;
//!
//!     println!("{} ({})", outcome.text, display.class_name());
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides a mock endpoint and a throwaway server:
//!
//! ```rust,ignore
//! use blobup_client::testing::{MockUploadEndpoint, TestServer};
//!
//! let endpoint = MockUploadEndpoint::default();
//! let server = TestServer::start_mock(&endpoint).await?;
//! let reply = server.client.upload_files(&selection).await?;
//! assert_eq!(endpoint.request_count(), 1);
//! ```

mod client;
pub mod config;
mod error;
pub mod testing;

pub use client::UploaderClient;
pub use config::{ConfigError, TimeoutsConfig, UploaderConfig, UploaderConfigBuilder};
pub use error::{Result, UploaderClientError};

// Re-export core types for convenience
pub use blobup_core::{
    FileSelection, Outcome, SelectedFile, UploadError, UploadHandler, UploadResponse,
};
