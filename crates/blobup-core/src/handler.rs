//! UploadHandler - one upload-and-report invocation per trigger

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::error::UploadError;
use crate::models::{DisplaySink, FileSelection, Outcome};
use crate::transport::UploadTransport;

/// Drives the upload flow: validate, send, report, clear
///
/// The selection and the display are passed in per call; the transport is
/// fixed at construction. Concurrent calls sharing a display are not
/// coordinated, so whichever resolves last leaves its outcome on screen.
#[derive(Clone)]
pub struct UploadHandler {
    transport: Arc<dyn UploadTransport>,
}

impl UploadHandler {
    pub fn new(transport: Arc<dyn UploadTransport>) -> Self {
        Self { transport }
    }

    pub fn from_transport<T: UploadTransport + 'static>(transport: T) -> Self {
        Self::new(Arc::new(transport))
    }

    /// Upload every file in `selection` and report the result on `display`.
    ///
    /// The display is reset to neutral first, then moves to uploading and
    /// finally to success or error; an empty selection goes straight to
    /// error without touching the network. The selection is empty when this
    /// returns, whatever the outcome. No error escapes: failures become
    /// `"Error: <message>"` on the display.
    #[instrument(skip_all, fields(files = selection.len()))]
    pub async fn handle_upload<D>(&self, selection: &mut FileSelection, display: &mut D) -> Outcome
    where
        D: DisplaySink + ?Sized,
    {
        display.render(&Outcome::neutral());

        let outcome = if selection.is_empty() {
            warn!("Upload triggered without any selected files");
            Outcome::error(UploadError::EmptySelection.display_message())
        } else {
            display.render(&Outcome::uploading());
            debug!(
                names = ?selection.names(),
                bytes = selection.total_bytes(),
                "Uploading selection"
            );

            match self.transport.upload(selection).await {
                Ok(response) => {
                    info!(message = %response.message, "Upload succeeded");
                    Outcome::success(response.message)
                }
                Err(e) => {
                    warn!(error = %e, "Upload failed");
                    Outcome::error(format!("Error: {}", e.display_message()))
                }
            }
        };

        display.render(&outcome);
        selection.clear();
        outcome
    }
}
