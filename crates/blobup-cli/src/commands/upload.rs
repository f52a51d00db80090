//! Upload command - send files to the blob uploader endpoint

use anyhow::{Context, Result};
use blobup_core::{FileSelection, Outcome, SelectedFile, UploadHandler};
use std::path::PathBuf;

use crate::output::{OutputContext, OutputFormat, TerminalDisplay};

/// Read the given files and upload them in one request
///
/// Returns the outcome that was rendered; an empty file list is passed
/// through so the handler reports the validation error.
pub async fn upload(
    handler: &UploadHandler,
    files: &[PathBuf],
    ctx: &OutputContext,
) -> Result<Outcome> {
    let mut selection = FileSelection::new();
    for path in files {
        let file = SelectedFile::from_path(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        selection.push(file);
    }

    if !selection.is_empty() && ctx.format == OutputFormat::Text {
        ctx.info(&format!(
            "Selected {} file(s), {} bytes",
            selection.len(),
            selection.total_bytes()
        ));
    }

    let mut display = TerminalDisplay::new(ctx);
    Ok(handler.handle_upload(&mut selection, &mut display).await)
}

/// Process exit status for an upload outcome: 0 on success, 1 otherwise
pub fn exit_status(outcome: &Outcome) -> u8 {
    if outcome.is_success() {
        0
    } else {
        1
    }
}
