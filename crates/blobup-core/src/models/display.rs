//! Outcome display models

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Text shown while the request is in flight
pub const UPLOADING_TEXT: &str = "Uploading...";

/// Status tag of the outcome display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    /// Empty, nothing to report
    #[default]
    Neutral,
    /// Request issued, waiting for the server
    Uploading,
    /// Upload accepted by the server
    Success,
    /// Validation, transport, or server failure
    Error,
}

impl DisplayStatus {
    /// Style class applied to the display region.
    ///
    /// The uploading state uses neutral styling.
    pub fn class_name(self) -> &'static str {
        match self {
            DisplayStatus::Neutral | DisplayStatus::Uploading => "",
            DisplayStatus::Success => "success",
            DisplayStatus::Error => "error",
        }
    }

    /// Whether this status ends an invocation
    pub fn is_terminal(self) -> bool {
        matches!(self, DisplayStatus::Success | DisplayStatus::Error)
    }
}

/// What the display region shows at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Outcome {
    pub status: DisplayStatus,
    #[serde(rename = "message")]
    pub text: String,
}

impl Outcome {
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn uploading() -> Self {
        Self {
            status: DisplayStatus::Uploading,
            text: UPLOADING_TEXT.to_string(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            status: DisplayStatus::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            status: DisplayStatus::Error,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == DisplayStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == DisplayStatus::Error
    }
}

/// Destination for outcome updates
///
/// Every update overwrites what was shown before.
pub trait DisplaySink {
    fn render(&mut self, outcome: &Outcome);
}

/// In-memory display region
///
/// Keeps the current outcome plus the sequence of statuses it went through,
/// which makes the state machine observable in tests.
#[derive(Debug, Clone, Default)]
pub struct OutcomeDisplay {
    current: Outcome,
    transitions: Vec<DisplayStatus>,
}

impl OutcomeDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self) -> &Outcome {
        &self.current
    }

    pub fn text(&self) -> &str {
        &self.current.text
    }

    pub fn status(&self) -> DisplayStatus {
        self.current.status
    }

    pub fn class_name(&self) -> &'static str {
        self.current.status.class_name()
    }

    /// A neutral display with no text is hidden
    pub fn is_visible(&self) -> bool {
        self.current.status != DisplayStatus::Neutral || !self.current.text.is_empty()
    }

    /// Statuses rendered since creation or the last [`OutcomeDisplay::clear_transitions`]
    pub fn transitions(&self) -> &[DisplayStatus] {
        &self.transitions
    }

    pub fn clear_transitions(&mut self) {
        self.transitions.clear();
    }
}

impl DisplaySink for OutcomeDisplay {
    fn render(&mut self, outcome: &Outcome) {
        self.current = outcome.clone();
        self.transitions.push(outcome.status);
    }
}

/// A display shared between concurrent invocations; the last update wins.
impl<S: DisplaySink + ?Sized> DisplaySink for Arc<Mutex<S>> {
    fn render(&mut self, outcome: &Outcome) {
        self.lock().render(outcome);
    }
}
