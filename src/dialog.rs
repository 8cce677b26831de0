//! Confirmation flow for destructive or navigation-abandoning actions.
//!
//! One state machine per screen: `Idle` until a confirmation is
//! requested, `Pending` while the prompt is showing, and back to `Idle`
//! once the user responds. Only a positive response hands the pending
//! action back for execution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a pending confirmation will do if the user confirms it.
///
/// The variant is the identifier that keeps "delete" and "abandon edit"
/// unambiguous when both flows share the same prompt mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmAction {
    /// Delete the task with this id.
    DeleteTask { task_id: i64 },

    /// Abandon an in-progress edit, discarding unsaved changes.
    AbandonEdit,
}

/// The user's answer to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmationResponse {
    /// Positive button.
    Confirmed,
    /// Negative button.
    Declined,
    /// Dismissed without choosing.
    Cancelled,
}

/// Configuration errors in the confirmation flow. These are programming
/// mistakes: fail fast rather than show a blank or ambiguous prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A confirmation was requested without a message to display.
    MissingMessage,
    /// A confirmation was requested while another is still pending.
    AlreadyPending,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingMessage => write!(f, "confirmation requested without a message"),
            ConfigError::AlreadyPending => write!(f, "a confirmation is already pending"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A fully-specified confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub action: ConfirmAction,
    pub message: String,
    pub positive_label: String,
    pub negative_label: String,
}

impl ConfirmationRequest {
    /// Build a request with default button labels. An empty message is a
    /// configuration error.
    pub fn new(action: ConfirmAction, message: impl Into<String>) -> Result<Self, ConfigError> {
        let message = message.into();
        if message.is_empty() {
            return Err(ConfigError::MissingMessage);
        }
        Ok(Self {
            action,
            message,
            positive_label: "OK".to_string(),
            negative_label: "Cancel".to_string(),
        })
    }

    pub fn with_positive_label(mut self, label: impl Into<String>) -> Self {
        self.positive_label = label.into();
        self
    }

    pub fn with_negative_label(mut self, label: impl Into<String>) -> Self {
        self.negative_label = label.into();
        self
    }
}

/// Per-screen confirmation state machine.
///
/// The delete prompt embeds the task's id and name as they were when the
/// prompt was requested; nothing guarantees the row still exists by the
/// time the user confirms, in which case the delete simply affects zero
/// rows.
#[derive(Default)]
pub struct ConfirmationFlow {
    pending: Option<ConfirmationRequest>,
}

impl ConfirmationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The request currently awaiting a response, if any.
    pub fn pending(&self) -> Option<&ConfirmationRequest> {
        self.pending.as_ref()
    }

    /// Enter the pending state with `request`.
    pub fn request(&mut self, request: ConfirmationRequest) -> Result<&ConfirmationRequest, ConfigError> {
        if self.pending.is_some() {
            return Err(ConfigError::AlreadyPending);
        }
        log::debug!("request: showing confirmation for {:?}", request.action);
        Ok(self.pending.insert(request))
    }

    /// Resolve the pending confirmation.
    ///
    /// A positive response hands the action back for the caller to
    /// execute; declined or cancelled returns `None` and leaves
    /// everything else unchanged. With nothing pending this is a no-op.
    pub fn resolve(&mut self, response: ConfirmationResponse) -> Option<ConfirmAction> {
        let request = self.pending.take()?;
        log::debug!("resolve: {:?} answered {response:?}", request.action);
        match response {
            ConfirmationResponse::Confirmed => Some(request.action),
            ConfirmationResponse::Declined | ConfirmationResponse::Cancelled => None,
        }
    }
}
