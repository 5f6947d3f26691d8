//! User-facing alerts raised by rejected submissions and failed lookups.

use arcopy_policy::{FieldId, PolicyError};
use serde::{Deserialize, Serialize};

/// How an alert is presented to the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Rendered on the current page beside the highlighted field.
    Inline,
    /// Leaves the wizard flow for the console's error page.
    Blocking,
}

/// Alert waiting to be shown, held in the session's single pending slot and
/// in the step record that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAlert {
    /// Field the console highlights, when the failure is field-scoped.
    pub field: Option<FieldId>,
    /// Message-catalog key for the user-facing text.
    pub message_key: String,
    /// Positional arguments for the catalog entry.
    pub args: Vec<String>,
    /// Collaborator error code; 0 for field-scoped failures.
    pub code: i32,
    /// Presentation kind.
    pub kind: AlertKind,
    /// Operator-facing detail for logs.
    pub detail: String,
}

impl PendingAlert {
    /// Build the alert for a policy failure. External lookup failures become
    /// blocking alerts carrying the collaborator's code; field-scoped
    /// failures are inline with code 0.
    #[must_use]
    pub fn from_policy(err: &PolicyError) -> Self {
        let (code, kind, detail) = match err {
            PolicyError::ExternalLookup {
                operation,
                code,
                message,
            } => (*code, AlertKind::Blocking, format!("{operation}: {message}")),
            _ => (0, AlertKind::Inline, err.to_string()),
        };
        Self {
            field: err.field(),
            message_key: err.message_key().to_string(),
            args: err.message_args(),
            code,
            kind,
            detail,
        }
    }

    /// Downgrade to inline presentation, for pages that render lookup
    /// failures in place instead of redirecting.
    #[must_use]
    pub const fn inline(mut self) -> Self {
        self.kind = AlertKind::Inline;
        self
    }
}
