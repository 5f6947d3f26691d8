//! Error types for wizard session operations.

use arcopy_policy::PolicyError;
use thiserror::Error;

use crate::step::StepId;

/// Primary error type for wizard session operations.
#[derive(Debug, Error)]
pub enum WizardError {
    /// Copy number outside the session's `1..=total_copies` range.
    #[error("unknown copy number")]
    UnknownCopy {
        /// Copy number supplied by the caller.
        copy: u32,
    },
    /// Step absent from the session's step plan.
    #[error("step outside the wizard plan")]
    UnknownStep {
        /// Step identifier supplied by the caller.
        step: StepId,
    },
    /// Submitted copy parameters failed validation.
    #[error("copy parameters rejected")]
    Validation {
        /// First validation failure, in form order.
        source: PolicyError,
    },
    /// A selection-list or label lookup failed or timed out.
    #[error("selection lookup failed")]
    Lookup {
        /// Underlying external-lookup failure.
        source: PolicyError,
    },
}

impl WizardError {
    /// The policy failure behind this error, when one exists.
    #[must_use]
    pub const fn policy(&self) -> Option<&PolicyError> {
        match self {
            Self::Validation { source } | Self::Lookup { source } => Some(source),
            Self::UnknownCopy { .. } | Self::UnknownStep { .. } => None,
        }
    }
}

/// Convenience alias for wizard results.
pub type WizardResult<T> = Result<T, WizardError>;
