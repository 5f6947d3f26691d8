//! Step identity and per-step status records.
//!
//! Every page the wizard can show is one `StepId`; the session keeps one
//! `StepRecord` per planned step and updates it on display and submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::PendingAlert;

/// Identity of one wizard page within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    /// Media parameters page for one copy.
    CopyMedia(u32),
    /// Option page for one copy; tape or disk per the copy's kind.
    CopyOptions(u32),
    /// Cross-copy summary page.
    Summary,
}

impl StepId {
    /// Stable label for logs and metrics.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::CopyMedia(copy) => format!("copy_media_{copy}"),
            Self::CopyOptions(copy) => format!("copy_options_{copy}"),
            Self::Summary => "summary".to_string(),
        }
    }

    /// The copy number this step configures, when copy-scoped.
    #[must_use]
    pub const fn copy(self) -> Option<u32> {
        match self {
            Self::CopyMedia(copy) | Self::CopyOptions(copy) => Some(copy),
            Self::Summary => None,
        }
    }
}

/// Lifecycle of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Never shown to the user.
    Unvisited,
    /// Shown at least once, nothing submitted yet.
    Displayed,
    /// Last submission validated.
    Valid,
    /// Last submission was rejected.
    Invalid,
}

impl StepStatus {
    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unvisited => "unvisited",
            Self::Displayed => "displayed",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

/// Recorded state of one step in the session plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// The step this record tracks.
    pub step: StepId,
    /// Current lifecycle status.
    pub status: StepStatus,
    /// Alert from the step's last rejected submission, kept so re-entering
    /// the step can re-arm it.
    pub alert: Option<PendingAlert>,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

impl StepRecord {
    /// Fresh, unvisited record for `step`.
    #[must_use]
    pub fn unvisited(step: StepId) -> Self {
        Self {
            step,
            status: StepStatus::Unvisited,
            alert: None,
            updated_at: Utc::now(),
        }
    }
}

/// Ordered step plan for a session of `total_copies` copies: media then
/// options for each copy, followed by the summary.
#[must_use]
pub fn plan(total_copies: u32) -> Vec<StepId> {
    let mut steps = Vec::new();
    for copy in 1..=total_copies {
        steps.push(StepId::CopyMedia(copy));
        steps.push(StepId::CopyOptions(copy));
    }
    steps.push(StepId::Summary);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_orders_media_before_options_per_copy() {
        assert_eq!(
            plan(2),
            vec![
                StepId::CopyMedia(1),
                StepId::CopyOptions(1),
                StepId::CopyMedia(2),
                StepId::CopyOptions(2),
                StepId::Summary,
            ]
        );
    }

    #[test]
    fn zero_copies_still_plan_the_summary() {
        assert_eq!(plan(0), vec![StepId::Summary]);
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(StepId::CopyMedia(3).label(), "copy_media_3");
        assert_eq!(StepId::CopyOptions(1).label(), "copy_options_1");
        assert_eq!(StepId::Summary.label(), "summary");
        assert_eq!(StepId::Summary.copy(), None);
        assert_eq!(StepId::CopyOptions(2).copy(), Some(2));
        assert_eq!(StepStatus::Invalid.as_str(), "invalid");
    }
}
