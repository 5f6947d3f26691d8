//! # Design
//!
//! - Structured, constant-message errors for every validation outcome.
//! - Each field-scoped failure names the `FieldId` the console highlights
//!   and the message-catalog key used to render it.
//! - Validation errors never abort a wizard session; external lookup
//!   failures carry the collaborator's error code and detail.

use thiserror::Error;

use crate::catalog::LookupFailure;
use crate::model::FieldId;

/// Result type for policy validation.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Which side of a volume range was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSide {
    /// The first volume of the range.
    Start,
    /// The last volume of the range.
    End,
}

/// Errors produced while validating archive-copy parameters.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A required choice field was left unselected.
    #[error("required selection missing")]
    MissingSelection {
        /// Choice field that was left unselected.
        field: FieldId,
    },
    /// A text field held a malformed or out-of-range value.
    #[error("malformed field value")]
    Parse {
        /// Field that failed to parse.
        field: FieldId,
        /// Offending value as submitted.
        value: String,
        /// Static reason for the failure.
        reason: &'static str,
    },
    /// A range endpoint violated the volume-identifier lexical rule.
    #[error("invalid volume identifier")]
    InvalidVolumeId {
        /// Which endpoint failed (`range_start` or `range_end`).
        field: FieldId,
        /// Offending identifier as submitted.
        value: String,
    },
    /// Exactly one side of the volume range was supplied.
    #[error("incomplete volume range")]
    IncompleteRange {
        /// The side that was left empty.
        missing: RangeSide,
    },
    /// None of pool, range, or list was supplied.
    #[error("no volume selection mechanism")]
    NoSelectionMechanism,
    /// An external collaborator call failed or timed out.
    #[error("external lookup failed")]
    ExternalLookup {
        /// Collaborator operation that failed.
        operation: &'static str,
        /// Error code reported by the collaborator.
        code: i32,
        /// Detail text reported by the collaborator.
        message: String,
    },
}

impl PolicyError {
    pub(crate) const fn missing(field: FieldId) -> Self {
        Self::MissingSelection { field }
    }

    pub(crate) fn parse(field: FieldId, value: impl Into<String>, reason: &'static str) -> Self {
        Self::Parse {
            field,
            value: value.into(),
            reason,
        }
    }

    pub(crate) fn volume_id(side: RangeSide, value: impl Into<String>) -> Self {
        Self::InvalidVolumeId {
            field: side.field(),
            value: value.into(),
        }
    }

    /// Wrap a collaborator failure, keeping its code and detail text.
    #[must_use]
    pub fn external(operation: &'static str, failure: LookupFailure) -> Self {
        Self::ExternalLookup {
            operation,
            code: failure.code,
            message: failure.message,
        }
    }

    /// The field the console should highlight, when the error is
    /// field-scoped.
    ///
    /// Unit selectors highlight their companion magnitude field; the console
    /// labels the pair with the magnitude widget.
    #[must_use]
    pub const fn field(&self) -> Option<FieldId> {
        match self {
            Self::MissingSelection { field } => Some(match field {
                FieldId::ArchiveAgeUnit => FieldId::ArchiveAge,
                FieldId::StartAgeUnit => FieldId::StartAge,
                FieldId::StartSizeUnit => FieldId::StartSize,
                FieldId::DriveMinUnit => FieldId::DriveMin,
                FieldId::DriveMaxUnit => FieldId::DriveMax,
                other => *other,
            }),
            Self::Parse { field, .. } | Self::InvalidVolumeId { field, .. } => Some(*field),
            Self::IncompleteRange { missing } => Some(missing.field()),
            Self::NoSelectionMechanism => Some(FieldId::RangeStart),
            Self::ExternalLookup { .. } => None,
        }
    }

    /// Message-catalog key for rendering this error to the user.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::MissingSelection { field } => match field {
                FieldId::ArchiveAgeUnit => "copy.error.age_unit",
                FieldId::MediaType => "copy.error.media_type",
                FieldId::StartAgeUnit => "copy.error.start_age_unit",
                FieldId::StartSizeUnit => "copy.error.start_size_unit",
                FieldId::DriveMinUnit => "copy.error.drive_min_unit",
                FieldId::DriveMaxUnit => "copy.error.drive_max_unit",
                _ => "copy.error.selection",
            },
            Self::Parse { field, .. } => match field {
                FieldId::ArchiveAge => "copy.error.age",
                FieldId::StartAge => "copy.error.start_age",
                FieldId::StartCount => "copy.error.start_count",
                FieldId::StartSize => "copy.error.start_size",
                FieldId::Drives => "copy.error.drives",
                FieldId::DriveMin => "copy.error.drive_min",
                FieldId::DriveMax => "copy.error.drive_max",
                FieldId::RecycleHwm => "copy.error.recycle_hwm",
                FieldId::MinGain => "copy.error.min_gain",
                FieldId::Notification => "copy.error.notification",
                FieldId::ReservationAttributes => "copy.error.reservation",
                _ => "copy.error.value",
            },
            Self::InvalidVolumeId { field, .. } => match field {
                FieldId::RangeEnd => "copy.error.volume_end",
                _ => "copy.error.volume_start",
            },
            Self::IncompleteRange { missing } => match missing {
                RangeSide::Start => "copy.error.range_missing_start",
                RangeSide::End => "copy.error.range_missing_end",
            },
            Self::NoSelectionMechanism => "copy.error.no_volumes",
            Self::ExternalLookup { .. } => "copy.error.external",
        }
    }

    /// Positional arguments for the message-catalog entry.
    #[must_use]
    pub fn message_args(&self) -> Vec<String> {
        match self {
            Self::Parse { value, .. } | Self::InvalidVolumeId { value, .. } => {
                vec![value.clone()]
            }
            Self::ExternalLookup { code, message, .. } => {
                vec![code.to_string(), message.clone()]
            }
            Self::MissingSelection { .. }
            | Self::IncompleteRange { .. }
            | Self::NoSelectionMechanism => Vec::new(),
        }
    }
}

impl RangeSide {
    /// The form field this side maps to.
    #[must_use]
    pub const fn field(self) -> FieldId {
        match self {
            Self::Start => FieldId::RangeStart,
            Self::End => FieldId::RangeEnd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_scoped_errors_name_their_field() {
        let err = PolicyError::missing(FieldId::MediaType);
        assert_eq!(err.field(), Some(FieldId::MediaType));
        assert_eq!(err.message_key(), "copy.error.media_type");

        let err = PolicyError::parse(FieldId::ArchiveAge, "abc", "must be a non-negative integer");
        assert_eq!(err.field(), Some(FieldId::ArchiveAge));
        assert_eq!(err.message_key(), "copy.error.age");
        assert_eq!(err.message_args(), vec!["abc".to_string()]);
    }

    #[test]
    fn unit_selectors_highlight_their_magnitude_field() {
        let err = PolicyError::missing(FieldId::ArchiveAgeUnit);
        assert_eq!(err.field(), Some(FieldId::ArchiveAge));
        assert_eq!(err.message_key(), "copy.error.age_unit");

        let err = PolicyError::missing(FieldId::StartSizeUnit);
        assert_eq!(err.field(), Some(FieldId::StartSize));
        assert_eq!(err.message_key(), "copy.error.start_size_unit");
    }

    #[test]
    fn range_sides_stay_distinguishable() {
        let start = PolicyError::volume_id(RangeSide::Start, "bad one");
        let end = PolicyError::volume_id(RangeSide::End, "bad one");
        assert_ne!(start.field(), end.field());
        assert_ne!(start.message_key(), end.message_key());

        let missing_end = PolicyError::IncompleteRange {
            missing: RangeSide::End,
        };
        assert_eq!(missing_end.field(), Some(FieldId::RangeEnd));
        assert_eq!(missing_end.message_key(), "copy.error.range_missing_end");
    }

    #[test]
    fn no_selection_mechanism_points_at_the_range_field() {
        let err = PolicyError::NoSelectionMechanism;
        assert_eq!(err.field(), Some(FieldId::RangeStart));
        assert_eq!(err.message_key(), "copy.error.no_volumes");
    }

    #[test]
    fn external_lookup_carries_code_and_detail() {
        let err = PolicyError::external(
            "pools",
            LookupFailure::new(-2023, "backend unreachable"),
        );
        assert_eq!(err.field(), None);
        assert_eq!(
            err.message_args(),
            vec!["-2023".to_string(), "backend unreachable".to_string()]
        );
        assert_eq!(err.to_string(), "external lookup failed");
    }
}
