//! Volume selection rules for one archive copy.
//!
//! A copy chooses its eligible volumes by pool expression, by start/end
//! range, by explicit list, or any combination. At least one mechanism must
//! be present, and range endpoints on removable media must pass the
//! volume-identifier lexical rule.

use serde::{Deserialize, Serialize};

use crate::catalog::{MessageCatalog, VolumeIdValidator};
use crate::error::{PolicyError, PolicyResult, RangeSide};
use crate::model::{Choice, FieldId, MediaType};

/// Catalog key for the localized "start - end" range phrase.
pub const RANGE_PHRASE_KEY: &str = "copy.volume.range";

/// An inclusive start/end volume range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VolumeRange {
    /// First volume of the range.
    pub start: String,
    /// Last volume of the range.
    pub end: String,
}

/// Validated volume selection for one archive copy.
///
/// Invariant: at least one of `pool`, `range`, `list` is present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VolumeSpecification {
    /// Named pool expression, when selected.
    pub pool: Option<String>,
    /// Start/end range, always both sides.
    pub range: Option<VolumeRange>,
    /// Free-form volume list expression.
    pub list: Option<String>,
}

impl VolumeSpecification {
    /// Validate raw selection fields into a specification.
    ///
    /// Rules run in form order: media selected, endpoint lexical checks for
    /// removable media, both-or-neither range sides, then the requirement
    /// that some selection mechanism exists.
    ///
    /// # Errors
    ///
    /// `MissingSelection` when no media family is selected,
    /// `InvalidVolumeId` naming the failing endpoint, `IncompleteRange`
    /// naming the missing side, `NoSelectionMechanism` when pool, range, and
    /// list are all absent.
    pub fn validate(
        media: Choice<MediaType>,
        pool: &Choice<String>,
        range_start: &str,
        range_end: &str,
        list: &str,
        volume_ids: &dyn VolumeIdValidator,
    ) -> PolicyResult<Self> {
        let Choice::Selected(media) = media else {
            return Err(PolicyError::missing(FieldId::MediaType));
        };

        let pool = pool
            .as_ref()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(ToString::to_string);
        let start = range_start.trim();
        let end = range_end.trim();
        let list = list.trim();

        if !media.is_disk() {
            if !start.is_empty() && !volume_ids.is_valid(start) {
                return Err(PolicyError::volume_id(RangeSide::Start, start));
            }
            if !end.is_empty() && !volume_ids.is_valid(end) {
                return Err(PolicyError::volume_id(RangeSide::End, end));
            }
        }

        let range = match (start.is_empty(), end.is_empty()) {
            (false, false) => Some(VolumeRange {
                start: start.to_string(),
                end: end.to_string(),
            }),
            (false, true) => {
                return Err(PolicyError::IncompleteRange {
                    missing: RangeSide::End,
                });
            }
            (true, false) => {
                return Err(PolicyError::IncompleteRange {
                    missing: RangeSide::Start,
                });
            }
            (true, true) => None,
        };

        let list = (!list.is_empty()).then(|| list.to_string());

        if pool.is_none() && range.is_none() && list.is_none() {
            return Err(PolicyError::NoSelectionMechanism);
        }

        Ok(Self { pool, range, list })
    }

    /// Whether any selection mechanism is present.
    #[must_use]
    pub const fn has_selection_mechanism(&self) -> bool {
        self.pool.is_some() || self.range.is_some() || self.list.is_some()
    }

    /// Human-readable rendering of the range and list, comma-joined when
    /// both are present. The pool is reported separately by the summary
    /// step.
    ///
    /// # Errors
    ///
    /// `ExternalLookup` when the message catalog cannot resolve the range
    /// phrase.
    pub fn summary(&self, catalog: &dyn MessageCatalog) -> PolicyResult<String> {
        let range_text = match &self.range {
            Some(range) => Some(
                catalog
                    .resolve(RANGE_PHRASE_KEY, &[&range.start, &range.end])
                    .map_err(|failure| PolicyError::external("catalog", failure))?,
            ),
            None => None,
        };

        Ok(match (range_text, &self.list) {
            (Some(range), Some(list)) => format!("{range}, {list}"),
            (Some(range), None) => range,
            (None, Some(list)) => list.clone(),
            (None, None) => String::new(),
        })
    }
}
