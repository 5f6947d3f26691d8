//! Typed field values shared across the policy engine.
//!
//! # Design
//! - Pure data carriers used by the validators and the wizard aggregator.
//! - Choice fields reach the engine as a sum type; sentinel strings belong to
//!   the presentation adapter, never to this crate.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Time unit attached to archive-age style values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    /// Seconds.
    Second,
    /// Minutes.
    Minute,
    /// Hours.
    Hour,
    /// Days.
    Day,
    /// Weeks.
    Week,
    /// Years.
    Year,
}

impl AgeUnit {
    /// Render the unit as its lowercase string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Year => "year",
        }
    }

    /// Message-catalog key for the unit's display label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Second => "unit.age.seconds",
            Self::Minute => "unit.age.minutes",
            Self::Hour => "unit.age.hours",
            Self::Day => "unit.age.days",
            Self::Week => "unit.age.weeks",
            Self::Year => "unit.age.years",
        }
    }
}

impl FromStr for AgeUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "second" => Ok(Self::Second),
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "year" => Ok(Self::Year),
            other => Err(anyhow!("invalid age unit '{other}'")),
        }
    }
}

/// Size unit attached to byte-quantity thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    /// Plain bytes.
    Bytes,
    /// Kilobytes (1024 bytes).
    Kilobytes,
    /// Megabytes.
    Megabytes,
    /// Gigabytes.
    Gigabytes,
    /// Terabytes.
    Terabytes,
    /// Petabytes.
    Petabytes,
}

impl SizeUnit {
    /// Render the unit as its lowercase string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::Kilobytes => "kilobytes",
            Self::Megabytes => "megabytes",
            Self::Gigabytes => "gigabytes",
            Self::Terabytes => "terabytes",
            Self::Petabytes => "petabytes",
        }
    }

    /// Bytes represented by one unit of this magnitude.
    ///
    /// Wide enough that `value * multiplier` cannot overflow for any `u64`
    /// value, which keeps threshold comparisons exact.
    #[must_use]
    pub const fn bytes_multiplier(self) -> u128 {
        match self {
            Self::Bytes => 1,
            Self::Kilobytes => 1 << 10,
            Self::Megabytes => 1 << 20,
            Self::Gigabytes => 1 << 30,
            Self::Terabytes => 1 << 40,
            Self::Petabytes => 1 << 50,
        }
    }
}

impl FromStr for SizeUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bytes" => Ok(Self::Bytes),
            "kilobytes" => Ok(Self::Kilobytes),
            "megabytes" => Ok(Self::Megabytes),
            "gigabytes" => Ok(Self::Gigabytes),
            "terabytes" => Ok(Self::Terabytes),
            "petabytes" => Ok(Self::Petabytes),
            other => Err(anyhow!("invalid size unit '{other}'")),
        }
    }
}

/// Media family an archive copy writes to.
///
/// `Disk` is distinguished throughout the engine; every other family shares
/// the removable-volume range and list rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    /// Disk archive (directory-backed volumes).
    Disk,
    /// LTO tape family.
    Lto,
    /// DLT tape family.
    Dlt,
    /// DAT tape family.
    Dat,
    /// Sony AIT tape family.
    SonyAit,
    /// StorageTek 9840.
    T9840,
    /// StorageTek 9940.
    T9940,
    /// StorageTek T10000.
    T10000,
    /// IBM 3590.
    Ibm3590,
}

impl MediaType {
    /// Whether this is the distinguished disk family.
    #[must_use]
    pub const fn is_disk(self) -> bool {
        matches!(self, Self::Disk)
    }

    /// Render the media family as its snake-case string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disk => "disk",
            Self::Lto => "lto",
            Self::Dlt => "dlt",
            Self::Dat => "dat",
            Self::SonyAit => "sony_ait",
            Self::T9840 => "t9840",
            Self::T9940 => "t9940",
            Self::T10000 => "t10000",
            Self::Ibm3590 => "ibm3590",
        }
    }
}

impl FromStr for MediaType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disk" => Ok(Self::Disk),
            "lto" => Ok(Self::Lto),
            "dlt" => Ok(Self::Dlt),
            "dat" => Ok(Self::Dat),
            "sony_ait" => Ok(Self::SonyAit),
            "t9840" => Ok(Self::T9840),
            "t9940" => Ok(Self::T9940),
            "t10000" => Ok(Self::T10000),
            "ibm3590" => Ok(Self::Ibm3590),
            other => Err(anyhow!("invalid media type '{other}'")),
        }
    }
}

/// How an offline source file is brought back before the copy is written.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OfflineCopyMethod {
    /// Copy directly from the offline source.
    Direct,
    /// Stage ahead of the write position.
    StageAhead,
    /// Stage the whole file before writing.
    StageAll,
}

impl OfflineCopyMethod {
    /// Render the method as its snake-case string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::StageAhead => "stage_ahead",
            Self::StageAll => "stage_all",
        }
    }
}

/// Owner facet of the reservation method selector.
///
/// The selector is a single dropdown in the console, so the variants are
/// mutually exclusive even though each maps to its own mask bit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OwnerAttribute {
    /// Reserve volumes per file owner.
    User,
    /// Reserve volumes per owning group.
    Group,
    /// Reserve volumes per directory.
    Directory,
}

impl OwnerAttribute {
    /// Render the attribute as its snake-case string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::Directory => "directory",
        }
    }

    /// Message-catalog key for the attribute's display label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::User => "reservation.owner.user",
            Self::Group => "reservation.owner.group",
            Self::Directory => "reservation.owner.directory",
        }
    }
}

/// A choice-field value at the engine boundary.
///
/// Replaces the console's "no value selected" sentinel string: the adapter
/// translates the sentinel once, and everything past the boundary matches on
/// the sum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice<T> {
    /// The user picked a concrete value.
    Selected(T),
    /// The placeholder entry was left in place.
    Unselected,
}

impl<T> Choice<T> {
    /// Whether a concrete value was picked.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }

    /// Borrow the selected value, if any.
    #[must_use]
    pub const fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Selected(value) => Some(value),
            Self::Unselected => None,
        }
    }

    /// Convert into an `Option`, consuming the choice.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Selected(value) => Some(value),
            Self::Unselected => None,
        }
    }
}

impl<T> From<Option<T>> for Choice<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unselected, Self::Selected)
    }
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Self::Unselected
    }
}

/// Every form field the engine validates, used to scope errors and to tell
/// the console which widget to highlight on redisplay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    /// Archive age magnitude.
    ArchiveAge,
    /// Archive age unit selector.
    ArchiveAgeUnit,
    /// Media family selector.
    MediaType,
    /// Volume pool selector.
    PoolName,
    /// First volume of the range.
    RangeStart,
    /// Last volume of the range.
    RangeEnd,
    /// Free-form volume list.
    VolumeList,
    /// Reservation owner-attribute selector.
    ReservationAttributes,
    /// Reserve-by-set checkbox.
    ReserveBySet,
    /// Reserve-by-file-system checkbox.
    ReserveByFileSystem,
    /// Offline copy method selector.
    OfflineCopy,
    /// Start-age magnitude.
    StartAge,
    /// Start-age unit selector.
    StartAgeUnit,
    /// Start-count magnitude.
    StartCount,
    /// Start-size magnitude.
    StartSize,
    /// Start-size unit selector.
    StartSizeUnit,
    /// Maximum drive count.
    Drives,
    /// Minimum per-drive size magnitude.
    DriveMin,
    /// Minimum per-drive size unit selector.
    DriveMinUnit,
    /// Maximum per-drive size magnitude.
    DriveMax,
    /// Maximum per-drive size unit selector.
    DriveMaxUnit,
    /// Recycler high-water mark percentage.
    RecycleHwm,
    /// Ignore-recycling checkbox.
    IgnoreRecycle,
    /// Recycler notification address.
    Notification,
    /// Recycler minimum-gain percentage.
    MinGain,
}

impl FieldId {
    /// Wire name of the field, stable across the console and the engine.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ArchiveAge => "archive_age",
            Self::ArchiveAgeUnit => "archive_age_unit",
            Self::MediaType => "media_type",
            Self::PoolName => "pool_name",
            Self::RangeStart => "range_start",
            Self::RangeEnd => "range_end",
            Self::VolumeList => "volume_list",
            Self::ReservationAttributes => "reservation_attributes",
            Self::ReserveBySet => "reserve_by_set",
            Self::ReserveByFileSystem => "reserve_by_file_system",
            Self::OfflineCopy => "offline_copy",
            Self::StartAge => "start_age",
            Self::StartAgeUnit => "start_age_unit",
            Self::StartCount => "start_count",
            Self::StartSize => "start_size",
            Self::StartSizeUnit => "start_size_unit",
            Self::Drives => "drives",
            Self::DriveMin => "drive_min",
            Self::DriveMinUnit => "drive_min_unit",
            Self::DriveMax => "drive_max",
            Self::DriveMaxUnit => "drive_max_unit",
            Self::RecycleHwm => "recycle_hwm",
            Self::IgnoreRecycle => "ignore_recycle",
            Self::Notification => "notification",
            Self::MinGain => "min_gain",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn age_unit_parses_and_formats() {
        assert_eq!(AgeUnit::from_str("minute").unwrap(), AgeUnit::Minute);
        assert_eq!(AgeUnit::from_str("year").unwrap(), AgeUnit::Year);
        assert!(AgeUnit::from_str("fortnight").is_err());
        assert_eq!(AgeUnit::Day.as_str(), "day");
        assert_eq!(AgeUnit::Minute.label_key(), "unit.age.minutes");
    }

    #[test]
    fn size_unit_multipliers_are_monotonic() {
        let units = [
            SizeUnit::Bytes,
            SizeUnit::Kilobytes,
            SizeUnit::Megabytes,
            SizeUnit::Gigabytes,
            SizeUnit::Terabytes,
            SizeUnit::Petabytes,
        ];
        for pair in units.windows(2) {
            assert!(pair[0].bytes_multiplier() < pair[1].bytes_multiplier());
        }
    }

    #[test]
    fn media_type_distinguishes_disk() {
        assert!(MediaType::Disk.is_disk());
        assert!(!MediaType::Lto.is_disk());
        assert_eq!(MediaType::from_str("t10000").unwrap(), MediaType::T10000);
        assert!(MediaType::from_str("floppy").is_err());
    }

    #[test]
    fn choice_converts_to_and_from_option() {
        let selected: Choice<u32> = Choice::from(Some(7));
        assert!(selected.is_selected());
        assert_eq!(selected.into_option(), Some(7));

        let unselected: Choice<u32> = Choice::from(None);
        assert!(!unselected.is_selected());
        assert_eq!(unselected.as_ref(), None);
    }

    #[test]
    fn field_ids_render_wire_names() {
        assert_eq!(FieldId::ArchiveAge.as_str(), "archive_age");
        assert_eq!(FieldId::RangeEnd.as_str(), "range_end");
        assert_eq!(FieldId::ReserveByFileSystem.as_str(), "reserve_by_file_system");
    }

    #[test]
    fn enums_serialize_with_wire_names() {
        assert_eq!(
            serde_json::to_value(MediaType::SonyAit).unwrap(),
            "sony_ait"
        );
        assert_eq!(serde_json::to_value(AgeUnit::Minute).unwrap(), "minute");
        assert_eq!(
            serde_json::to_value(FieldId::DriveMinUnit).unwrap(),
            "drive_min_unit"
        );
        let parsed: MediaType = serde_json::from_value("lto".into()).unwrap();
        assert_eq!(parsed, MediaType::Lto);
    }
}
