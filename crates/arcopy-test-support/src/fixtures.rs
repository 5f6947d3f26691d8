//! Ready-made catalogs, labels, and forms for wizard tests.

use arcopy_policy::copy::{CopyMediaForm, ReservationForm};
use arcopy_policy::model::{AgeUnit, Choice, MediaType, OwnerAttribute};
use arcopy_policy::volume::RANGE_PHRASE_KEY;

use crate::mocks::{StaticCatalog, StaticMediaLabels, StaticSelectionSource};

/// English message catalog covering every key the engine resolves or reports.
#[must_use]
pub fn english_catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with_entry(RANGE_PHRASE_KEY, "{0} - {1}")
        .with_entry("unit.age.seconds", "Seconds")
        .with_entry("unit.age.minutes", "Minutes")
        .with_entry("unit.age.hours", "Hours")
        .with_entry("unit.age.days", "Days")
        .with_entry("unit.age.weeks", "Weeks")
        .with_entry("unit.age.years", "Years")
        .with_entry("reservation.owner.user", "Owner")
        .with_entry("reservation.owner.group", "Group")
        .with_entry("reservation.owner.directory", "Directory")
        .with_entry("reservation.by_set", "Policy")
        .with_entry("reservation.by_file_system", "File System")
        .with_entry("copy.error.age", "'{0}' is not a valid archive age")
        .with_entry("copy.error.age_unit", "Select a unit for the archive age")
        .with_entry("copy.error.media_type", "Select an archive media type")
        .with_entry("copy.error.volume_start", "'{0}' is not a valid starting volume")
        .with_entry("copy.error.volume_end", "'{0}' is not a valid ending volume")
        .with_entry("copy.error.range_missing_start", "Specify the starting volume of the range")
        .with_entry("copy.error.range_missing_end", "Specify the ending volume of the range")
        .with_entry("copy.error.no_volumes", "Specify a pool, a volume range, or a volume list")
        .with_entry("copy.error.external", "The storage backend reported error {0}: {1}")
        .with_entry("copy.error.start_age", "'{0}' is not a valid start age")
        .with_entry("copy.error.start_age_unit", "Select a unit for the start age")
        .with_entry("copy.error.start_count", "'{0}' is not a valid start count")
        .with_entry("copy.error.start_size", "'{0}' is not a valid start size")
        .with_entry("copy.error.start_size_unit", "Select a unit for the start size")
        .with_entry("copy.error.drives", "'{0}' is not a valid drive count")
        .with_entry("copy.error.drive_min", "'{0}' is not a valid per-drive minimum")
        .with_entry("copy.error.drive_min_unit", "Select a unit for the per-drive minimum")
        .with_entry("copy.error.drive_max", "'{0}' is not a valid per-drive maximum")
        .with_entry("copy.error.drive_max_unit", "Select a unit for the per-drive maximum")
        .with_entry("copy.error.recycle_hwm", "'{0}' is not a valid high-water mark")
        .with_entry("copy.error.min_gain", "'{0}' is not a valid minimum gain")
        .with_entry("copy.error.notification", "'{0}' is not a valid notification address")
        .with_entry("copy.error.reservation", "'{0}' is not a valid reservation setting")
        .with_entry("copy.error.selection", "Make a selection for this field")
        .with_entry("copy.error.value", "'{0}' is not a valid value")
}

/// Media labels matching the console's display strings.
#[must_use]
pub fn console_media_labels() -> StaticMediaLabels {
    StaticMediaLabels::new()
        .with_label(MediaType::Disk, "Disk")
        .with_label(MediaType::Lto, "LTO")
        .with_label(MediaType::Dlt, "DLT")
        .with_label(MediaType::Dat, "DAT")
        .with_label(MediaType::SonyAit, "Sony AIT")
        .with_label(MediaType::T9840, "STK 9840")
        .with_label(MediaType::T9940, "STK 9940")
        .with_label(MediaType::T10000, "STK T10000")
        .with_label(MediaType::Ibm3590, "IBM 3590")
}

/// Selection backend stocked with a typical small site.
#[must_use]
pub fn small_site_source() -> StaticSelectionSource {
    StaticSelectionSource::new()
        .with_file_systems(["samfs1", "samfs2"])
        .with_pools(["scratch_pool", "archive_pool"])
        .with_media_types([MediaType::Disk, MediaType::Lto, MediaType::T9840])
}

/// Media-step form that validates cleanly for an LTO copy with a range and a
/// user-owner reservation.
#[must_use]
pub fn valid_tape_form() -> CopyMediaForm {
    CopyMediaForm {
        archive_age: "30".to_string(),
        archive_age_unit: Choice::Selected(AgeUnit::Minute),
        media_type: Choice::Selected(MediaType::Lto),
        pool: Choice::Unselected,
        range_start: "VSN001".to_string(),
        range_end: "VSN050".to_string(),
        volume_list: String::new(),
        reservation: ReservationForm {
            owner: Choice::Selected(OwnerAttribute::User),
            by_set: true,
            by_file_system: false,
        },
    }
}

/// Media-step form that validates cleanly for a disk copy drawn from a pool.
#[must_use]
pub fn valid_disk_form() -> CopyMediaForm {
    CopyMediaForm {
        archive_age: "4".to_string(),
        archive_age_unit: Choice::Selected(AgeUnit::Minute),
        media_type: Choice::Selected(MediaType::Disk),
        pool: Choice::Selected("disk_pool".to_string()),
        ..CopyMediaForm::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcopy_policy::catalog::{MediaLabels, MessageCatalog};

    #[test]
    fn english_catalog_covers_the_unit_labels() {
        let catalog = english_catalog();
        for unit in [
            AgeUnit::Second,
            AgeUnit::Minute,
            AgeUnit::Hour,
            AgeUnit::Day,
            AgeUnit::Week,
            AgeUnit::Year,
        ] {
            assert!(catalog.resolve(unit.label_key(), &[]).is_ok());
        }
    }

    #[test]
    fn console_labels_cover_every_media_family() {
        let labels = console_media_labels();
        for media in [
            MediaType::Disk,
            MediaType::Lto,
            MediaType::Dlt,
            MediaType::Dat,
            MediaType::SonyAit,
            MediaType::T9840,
            MediaType::T9940,
            MediaType::T10000,
            MediaType::Ibm3590,
        ] {
            assert!(labels.label(media).is_ok());
        }
    }
}
