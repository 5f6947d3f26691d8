//! Per-copy configuration assembly.
//!
//! # Design
//! - One submission validates into a candidate; the stored configuration is
//!   only touched on success, so repeated forward/backward visits stay
//!   idempotent.
//! - Rules run in form order and the first failure wins, matching the
//!   top-to-bottom layout the user sees.
//! - Reservation facets are never encoded for disk copies; earlier tape
//!   state stays in place until a tape submission replaces it.

use serde::{Deserialize, Serialize};

use crate::catalog::VolumeIdValidator;
use crate::error::{PolicyError, PolicyResult};
use crate::model::{
    AgeUnit, Choice, FieldId, MediaType, OfflineCopyMethod, OwnerAttribute, SizeUnit,
};
use crate::reservation::ReservationPolicy;
use crate::units::{
    self, AgeThreshold, SizeThreshold, max_at_least_min, parse_non_negative_u32,
    parse_non_negative_u64, parse_percentage, parse_start_age,
};
use crate::volume::VolumeSpecification;

/// Raw reservation facets as submitted by the media step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationForm {
    /// Owner-attribute selector.
    pub owner: Choice<OwnerAttribute>,
    /// Reserve-by-set checkbox.
    pub by_set: bool,
    /// Reserve-by-file-system checkbox.
    pub by_file_system: bool,
}

/// Raw fields submitted by the copy media step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyMediaForm {
    /// Archive age magnitude.
    pub archive_age: String,
    /// Archive age unit selector.
    pub archive_age_unit: Choice<AgeUnit>,
    /// Media family selector.
    pub media_type: Choice<MediaType>,
    /// Volume pool selector.
    pub pool: Choice<String>,
    /// First volume of the range.
    pub range_start: String,
    /// Last volume of the range.
    pub range_end: String,
    /// Free-form volume list.
    pub volume_list: String,
    /// Reservation facets, ignored for disk media.
    pub reservation: ReservationForm,
}

/// Raw fields submitted by the tape copy option step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TapeOptionsForm {
    /// Offline copy method selector.
    pub offline_copy: Choice<OfflineCopyMethod>,
    /// Maximum drive count.
    pub drives: String,
    /// Minimum per-drive size magnitude.
    pub drive_min: String,
    /// Minimum per-drive size unit selector.
    pub drive_min_unit: Choice<SizeUnit>,
    /// Maximum per-drive size magnitude.
    pub drive_max: String,
    /// Maximum per-drive size unit selector.
    pub drive_max_unit: Choice<SizeUnit>,
    /// Start-age magnitude.
    pub start_age: String,
    /// Start-age unit selector.
    pub start_age_unit: Choice<AgeUnit>,
    /// Start-count magnitude.
    pub start_count: String,
    /// Start-size magnitude.
    pub start_size: String,
    /// Start-size unit selector.
    pub start_size_unit: Choice<SizeUnit>,
}

/// Raw fields submitted by the disk copy option step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskOptionsForm {
    /// Offline copy method selector.
    pub offline_copy: Choice<OfflineCopyMethod>,
    /// Start-age magnitude.
    pub start_age: String,
    /// Start-age unit selector.
    pub start_age_unit: Choice<AgeUnit>,
    /// Start-count magnitude.
    pub start_count: String,
    /// Start-size magnitude.
    pub start_size: String,
    /// Start-size unit selector.
    pub start_size_unit: Choice<SizeUnit>,
    /// Recycler high-water mark percentage.
    pub recycle_hwm: String,
    /// Ignore-recycling checkbox.
    pub ignore_recycle: bool,
    /// Recycler notification address.
    pub notification: String,
    /// Recycler minimum-gain percentage.
    pub min_gain: String,
}

/// Option-step tuning knobs for one copy. Empty fields reset their knob to
/// unset, so re-submitting a cleared form clears the stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CopyTuning {
    /// How offline source files are staged before writing.
    pub offline_copy: Option<OfflineCopyMethod>,
    /// Age at which archiving starts regardless of other thresholds.
    pub start_age: Option<AgeThreshold>,
    /// File count at which archiving starts.
    pub start_count: Option<u32>,
    /// Accumulated size at which archiving starts.
    pub start_size: Option<SizeThreshold>,
    /// Maximum number of tape drives to split the copy across.
    pub drives: Option<u32>,
    /// Minimum amount written per drive; tape only.
    pub drive_min: Option<SizeThreshold>,
    /// Maximum amount written per drive; tape only.
    pub drive_max: Option<SizeThreshold>,
    /// Recycler high-water mark percentage; disk only.
    pub recycle_hwm: Option<u8>,
    /// Whether the recycler skips this copy; disk only.
    pub ignore_recycle: bool,
    /// Recycler notification address; disk only.
    pub notification: Option<String>,
    /// Recycler minimum-gain percentage; disk only.
    pub min_gain: Option<u8>,
}

/// Canonical, validated parameters for one archive copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CopyConfiguration {
    /// Time before a file becomes eligible for this copy.
    pub age: Option<AgeThreshold>,
    /// Media family the copy writes to.
    pub media_type: Option<MediaType>,
    /// How eligible volumes are chosen.
    pub volumes: Option<VolumeSpecification>,
    /// Reservation facets recorded by the last tape submission. Retained,
    /// but inapplicable, while the media family is disk.
    pub reservation: Option<ReservationPolicy>,
    /// Option-step tuning knobs.
    pub tuning: CopyTuning,
}

impl CopyConfiguration {
    /// The reservation policy in effect: `None` whenever the media family
    /// is disk, regardless of retained state.
    #[must_use]
    pub const fn effective_reservation(&self) -> Option<ReservationPolicy> {
        match (self.media_type, self.reservation) {
            (Some(media), Some(reservation)) if !media.is_disk() => Some(reservation),
            _ => None,
        }
    }
}

/// Behavior switches for the media-step validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Clear the stored volume specification when validation fails,
    /// matching the legacy console's partial-overwrite behavior. Off by
    /// default: failures leave the stored configuration untouched.
    pub reset_volumes_on_failure: bool,
}

struct MediaCandidate {
    age: AgeThreshold,
    media: MediaType,
    volumes: VolumeSpecification,
    reservation: Option<ReservationPolicy>,
}

/// Validate a media-step submission and commit it into `config`.
///
/// Rules run in form order with the first failure short-circuiting: age
/// magnitude, age unit, media family, volume specification, then the
/// reservation facets for non-disk media.
///
/// # Errors
///
/// The first field-scoped failure, with `config` left untouched unless
/// `options.reset_volumes_on_failure` is set.
pub fn validate_copy_media(
    form: &CopyMediaForm,
    config: &mut CopyConfiguration,
    volume_ids: &dyn VolumeIdValidator,
    options: ValidationOptions,
) -> PolicyResult<()> {
    let candidate = match media_candidate(form, volume_ids) {
        Ok(candidate) => candidate,
        Err(err) => {
            if options.reset_volumes_on_failure {
                config.volumes = None;
            }
            return Err(err);
        }
    };

    config.age = Some(candidate.age);
    config.media_type = Some(candidate.media);
    config.volumes = Some(candidate.volumes);
    if let Some(reservation) = candidate.reservation {
        config.reservation = Some(reservation);
    }
    Ok(())
}

fn media_candidate(
    form: &CopyMediaForm,
    volume_ids: &dyn VolumeIdValidator,
) -> PolicyResult<MediaCandidate> {
    let (age_value, age_unit) = units::to_canonical(
        FieldId::ArchiveAge,
        &form.archive_age,
        FieldId::ArchiveAgeUnit,
        form.archive_age_unit,
    )?;

    let Choice::Selected(media) = form.media_type else {
        return Err(PolicyError::missing(FieldId::MediaType));
    };

    let volumes = VolumeSpecification::validate(
        Choice::Selected(media),
        &form.pool,
        &form.range_start,
        &form.range_end,
        &form.volume_list,
        volume_ids,
    )?;

    let reservation = (!media.is_disk()).then(|| {
        ReservationPolicy::from_form(
            form.reservation.owner,
            form.reservation.by_set,
            form.reservation.by_file_system,
        )
    });

    Ok(MediaCandidate {
        age: AgeThreshold {
            value: age_value,
            unit: age_unit,
        },
        media,
        volumes,
        reservation,
    })
}

/// Validate a tape option-step submission into its tuning knobs.
///
/// # Errors
///
/// The first field-scoped failure in form order: offline method, drives,
/// per-drive minimum/maximum (both-or-neither, units required, maximum at
/// least minimum), start age, start count, start size.
pub fn validate_tape_options(form: &TapeOptionsForm) -> PolicyResult<CopyTuning> {
    let mut tuning = CopyTuning {
        offline_copy: form.offline_copy.into_option(),
        ..CopyTuning::default()
    };

    let drives = form.drives.trim();
    if !drives.is_empty() {
        tuning.drives = Some(parse_non_negative_u32(FieldId::Drives, drives)?);
    }

    let drive_min = form.drive_min.trim();
    let drive_max = form.drive_max.trim();
    match (drive_min.is_empty(), drive_max.is_empty()) {
        (false, false) => {
            let min = size_threshold(
                FieldId::DriveMin,
                drive_min,
                FieldId::DriveMinUnit,
                form.drive_min_unit,
            )?;
            let max = size_threshold(
                FieldId::DriveMax,
                drive_max,
                FieldId::DriveMaxUnit,
                form.drive_max_unit,
            )?;
            if !max_at_least_min(min, max) {
                return Err(PolicyError::parse(
                    FieldId::DriveMax,
                    drive_max,
                    "must be at least the per-drive minimum",
                ));
            }
            tuning.drive_min = Some(min);
            tuning.drive_max = Some(max);
        }
        (false, true) => {
            return Err(PolicyError::parse(
                FieldId::DriveMax,
                drive_max,
                "must be supplied when a per-drive minimum is set",
            ));
        }
        (true, false) => {
            return Err(PolicyError::parse(
                FieldId::DriveMin,
                drive_min,
                "must be supplied when a per-drive maximum is set",
            ));
        }
        (true, true) => {}
    }

    apply_start_thresholds(
        &mut tuning,
        &form.start_age,
        form.start_age_unit,
        &form.start_count,
        &form.start_size,
        form.start_size_unit,
    )?;

    Ok(tuning)
}

/// Validate a disk option-step submission into its tuning knobs.
///
/// # Errors
///
/// The first field-scoped failure in form order: offline method, start
/// thresholds, recycler high-water mark, notification address, minimum
/// gain.
pub fn validate_disk_options(form: &DiskOptionsForm) -> PolicyResult<CopyTuning> {
    let mut tuning = CopyTuning {
        offline_copy: form.offline_copy.into_option(),
        ignore_recycle: form.ignore_recycle,
        ..CopyTuning::default()
    };

    apply_start_thresholds(
        &mut tuning,
        &form.start_age,
        form.start_age_unit,
        &form.start_count,
        &form.start_size,
        form.start_size_unit,
    )?;

    let recycle_hwm = form.recycle_hwm.trim();
    if !recycle_hwm.is_empty() {
        tuning.recycle_hwm = Some(parse_percentage(FieldId::RecycleHwm, recycle_hwm)?);
    }

    let notification = form.notification.trim();
    if !notification.is_empty() {
        if !is_valid_notification_address(notification) {
            return Err(PolicyError::parse(
                FieldId::Notification,
                notification,
                "is not a valid notification address",
            ));
        }
        tuning.notification = Some(notification.to_string());
    }

    let min_gain = form.min_gain.trim();
    if !min_gain.is_empty() {
        tuning.min_gain = Some(parse_percentage(FieldId::MinGain, min_gain)?);
    }

    Ok(tuning)
}

fn apply_start_thresholds(
    tuning: &mut CopyTuning,
    start_age: &str,
    start_age_unit: Choice<AgeUnit>,
    start_count: &str,
    start_size: &str,
    start_size_unit: Choice<SizeUnit>,
) -> PolicyResult<()> {
    let start_age = start_age.trim();
    if !start_age.is_empty() {
        let value = parse_start_age(FieldId::StartAge, start_age)?;
        let Choice::Selected(unit) = start_age_unit else {
            return Err(PolicyError::missing(FieldId::StartAgeUnit));
        };
        tuning.start_age = Some(AgeThreshold { value, unit });
    }

    let start_count = start_count.trim();
    if !start_count.is_empty() {
        tuning.start_count = Some(parse_non_negative_u32(FieldId::StartCount, start_count)?);
    }

    let start_size = start_size.trim();
    if !start_size.is_empty() {
        tuning.start_size = Some(size_threshold(
            FieldId::StartSize,
            start_size,
            FieldId::StartSizeUnit,
            start_size_unit,
        )?);
    }

    Ok(())
}

fn size_threshold(
    value_field: FieldId,
    raw: &str,
    unit_field: FieldId,
    unit: Choice<SizeUnit>,
) -> PolicyResult<SizeThreshold> {
    let value = parse_non_negative_u64(value_field, raw)?;
    let Choice::Selected(unit) = unit else {
        return Err(PolicyError::missing(unit_field));
    };
    Ok(SizeThreshold { value, unit })
}

fn is_valid_notification_address(address: &str) -> bool {
    if address.starts_with('.') || address.starts_with('@') || address.starts_with("www.") {
        return false;
    }
    let mut seen_at = false;
    for c in address.chars() {
        match c {
            '@' if seen_at => return false,
            '@' => seen_at = true,
            '.' | '_' | '%' | '+' | '-' => {}
            c if c.is_ascii_alphanumeric() => {}
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AnsiLabelRule;
    use crate::reservation::bits;

    fn tape_media_form() -> CopyMediaForm {
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

    fn disk_media_form() -> CopyMediaForm {
        CopyMediaForm {
            archive_age: "4".to_string(),
            archive_age_unit: Choice::Selected(AgeUnit::Minute),
            media_type: Choice::Selected(MediaType::Disk),
            pool: Choice::Selected("disk_pool".to_string()),
            ..CopyMediaForm::default()
        }
    }

    #[test]
    fn media_step_commits_every_validated_field() {
        let mut config = CopyConfiguration::default();
        validate_copy_media(
            &tape_media_form(),
            &mut config,
            &AnsiLabelRule,
            ValidationOptions::default(),
        )
        .unwrap();

        assert_eq!(
            config.age,
            Some(AgeThreshold {
                value: 30,
                unit: AgeUnit::Minute,
            })
        );
        assert_eq!(config.media_type, Some(MediaType::Lto));
        let volumes = config.volumes.as_ref().expect("volumes should commit");
        assert_eq!(volumes.range.as_ref().unwrap().start, "VSN001");
        let reservation = config.effective_reservation().expect("reservation applies");
        assert_eq!(reservation.mask(), bits::OWNER_USER | bits::SET);
    }

    #[test]
    fn first_failure_wins_in_form_order() {
        let mut form = tape_media_form();
        form.archive_age = "abc".to_string();
        form.media_type = Choice::Unselected;
        form.range_end = String::new();

        let mut config = CopyConfiguration::default();
        let err = validate_copy_media(
            &form,
            &mut config,
            &AnsiLabelRule,
            ValidationOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some(FieldId::ArchiveAge));
    }

    #[test]
    fn failed_submission_leaves_stored_state_untouched() {
        let mut config = CopyConfiguration::default();
        validate_copy_media(
            &tape_media_form(),
            &mut config,
            &AnsiLabelRule,
            ValidationOptions::default(),
        )
        .unwrap();
        let before = config.clone();

        let mut bad = tape_media_form();
        bad.range_end = String::new();
        let err = validate_copy_media(
            &bad,
            &mut config,
            &AnsiLabelRule,
            ValidationOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PolicyError::IncompleteRange { .. }));
        assert_eq!(config, before);
    }

    #[test]
    fn legacy_reset_clears_volumes_on_failure() {
        let mut config = CopyConfiguration::default();
        validate_copy_media(
            &tape_media_form(),
            &mut config,
            &AnsiLabelRule,
            ValidationOptions::default(),
        )
        .unwrap();

        let mut bad = tape_media_form();
        bad.range_start = "toolong7".to_string();
        let options = ValidationOptions {
            reset_volumes_on_failure: true,
        };
        validate_copy_media(&bad, &mut config, &AnsiLabelRule, options).unwrap_err();
        assert!(config.volumes.is_none());
        assert_eq!(config.media_type, Some(MediaType::Lto));
    }

    #[test]
    fn disk_media_never_encodes_reservation_facets() {
        let mut config = CopyConfiguration::default();
        let mut form = disk_media_form();
        form.reservation = ReservationForm {
            owner: Choice::Selected(OwnerAttribute::Group),
            by_set: true,
            by_file_system: true,
        };
        validate_copy_media(
            &form,
            &mut config,
            &AnsiLabelRule,
            ValidationOptions::default(),
        )
        .unwrap();
        assert!(config.reservation.is_none());
        assert!(config.effective_reservation().is_none());
    }

    #[test]
    fn switching_to_disk_retains_earlier_tape_reservation() {
        let mut config = CopyConfiguration::default();
        validate_copy_media(
            &tape_media_form(),
            &mut config,
            &AnsiLabelRule,
            ValidationOptions::default(),
        )
        .unwrap();
        let tape_reservation = config.reservation.expect("tape run stores facets");

        validate_copy_media(
            &disk_media_form(),
            &mut config,
            &AnsiLabelRule,
            ValidationOptions::default(),
        )
        .unwrap();
        assert_eq!(config.reservation, Some(tape_reservation));
        assert!(config.effective_reservation().is_none());
    }

    #[test]
    fn one_sided_range_reports_the_missing_end() {
        let mut form = tape_media_form();
        form.range_end = String::new();
        let mut config = CopyConfiguration::default();
        let err = validate_copy_media(
            &form,
            &mut config,
            &AnsiLabelRule,
            ValidationOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some(FieldId::RangeEnd));
    }

    #[test]
    fn tape_options_parse_all_knobs() {
        let form = TapeOptionsForm {
            offline_copy: Choice::Selected(OfflineCopyMethod::StageAhead),
            drives: "4".to_string(),
            drive_min: "10".to_string(),
            drive_min_unit: Choice::Selected(SizeUnit::Gigabytes),
            drive_max: "1".to_string(),
            drive_max_unit: Choice::Selected(SizeUnit::Terabytes),
            start_age: "90".to_string(),
            start_age_unit: Choice::Selected(AgeUnit::Second),
            start_count: "1000".to_string(),
            start_size: "512".to_string(),
            start_size_unit: Choice::Selected(SizeUnit::Megabytes),
        };
        let tuning = validate_tape_options(&form).unwrap();
        assert_eq!(tuning.offline_copy, Some(OfflineCopyMethod::StageAhead));
        assert_eq!(tuning.drives, Some(4));
        assert_eq!(
            tuning.drive_min,
            Some(SizeThreshold {
                value: 10,
                unit: SizeUnit::Gigabytes,
            })
        );
        assert_eq!(tuning.start_count, Some(1000));
        assert_eq!(
            tuning.start_size,
            Some(SizeThreshold {
                value: 512,
                unit: SizeUnit::Megabytes,
            })
        );
    }

    #[test]
    fn empty_tape_options_reset_every_knob() {
        let tuning = validate_tape_options(&TapeOptionsForm::default()).unwrap();
        assert_eq!(tuning, CopyTuning::default());
    }

    #[test]
    fn drive_bounds_must_come_in_pairs() {
        let mut form = TapeOptionsForm {
            drive_min: "10".to_string(),
            drive_min_unit: Choice::Selected(SizeUnit::Gigabytes),
            ..TapeOptionsForm::default()
        };
        let err = validate_tape_options(&form).unwrap_err();
        assert_eq!(err.field(), Some(FieldId::DriveMax));

        form = TapeOptionsForm {
            drive_max: "10".to_string(),
            drive_max_unit: Choice::Selected(SizeUnit::Gigabytes),
            ..TapeOptionsForm::default()
        };
        let err = validate_tape_options(&form).unwrap_err();
        assert_eq!(err.field(), Some(FieldId::DriveMin));
    }

    #[test]
    fn drive_maximum_must_cover_the_minimum() {
        let form = TapeOptionsForm {
            drive_min: "2".to_string(),
            drive_min_unit: Choice::Selected(SizeUnit::Terabytes),
            drive_max: "500".to_string(),
            drive_max_unit: Choice::Selected(SizeUnit::Gigabytes),
            ..TapeOptionsForm::default()
        };
        let err = validate_tape_options(&form).unwrap_err();
        assert_eq!(err.field(), Some(FieldId::DriveMax));
        assert_eq!(err.message_key(), "copy.error.drive_max");
    }

    #[test]
    fn drive_bounds_require_units() {
        let form = TapeOptionsForm {
            drive_min: "10".to_string(),
            drive_max: "20".to_string(),
            drive_max_unit: Choice::Selected(SizeUnit::Gigabytes),
            ..TapeOptionsForm::default()
        };
        let err = validate_tape_options(&form).unwrap_err();
        assert!(matches!(
            err,
            PolicyError::MissingSelection {
                field: FieldId::DriveMinUnit,
            }
        ));
    }

    #[test]
    fn start_age_requires_a_unit_and_32_bit_bounds() {
        let mut form = TapeOptionsForm {
            start_age: "60".to_string(),
            ..TapeOptionsForm::default()
        };
        let err = validate_tape_options(&form).unwrap_err();
        assert_eq!(err.field(), Some(FieldId::StartAge));
        assert_eq!(err.message_key(), "copy.error.start_age_unit");

        form.start_age = "2147483648".to_string();
        form.start_age_unit = Choice::Selected(AgeUnit::Second);
        let err = validate_tape_options(&form).unwrap_err();
        assert_eq!(err.message_key(), "copy.error.start_age");
    }

    #[test]
    fn disk_options_parse_recycler_knobs() {
        let form = DiskOptionsForm {
            offline_copy: Choice::Selected(OfflineCopyMethod::Direct),
            recycle_hwm: "95".to_string(),
            ignore_recycle: true,
            notification: "operator@example.com".to_string(),
            min_gain: "50".to_string(),
            ..DiskOptionsForm::default()
        };
        let tuning = validate_disk_options(&form).unwrap();
        assert_eq!(tuning.offline_copy, Some(OfflineCopyMethod::Direct));
        assert_eq!(tuning.recycle_hwm, Some(95));
        assert!(tuning.ignore_recycle);
        assert_eq!(tuning.notification.as_deref(), Some("operator@example.com"));
        assert_eq!(tuning.min_gain, Some(50));
        assert!(tuning.drives.is_none());
    }

    #[test]
    fn disk_percentages_are_bounded() {
        let form = DiskOptionsForm {
            recycle_hwm: "101".to_string(),
            ..DiskOptionsForm::default()
        };
        let err = validate_disk_options(&form).unwrap_err();
        assert_eq!(err.field(), Some(FieldId::RecycleHwm));

        let form = DiskOptionsForm {
            min_gain: "-3".to_string(),
            ..DiskOptionsForm::default()
        };
        let err = validate_disk_options(&form).unwrap_err();
        assert_eq!(err.field(), Some(FieldId::MinGain));
    }

    #[test]
    fn notification_addresses_follow_the_console_rule() {
        for good in ["operator", "operator@example.com", "ops-team_1@host"] {
            let form = DiskOptionsForm {
                notification: good.to_string(),
                ..DiskOptionsForm::default()
            };
            assert!(
                validate_disk_options(&form).is_ok(),
                "{good} should be accepted"
            );
        }

        for bad in [
            ".operator",
            "@host",
            "www.example.com",
            "two words",
            "a,b@host",
            "a@b@c",
        ] {
            let form = DiskOptionsForm {
                notification: bad.to_string(),
                ..DiskOptionsForm::default()
            };
            let err = validate_disk_options(&form).unwrap_err();
            assert_eq!(err.field(), Some(FieldId::Notification), "{bad}");
        }
    }

    #[test]
    fn blank_notification_means_unset() {
        let form = DiskOptionsForm {
            notification: "   ".to_string(),
            ..DiskOptionsForm::default()
        };
        let tuning = validate_disk_options(&form).unwrap();
        assert!(tuning.notification.is_none());
    }
}
