//! Wizard session aggregation.
//!
//! # Design
//! - One exclusively owned session per wizard invocation; a submission
//!   updates the copy entry, the step record, metrics, and the alert slot
//!   together.
//! - The single pending-alert slot is re-armed from the step record every
//!   time a still-failing step is re-entered.
//! - Copy entries are created on demand with the default disk kind.

use std::collections::BTreeMap;
use std::time::Duration;

use arcopy_policy::{
    AgeUnit, Choice, CopyConfiguration, CopyMediaForm, DiskOptionsForm, MediaLabels, MediaType,
    MessageCatalog, PolicyResult, ReservationForm, SelectionSource, TapeOptionsForm,
    ValidationOptions, VolumeIdValidator, validate_copy_media, validate_disk_options,
    validate_tape_options,
};
use arcopy_telemetry::{Metrics, with_session_context};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::alert::{AlertKind, PendingAlert};
use crate::choices::{self, WizardChoices};
use crate::error::{WizardError, WizardResult};
use crate::step::{self, StepId, StepRecord, StepStatus};
use crate::summary;

/// Archive age prefilled for a copy that has never validated.
const FRESH_AGE: &str = "4";

/// Media family of one copy, deciding which option page applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyKind {
    /// Archive to disk volumes.
    Disk,
    /// Archive to removable media.
    Tape,
}

impl CopyKind {
    /// The kind implied by a validated media family.
    #[must_use]
    pub const fn from_media(media: MediaType) -> Self {
        if media.is_disk() { Self::Disk } else { Self::Tape }
    }

    /// Stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disk => "disk",
            Self::Tape => "tape",
        }
    }
}

/// One copy's accumulated state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyEntry {
    /// Media family recorded by the last valid media submission.
    pub kind: CopyKind,
    /// Canonical configuration assembled so far.
    pub config: CopyConfiguration,
}

impl Default for CopyEntry {
    fn default() -> Self {
        Self {
            kind: CopyKind::Disk,
            config: CopyConfiguration::default(),
        }
    }
}

/// How a session ended, recorded in metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The admin accepted the summary and the configuration was handed off.
    Committed,
    /// The wizard was dismissed before the summary was accepted.
    Cancelled,
}

impl SessionOutcome {
    /// Stable label for metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Committed => "committed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Session-scoped aggregate for one wizard invocation.
pub struct WizardSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    total_copies: u32,
    copies: BTreeMap<u32, CopyEntry>,
    steps: Vec<StepRecord>,
    pending: Option<PendingAlert>,
    options: ValidationOptions,
    metrics: Metrics,
}

impl WizardSession {
    /// Open a session configuring `total_copies` copies.
    #[must_use]
    pub fn new(total_copies: u32, metrics: Metrics) -> Self {
        metrics.inc_session_started();
        let id = Uuid::new_v4();
        info!(session = %id, total_copies, "wizard session opened");
        Self {
            id,
            started_at: Utc::now(),
            total_copies,
            copies: BTreeMap::new(),
            steps: step::plan(total_copies)
                .into_iter()
                .map(StepRecord::unvisited)
                .collect(),
            pending: None,
            options: ValidationOptions::default(),
            metrics,
        }
    }

    /// Replace the validation behavior switches.
    #[must_use]
    pub const fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Session identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// When the session was opened.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Number of copies this session configures.
    #[must_use]
    pub const fn total_copies(&self) -> u32 {
        self.total_copies
    }

    /// The ordered step plan with current statuses.
    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Current status of one step.
    ///
    /// # Errors
    ///
    /// `UnknownStep` when the step is not in the plan.
    pub fn step_status(&self, step: StepId) -> WizardResult<StepStatus> {
        Ok(self.steps[self.step_index(step)?].status)
    }

    /// Mark `step` displayed. Re-entering a step whose last submission was
    /// rejected re-arms that step's alert in the pending slot; valid steps
    /// keep their status on backward navigation.
    ///
    /// # Errors
    ///
    /// `UnknownStep` when the step is not in the plan.
    pub fn enter_step(&mut self, step: StepId) -> WizardResult<()> {
        let index = self.step_index(step)?;
        let rearmed = {
            let record = &mut self.steps[index];
            match record.status {
                StepStatus::Unvisited => {
                    record.status = StepStatus::Displayed;
                    record.updated_at = Utc::now();
                    None
                }
                StepStatus::Invalid => record.alert.clone(),
                StepStatus::Displayed | StepStatus::Valid => None,
            }
        };
        if let Some(alert) = rearmed {
            self.set_alert(alert);
        }
        Ok(())
    }

    /// Arm `alert`, replacing whatever the pending slot held.
    pub fn set_alert(&mut self, alert: PendingAlert) {
        if alert.kind == AlertKind::Blocking {
            self.metrics.inc_blocking_alert();
        }
        self.pending = Some(alert);
    }

    /// The pending alert, if any, leaving it armed.
    #[must_use]
    pub const fn pending_alert(&self) -> Option<&PendingAlert> {
        self.pending.as_ref()
    }

    /// Take and clear the pending alert.
    pub const fn take_alert(&mut self) -> Option<PendingAlert> {
        self.pending.take()
    }

    /// Store a fully formed entry for copy `copy`.
    ///
    /// # Errors
    ///
    /// `UnknownCopy` when the number is outside `1..=total_copies`.
    pub fn put_copy(&mut self, copy: u32, entry: CopyEntry) -> WizardResult<()> {
        self.check_copy(copy)?;
        self.copies.insert(copy, entry);
        Ok(())
    }

    /// The stored entry for copy `copy`, if any.
    #[must_use]
    pub fn copy_entry(&self, copy: u32) -> Option<&CopyEntry> {
        self.copies.get(&copy)
    }

    /// The entry for copy `copy`, created with the default disk kind when
    /// absent.
    ///
    /// # Errors
    ///
    /// `UnknownCopy` when the number is outside `1..=total_copies`.
    pub fn copy_or_default(&mut self, copy: u32) -> WizardResult<&mut CopyEntry> {
        self.check_copy(copy)?;
        Ok(self.copies.entry(copy).or_default())
    }

    /// All stored copies in copy-number order.
    #[must_use]
    pub fn all_copies(&self) -> impl Iterator<Item = (u32, &CopyEntry)> {
        self.copies.iter().map(|(&copy, entry)| (copy, entry))
    }

    /// Which option page copy `copy` takes, from its stored kind.
    ///
    /// # Errors
    ///
    /// `UnknownCopy` when the number is outside `1..=total_copies`.
    pub fn options_kind(&self, copy: u32) -> WizardResult<CopyKind> {
        self.check_copy(copy)?;
        Ok(self
            .copies
            .get(&copy)
            .map_or(CopyKind::Disk, |entry| entry.kind))
    }

    /// Validate and commit a media-step submission for copy `copy`.
    ///
    /// On success the step goes `Valid` and the entry's kind follows the
    /// validated media family. On rejection the step goes `Invalid` with the
    /// alert armed and the failure counter for the highlighted field
    /// advanced.
    ///
    /// # Errors
    ///
    /// `UnknownCopy` for out-of-range numbers, `Validation` wrapping the
    /// first policy failure in form order.
    pub fn submit_copy_media(
        &mut self,
        copy: u32,
        form: &CopyMediaForm,
        volume_ids: &dyn VolumeIdValidator,
    ) -> WizardResult<()> {
        self.check_copy(copy)?;
        let index = self.step_index(StepId::CopyMedia(copy))?;
        let options = self.options;
        let outcome = {
            let entry = self.copies.entry(copy).or_default();
            let outcome = validate_copy_media(form, &mut entry.config, volume_ids, options);
            if outcome.is_ok()
                && let Some(media) = entry.config.media_type
            {
                entry.kind = CopyKind::from_media(media);
            }
            outcome
        };
        self.conclude(index, copy, outcome)
    }

    /// Validate and commit a tape option submission for copy `copy`.
    ///
    /// # Errors
    ///
    /// `UnknownCopy` for out-of-range numbers, `Validation` wrapping the
    /// first policy failure in form order.
    pub fn submit_tape_options(&mut self, copy: u32, form: &TapeOptionsForm) -> WizardResult<()> {
        self.check_copy(copy)?;
        let index = self.step_index(StepId::CopyOptions(copy))?;
        let outcome = validate_tape_options(form).map(|tuning| {
            self.copies.entry(copy).or_default().config.tuning = tuning;
        });
        self.conclude(index, copy, outcome)
    }

    /// Validate and commit a disk option submission for copy `copy`.
    ///
    /// # Errors
    ///
    /// `UnknownCopy` for out-of-range numbers, `Validation` wrapping the
    /// first policy failure in form order.
    pub fn submit_disk_options(&mut self, copy: u32, form: &DiskOptionsForm) -> WizardResult<()> {
        self.check_copy(copy)?;
        let index = self.step_index(StepId::CopyOptions(copy))?;
        let outcome = validate_disk_options(form).map(|tuning| {
            self.copies.entry(copy).or_default().config.tuning = tuning;
        });
        self.conclude(index, copy, outcome)
    }

    /// Rebuild the media form for redisplay. Fresh copies get the console
    /// defaults: age 4 minutes, disk media, nothing else selected.
    ///
    /// # Errors
    ///
    /// `UnknownCopy` when the number is outside `1..=total_copies`.
    pub fn media_form(&self, copy: u32) -> WizardResult<CopyMediaForm> {
        self.check_copy(copy)?;
        let mut form = CopyMediaForm {
            archive_age: FRESH_AGE.to_string(),
            archive_age_unit: Choice::Selected(AgeUnit::Minute),
            media_type: Choice::Selected(MediaType::Disk),
            ..CopyMediaForm::default()
        };
        let Some(entry) = self.copies.get(&copy) else {
            return Ok(form);
        };
        let config = &entry.config;
        if let Some(age) = config.age {
            form.archive_age = age.value.to_string();
            form.archive_age_unit = Choice::Selected(age.unit);
        }
        if let Some(media) = config.media_type {
            form.media_type = Choice::Selected(media);
        }
        if let Some(volumes) = &config.volumes {
            form.pool = Choice::from(volumes.pool.clone());
            if let Some(range) = &volumes.range {
                form.range_start = range.start.clone();
                form.range_end = range.end.clone();
            }
            form.volume_list = volumes.list.clone().unwrap_or_default();
        }
        if let Some(reservation) = config.reservation {
            form.reservation = ReservationForm {
                owner: Choice::from(reservation.owner),
                by_set: reservation.by_set,
                by_file_system: reservation.by_file_system,
            };
        }
        Ok(form)
    }

    /// Load the media-step dropdowns for `media`, binding the session id
    /// into downstream telemetry. A required-lookup failure arms a blocking
    /// alert and propagates.
    ///
    /// # Errors
    ///
    /// `Lookup` when a required selection list cannot be fetched inside the
    /// deadline.
    #[instrument(name = "wizard_session.load_choices", skip(self, source))]
    pub async fn load_choices(
        &mut self,
        source: &dyn SelectionSource,
        media: MediaType,
        deadline: Duration,
    ) -> WizardResult<WizardChoices> {
        let metrics = self.metrics.clone();
        let loaded = with_session_context(
            self.id.to_string(),
            choices::load_choices(source, media, deadline, &metrics),
        )
        .await;
        match loaded {
            Ok(choices) => Ok(choices),
            Err(err) => {
                self.set_alert(PendingAlert::from_policy(&err));
                Err(WizardError::Lookup { source: err })
            }
        }
    }

    /// Render the cross-copy summary text for the final page.
    ///
    /// # Errors
    ///
    /// `Lookup` when a catalog or media-label lookup fails.
    pub fn build_summary_text(
        &self,
        catalog: &dyn MessageCatalog,
        labels: &dyn MediaLabels,
    ) -> WizardResult<String> {
        summary::render(
            self.copies.values().map(|entry| &entry.config),
            catalog,
            labels,
        )
        .map_err(|source| WizardError::Lookup { source })
    }

    /// Close the session, recording the outcome.
    pub fn finish(self, outcome: SessionOutcome) {
        info!(session = %self.id, outcome = outcome.as_str(), "wizard session closed");
        self.metrics.inc_session_finished(outcome.as_str());
    }

    fn conclude(&mut self, index: usize, copy: u32, outcome: PolicyResult<()>) -> WizardResult<()> {
        match outcome {
            Ok(()) => {
                self.pending = None;
                self.finish_step(index, StepStatus::Valid, None);
                Ok(())
            }
            Err(err) => {
                if let Some(field) = err.field() {
                    self.metrics.inc_validation_failure(field.as_str());
                }
                let alert = PendingAlert::from_policy(&err);
                warn!(
                    copy,
                    field = ?err.field(),
                    key = alert.message_key.as_str(),
                    "copy submission rejected"
                );
                self.finish_step(index, StepStatus::Invalid, Some(alert.clone()));
                self.set_alert(alert);
                Err(WizardError::Validation { source: err })
            }
        }
    }

    fn finish_step(&mut self, index: usize, status: StepStatus, alert: Option<PendingAlert>) {
        let label = {
            let record = &mut self.steps[index];
            record.status = status;
            record.alert = alert;
            record.updated_at = Utc::now();
            record.step.label()
        };
        self.metrics.inc_step(&label, status.as_str());
    }

    const fn check_copy(&self, copy: u32) -> WizardResult<()> {
        if copy == 0 || copy > self.total_copies {
            return Err(WizardError::UnknownCopy { copy });
        }
        Ok(())
    }

    fn step_index(&self, step: StepId) -> WizardResult<usize> {
        self.steps
            .iter()
            .position(|record| record.step == step)
            .ok_or(WizardError::UnknownStep { step })
    }
}
