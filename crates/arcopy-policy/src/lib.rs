#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Validation and encoding core for archive-copy policy configuration.
//!
//! Layout: `model.rs` (typed field values and enums), `units.rs` (magnitude +
//! unit parsing), `volume.rs` (volume selection rules), `reservation.rs`
//! (reservation bitmask), `copy.rs` (per-copy assembly), `catalog.rs`
//! (external collaborator traits).

pub mod catalog;
pub mod copy;
pub mod error;
pub mod model;
pub mod reservation;
pub mod units;
pub mod volume;

pub use catalog::{
    AnsiLabelRule, LookupFailure, MediaLabels, MessageCatalog, SelectionSource, VolumeIdValidator,
};
pub use copy::{
    CopyConfiguration, CopyMediaForm, CopyTuning, DiskOptionsForm, ReservationForm,
    TapeOptionsForm, ValidationOptions, validate_copy_media, validate_disk_options,
    validate_tape_options,
};
pub use error::{PolicyError, PolicyResult, RangeSide};
pub use model::{
    AgeUnit, Choice, FieldId, MediaType, OfflineCopyMethod, OwnerAttribute, SizeUnit,
};
pub use reservation::{ReservationPolicy, bits};
pub use units::{AgeThreshold, SizeThreshold};
pub use volume::{VolumeRange, VolumeSpecification};
