//! Archive-copy wizard session engine for the storage admin console.
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
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions, clippy::multiple_crate_versions)]

pub mod alert;
pub mod choices;
pub mod error;
pub mod fs;
pub mod session;
pub mod step;
pub mod summary;

pub use alert::{AlertKind, PendingAlert};
pub use choices::{WizardChoices, load_choices};
pub use error::{WizardError, WizardResult};
pub use fs::DiskVolumeScanner;
pub use session::{CopyEntry, CopyKind, SessionOutcome, WizardSession};
pub use step::{StepId, StepRecord, StepStatus, plan};
