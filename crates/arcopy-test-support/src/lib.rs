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

//! Shared test helpers used across the wizard suites.
//! Layout: fixtures.rs (catalogs, labels, ready-made forms), mocks.rs (fake collaborators).

pub mod fixtures;
pub mod mocks;
