// src/checker/mod.rs

//! The per-run pipeline.
//!
//! For every configured site, in order: fetch, checksum, compare against the
//! stored snapshot, and on a change render a diff, mail it to each
//! subscriber and store the new snapshot. Failures never cross a site
//! boundary (or a subscriber boundary when mailing).

pub mod event;
pub mod pipeline;
pub mod summary;

pub use event::ChangeEvent;
pub use pipeline::Checker;
pub use summary::{RunSummary, SiteOutcome};

/// Behaviour switches handed to the [`Checker`] at construction.
#[derive(Debug, Clone)]
pub struct CheckerOptions {
    /// Tag used in mail subjects.
    pub tag: String,
    /// Sender address of notifications.
    pub from: String,
    /// When false, changes are detected and stored but nobody is mailed.
    pub send_mails: bool,
    /// When true, nothing is mailed and no snapshot is written.
    pub simulate: bool,
}
