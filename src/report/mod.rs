//! Changelog rendering for a finished run

mod changelog;

pub use changelog::{AlignmentSummary, Changelog, ChangelogEntry};
