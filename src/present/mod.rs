//! Phase 2: presentation
//!
//! A [`ChangeModel`] is built from the finished alignment with every
//! unmatched axiom classified as added or deleted. The
//! [`PresentationOrchestrator`] then lets each [`PresentationStrategy`]
//! reclassify what it recognizes, once, in priority order.

pub mod algorithms;
mod changes;
mod diff;
mod errors;
mod matched;
mod orchestrator;
mod strategy;

pub use changes::{ChangeModel, DiffKey};
pub use diff::{DiffType, EntityBasedDiff};
pub use errors::{
    ChangeError, ChangeResult, PresentationError, PresentationFailure, PresentationResult,
};
pub use matched::{MatchDescription, MatchedAxiom};
pub use orchestrator::PresentationOrchestrator;
pub use strategy::{PresentationContext, PresentationStrategy};
