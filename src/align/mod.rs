//! Phase 1: alignment
//!
//! An [`AlignmentMap`] starts with every entity, anonymous individual and
//! axiom of both versions unmatched. The [`AlignmentOrchestrator`] runs the
//! registered [`AlignmentStrategy`] values until they stop making progress,
//! then freezes the map.

pub mod algorithms;
mod errors;
mod map;
mod orchestrator;
mod strategy;

pub use errors::{AlignmentError, AlignmentResult, StrategyError, StrategyFailure, StrategyResult};
pub use map::{AlignmentMap, UnmatchedCounts};
pub use orchestrator::{AlignmentOrchestrator, AlignmentReport, ConvergenceOutcome};
pub use strategy::{AlignmentContext, AlignmentStrategy};
