//! ontodiff - ontology alignment and changelog engine
//!
//! Two versions of a knowledge base go in; a per-entity changelog comes out.
//!
//! - Phase 1 (`align`): pluggable strategies build an entity correspondence
//!   until no strategy can improve it, then the map is frozen.
//! - Phase 2 (`present`): pluggable strategies classify the remaining
//!   differences, once each, in priority order.
//!
//! The [`engine::Engine`] owns both phases and their state machine.

pub mod align;
pub mod cli;
pub mod config;
pub mod engine;
pub mod model;
pub mod observability;
pub mod present;
mod priority;
pub mod report;
pub mod service;

pub use engine::{Engine, EngineError, EngineResult};
