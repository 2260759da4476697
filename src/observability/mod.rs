//! Observability
//!
//! Structured JSON logging to stderr, typed lifecycle events and
//! begin/complete scopes around the two engine phases.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on alignment or presentation results
//! 3. No background threads
//! 4. Deterministic output: one line per event, keys sorted
//!
//! # Usage
//!
//! ```ignore
//! use ontodiff::observability::{log_event_with_fields, Event, ObservationScope};
//!
//! log_event_with_fields(Event::AlignmentRound, &[("round", "1")]);
//!
//! let scope = ObservationScope::new("ALIGNMENT_PHASE");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity, LOG_LEVEL_ENV};
pub use scope::{ObservationScope, Timer};

/// Log a lifecycle event at the event's own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
