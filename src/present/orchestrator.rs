//! Presentation Orchestrator
//!
//! Runs every presentation strategy once, in descending priority with ties
//! in registration order. Unlike alignment, the first failure aborts the
//! phase: later strategies build on earlier output and must not run on top
//! of a half-applied classification. Whatever was recorded before the
//! failure stays in the change model.

use crate::observability::{log_event_with_fields, Event};
use crate::priority::sort_by_priority;

use super::errors::{PresentationError, PresentationFailure};
use super::strategy::{PresentationContext, PresentationStrategy};

/// Phase-2 driver over an ordered set of strategies
pub struct PresentationOrchestrator {
    strategies: Vec<Box<dyn PresentationStrategy>>,
    initialized: bool,
}

impl Default for PresentationOrchestrator {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PresentationOrchestrator {
    pub fn new(mut strategies: Vec<Box<dyn PresentationStrategy>>) -> Self {
        sort_by_priority(&mut strategies, |s| s.priority());
        Self {
            strategies,
            initialized: false,
        }
    }

    /// Names in invocation order
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn initialize(&mut self, ctx: &mut PresentationContext<'_>) -> Result<(), PresentationFailure> {
        self.initialized = false;
        for strategy in self.strategies.iter_mut() {
            if let Err(e) = strategy.initialize(ctx) {
                return Err(fail(strategy.name(), e));
            }
        }
        self.initialized = true;
        Ok(())
    }

    /// Apply every strategy once; stops at the first failure
    pub fn run(&mut self, ctx: &mut PresentationContext<'_>) -> Result<(), PresentationFailure> {
        if !self.initialized {
            return Err(PresentationFailure::new(
                "presentation",
                PresentationError::NotInitialized("presentation orchestrator".to_string()),
            ));
        }

        for strategy in self.strategies.iter_mut() {
            if let Err(e) = strategy.apply(ctx) {
                return Err(fail(strategy.name(), e));
            }
            let changed = ctx.changes.non_equivalent_diffs().count();
            log_event_with_fields(
                Event::PresentationApplied,
                &[
                    ("strategy", strategy.name()),
                    ("non_equivalent_diffs", &changed.to_string()),
                ],
            );
        }
        Ok(())
    }
}

fn fail(strategy: &str, error: PresentationError) -> PresentationFailure {
    let failure = PresentationFailure::new(strategy, error);
    log_event_with_fields(
        Event::PresentationFailed,
        &[("strategy", strategy), ("reason", &failure.error.to_string())],
    );
    failure
}
