//! Alignment Orchestrator
//!
//! Drives the registered strategies to a fixed point:
//!
//! 1. Strategies run in descending priority, ties in registration order.
//! 2. A round invokes every strategy once, stopping early as soon as no
//!    source entity or anonymous individual is left unmatched.
//! 3. A failing strategy is logged and skipped; whatever it managed to
//!    match before failing stays matched.
//! 4. A round that leaves both unmatched counts where they were ends the
//!    loop. Unmatched entities may remain.
//!
//! Each non-final round removes at least one unmatched element, so the loop
//! runs at most `unmatched + 1` rounds.

use crate::observability::{log_event_with_fields, Event};
use crate::priority::sort_by_priority;

use super::errors::{AlignmentError, AlignmentResult, StrategyFailure};
use super::map::UnmatchedCounts;
use super::strategy::{AlignmentContext, AlignmentStrategy};

/// How the convergence loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceOutcome {
    /// Every source entity and anonymous individual is matched
    Converged,
    /// A full round made no progress
    Stalled,
}

impl ConvergenceOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Converged => "converged",
            Self::Stalled => "stalled",
        }
    }
}

/// Summary of one alignment phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentReport {
    /// Rounds entered, including a final one cut short by convergence
    pub rounds: usize,
    pub outcome: ConvergenceOutcome,
    /// Isolated `run` failures, in the order they happened
    pub failures: Vec<StrategyFailure>,
    /// `reset` failures from cleanup
    pub cleanup_failures: Vec<StrategyFailure>,
    /// Unmatched source counts when the loop ended
    pub remaining: UnmatchedCounts,
}

/// Phase-1 driver over an ordered set of strategies
pub struct AlignmentOrchestrator {
    strategies: Vec<Box<dyn AlignmentStrategy>>,
    initialized: bool,
}

impl Default for AlignmentOrchestrator {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl AlignmentOrchestrator {
    pub fn new(mut strategies: Vec<Box<dyn AlignmentStrategy>>) -> Self {
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

    /// Invoke every strategy's `initialize` hook in order.
    ///
    /// The first failure aborts initialization: a strategy that could not
    /// set itself up must not be run.
    pub fn initialize(&mut self, ctx: &mut AlignmentContext<'_>) -> Result<(), StrategyFailure> {
        self.initialized = false;
        for strategy in self.strategies.iter_mut() {
            if let Err(e) = strategy.initialize(ctx) {
                let failure = StrategyFailure::new(strategy.name(), &e);
                log_event_with_fields(
                    Event::StrategyInitFailed,
                    &[("strategy", strategy.name()), ("reason", &failure.reason)],
                );
                return Err(failure);
            }
        }
        self.initialized = true;
        Ok(())
    }

    /// Run the convergence loop and finish the map.
    ///
    /// Strategy failures never surface as an error here; only calling
    /// `run` before `initialize` does.
    pub fn run(&mut self, ctx: &mut AlignmentContext<'_>) -> AlignmentResult<AlignmentReport> {
        if !self.initialized {
            return Err(AlignmentError::NotInitialized);
        }

        let mut failures = Vec::new();
        let mut rounds = 0usize;

        let outcome = 'rounds: loop {
            rounds += 1;
            let mut progress = false;

            for strategy in self.strategies.iter_mut() {
                let before = ctx.map.unmatched_counts();
                if before.is_zero() {
                    break 'rounds ConvergenceOutcome::Converged;
                }

                if let Err(e) = strategy.run(ctx) {
                    let failure = StrategyFailure::new(strategy.name(), &e);
                    log_event_with_fields(
                        Event::StrategyFailed,
                        &[
                            ("round", &rounds.to_string()),
                            ("strategy", strategy.name()),
                            ("reason", &failure.reason),
                        ],
                    );
                    failures.push(failure);
                }

                let after = ctx.map.unmatched_counts();
                if after.improved_on(&before) {
                    progress = true;
                }
            }

            let counts = ctx.map.unmatched_counts();
            log_event_with_fields(
                Event::AlignmentRound,
                &[
                    ("round", &rounds.to_string()),
                    ("progress", if progress { "true" } else { "false" }),
                    ("unmatched_entities", &counts.entities.to_string()),
                    ("unmatched_individuals", &counts.individuals.to_string()),
                ],
            );

            if !progress {
                break if counts.is_zero() {
                    ConvergenceOutcome::Converged
                } else {
                    ConvergenceOutcome::Stalled
                };
            }
        };

        ctx.map.finish();
        let remaining = ctx.map.unmatched_counts();

        let event = match outcome {
            ConvergenceOutcome::Converged => Event::AlignmentConverged,
            ConvergenceOutcome::Stalled => Event::AlignmentStalled,
        };
        log_event_with_fields(
            event,
            &[
                ("rounds", &rounds.to_string()),
                ("unmatched_entities", &remaining.entities.to_string()),
                ("unmatched_individuals", &remaining.individuals.to_string()),
            ],
        );

        Ok(AlignmentReport {
            rounds,
            outcome,
            failures,
            cleanup_failures: Vec::new(),
            remaining,
        })
    }

    /// Invoke every strategy's `reset`; a failing reset does not stop the rest
    pub fn cleanup(&mut self) -> Vec<StrategyFailure> {
        self.initialized = false;
        let mut failures = Vec::new();
        for strategy in self.strategies.iter_mut() {
            if let Err(e) = strategy.reset() {
                let failure = StrategyFailure::new(strategy.name(), &e);
                log_event_with_fields(
                    Event::StrategyResetFailed,
                    &[("strategy", strategy.name()), ("reason", &failure.reason)],
                );
                failures.push(failure);
            }
        }
        failures
    }
}
