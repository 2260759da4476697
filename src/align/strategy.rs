//! Alignment strategy contract

use crate::config::Parameters;
use crate::service::ServiceRegistry;

use super::errors::StrategyResult;
use super::map::AlignmentMap;

/// Scoped access handed to a strategy for the duration of one hook call.
///
/// Only the strategy currently being invoked holds it, so the map and the
/// registry have a single writer at any time.
pub struct AlignmentContext<'a> {
    pub map: &'a mut AlignmentMap,
    pub parameters: &'a Parameters,
    pub services: &'a mut ServiceRegistry,
}

impl<'a> AlignmentContext<'a> {
    pub fn new(
        map: &'a mut AlignmentMap,
        parameters: &'a Parameters,
        services: &'a mut ServiceRegistry,
    ) -> Self {
        Self {
            map,
            parameters,
            services,
        }
    }
}

/// A unit of matching logic.
///
/// `run` is called once per convergence round for as long as some strategy
/// keeps making progress. It must only ever add matches; the map offers no
/// way to undo one.
pub trait AlignmentStrategy {
    fn name(&self) -> &str;

    /// Higher runs first
    fn priority(&self) -> i32;

    /// Called once per phase before any `run`. Shared services are
    /// registered here.
    fn initialize(&mut self, ctx: &mut AlignmentContext<'_>) -> StrategyResult<()>;

    fn run(&mut self, ctx: &mut AlignmentContext<'_>) -> StrategyResult<()>;

    /// Drop per-run state after the phase ends
    fn reset(&mut self) -> StrategyResult<()> {
        Ok(())
    }
}
