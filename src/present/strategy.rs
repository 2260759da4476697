//! Presentation strategy contract

use crate::align::AlignmentMap;
use crate::config::Parameters;
use crate::service::ServiceRegistry;

use super::changes::ChangeModel;
use super::errors::PresentationResult;

/// Scoped access handed to a presentation strategy for one hook call.
///
/// The alignment is only reachable through a shared reference; the change
/// model is the one thing a strategy writes.
pub struct PresentationContext<'a> {
    pub map: &'a AlignmentMap,
    pub changes: &'a mut ChangeModel,
    pub parameters: &'a Parameters,
    pub services: &'a mut ServiceRegistry,
}

impl<'a> PresentationContext<'a> {
    pub fn new(
        map: &'a AlignmentMap,
        changes: &'a mut ChangeModel,
        parameters: &'a Parameters,
        services: &'a mut ServiceRegistry,
    ) -> Self {
        Self {
            map,
            changes,
            parameters,
            services,
        }
    }
}

/// A unit of classification logic.
///
/// `apply` runs exactly once per phase, after every higher-priority
/// strategy has applied, and typically relabels the default
/// `axiom-added` / `axiom-deleted` entries it recognizes.
pub trait PresentationStrategy {
    fn name(&self) -> &str;

    /// Higher runs first
    fn priority(&self) -> i32;

    fn initialize(&mut self, ctx: &mut PresentationContext<'_>) -> PresentationResult<()>;

    fn apply(&mut self, ctx: &mut PresentationContext<'_>) -> PresentationResult<()>;
}
