//! Retirement detection

use crate::model::Axiom;
use crate::present::errors::{PresentationError, PresentationResult};
use crate::present::matched::{MatchDescription, MatchedAxiom};
use crate::present::strategy::{PresentationContext, PresentationStrategy};
use crate::service::RetirementClassService;

pub const IDENTIFY_RETIRED_CONCEPTS: &str = "identify_retired_concepts";

/// A statement added while retiring the concept
pub const RETIRED: MatchDescription = MatchDescription::from_static("retired");
/// A logical statement dropped while retiring the concept
pub const DELETED_DUE_TO_RETIREMENT: MatchDescription =
    MatchDescription::from_static("deleted-due-to-retirement");

/// Relabels the additions and logical deletions of concepts the target
/// version retires. Diffs another strategy already classified are left
/// alone, so a merged concept is not reported twice.
#[derive(Debug, Default)]
pub struct IdentifyRetiredConcepts {
    initialized: bool,
}

impl IdentifyRetiredConcepts {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_logical(axiom: &Axiom) -> bool {
    !matches!(axiom, Axiom::Declaration { .. } | Axiom::AnnotationAssertion { .. })
}

impl PresentationStrategy for IdentifyRetiredConcepts {
    fn name(&self) -> &str {
        IDENTIFY_RETIRED_CONCEPTS
    }

    fn priority(&self) -> i32 {
        10
    }

    fn initialize(&mut self, ctx: &mut PresentationContext<'_>) -> PresentationResult<()> {
        if !ctx.services.contains::<RetirementClassService>() {
            ctx.services
                .register(RetirementClassService::from_parameters(ctx.parameters));
        }
        self.initialized = true;
        Ok(())
    }

    fn apply(&mut self, ctx: &mut PresentationContext<'_>) -> PresentationResult<()> {
        if !self.initialized {
            return Err(PresentationError::NotInitialized(IDENTIFY_RETIRED_CONCEPTS.to_string()));
        }
        let retirement = ctx
            .services
            .lookup::<RetirementClassService>()
            .cloned()
            .unwrap_or_default();
        if !retirement.is_configured() {
            return Ok(());
        }

        let target = ctx.map.target_ontology();
        let retired: Vec<Vec<MatchedAxiom>> = ctx
            .changes
            .diffs()
            .filter(|diff| {
                diff.target_entity()
                    .map_or(false, |entity| retirement.is_retired(target, entity))
            })
            .filter(|diff| diff.matches().iter().all(|m| m.description().is_default()))
            .map(|diff| diff.matches().to_vec())
            .collect();

        for recorded in retired {
            for matched in &recorded {
                let tag = if *matched.description() == MatchDescription::AXIOM_ADDED {
                    RETIRED
                } else if matched.source().map_or(false, is_logical) {
                    DELETED_DUE_TO_RETIREMENT
                } else {
                    continue;
                };
                ctx.changes.replace_match(matched, matched.relabeled(tag))?;
            }
        }
        Ok(())
    }
}
