//! Match entities that keep their IRI across versions

use crate::align::errors::StrategyResult;
use crate::align::strategy::{AlignmentContext, AlignmentStrategy};

pub const MATCH_BY_ID: &str = "match_by_id";

/// Pairs source and target entities of the same kind and IRI, and anonymous
/// individuals with the same node id.
#[derive(Debug, Default)]
pub struct MatchById;

impl MatchById {
    pub fn new() -> Self {
        Self
    }
}

impl AlignmentStrategy for MatchById {
    fn name(&self) -> &str {
        MATCH_BY_ID
    }

    fn priority(&self) -> i32 {
        10
    }

    fn initialize(&mut self, _ctx: &mut AlignmentContext<'_>) -> StrategyResult<()> {
        Ok(())
    }

    fn run(&mut self, ctx: &mut AlignmentContext<'_>) -> StrategyResult<()> {
        let entities: Vec<_> = ctx
            .map
            .unmatched_source_entities()
            .iter()
            .filter(|e| ctx.map.unmatched_target_entities().contains(*e))
            .cloned()
            .collect();
        for entity in entities {
            ctx.map
                .add_match(entity.clone(), entity, "same IRI in both versions")?;
        }

        let individuals: Vec<_> = ctx
            .map
            .unmatched_source_individuals()
            .iter()
            .filter(|a| ctx.map.unmatched_target_individuals().contains(*a))
            .cloned()
            .collect();
        for individual in individuals {
            ctx.map.add_individual_match(individual.clone(), individual)?;
        }
        Ok(())
    }
}
