//! Match entities through a shared code annotation

use crate::align::errors::{StrategyError, StrategyResult};
use crate::align::strategy::{AlignmentContext, AlignmentStrategy};
use crate::service::CodeToEntityMapper;

pub const MATCH_BY_CODE: &str = "match_by_code";

/// Pairs entities that carry the same code in both versions.
///
/// Publishes a [`CodeToEntityMapper`] during `initialize` (unless another
/// strategy already did) and only matches codes that are unambiguous on
/// both sides.
#[derive(Debug, Default)]
pub struct MatchByCode {
    initialized: bool,
}

impl MatchByCode {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlignmentStrategy for MatchByCode {
    fn name(&self) -> &str {
        MATCH_BY_CODE
    }

    fn priority(&self) -> i32 {
        20
    }

    fn initialize(&mut self, ctx: &mut AlignmentContext<'_>) -> StrategyResult<()> {
        if !ctx.services.contains::<CodeToEntityMapper>() {
            let mapper = CodeToEntityMapper::from_parameters(
                ctx.parameters,
                ctx.map.source_ontology(),
                ctx.map.target_ontology(),
            )?;
            ctx.services.register(mapper);
        }
        self.initialized = true;
        Ok(())
    }

    fn run(&mut self, ctx: &mut AlignmentContext<'_>) -> StrategyResult<()> {
        if !self.initialized {
            return Err(StrategyError::NotInitialized(MATCH_BY_CODE.to_string()));
        }
        let mapper = ctx
            .services
            .lookup::<CodeToEntityMapper>()
            .ok_or_else(|| StrategyError::failed("code index service missing"))?;

        let mut pairs = Vec::new();
        for code in mapper.source_codes() {
            let (sources, targets) = (mapper.source_entities(code), mapper.target_entities(code));
            if sources.len() != 1 || targets.len() != 1 {
                continue;
            }
            let (source, target) = (&sources[0], &targets[0]);
            if source.kind == target.kind
                && ctx.map.unmatched_source_entities().contains(source)
                && ctx.map.unmatched_target_entities().contains(target)
            {
                pairs.push((source.clone(), target.clone(), format!("same code {}", code)));
            }
        }

        for (source, target, why) in pairs {
            ctx.map.add_match(source, target, why)?;
        }
        Ok(())
    }

    fn reset(&mut self) -> StrategyResult<()> {
        self.initialized = false;
        Ok(())
    }
}
