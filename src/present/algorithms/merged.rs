//! Merge detection
//!
//! A concept merged into another keeps existing in the target version,
//! carries an annotation naming the concept it was merged into and is
//! usually retired. Its statements reappear on the surviving concept.

use crate::align::AlignmentMap;
use crate::model::{AnonymousIndividual, Axiom, Entity, Iri, Vocabulary};
use crate::present::errors::{PresentationError, PresentationResult};
use crate::present::matched::{MatchDescription, MatchedAxiom};
use crate::present::strategy::{PresentationContext, PresentationStrategy};
use crate::service::RetirementClassService;

pub const IDENTIFY_MERGED_CONCEPTS: &str = "identify_merged_concepts";

/// Parameter naming the annotation property that records a merge target
pub const MERGED_INTO_ANNOTATION_PROPERTY: &str = "merged.into.annotation.property";

/// The annotation recording the merge
pub const MERGE: MatchDescription = MatchDescription::from_static("merge");
/// Retirement bookkeeping on the merged concept
pub const RETIRED_DUE_TO_MERGE: MatchDescription = MatchDescription::from_static("retired-due-to-merge");
/// A statement that moved from the merged concept to the surviving one
pub const MERGE_AXIOM: MatchDescription = MatchDescription::from_static("merge-axiom");

#[derive(Debug, Default)]
pub struct IdentifyMergedConcepts {
    property: Option<Iri>,
}

impl IdentifyMergedConcepts {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One detected merge: `merged` (source side and target side) into `into`
struct Merge {
    merged_source: Entity,
    merged_target: Entity,
    into: Entity,
}

/// The alignment, except that the merged concept translates to the
/// surviving one
struct MergeVocabulary<'a> {
    map: &'a AlignmentMap,
    merged: &'a Entity,
    into: &'a Entity,
}

impl Vocabulary for MergeVocabulary<'_> {
    fn entity(&self, entity: &Entity) -> Option<Entity> {
        if entity == self.merged {
            Some(self.into.clone())
        } else {
            self.map.entity(entity)
        }
    }

    fn subject(&self, iri: &Iri) -> Option<Iri> {
        if *iri == self.merged.iri {
            Some(self.into.iri.clone())
        } else {
            self.map.subject(iri)
        }
    }

    fn anonymous(&self, individual: &AnonymousIndividual) -> Option<AnonymousIndividual> {
        self.map.anonymous(individual)
    }
}

fn find_merges(map: &AlignmentMap, property: &Iri) -> Vec<Merge> {
    let target = map.target_ontology();
    let mut merges = Vec::new();
    for (merged_source, merged_target) in map.entity_map() {
        for value in target.annotation_values(&merged_target.iri, property) {
            let into_iri = match (value.as_iri(), value.as_literal()) {
                (Some(iri), _) => iri.clone(),
                (None, Some(lexical)) => Iri::new(lexical),
                _ => continue,
            };
            for into in target.entities_with_iri(&into_iri) {
                if into.kind == merged_target.kind && into != merged_target {
                    merges.push(Merge {
                        merged_source: merged_source.clone(),
                        merged_target: merged_target.clone(),
                        into: into.clone(),
                    });
                }
            }
        }
    }
    merges
}

fn is_merge_record(axiom: &Axiom, property: &Iri) -> bool {
    matches!(axiom, Axiom::AnnotationAssertion { property: p, .. } if p == property)
}

impl PresentationStrategy for IdentifyMergedConcepts {
    fn name(&self) -> &str {
        IDENTIFY_MERGED_CONCEPTS
    }

    fn priority(&self) -> i32 {
        20
    }

    fn initialize(&mut self, ctx: &mut PresentationContext<'_>) -> PresentationResult<()> {
        self.property = Some(Iri::new(ctx.parameters.require(MERGED_INTO_ANNOTATION_PROPERTY)?));
        if !ctx.services.contains::<RetirementClassService>() {
            ctx.services
                .register(RetirementClassService::from_parameters(ctx.parameters));
        }
        Ok(())
    }

    fn apply(&mut self, ctx: &mut PresentationContext<'_>) -> PresentationResult<()> {
        let property = self
            .property
            .clone()
            .ok_or_else(|| PresentationError::NotInitialized(IDENTIFY_MERGED_CONCEPTS.to_string()))?;
        let retirement = ctx
            .services
            .lookup::<RetirementClassService>()
            .cloned()
            .unwrap_or_default();

        for merge in find_merges(ctx.map, &property) {
            let recorded = match ctx.changes.target_diff(&merge.merged_target) {
                Some(diff) => diff.matches().to_vec(),
                None => continue,
            };

            for matched in &recorded {
                let description = matched.description();
                if *description == MatchDescription::AXIOM_ADDED {
                    let tag = match matched.target() {
                        Some(axiom) if is_merge_record(axiom, &property) => MERGE,
                        Some(axiom) if retirement.is_retirement_axiom(axiom) => RETIRED_DUE_TO_MERGE,
                        _ => continue,
                    };
                    ctx.changes.replace_match(matched, matched.relabeled(tag))?;
                } else if *description == MatchDescription::AXIOM_DELETED {
                    let Some(source) = matched.source() else { continue };
                    let vocabulary = MergeVocabulary {
                        map: ctx.map,
                        merged: &merge.merged_source,
                        into: &merge.into,
                    };
                    let Some(moved) = source.rewrite(&vocabulary) else { continue };
                    let added = MatchedAxiom::added(moved.clone());
                    let landed = ctx
                        .changes
                        .target_diff(&merge.into)
                        .map_or(false, |diff| diff.contains(&added));
                    if landed {
                        ctx.changes.remove_match(&added);
                        ctx.changes.replace_match(
                            matched,
                            MatchedAxiom::paired(source.clone(), moved, MERGE_AXIOM),
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}
