//! Alignment Map
//!
//! Correspondence state between the source and target versions, built up by
//! alignment strategies during phase 1.
//!
//! Invariants:
//! - Every source entity, anonymous individual and axiom is in exactly one of
//!   the matched or unmatched collections; the same holds for the target side.
//! - The entity, individual and axiom correspondences are injective in both
//!   directions.
//! - Matches are never removed.
//! - After [`AlignmentMap::finish`] every mutation is rejected.
//!
//! Axiom matches are derived: whenever an entity or anonymous individual is
//! matched, the unmatched source axioms that mention it are rewritten into the
//! target vocabulary and paired with an identical unmatched target axiom.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::model::{AnonymousIndividual, Axiom, Entity, Iri, Ontology, Vocabulary};

use super::errors::{AlignmentError, AlignmentResult};

/// Unmatched source counts the convergence loop monitors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnmatchedCounts {
    pub entities: usize,
    pub individuals: usize,
}

impl UnmatchedCounts {
    pub fn is_zero(&self) -> bool {
        self.entities == 0 && self.individuals == 0
    }

    /// Either count went down since `before`
    pub fn improved_on(&self, before: &UnmatchedCounts) -> bool {
        self.entities < before.entities || self.individuals < before.individuals
    }
}

#[derive(Debug, Clone)]
pub struct AlignmentMap {
    source: Arc<Ontology>,
    target: Arc<Ontology>,

    entity_map: BTreeMap<Entity, Entity>,
    reverse_entity_map: BTreeMap<Entity, Entity>,
    explanations: BTreeMap<Entity, String>,
    unmatched_source_entities: BTreeSet<Entity>,
    unmatched_target_entities: BTreeSet<Entity>,

    individual_map: BTreeMap<AnonymousIndividual, AnonymousIndividual>,
    reverse_individual_map: BTreeMap<AnonymousIndividual, AnonymousIndividual>,
    unmatched_source_individuals: BTreeSet<AnonymousIndividual>,
    unmatched_target_individuals: BTreeSet<AnonymousIndividual>,

    axiom_map: BTreeMap<Axiom, Axiom>,
    reverse_axiom_map: BTreeMap<Axiom, Axiom>,
    unmatched_source_axioms: BTreeSet<Axiom>,
    unmatched_target_axioms: BTreeSet<Axiom>,

    /// Source axioms by every IRI they mention, typed or as annotation subject
    axioms_by_iri: BTreeMap<Iri, Vec<Axiom>>,
    /// Source axioms by the anonymous individuals they mention
    axioms_by_individual: BTreeMap<AnonymousIndividual, Vec<Axiom>>,

    finished: bool,
}

impl AlignmentMap {
    /// Fresh map with everything unmatched
    pub fn new(source: Arc<Ontology>, target: Arc<Ontology>) -> Self {
        let mut axioms_by_iri: BTreeMap<Iri, Vec<Axiom>> = BTreeMap::new();
        let mut axioms_by_individual: BTreeMap<AnonymousIndividual, Vec<Axiom>> = BTreeMap::new();
        for axiom in source.axioms() {
            let mut iris: BTreeSet<Iri> = axiom.typed_entities().into_iter().map(|e| e.iri).collect();
            if let Some(subject) = axiom.annotation_subject() {
                iris.insert(subject.clone());
            }
            for iri in iris {
                axioms_by_iri.entry(iri).or_default().push(axiom.clone());
            }
            for anon in axiom.anonymous_individuals() {
                axioms_by_individual.entry(anon).or_default().push(axiom.clone());
            }
        }

        Self {
            unmatched_source_entities: source.signature().clone(),
            unmatched_target_entities: target.signature().clone(),
            unmatched_source_individuals: source.anonymous_individuals().clone(),
            unmatched_target_individuals: target.anonymous_individuals().clone(),
            unmatched_source_axioms: source.axioms().clone(),
            unmatched_target_axioms: target.axioms().clone(),
            source,
            target,
            entity_map: BTreeMap::new(),
            reverse_entity_map: BTreeMap::new(),
            explanations: BTreeMap::new(),
            individual_map: BTreeMap::new(),
            reverse_individual_map: BTreeMap::new(),
            axiom_map: BTreeMap::new(),
            reverse_axiom_map: BTreeMap::new(),
            axioms_by_iri,
            axioms_by_individual,
            finished: false,
        }
    }

    pub fn source_ontology(&self) -> &Ontology {
        &self.source
    }

    pub fn target_ontology(&self) -> &Ontology {
        &self.target
    }

    // =========================================================================
    // ENTITY MATCHING
    // =========================================================================

    /// Record that `source` in the old version is `target` in the new one.
    ///
    /// `explanation` says which strategy made the match and why.
    pub fn add_match(
        &mut self,
        source: Entity,
        target: Entity,
        explanation: impl Into<String>,
    ) -> AlignmentResult<()> {
        self.ensure_open()?;
        if source.kind != target.kind {
            return Err(AlignmentError::KindMismatch {
                source_entity: source,
                target_entity: target,
            });
        }
        if !self.unmatched_source_entities.contains(&source) {
            return Err(if self.entity_map.contains_key(&source) {
                AlignmentError::SourceAlreadyMatched(source)
            } else {
                AlignmentError::UnknownEntity(source)
            });
        }
        if !self.unmatched_target_entities.contains(&target) {
            return Err(if self.reverse_entity_map.contains_key(&target) {
                AlignmentError::TargetAlreadyMatched(target)
            } else {
                AlignmentError::UnknownEntity(target)
            });
        }

        self.unmatched_source_entities.remove(&source);
        self.unmatched_target_entities.remove(&target);
        self.explanations.insert(source.clone(), explanation.into());
        self.entity_map.insert(source.clone(), target.clone());
        self.reverse_entity_map.insert(target, source.clone());

        let candidates = self.axioms_by_iri.get(&source.iri).cloned().unwrap_or_default();
        self.match_derived_axioms(candidates);
        Ok(())
    }

    /// Record several entity matches; stops at the first rejected pair
    pub fn add_matches(
        &mut self,
        matches: impl IntoIterator<Item = (Entity, Entity)>,
        explanation: &str,
    ) -> AlignmentResult<()> {
        for (source, target) in matches {
            self.add_match(source, target, explanation)?;
        }
        Ok(())
    }

    /// Record that two anonymous individuals denote the same thing
    pub fn add_individual_match(
        &mut self,
        source: AnonymousIndividual,
        target: AnonymousIndividual,
    ) -> AlignmentResult<()> {
        self.ensure_open()?;
        if !self.unmatched_source_individuals.contains(&source) {
            return Err(AlignmentError::IndividualUnavailable(source));
        }
        if !self.unmatched_target_individuals.contains(&target) {
            return Err(AlignmentError::IndividualUnavailable(target));
        }

        self.unmatched_source_individuals.remove(&source);
        self.unmatched_target_individuals.remove(&target);
        self.individual_map.insert(source.clone(), target.clone());
        self.reverse_individual_map.insert(target, source.clone());

        let candidates = self
            .axioms_by_individual
            .get(&source)
            .cloned()
            .unwrap_or_default();
        self.match_derived_axioms(candidates);
        Ok(())
    }

    /// Pair two axioms directly, for strategies that know better than the
    /// vocabulary rewrite
    pub fn add_axiom_match(&mut self, source: Axiom, target: Axiom) -> AlignmentResult<()> {
        self.ensure_open()?;
        if !self.unmatched_source_axioms.contains(&source) {
            return Err(AlignmentError::AxiomUnavailable(source.to_string()));
        }
        if !self.unmatched_target_axioms.contains(&target) {
            return Err(AlignmentError::AxiomUnavailable(target.to_string()));
        }
        self.record_axiom_match(source, target);
        Ok(())
    }

    /// Freeze the map. Idempotent.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn ensure_open(&self) -> AlignmentResult<()> {
        if self.finished {
            Err(AlignmentError::Frozen)
        } else {
            Ok(())
        }
    }

    fn match_derived_axioms(&mut self, candidates: Vec<Axiom>) {
        for axiom in candidates {
            if !self.unmatched_source_axioms.contains(&axiom) {
                continue;
            }
            if let Some(translated) = axiom.rewrite(&*self) {
                if self.unmatched_target_axioms.contains(&translated) {
                    self.record_axiom_match(axiom, translated);
                }
            }
        }
    }

    fn record_axiom_match(&mut self, source: Axiom, target: Axiom) {
        self.unmatched_source_axioms.remove(&source);
        self.unmatched_target_axioms.remove(&target);
        self.axiom_map.insert(source.clone(), target.clone());
        self.reverse_axiom_map.insert(target, source);
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn unmatched_counts(&self) -> UnmatchedCounts {
        UnmatchedCounts {
            entities: self.unmatched_source_entities.len(),
            individuals: self.unmatched_source_individuals.len(),
        }
    }

    pub fn unmatched_source_entities(&self) -> &BTreeSet<Entity> {
        &self.unmatched_source_entities
    }

    pub fn unmatched_target_entities(&self) -> &BTreeSet<Entity> {
        &self.unmatched_target_entities
    }

    pub fn unmatched_source_individuals(&self) -> &BTreeSet<AnonymousIndividual> {
        &self.unmatched_source_individuals
    }

    pub fn unmatched_target_individuals(&self) -> &BTreeSet<AnonymousIndividual> {
        &self.unmatched_target_individuals
    }

    pub fn unmatched_source_axioms(&self) -> &BTreeSet<Axiom> {
        &self.unmatched_source_axioms
    }

    pub fn unmatched_target_axioms(&self) -> &BTreeSet<Axiom> {
        &self.unmatched_target_axioms
    }

    /// Source → target entity correspondence
    pub fn entity_map(&self) -> &BTreeMap<Entity, Entity> {
        &self.entity_map
    }

    pub fn target_of(&self, source: &Entity) -> Option<&Entity> {
        self.entity_map.get(source)
    }

    pub fn source_of(&self, target: &Entity) -> Option<&Entity> {
        self.reverse_entity_map.get(target)
    }

    /// Why `source` was matched, as recorded by the matching strategy
    pub fn explanation(&self, source: &Entity) -> Option<&str> {
        self.explanations.get(source).map(String::as_str)
    }

    pub fn individual_map(&self) -> &BTreeMap<AnonymousIndividual, AnonymousIndividual> {
        &self.individual_map
    }

    /// Source → target axiom correspondence
    pub fn axiom_map(&self) -> &BTreeMap<Axiom, Axiom> {
        &self.axiom_map
    }

    pub fn target_axiom_of(&self, source: &Axiom) -> Option<&Axiom> {
        self.axiom_map.get(source)
    }

    pub fn source_axiom_of(&self, target: &Axiom) -> Option<&Axiom> {
        self.reverse_axiom_map.get(target)
    }

    /// Rewrite a source axiom into the target vocabulary, if every element
    /// it mentions has been matched
    pub fn translate(&self, axiom: &Axiom) -> Option<Axiom> {
        axiom.rewrite(self)
    }
}

impl Vocabulary for AlignmentMap {
    fn entity(&self, entity: &Entity) -> Option<Entity> {
        self.entity_map.get(entity).cloned()
    }

    fn subject(&self, iri: &Iri) -> Option<Iri> {
        let candidates = self.source.entities_with_iri(iri);
        if candidates.is_empty() {
            // Not an entity of the source version; the IRI carries over as is.
            return Some(iri.clone());
        }
        candidates
            .iter()
            .find_map(|e| self.entity_map.get(e))
            .map(|t| t.iri.clone())
    }

    fn anonymous(&self, individual: &AnonymousIndividual) -> Option<AnonymousIndividual> {
        self.individual_map.get(individual).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnnotationValue;

    fn ontologies() -> (Arc<Ontology>, Arc<Ontology>) {
        let source = Ontology::new(vec![
            Axiom::declaration(Entity::class("ex#A")),
            Axiom::declaration(Entity::class("ex#B")),
            Axiom::sub_class_of("ex#A", "ex#B"),
        ]);
        let target = Ontology::new(vec![
            Axiom::declaration(Entity::class("ex#A2")),
            Axiom::declaration(Entity::class("ex#B")),
            Axiom::sub_class_of("ex#A2", "ex#B"),
        ]);
        (Arc::new(source), Arc::new(target))
    }

    #[test]
    fn test_starts_fully_unmatched() {
        let (s, t) = ontologies();
        let map = AlignmentMap::new(s, t);
        assert_eq!(map.unmatched_counts().entities, 2);
        assert_eq!(map.unmatched_source_axioms().len(), 3);
        assert!(map.entity_map().is_empty());
    }

    #[test]
    fn test_axioms_match_once_all_references_match() {
        let (s, t) = ontologies();
        let mut map = AlignmentMap::new(s, t);

        map.add_match(Entity::class("ex#A"), Entity::class("ex#A2"), "rename")
            .unwrap();
        // Declaration(A) pairs with Declaration(A2); the subclass axiom still waits on B.
        assert_eq!(map.axiom_map().len(), 1);

        map.add_match(Entity::class("ex#B"), Entity::class("ex#B"), "id")
            .unwrap();
        assert_eq!(map.axiom_map().len(), 3);
        assert!(map.unmatched_source_axioms().is_empty());
        assert!(map.unmatched_target_axioms().is_empty());
        assert_eq!(
            map.target_axiom_of(&Axiom::sub_class_of("ex#A", "ex#B")),
            Some(&Axiom::sub_class_of("ex#A2", "ex#B"))
        );
        assert_eq!(map.explanation(&Entity::class("ex#A")), Some("rename"));
    }

    #[test]
    fn test_match_is_injective() {
        let (s, t) = ontologies();
        let mut map = AlignmentMap::new(s, t);
        map.add_match(Entity::class("ex#A"), Entity::class("ex#A2"), "x")
            .unwrap();

        assert_eq!(
            map.add_match(Entity::class("ex#A"), Entity::class("ex#B"), "x"),
            Err(AlignmentError::SourceAlreadyMatched(Entity::class("ex#A")))
        );
        assert_eq!(
            map.add_match(Entity::class("ex#B"), Entity::class("ex#A2"), "x"),
            Err(AlignmentError::TargetAlreadyMatched(Entity::class("ex#A2")))
        );
    }

    #[test]
    fn test_rejects_unknown_and_mismatched_kinds() {
        let (s, t) = ontologies();
        let mut map = AlignmentMap::new(s, t);

        assert!(matches!(
            map.add_match(Entity::class("ex#Nope"), Entity::class("ex#B"), "x"),
            Err(AlignmentError::UnknownEntity(_))
        ));
        assert!(matches!(
            map.add_match(Entity::class("ex#A"), Entity::individual("ex#A2"), "x"),
            Err(AlignmentError::KindMismatch { .. })
        ));
        assert_eq!(map.unmatched_counts().entities, 2);
    }

    #[test]
    fn test_finished_map_rejects_mutation() {
        let (s, t) = ontologies();
        let mut map = AlignmentMap::new(s, t);
        map.finish();

        assert_eq!(
            map.add_match(Entity::class("ex#B"), Entity::class("ex#B"), "x"),
            Err(AlignmentError::Frozen)
        );
        assert!(map.is_finished());
        assert_eq!(map.unmatched_counts().entities, 2);
    }

    #[test]
    fn test_annotation_matches_through_subject_rename() {
        let source = Ontology::new(vec![
            Axiom::declaration(Entity::class("ex#A")),
            Axiom::declaration(Entity::annotation_property("ex#label")),
            Axiom::annotation("ex#label", "ex#A", AnnotationValue::literal("Alpha")),
        ]);
        let target = Ontology::new(vec![
            Axiom::declaration(Entity::class("ex#A2")),
            Axiom::declaration(Entity::annotation_property("ex#label")),
            Axiom::annotation("ex#label", "ex#A2", AnnotationValue::literal("Alpha")),
        ]);
        let mut map = AlignmentMap::new(Arc::new(source), Arc::new(target));

        map.add_match(
            Entity::annotation_property("ex#label"),
            Entity::annotation_property("ex#label"),
            "id",
        )
        .unwrap();
        assert_eq!(map.unmatched_source_axioms().len(), 2);

        map.add_match(Entity::class("ex#A"), Entity::class("ex#A2"), "rename")
            .unwrap();
        assert!(map.unmatched_source_axioms().is_empty());
    }

    #[test]
    fn test_individual_match_unlocks_axioms() {
        use crate::model::Individual;

        let assertion = |id: &str| Axiom::ClassAssertion {
            class: Iri::new("ex#C"),
            individual: Individual::Anonymous(AnonymousIndividual::new(id)),
        };
        let source = Ontology::new(vec![assertion("b1")]);
        let target = Ontology::new(vec![assertion("x9")]);
        let mut map = AlignmentMap::new(Arc::new(source), Arc::new(target));

        map.add_match(Entity::class("ex#C"), Entity::class("ex#C"), "id")
            .unwrap();
        assert_eq!(map.unmatched_counts().individuals, 1);

        map.add_individual_match(AnonymousIndividual::new("b1"), AnonymousIndividual::new("x9"))
            .unwrap();
        assert_eq!(map.unmatched_counts(), UnmatchedCounts::default());
        assert_eq!(map.axiom_map().len(), 1);
    }
}
