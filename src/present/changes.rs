//! Change model
//!
//! Diffs live in one canonical store keyed by [`DiffKey`]. The source and
//! target indices map entities to keys, so a matched pair resolves to the
//! same diff from either side. Diffs are created the first time a matched
//! axiom concerns their entity and are never removed.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::align::AlignmentMap;
use crate::model::{Axiom, Entity};
use crate::observability::{log_event_with_fields, Event};

use super::diff::EntityBasedDiff;
use super::errors::{ChangeError, ChangeResult};
use super::matched::MatchedAxiom;

/// Canonical key of a diff: the source entity when the diff has one
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiffKey {
    Source(Entity),
    Target(Entity),
}

/// Classified differences between two aligned versions
#[derive(Debug, Clone)]
pub struct ChangeModel {
    alignment: Arc<AlignmentMap>,
    diffs: BTreeMap<DiffKey, EntityBasedDiff>,
    source_index: BTreeMap<Entity, DiffKey>,
    target_index: BTreeMap<Entity, DiffKey>,
}

impl ChangeModel {
    /// Empty change model over a finished alignment
    pub fn new(alignment: Arc<AlignmentMap>) -> Self {
        Self {
            alignment,
            diffs: BTreeMap::new(),
            source_index: BTreeMap::new(),
            target_index: BTreeMap::new(),
        }
    }

    /// Change model with the default classification applied: every
    /// unmatched source axiom is recorded as deleted and every unmatched
    /// target axiom as added.
    ///
    /// Axioms that concern no entity of their version are skipped.
    pub fn from_alignment(alignment: Arc<AlignmentMap>) -> Self {
        let mut changes = Self::new(alignment);
        let map = Arc::clone(&changes.alignment);

        let deleted = map.unmatched_source_axioms().iter().cloned().map(MatchedAxiom::deleted);
        let added = map.unmatched_target_axioms().iter().cloned().map(MatchedAxiom::added);
        for matched in deleted.chain(added) {
            if let Err(e) = changes.add_match(matched) {
                log_event_with_fields(Event::ChangeSkipped, &[("reason", &e.to_string())]);
            }
        }
        changes
    }

    pub fn alignment(&self) -> &AlignmentMap {
        &self.alignment
    }

    /// Record `matched` in the diff of every entity it concerns.
    ///
    /// The source axiom is resolved against the source version and the
    /// target axiom against the target version. A diff reached from both
    /// sides receives the entry once. Equal entries are not merged.
    pub fn add_match(&mut self, matched: MatchedAxiom) -> ChangeResult<()> {
        let keys = self.resolve(&matched, true)?;
        for key in keys {
            if let Some(diff) = self.diffs.get_mut(&key) {
                diff.push(matched.clone());
            }
        }
        Ok(())
    }

    /// Remove one occurrence of `matched` from every diff it was added to.
    /// Returns whether anything was removed.
    pub fn remove_match(&mut self, matched: &MatchedAxiom) -> bool {
        let keys = match self.resolve(matched, false) {
            Ok(keys) => keys,
            Err(_) => return false,
        };
        let mut removed = false;
        for key in keys {
            if let Some(diff) = self.diffs.get_mut(&key) {
                removed |= diff.remove_one(matched);
            }
        }
        removed
    }

    /// Swap one recorded match for another; `old` must be present.
    ///
    /// An unresolvable `new` is rejected before `old` is touched.
    pub fn replace_match(&mut self, old: &MatchedAxiom, new: MatchedAxiom) -> ChangeResult<bool> {
        if !self.concerns_any(&new) {
            return Err(unresolvable(&new));
        }
        if !self.remove_match(old) {
            return Ok(false);
        }
        self.add_match(new)?;
        Ok(true)
    }

    pub fn source_diff(&self, entity: &Entity) -> Option<&EntityBasedDiff> {
        self.source_index.get(entity).and_then(|key| self.diffs.get(key))
    }

    pub fn target_diff(&self, entity: &Entity) -> Option<&EntityBasedDiff> {
        self.target_index.get(entity).and_then(|key| self.diffs.get(key))
    }

    /// Every diff once, in key order
    pub fn diffs(&self) -> impl Iterator<Item = &EntityBasedDiff> {
        self.diffs.values()
    }

    pub fn non_equivalent_diffs(&self) -> impl Iterator<Item = &EntityBasedDiff> {
        self.diffs.values().filter(|d| !d.is_equivalent())
    }

    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    /// Whether `matched` concerns at least one entity of its versions
    fn concerns_any(&self, matched: &MatchedAxiom) -> bool {
        let source = matched
            .source()
            .is_some_and(|a| !self.alignment.source_ontology().entities_concerned_by(a).is_empty());
        let target = matched
            .target()
            .is_some_and(|a| !self.alignment.target_ontology().entities_concerned_by(a).is_empty());
        source || target
    }

    /// Keys of the diffs `matched` belongs to, deduplicated. With `create`,
    /// missing diffs are created on the way.
    fn resolve(&mut self, matched: &MatchedAxiom, create: bool) -> ChangeResult<Vec<DiffKey>> {
        let map = Arc::clone(&self.alignment);
        let mut keys = Vec::new();

        if let Some(axiom) = matched.source() {
            for entity in map.source_ontology().entities_concerned_by(axiom) {
                let key = if create {
                    Some(self.source_key(entity))
                } else {
                    self.source_index.get(&entity).cloned()
                };
                keys.extend(key);
            }
        }
        if let Some(axiom) = matched.target() {
            for entity in map.target_ontology().entities_concerned_by(axiom) {
                let key = if create {
                    Some(self.target_key(entity))
                } else {
                    self.target_index.get(&entity).cloned()
                };
                keys.extend(key);
            }
        }

        if create && keys.is_empty() {
            return Err(unresolvable(matched));
        }
        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    fn source_key(&mut self, entity: Entity) -> DiffKey {
        if let Some(key) = self.source_index.get(&entity) {
            return key.clone();
        }
        let key = DiffKey::Source(entity.clone());
        let target = self.alignment.target_of(&entity).cloned();
        if let Some(target) = &target {
            self.target_index.insert(target.clone(), key.clone());
        }
        self.diffs
            .insert(key.clone(), EntityBasedDiff::for_source(entity.clone(), target));
        self.source_index.insert(entity, key.clone());
        key
    }

    fn target_key(&mut self, entity: Entity) -> DiffKey {
        if let Some(key) = self.target_index.get(&entity) {
            return key.clone();
        }
        if let Some(source) = self.alignment.source_of(&entity).cloned() {
            return self.source_key(source);
        }
        let key = DiffKey::Target(entity.clone());
        self.diffs
            .insert(key.clone(), EntityBasedDiff::for_target(entity.clone()));
        self.target_index.insert(entity, key.clone());
        key
    }
}

fn unresolvable(matched: &MatchedAxiom) -> ChangeError {
    let axiom: Option<&Axiom> = matched.source().or(matched.target());
    match axiom {
        Some(axiom) => ChangeError::Unresolvable(axiom.to_string()),
        None => ChangeError::EmptyMatch,
    }
}
