//! Per-entity diff

use std::fmt;

use serde::Serialize;

use crate::model::Entity;

use super::matched::MatchedAxiom;

/// Display classification of an [`EntityBasedDiff`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffType {
    /// No differences recorded
    Equivalent,
    /// The entity only exists in the target version
    Created,
    /// The entity only exists in the source version
    Deleted,
    /// Matched entities whose IRIs differ
    Renamed,
    /// Matched entities with the same IRI
    Modified,
}

impl DiffType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffType::Equivalent => "equivalent",
            DiffType::Created => "created",
            DiffType::Deleted => "deleted",
            DiffType::Renamed => "renamed",
            DiffType::Modified => "modified",
        }
    }
}

impl fmt::Display for DiffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which versions the diffed entity exists in
#[derive(Debug, Clone, PartialEq, Eq)]
enum Sides {
    Source(Entity),
    Target(Entity),
    Both { source: Entity, target: Entity },
}

/// The matched axioms concerning one entity, in insertion order.
///
/// A diff covering a matched pair knows both sides; it is reachable from
/// both indices of the change model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityBasedDiff {
    sides: Sides,
    matches: Vec<MatchedAxiom>,
}

impl EntityBasedDiff {
    /// Diff for a source entity and its target counterpart, if any
    pub(crate) fn for_source(source: Entity, target: Option<Entity>) -> Self {
        let sides = match target {
            Some(target) => Sides::Both { source, target },
            None => Sides::Source(source),
        };
        Self {
            sides,
            matches: Vec::new(),
        }
    }

    /// Diff for a target entity with no source counterpart
    pub(crate) fn for_target(target: Entity) -> Self {
        Self {
            sides: Sides::Target(target),
            matches: Vec::new(),
        }
    }

    pub fn source_entity(&self) -> Option<&Entity> {
        match &self.sides {
            Sides::Source(source) | Sides::Both { source, .. } => Some(source),
            Sides::Target(_) => None,
        }
    }

    pub fn target_entity(&self) -> Option<&Entity> {
        match &self.sides {
            Sides::Target(target) | Sides::Both { target, .. } => Some(target),
            Sides::Source(_) => None,
        }
    }

    /// The entity the diff is reported under: the source side when present
    pub fn entity(&self) -> &Entity {
        match &self.sides {
            Sides::Source(entity) | Sides::Target(entity) => entity,
            Sides::Both { source, .. } => source,
        }
    }

    pub fn matches(&self) -> &[MatchedAxiom] {
        &self.matches
    }

    pub fn contains(&self, matched: &MatchedAxiom) -> bool {
        self.matches.contains(matched)
    }

    pub fn is_equivalent(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn diff_type(&self) -> DiffType {
        if self.matches.is_empty() {
            return DiffType::Equivalent;
        }
        match &self.sides {
            Sides::Both { source, target } if source.iri != target.iri => DiffType::Renamed,
            Sides::Both { .. } => DiffType::Modified,
            Sides::Source(_) => DiffType::Deleted,
            Sides::Target(_) => DiffType::Created,
        }
    }

    /// One-line heading for the changelog
    pub fn description(&self) -> String {
        match (self.diff_type(), &self.sides) {
            (DiffType::Renamed, Sides::Both { source, target }) => {
                format!("Renamed {} -> {}", source, target.iri.short_form())
            }
            (diff_type, _) => {
                let mut heading = diff_type.as_str().to_string();
                if let Some(first) = heading.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                format!("{} {}", heading, self.entity())
            }
        }
    }

    pub(crate) fn push(&mut self, matched: MatchedAxiom) {
        self.matches.push(matched);
    }

    /// Remove the most recently added occurrence; false when absent
    pub(crate) fn remove_one(&mut self, matched: &MatchedAxiom) -> bool {
        match self.matches.iter().rposition(|m| m == matched) {
            Some(index) => {
                self.matches.remove(index);
                true
            }
            None => false,
        }
    }
}
