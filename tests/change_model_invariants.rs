//! Change Model Invariant Tests
//!
//! - An axiom is resolved against the version it belongs to
//! - A matched pair of entities shares one diff, reachable from both sides
//! - Adding then removing a match restores every affected diff
//! - Equal entries are kept as separate occurrences
//! - An axiom concerning no entity of its version is rejected

use ontodiff::align::algorithms::MatchById;
use ontodiff::align::{AlignmentContext, AlignmentStrategy, StrategyResult};
use ontodiff::model::{AnnotationValue, Axiom, Entity, Ontology};
use ontodiff::present::{ChangeError, ChangeModel, DiffType, MatchDescription, MatchedAxiom};
use ontodiff::Engine;

// =============================================================================
// Helper Functions
// =============================================================================

const LABEL: &str = "ex#label";

/// Matches fixed pairs of classes, e.g. a rename from `ex#Old` to `ex#New`
struct MatchPairs {
    pairs: Vec<(&'static str, &'static str)>,
}

impl AlignmentStrategy for MatchPairs {
    fn name(&self) -> &str {
        "match_pairs"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn initialize(&mut self, _ctx: &mut AlignmentContext<'_>) -> StrategyResult<()> {
        Ok(())
    }

    fn run(&mut self, ctx: &mut AlignmentContext<'_>) -> StrategyResult<()> {
        for (source, target) in &self.pairs {
            let (source, target) = (Entity::class(*source), Entity::class(*target));
            if ctx.map.unmatched_source_entities().contains(&source) {
                ctx.map.add_match(source, target, "renamed")?;
            }
        }
        Ok(())
    }
}

fn label(subject: &str, text: &str) -> Axiom {
    Axiom::annotation(LABEL, subject, AnnotationValue::literal(text))
}

/// Version 1 has `Old`, version 2 renamed it to `New`. Both keep `Stable`.
fn renamed_engine() -> Engine {
    let source = Ontology::new(vec![
        Axiom::declaration(Entity::annotation_property(LABEL)),
        Axiom::declaration(Entity::class("ex#Old")),
        Axiom::declaration(Entity::class("ex#Stable")),
        Axiom::sub_class_of("ex#Old", "ex#Stable"),
        label("ex#Old", "Old name"),
    ]);
    let target = Ontology::new(vec![
        Axiom::declaration(Entity::annotation_property(LABEL)),
        Axiom::declaration(Entity::class("ex#New")),
        Axiom::declaration(Entity::class("ex#Stable")),
        Axiom::sub_class_of("ex#New", "ex#Stable"),
        label("ex#New", "New name"),
    ]);

    let mut engine = Engine::new(source, target);
    engine.set_alignment_strategies(vec![
        Box::new(MatchPairs {
            pairs: vec![("ex#Old", "ex#New")],
        }),
        Box::new(MatchById::new()),
    ]);
    engine.run().unwrap();
    engine
}

/// Every non-empty diff with its entries
fn snapshot(changes: &ChangeModel) -> Vec<(Entity, Vec<MatchedAxiom>)> {
    changes
        .non_equivalent_diffs()
        .map(|d| (d.entity().clone(), d.matches().to_vec()))
        .collect()
}

// =============================================================================
// Shared Diff Tests
// =============================================================================

/// The renamed pair is one diff, found from either version's entity.
#[test]
fn test_matched_pair_shares_one_diff() {
    let engine = renamed_engine();
    let changes = engine.changes().unwrap();

    let from_source = changes.source_diff(&Entity::class("ex#Old")).unwrap();
    let from_target = changes.target_diff(&Entity::class("ex#New")).unwrap();
    assert!(std::ptr::eq(from_source, from_target));

    assert_eq!(from_source.diff_type(), DiffType::Renamed);
    assert_eq!(from_source.description(), "Renamed Class(Old) -> New");
    assert_eq!(changes.non_equivalent_diffs().count(), 1);
}

/// The subclass axiom is rewritten through the rename and matched; only
/// the label changed.
#[test]
fn test_rename_carries_matching_axioms() {
    let engine = renamed_engine();
    let diff = engine
        .changes()
        .unwrap()
        .source_diff(&Entity::class("ex#Old"))
        .unwrap();

    assert_eq!(
        diff.matches(),
        &[
            MatchedAxiom::deleted(label("ex#Old", "Old name")),
            MatchedAxiom::added(label("ex#New", "New name")),
        ]
    );
}

// =============================================================================
// Version-Relative Resolution Tests
// =============================================================================

/// The same annotation resolves on the source side through `Old` and is
/// unresolvable on the target side, where no entity has that IRI.
#[test]
fn test_resolution_is_version_relative() {
    let mut engine = renamed_engine();
    let changes = engine.changes_mut().unwrap();

    let on_old = label("ex#Old", "note");
    changes
        .add_match(MatchedAxiom::source_only(on_old.clone(), MatchDescription::new("note")))
        .unwrap();

    let err = changes.add_match(MatchedAxiom::added(on_old)).unwrap_err();
    assert!(matches!(err, ChangeError::Unresolvable(_)));
}

/// A pair whose two sides concern the two halves of one diff lands there once.
#[test]
fn test_paired_match_recorded_once_per_diff() {
    let mut engine = renamed_engine();
    let changes = engine.changes_mut().unwrap();

    let pair = MatchedAxiom::paired(
        label("ex#Old", "x"),
        label("ex#New", "x"),
        MatchDescription::new("relabel"),
    );
    changes.add_match(pair.clone()).unwrap();

    let diff = changes.target_diff(&Entity::class("ex#New")).unwrap();
    assert_eq!(diff.matches().iter().filter(|m| **m == pair).count(), 1);
}

// =============================================================================
// Add / Remove Symmetry Tests
// =============================================================================

/// Adding then removing an entry leaves every diff as it was, on the
/// source side and on the target side.
#[test]
fn test_add_remove_restores_diffs() {
    let mut engine = renamed_engine();
    let changes = engine.changes_mut().unwrap();
    let before = snapshot(changes);

    let deleted = MatchedAxiom::deleted(Axiom::sub_class_of("ex#Stable", "ex#Old"));
    changes.add_match(deleted.clone()).unwrap();
    assert!(changes.source_diff(&Entity::class("ex#Stable")).unwrap().contains(&deleted));
    assert!(changes.remove_match(&deleted));

    let added = MatchedAxiom::added(label("ex#New", "extra"));
    changes.add_match(added.clone()).unwrap();
    assert!(changes.target_diff(&Entity::class("ex#New")).unwrap().contains(&added));
    assert!(changes.remove_match(&added));

    assert_eq!(snapshot(changes), before);

    // The diff created for the round trip stays, empty.
    let stable = changes.source_diff(&Entity::class("ex#Stable")).unwrap();
    assert!(stable.is_equivalent());
}

/// Equal entries are separate occurrences; removal takes one at a time.
#[test]
fn test_equal_entries_not_merged() {
    let mut engine = renamed_engine();
    let changes = engine.changes_mut().unwrap();
    let old = Entity::class("ex#Old");
    let baseline = changes.source_diff(&old).unwrap().matches().len();

    let entry = MatchedAxiom::deleted(label("ex#Old", "dup"));
    changes.add_match(entry.clone()).unwrap();
    changes.add_match(entry.clone()).unwrap();
    assert_eq!(changes.source_diff(&old).unwrap().matches().len(), baseline + 2);

    assert!(changes.remove_match(&entry));
    assert_eq!(changes.source_diff(&old).unwrap().matches().len(), baseline + 1);
    assert!(changes.remove_match(&entry));
    assert!(!changes.remove_match(&entry));
    assert_eq!(changes.source_diff(&old).unwrap().matches().len(), baseline);
}

/// Replacing an absent entry changes nothing.
#[test]
fn test_replace_absent_entry() {
    let mut engine = renamed_engine();
    let changes = engine.changes_mut().unwrap();
    let before = snapshot(changes);

    let absent = MatchedAxiom::deleted(label("ex#Old", "never recorded"));
    let replaced = changes
        .replace_match(&absent, absent.relabeled(MatchDescription::new("other")))
        .unwrap();
    assert!(!replaced);
    assert_eq!(snapshot(changes), before);
}

/// Re-adding an entry the diff already holds ahead of another one, then
/// removing it, keeps the original order.
#[test]
fn test_add_remove_duplicate_keeps_order() {
    let mut engine = renamed_engine();
    let changes = engine.changes_mut().unwrap();
    let old = Entity::class("ex#Old");
    let before = changes.source_diff(&old).unwrap().matches().to_vec();
    assert_eq!(before.len(), 2);

    let first = before[0].clone();
    changes.add_match(first.clone()).unwrap();
    assert_eq!(changes.source_diff(&old).unwrap().matches().last(), Some(&first));
    assert!(changes.remove_match(&first));

    assert_eq!(changes.source_diff(&old).unwrap().matches(), before.as_slice());
}

/// A replacement that resolves nowhere is refused and the old entry stays.
#[test]
fn test_replace_with_unresolvable_keeps_model() {
    let mut engine = renamed_engine();
    let changes = engine.changes_mut().unwrap();
    let before = snapshot(changes);

    let recorded = MatchedAxiom::deleted(label("ex#Old", "Old name"));
    let nowhere = MatchedAxiom::added(label("ex#Old", "Old name"));
    let err = changes.replace_match(&recorded, nowhere).unwrap_err();
    assert!(matches!(err, ChangeError::Unresolvable(_)));
    assert_eq!(snapshot(changes), before);
}
