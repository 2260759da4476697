//! Changelog export
//!
//! A flat, serializable view of a finished engine run: one entry per
//! non-equivalent diff with its matched axioms in recorded order.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::align::ConvergenceOutcome;
use crate::engine::{Engine, EngineError, EngineResult};
use crate::model::Entity;
use crate::present::{DiffType, EntityBasedDiff, MatchedAxiom};

#[derive(Debug, Clone, Serialize)]
pub struct Changelog {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub alignment: AlignmentSummary,
    pub entries: Vec<ChangelogEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlignmentSummary {
    pub rounds: usize,
    pub outcome: &'static str,
    pub matched_entities: usize,
    pub unmatched_source_entities: usize,
    pub unmatched_target_entities: usize,
    /// `strategy: reason` for every isolated strategy failure
    pub failures: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangelogEntry {
    pub description: String,
    pub diff_type: DiffType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_entity: Option<Entity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_entity: Option<Entity>,
    pub changes: Vec<MatchedAxiom>,
}

impl From<&EntityBasedDiff> for ChangelogEntry {
    fn from(diff: &EntityBasedDiff) -> Self {
        Self {
            description: diff.description(),
            diff_type: diff.diff_type(),
            source_entity: diff.source_entity().cloned(),
            target_entity: diff.target_entity().cloned(),
            changes: diff.matches().to_vec(),
        }
    }
}

impl Changelog {
    /// Snapshot a diffed engine
    pub fn from_engine(engine: &Engine) -> EngineResult<Self> {
        let state = engine.state();
        let (map, report, changes) = match (state.map(), state.report(), state.changes()) {
            (Some(map), Some(report), Some(changes)) => (map, report, changes),
            _ => return Err(EngineError::illegal_state("export changes", state.state_name())),
        };

        let alignment = AlignmentSummary {
            rounds: report.rounds,
            outcome: report.outcome.as_str(),
            matched_entities: map.entity_map().len(),
            unmatched_source_entities: map.unmatched_source_entities().len(),
            unmatched_target_entities: map.unmatched_target_entities().len(),
            failures: report.failures.iter().map(|f| format!("{}: {}", f.strategy, f.reason)).collect(),
        };

        Ok(Self {
            run_id: engine.run_id(),
            generated_at: Utc::now(),
            source: engine.source_ontology().name().map(str::to_string),
            target: engine.target_ontology().name().map(str::to_string),
            alignment,
            entries: changes.non_equivalent_diffs().map(ChangelogEntry::from).collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable rendering, one block per entry
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Changelog {} ({})", self.run_id, self.generated_at.to_rfc3339());
        if let (Some(source), Some(target)) = (&self.source, &self.target) {
            let _ = writeln!(out, "{} -> {}", source, target);
        }
        let status = if self.alignment.outcome == ConvergenceOutcome::Converged.as_str() {
            "all source entities matched"
        } else {
            "stalled"
        };
        let _ = writeln!(
            out,
            "Alignment: {} rounds, {} matched, {} unmatched source, {} unmatched target ({})",
            self.alignment.rounds,
            self.alignment.matched_entities,
            self.alignment.unmatched_source_entities,
            self.alignment.unmatched_target_entities,
            status,
        );
        for failure in &self.alignment.failures {
            let _ = writeln!(out, "  failed: {}", failure);
        }

        if self.entries.is_empty() {
            let _ = writeln!(out, "\nNo differences.");
            return out;
        }
        for entry in &self.entries {
            let _ = writeln!(out, "\n{}", entry.description);
            for change in &entry.changes {
                let _ = writeln!(out, "  {}", change);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::algorithms::MatchById;
    use crate::model::{AnnotationValue, Axiom, Ontology};

    fn diffed() -> Engine {
        let source = Ontology::new(vec![
            Axiom::declaration(Entity::class("ex#A")),
            Axiom::declaration(Entity::annotation_property("ex#label")),
        ])
        .with_name("v1");
        let target = Ontology::new(vec![
            Axiom::declaration(Entity::class("ex#A")),
            Axiom::declaration(Entity::annotation_property("ex#label")),
            Axiom::annotation("ex#label", "ex#A", AnnotationValue::literal("Alpha")),
        ])
        .with_name("v2");
        let mut engine = Engine::new(source, target);
        engine.set_alignment_strategies(vec![Box::new(MatchById::new())]);
        engine.run().unwrap();
        engine
    }

    #[test]
    fn test_export_lists_non_equivalent_diffs() {
        let changelog = Changelog::from_engine(&diffed()).unwrap();

        assert_eq!(changelog.entries.len(), 1);
        let entry = &changelog.entries[0];
        assert_eq!(entry.diff_type, DiffType::Modified);
        assert_eq!(entry.changes.len(), 1);
        assert_eq!(changelog.alignment.outcome, "converged");
    }

    #[test]
    fn test_json_shape() {
        let changelog = Changelog::from_engine(&diffed()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&changelog.to_json_pretty().unwrap()).unwrap();

        assert_eq!(value["source"], "v1");
        assert_eq!(value["entries"][0]["diff_type"], "modified");
        assert_eq!(value["entries"][0]["changes"][0]["description"], "axiom-added");
        assert!(value["entries"][0]["changes"][0]["source"].is_null());
    }

    #[test]
    fn test_text_rendering() {
        let text = Changelog::from_engine(&diffed()).unwrap().render_text();
        assert!(text.contains("v1 -> v2"));
        assert!(text.contains("[axiom-added]"));
    }

    #[test]
    fn test_export_before_diff_is_illegal() {
        let engine = Engine::new(Ontology::default(), Ontology::default());
        assert!(Changelog::from_engine(&engine).unwrap_err().is_illegal_state());
    }
}
