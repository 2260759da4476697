//! Run File Tests
//!
//! Drives full runs from a JSON run file and JSON ontology documents on disk:
//! - Relative ontology paths resolve against the run file's directory
//! - Configured strategies are looked up by catalog name
//! - Every failure maps to a CLI error code

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

use ontodiff::cli::{changelog_for, CliErrorCode};
use ontodiff::config::DiffConfig;
use ontodiff::present::DiffType;

// =============================================================================
// Helper Functions
// =============================================================================

fn v1() -> Value {
    json!({
        "name": "v1",
        "axioms": [
            {"type": "Declaration", "entity": {"kind": "Class", "iri": "ex#A"}},
            {"type": "Declaration", "entity": {"kind": "AnnotationProperty", "iri": "ex#code"}},
            {
                "type": "AnnotationAssertion",
                "property": "ex#code",
                "subject": {"iri": "ex#A"},
                "value": {"literal": {"lexical": "C1"}}
            }
        ]
    })
}

/// `A` renamed to `B` (same code) and placed under a new parent
fn v2() -> Value {
    json!({
        "name": "v2",
        "axioms": [
            {"type": "Declaration", "entity": {"kind": "Class", "iri": "ex#B"}},
            {"type": "Declaration", "entity": {"kind": "AnnotationProperty", "iri": "ex#code"}},
            {
                "type": "AnnotationAssertion",
                "property": "ex#code",
                "subject": {"iri": "ex#B"},
                "value": {"literal": {"lexical": "C1"}}
            },
            {"type": "SubClassOf", "sub": "ex#B", "sup": "ex#Thing"}
        ]
    })
}

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Writes both versions and a run file into a fresh directory
fn setup(config: Value) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    write_json(&tmp.path().join("v1.json"), &v1());
    write_json(&tmp.path().join("v2.json"), &v2());
    let config_path = tmp.path().join("ontodiff.json");
    write_json(&config_path, &config);
    (tmp, config_path)
}

fn by_code() -> Value {
    json!({
        "source": "v1.json",
        "target": "v2.json",
        "alignment": ["match_by_code", "match_by_id"],
        "parameters": {"code.annotation.property": "ex#code"}
    })
}

// =============================================================================
// Successful Run Tests
// =============================================================================

#[test]
fn test_rename_detected_by_code() {
    let (_tmp, config) = setup(by_code());
    let changelog = changelog_for(&config).unwrap();

    assert_eq!(changelog.source.as_deref(), Some("v1"));
    assert_eq!(changelog.target.as_deref(), Some("v2"));
    assert_eq!(changelog.alignment.outcome, "converged");
    assert_eq!(changelog.alignment.rounds, 2);
    assert_eq!(changelog.alignment.matched_entities, 2);
    assert_eq!(changelog.alignment.unmatched_target_entities, 1);

    assert_eq!(changelog.entries.len(), 1);
    let entry = &changelog.entries[0];
    assert_eq!(entry.diff_type, DiffType::Renamed);
    assert_eq!(entry.description, "Renamed Class(A) -> B");
    assert_eq!(entry.changes.len(), 1);
}

#[test]
fn test_changelog_json_shape() {
    let (_tmp, config) = setup(by_code());
    let changelog = changelog_for(&config).unwrap();
    let value: Value = serde_json::from_str(&changelog.to_json_pretty().unwrap()).unwrap();

    assert_eq!(value["run_id"].as_str().map(str::len), Some(36));
    assert_eq!(value["entries"][0]["diff_type"], "renamed");
    assert_eq!(value["entries"][0]["changes"][0]["description"], "axiom-added");
    assert_eq!(value["alignment"]["failures"], json!([]));
}

/// Without the code strategy the rename is a deletion plus a creation.
#[test]
fn test_default_alignment_is_match_by_id() {
    let (_tmp, config) = setup(json!({"source": "v1.json", "target": "v2.json"}));
    let changelog = changelog_for(&config).unwrap();

    let types: Vec<DiffType> = changelog.entries.iter().map(|e| e.diff_type).collect();
    assert!(types.contains(&DiffType::Deleted));
    assert!(types.contains(&DiffType::Created));
    assert_eq!(changelog.alignment.outcome, "stalled");
    assert!(changelog.render_text().contains("stalled"));
}

#[test]
fn test_relative_paths_resolve_against_config_dir() {
    let (tmp, config) = setup(by_code());
    let loaded = DiffConfig::load(&config).unwrap();
    assert_eq!(loaded.source, tmp.path().join("v1.json"));
    assert_eq!(loaded.target, tmp.path().join("v2.json"));
    assert_eq!(loaded.parameters.get("code.annotation.property"), Some("ex#code"));
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_unknown_strategy_rejected() {
    let mut config = by_code();
    config["presentation"] = json!(["identify_renamed_concepts"]);
    let (_tmp, config) = setup(config);

    let err = changelog_for(&config).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::UnknownStrategy);
    assert!(err.message().contains("identify_renamed_concepts"));
}

#[test]
fn test_missing_run_file() {
    let tmp = TempDir::new().unwrap();
    let err = changelog_for(&tmp.path().join("absent.json")).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::ConfigError);
}

#[test]
fn test_missing_ontology_document() {
    let (_tmp, config) = setup(json!({"source": "v1.json", "target": "v3.json"}));
    let err = changelog_for(&config).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::LoadFailed);
}

#[test]
fn test_empty_alignment_list_rejected() {
    let (_tmp, config) = setup(json!({"source": "v1.json", "target": "v2.json", "alignment": []}));
    let err = changelog_for(&config).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::ConfigError);
}

#[test]
fn test_missing_code_parameter_fails_alignment() {
    let mut config = by_code();
    config["parameters"] = json!({});
    let (_tmp, config) = setup(config);

    let err = changelog_for(&config).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::AlignmentFailed);
}

#[test]
fn test_presentation_failure_code() {
    let mut config = by_code();
    config["presentation"] = json!(["identify_merged_concepts"]);
    let (_tmp, config) = setup(config);

    let err = changelog_for(&config).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::PresentationFailed);
}
