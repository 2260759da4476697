//! Code-to-entity index
//!
//! Knowledge bases that carry a stable code annotation on each concept can be
//! aligned by that code even when IRIs change. This service indexes both
//! versions once so several strategies can share the lookup.

use std::collections::BTreeMap;

use crate::config::{ConfigResult, Parameters};
use crate::model::{Entity, EntityKind, Iri, Ontology};

/// Parameter naming the annotation property that carries codes
pub const CODE_ANNOTATION_PROPERTY: &str = "code.annotation.property";

/// Code index over both versions
#[derive(Debug, Clone)]
pub struct CodeToEntityMapper {
    property: Iri,
    source: BTreeMap<String, Vec<Entity>>,
    target: BTreeMap<String, Vec<Entity>>,
}

impl CodeToEntityMapper {
    /// Build from parameters; fails when the code property is not configured
    pub fn from_parameters(
        parameters: &Parameters,
        source: &Ontology,
        target: &Ontology,
    ) -> ConfigResult<Self> {
        let property = Iri::new(parameters.require(CODE_ANNOTATION_PROPERTY)?);
        Ok(Self::new(property, source, target))
    }

    pub fn new(property: Iri, source: &Ontology, target: &Ontology) -> Self {
        let source_index = index(&property, source);
        let target_index = index(&property, target);
        Self {
            property,
            source: source_index,
            target: target_index,
        }
    }

    pub fn property(&self) -> &Iri {
        &self.property
    }

    /// Source entities carrying `code`
    pub fn source_entities(&self, code: &str) -> &[Entity] {
        self.source.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Target entities carrying `code`
    pub fn target_entities(&self, code: &str) -> &[Entity] {
        self.target.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Codes present in the source version, in order
    pub fn source_codes(&self) -> impl Iterator<Item = &str> {
        self.source.keys().map(String::as_str)
    }
}

fn index(property: &Iri, ontology: &Ontology) -> BTreeMap<String, Vec<Entity>> {
    let mut out: BTreeMap<String, Vec<Entity>> = BTreeMap::new();
    for entity in ontology.signature() {
        if entity.kind == EntityKind::AnnotationProperty {
            continue;
        }
        for value in ontology.annotation_values(&entity.iri, property) {
            if let Some(code) = value.as_literal() {
                out.entry(code.to_string()).or_default().push(entity.clone());
            }
        }
    }
    out
}
