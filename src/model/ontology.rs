//! A single ontology version: an immutable set of axioms plus its signature.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::axiom::{AnnotationValue, Axiom};
use super::entity::{AnonymousIndividual, Entity, Iri};
use super::errors::{ModelError, ModelResult};

/// On-disk form of an ontology
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OntologyDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub axioms: Vec<Axiom>,
}

/// One version of a knowledge base
#[derive(Debug, Clone, Default)]
pub struct Ontology {
    name: Option<String>,
    axioms: BTreeSet<Axiom>,
    signature: BTreeSet<Entity>,
    by_iri: BTreeMap<Iri, Vec<Entity>>,
    /// subject -> property -> values, in axiom order
    annotations: BTreeMap<Iri, BTreeMap<Iri, Vec<AnnotationValue>>>,
    anonymous: BTreeSet<AnonymousIndividual>,
}

impl Ontology {
    /// Build an ontology from its axioms. Duplicate axioms collapse.
    pub fn new(axioms: impl IntoIterator<Item = Axiom>) -> Self {
        let axioms: BTreeSet<Axiom> = axioms.into_iter().collect();

        let mut signature = BTreeSet::new();
        let mut anonymous = BTreeSet::new();
        for axiom in &axioms {
            signature.extend(axiom.typed_entities());
            anonymous.extend(axiom.anonymous_individuals());
        }

        let mut by_iri: BTreeMap<Iri, Vec<Entity>> = BTreeMap::new();
        for entity in &signature {
            by_iri
                .entry(entity.iri.clone())
                .or_default()
                .push(entity.clone());
        }

        let mut annotations: BTreeMap<Iri, BTreeMap<Iri, Vec<AnnotationValue>>> = BTreeMap::new();
        for axiom in &axioms {
            let Axiom::AnnotationAssertion { property, value, .. } = axiom else {
                continue;
            };
            if let Some(subject) = axiom.annotation_subject() {
                annotations
                    .entry(subject.clone())
                    .or_default()
                    .entry(property.clone())
                    .or_default()
                    .push(value.clone());
            }
        }

        Self {
            name: None,
            axioms,
            signature,
            by_iri,
            annotations,
            anonymous,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn from_document(doc: OntologyDocument) -> Self {
        let ontology = Self::new(doc.axioms);
        match doc.name {
            Some(name) => ontology.with_name(name),
            None => ontology,
        }
    }

    pub fn from_json(json: &str) -> ModelResult<Self> {
        let doc: OntologyDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(doc))
    }

    /// Load a JSON ontology document from disk
    pub fn load(path: &Path) -> ModelResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ModelError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    pub fn to_document(&self) -> OntologyDocument {
        OntologyDocument {
            name: self.name.clone(),
            axioms: self.axioms.iter().cloned().collect(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn axioms(&self) -> &BTreeSet<Axiom> {
        &self.axioms
    }

    pub fn contains_axiom(&self, axiom: &Axiom) -> bool {
        self.axioms.contains(axiom)
    }

    pub fn signature(&self) -> &BTreeSet<Entity> {
        &self.signature
    }

    pub fn contains_entity(&self, entity: &Entity) -> bool {
        self.signature.contains(entity)
    }

    /// All entities of any kind named by `iri`
    pub fn entities_with_iri(&self, iri: &Iri) -> &[Entity] {
        self.by_iri.get(iri).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn anonymous_individuals(&self) -> &BTreeSet<AnonymousIndividual> {
        &self.anonymous
    }

    /// The entities `axiom` is about, resolved against this ontology.
    ///
    /// The same axiom can resolve differently in two versions: an annotation
    /// on an IRI only concerns the entities this version declares with that IRI.
    pub fn entities_concerned_by(&self, axiom: &Axiom) -> Vec<Entity> {
        match axiom.annotation_subject() {
            Some(iri) => self.entities_with_iri(iri).to_vec(),
            None => axiom
                .positional_subjects()
                .into_iter()
                .filter(|e| self.signature.contains(e))
                .collect(),
        }
    }

    /// Axioms of this version that are about `entity`
    pub fn axioms_about<'a>(&'a self, entity: &'a Entity) -> impl Iterator<Item = &'a Axiom> + 'a {
        self.axioms
            .iter()
            .filter(move |a| self.entities_concerned_by(a).contains(entity))
    }

    /// Annotation values on `subject` for `property`
    pub fn annotation_values(
        &self,
        subject: &Iri,
        property: &Iri,
    ) -> impl Iterator<Item = &AnnotationValue> {
        self.annotations
            .get(subject)
            .and_then(|by_property| by_property.get(property))
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::EntityKind;

    fn sample() -> Ontology {
        Ontology::new(vec![
            Axiom::declaration(Entity::class("ex#A")),
            Axiom::declaration(Entity::annotation_property("ex#label")),
            Axiom::sub_class_of("ex#A", "ex#B"),
            Axiom::annotation("ex#label", "ex#A", AnnotationValue::literal("Alpha")),
            Axiom::annotation("ex#label", "ex#Undeclared", AnnotationValue::literal("?")),
        ])
    }

    #[test]
    fn test_signature_collects_typed_references() {
        let onto = sample();
        assert!(onto.contains_entity(&Entity::class("ex#A")));
        assert!(onto.contains_entity(&Entity::class("ex#B")));
        assert!(onto.contains_entity(&Entity::annotation_property("ex#label")));
        assert_eq!(onto.signature().len(), 3);
    }

    #[test]
    fn test_annotation_concerns_entities_with_subject_iri() {
        let onto = sample();
        let axiom = Axiom::annotation("ex#label", "ex#A", AnnotationValue::literal("Alpha"));
        assert_eq!(onto.entities_concerned_by(&axiom), vec![Entity::class("ex#A")]);
    }

    #[test]
    fn test_annotation_on_undeclared_iri_concerns_nothing() {
        let onto = sample();
        let axiom = Axiom::annotation("ex#label", "ex#Undeclared", AnnotationValue::literal("?"));
        assert!(onto.entities_concerned_by(&axiom).is_empty());
    }

    #[test]
    fn test_same_axiom_resolves_per_version() {
        let left = Ontology::new(vec![Axiom::declaration(Entity::class("ex#X"))]);
        let right = Ontology::new(vec![Axiom::declaration(Entity::new(
            EntityKind::NamedIndividual,
            "ex#X",
        ))]);
        let axiom = Axiom::annotation("ex#label", "ex#X", AnnotationValue::literal("x"));

        assert_eq!(left.entities_concerned_by(&axiom), vec![Entity::class("ex#X")]);
        assert_eq!(right.entities_concerned_by(&axiom), vec![Entity::individual("ex#X")]);
    }

    #[test]
    fn test_annotation_values_lookup() {
        let onto = sample();
        let subject = Iri::new("ex#A");
        let property = Iri::new("ex#label");
        let values: Vec<_> = onto.annotation_values(&subject, &property).collect();
        assert_eq!(values, vec![&AnnotationValue::literal("Alpha")]);
    }

    #[test]
    fn test_annotation_values_keyed_by_subject_and_property() {
        let onto = Ontology::new(vec![
            Axiom::annotation("ex#label", "ex#A", AnnotationValue::literal("one")),
            Axiom::annotation("ex#label", "ex#A", AnnotationValue::literal("two")),
            Axiom::annotation("ex#code", "ex#A", AnnotationValue::literal("C1")),
            Axiom::annotation("ex#label", "ex#B", AnnotationValue::literal("other")),
        ]);
        let (a, label) = (Iri::new("ex#A"), Iri::new("ex#label"));

        let values: Vec<_> = onto.annotation_values(&a, &label).collect();
        assert_eq!(
            values,
            vec![&AnnotationValue::literal("one"), &AnnotationValue::literal("two")]
        );
        assert_eq!(onto.annotation_values(&a, &Iri::new("ex#missing")).count(), 0);
        assert_eq!(onto.annotation_values(&Iri::new("ex#Z"), &label).count(), 0);

        // Subjects need not be declared to carry values.
        let sampled = sample();
        let undeclared: Vec<_> = sampled
            .annotation_values(&Iri::new("ex#Undeclared"), &label)
            .collect();
        assert_eq!(undeclared, vec![&AnnotationValue::literal("?")]);
    }

    #[test]
    fn test_from_json_document() {
        let json = r#"{
            "name": "demo",
            "axioms": [
                {"type": "Declaration", "entity": {"kind": "Class", "iri": "ex#A"}},
                {"type": "SubClassOf", "sub": "ex#A", "sup": "ex#B"}
            ]
        }"#;
        let onto = Ontology::from_json(json).unwrap();
        assert_eq!(onto.name(), Some("demo"));
        assert_eq!(onto.axioms().len(), 2);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = Ontology::from_json("{not json").unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
    }
}
