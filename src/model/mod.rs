//! Entity / axiom universe
//!
//! Two immutable [`Ontology`] values, one per version, are the input of an
//! engine run. Everything here is plain data with structural equality; the
//! only version-sensitive question, which entities an axiom is about, is
//! answered by the ontology that owns the axiom.

mod axiom;
mod entity;
mod errors;
mod ontology;

pub use axiom::{AnnotationSubject, AnnotationValue, Axiom, Vocabulary};
pub use entity::{AnonymousIndividual, Entity, EntityKind, Individual, Iri, Literal};
pub use errors::{ModelError, ModelResult};
pub use ontology::{Ontology, OntologyDocument};
