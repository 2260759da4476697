//! Retirement policy
//!
//! Knowledge bases rarely delete a concept outright; they retire it by
//! moving it under a dedicated retirement class, stamping a status
//! annotation and recording where it used to live. This service answers
//! the two questions presentation strategies need: is a target entity
//! retired, and is a given axiom part of the retirement bookkeeping.

use std::collections::BTreeSet;

use crate::config::Parameters;
use crate::model::{Axiom, Entity, Iri, Ontology};

/// Parameter naming the class retired concepts are moved under
pub const RETIREMENT_CLASS_PROPERTY: &str = "retirement.class";
/// Parameter naming the status annotation property
pub const RETIREMENT_STATUS_PROPERTY: &str = "retirement.status.property";
/// Parameter holding the status value that marks retirement
pub const RETIREMENT_STATUS_STRING: &str = "retirement.status.string";
/// Prefix of indexed parameters naming retirement metadata properties
pub const RETIREMENT_META_PROPERTIES: &str = "retirement.meta.property.";

#[derive(Debug, Clone, Default)]
pub struct RetirementClassService {
    retirement_class: Option<Iri>,
    status_property: Option<Iri>,
    status_value: Option<String>,
    meta_properties: BTreeSet<Iri>,
}

impl RetirementClassService {
    pub fn from_parameters(parameters: &Parameters) -> Self {
        Self {
            retirement_class: parameters.get(RETIREMENT_CLASS_PROPERTY).map(Iri::new),
            status_property: parameters.get(RETIREMENT_STATUS_PROPERTY).map(Iri::new),
            status_value: parameters.get(RETIREMENT_STATUS_STRING).map(str::to_string),
            meta_properties: parameters
                .indexed(RETIREMENT_META_PROPERTIES)
                .into_iter()
                .map(Iri::new)
                .collect(),
        }
    }

    /// At least one retirement signal is configured
    pub fn is_configured(&self) -> bool {
        self.retirement_class.is_some()
            || (self.status_property.is_some() && self.status_value.is_some())
    }

    /// `entity` is retired in `ontology`
    pub fn is_retired(&self, ontology: &Ontology, entity: &Entity) -> bool {
        if let Some(class) = &self.retirement_class {
            let marker = Axiom::sub_class_of(entity.iri.clone(), class.clone());
            if ontology.contains_axiom(&marker) {
                return true;
            }
        }
        match (&self.status_property, &self.status_value) {
            (Some(property), Some(status)) => ontology
                .annotation_values(&entity.iri, property)
                .any(|v| v.as_literal() == Some(status.as_str())),
            _ => false,
        }
    }

    /// `axiom` records retirement rather than content
    pub fn is_retirement_axiom(&self, axiom: &Axiom) -> bool {
        match axiom {
            Axiom::SubClassOf { sup, .. } => self.retirement_class.as_ref() == Some(sup),
            Axiom::AnnotationAssertion { property, .. } => {
                self.status_property.as_ref() == Some(property)
                    || self.meta_properties.contains(property)
            }
            _ => false,
        }
    }
}
