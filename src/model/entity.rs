//! Entities and the primitive values axioms are built from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An IRI naming an entity or an annotation value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fragment (or last path segment) of the IRI, used for display
    pub fn short_form(&self) -> &str {
        let s = self.0.as_str();
        match s.rfind(|c| c == '#' || c == '/') {
            Some(idx) if idx + 1 < s.len() => &s[idx + 1..],
            _ => s,
        }
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The type of a named entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Class,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    NamedIndividual,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Class => "Class",
            EntityKind::ObjectProperty => "ObjectProperty",
            EntityKind::DataProperty => "DataProperty",
            EntityKind::AnnotationProperty => "AnnotationProperty",
            EntityKind::NamedIndividual => "NamedIndividual",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed, named element of one ontology version.
///
/// Equality is structural within a version. The engine never assumes that a
/// source entity and a target entity with the same IRI denote the same
/// thing; that correspondence only exists once an alignment strategy records it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub iri: Iri,
}

impl Entity {
    pub fn new(kind: EntityKind, iri: impl Into<Iri>) -> Self {
        Self {
            kind,
            iri: iri.into(),
        }
    }

    pub fn class(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::Class, iri)
    }

    pub fn object_property(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::ObjectProperty, iri)
    }

    pub fn data_property(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::DataProperty, iri)
    }

    pub fn annotation_property(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::AnnotationProperty, iri)
    }

    pub fn individual(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::NamedIndividual, iri)
    }

    /// Same kind, different IRI
    pub fn with_iri(&self, iri: Iri) -> Self {
        Self {
            kind: self.kind,
            iri,
        }
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.iri.short_form())
    }
}

/// A blank-node individual; identified only by its node id within one document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnonymousIndividual(String);

impl AnonymousIndividual {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self(node_id.into())
    }

    pub fn node_id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnonymousIndividual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// Either kind of individual
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Individual {
    Named(Iri),
    Anonymous(AnonymousIndividual),
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Individual::Named(iri) => write!(f, "{}", iri.short_form()),
            Individual::Anonymous(anon) => write!(f, "{}", anon),
        }
    }
}

/// A data value with optional datatype and language tag
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Iri>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Literal {
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            lang: None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.lexical)?;
        if let Some(lang) = &self.lang {
            write!(f, "@{}", lang)?;
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^{}", dt.short_form())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_form_uses_fragment() {
        let iri = Iri::new("http://example.org/onto.owl#Heart");
        assert_eq!(iri.short_form(), "Heart");
    }

    #[test]
    fn test_short_form_uses_last_segment() {
        let iri = Iri::new("http://example.org/onto/Heart");
        assert_eq!(iri.short_form(), "Heart");
    }

    #[test]
    fn test_short_form_trailing_separator_keeps_whole() {
        let iri = Iri::new("http://example.org/");
        assert_eq!(iri.short_form(), "http://example.org/");
    }

    #[test]
    fn test_entities_with_same_iri_but_different_kind_differ() {
        let class = Entity::class("http://example.org#A");
        let individual = Entity::individual("http://example.org#A");
        assert_ne!(class, individual);
    }

    #[test]
    fn test_entity_serde_shape() {
        let entity = Entity::class("http://example.org#A");
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["kind"], "Class");
        assert_eq!(json["iri"], "http://example.org#A");
    }
}
