//! Axioms: immutable logical statements over entities.
//!
//! Equality and ordering are structural. An axiom never records which
//! ontology it came from; resolving which entities it is *about* is the job
//! of [`Ontology::entities_concerned_by`](super::Ontology::entities_concerned_by).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::{AnonymousIndividual, Entity, EntityKind, Individual, Iri, Literal};

/// Subject of an annotation assertion
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationSubject {
    Iri(Iri),
    Anonymous(AnonymousIndividual),
}

/// Value of an annotation assertion
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationValue {
    Literal(Literal),
    Iri(Iri),
    Anonymous(AnonymousIndividual),
}

impl AnnotationValue {
    pub fn literal(lexical: impl Into<String>) -> Self {
        Self::Literal(Literal::plain(lexical))
    }

    /// Lexical form of a literal value
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            AnnotationValue::Literal(lit) => Some(&lit.lexical),
            _ => None,
        }
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            AnnotationValue::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationValue::Literal(lit) => write!(f, "{}", lit),
            AnnotationValue::Iri(iri) => write!(f, "{}", iri.short_form()),
            AnnotationValue::Anonymous(anon) => write!(f, "{}", anon),
        }
    }
}

/// A logical statement
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Axiom {
    Declaration {
        entity: Entity,
    },
    SubClassOf {
        sub: Iri,
        sup: Iri,
    },
    EquivalentClasses {
        classes: Vec<Iri>,
    },
    DisjointClasses {
        classes: Vec<Iri>,
    },
    ClassAssertion {
        class: Iri,
        individual: Individual,
    },
    ObjectPropertyAssertion {
        property: Iri,
        subject: Individual,
        object: Individual,
    },
    DataPropertyAssertion {
        property: Iri,
        subject: Individual,
        value: Literal,
    },
    AnnotationAssertion {
        property: Iri,
        subject: AnnotationSubject,
        value: AnnotationValue,
    },
}

/// Maps the references of an axiom from one vocabulary into another.
///
/// Every lookup returns `None` when the element has no counterpart, which
/// makes the whole rewrite fail.
pub trait Vocabulary {
    fn entity(&self, entity: &Entity) -> Option<Entity>;

    /// Annotation subjects carry no type, so they are rewritten by IRI
    fn subject(&self, iri: &Iri) -> Option<Iri>;

    fn anonymous(&self, individual: &AnonymousIndividual) -> Option<AnonymousIndividual>;
}

impl Axiom {
    pub fn declaration(entity: Entity) -> Self {
        Axiom::Declaration { entity }
    }

    pub fn sub_class_of(sub: impl Into<Iri>, sup: impl Into<Iri>) -> Self {
        Axiom::SubClassOf {
            sub: sub.into(),
            sup: sup.into(),
        }
    }

    pub fn annotation(
        property: impl Into<Iri>,
        subject: impl Into<Iri>,
        value: AnnotationValue,
    ) -> Self {
        Axiom::AnnotationAssertion {
            property: property.into(),
            subject: AnnotationSubject::Iri(subject.into()),
            value,
        }
    }

    /// Short tag for logs and reports
    pub fn kind_name(&self) -> &'static str {
        match self {
            Axiom::Declaration { .. } => "Declaration",
            Axiom::SubClassOf { .. } => "SubClassOf",
            Axiom::EquivalentClasses { .. } => "EquivalentClasses",
            Axiom::DisjointClasses { .. } => "DisjointClasses",
            Axiom::ClassAssertion { .. } => "ClassAssertion",
            Axiom::ObjectPropertyAssertion { .. } => "ObjectPropertyAssertion",
            Axiom::DataPropertyAssertion { .. } => "DataPropertyAssertion",
            Axiom::AnnotationAssertion { .. } => "AnnotationAssertion",
        }
    }

    pub fn is_annotation(&self) -> bool {
        matches!(self, Axiom::AnnotationAssertion { .. })
    }

    /// Entities referenced in typed positions.
    ///
    /// The subject of an annotation assertion is excluded: its type is only
    /// known relative to an ontology.
    pub fn typed_entities(&self) -> Vec<Entity> {
        let mut out = Vec::new();
        match self {
            Axiom::Declaration { entity } => out.push(entity.clone()),
            Axiom::SubClassOf { sub, sup } => {
                out.push(Entity::class(sub.clone()));
                out.push(Entity::class(sup.clone()));
            }
            Axiom::EquivalentClasses { classes } | Axiom::DisjointClasses { classes } => {
                out.extend(classes.iter().cloned().map(Entity::class));
            }
            Axiom::ClassAssertion { class, individual } => {
                out.push(Entity::class(class.clone()));
                push_named(&mut out, individual);
            }
            Axiom::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => {
                out.push(Entity::object_property(property.clone()));
                push_named(&mut out, subject);
                push_named(&mut out, object);
            }
            Axiom::DataPropertyAssertion {
                property, subject, ..
            } => {
                out.push(Entity::data_property(property.clone()));
                push_named(&mut out, subject);
            }
            Axiom::AnnotationAssertion { property, .. } => {
                out.push(Entity::annotation_property(property.clone()));
            }
        }
        out
    }

    /// Anonymous individuals referenced anywhere in the axiom
    pub fn anonymous_individuals(&self) -> Vec<AnonymousIndividual> {
        let mut out = Vec::new();
        match self {
            Axiom::ClassAssertion { individual, .. } => push_anonymous(&mut out, individual),
            Axiom::ObjectPropertyAssertion {
                subject, object, ..
            } => {
                push_anonymous(&mut out, subject);
                push_anonymous(&mut out, object);
            }
            Axiom::DataPropertyAssertion { subject, .. } => push_anonymous(&mut out, subject),
            Axiom::AnnotationAssertion { subject, value, .. } => {
                if let AnnotationSubject::Anonymous(anon) = subject {
                    out.push(anon.clone());
                }
                if let AnnotationValue::Anonymous(anon) = value {
                    out.push(anon.clone());
                }
            }
            _ => {}
        }
        out
    }

    /// IRI subject of an annotation assertion, if any
    pub fn annotation_subject(&self) -> Option<&Iri> {
        match self {
            Axiom::AnnotationAssertion {
                subject: AnnotationSubject::Iri(iri),
                ..
            } => Some(iri),
            _ => None,
        }
    }

    /// The entities this axiom is about, for every axiom type whose subject
    /// is typed by position. Annotation assertions return an empty list.
    pub(crate) fn positional_subjects(&self) -> Vec<Entity> {
        match self {
            Axiom::Declaration { entity } => vec![entity.clone()],
            Axiom::SubClassOf { sub, .. } => vec![Entity::class(sub.clone())],
            Axiom::EquivalentClasses { classes } | Axiom::DisjointClasses { classes } => {
                classes.iter().cloned().map(Entity::class).collect()
            }
            Axiom::ClassAssertion { individual, .. } => named(individual).into_iter().collect(),
            Axiom::ObjectPropertyAssertion { subject, .. }
            | Axiom::DataPropertyAssertion { subject, .. } => {
                named(subject).into_iter().collect()
            }
            Axiom::AnnotationAssertion { .. } => Vec::new(),
        }
    }

    /// Rewrite every reference through `vocabulary`.
    ///
    /// Literal values and IRI-valued annotation values are kept as they are.
    pub fn rewrite<V: Vocabulary + ?Sized>(&self, vocabulary: &V) -> Option<Axiom> {
        let class = |iri: &Iri| -> Option<Iri> {
            vocabulary.entity(&Entity::class(iri.clone())).map(|e| e.iri)
        };
        let rewritten = match self {
            Axiom::Declaration { entity } => Axiom::Declaration {
                entity: vocabulary.entity(entity)?,
            },
            Axiom::SubClassOf { sub, sup } => Axiom::SubClassOf {
                sub: class(sub)?,
                sup: class(sup)?,
            },
            Axiom::EquivalentClasses { classes } => Axiom::EquivalentClasses {
                classes: classes.iter().map(class).collect::<Option<Vec<_>>>()?,
            },
            Axiom::DisjointClasses { classes } => Axiom::DisjointClasses {
                classes: classes.iter().map(class).collect::<Option<Vec<_>>>()?,
            },
            Axiom::ClassAssertion { class: c, individual } => Axiom::ClassAssertion {
                class: class(c)?,
                individual: rewrite_individual(individual, vocabulary)?,
            },
            Axiom::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => Axiom::ObjectPropertyAssertion {
                property: vocabulary
                    .entity(&Entity::object_property(property.clone()))?
                    .iri,
                subject: rewrite_individual(subject, vocabulary)?,
                object: rewrite_individual(object, vocabulary)?,
            },
            Axiom::DataPropertyAssertion {
                property,
                subject,
                value,
            } => Axiom::DataPropertyAssertion {
                property: vocabulary
                    .entity(&Entity::data_property(property.clone()))?
                    .iri,
                subject: rewrite_individual(subject, vocabulary)?,
                value: value.clone(),
            },
            Axiom::AnnotationAssertion {
                property,
                subject,
                value,
            } => Axiom::AnnotationAssertion {
                property: vocabulary
                    .entity(&Entity::annotation_property(property.clone()))?
                    .iri,
                subject: match subject {
                    AnnotationSubject::Iri(iri) => AnnotationSubject::Iri(vocabulary.subject(iri)?),
                    AnnotationSubject::Anonymous(anon) => {
                        AnnotationSubject::Anonymous(vocabulary.anonymous(anon)?)
                    }
                },
                value: match value {
                    AnnotationValue::Anonymous(anon) => {
                        AnnotationValue::Anonymous(vocabulary.anonymous(anon)?)
                    }
                    other => other.clone(),
                },
            },
        };
        Some(rewritten)
    }
}

fn named(individual: &Individual) -> Option<Entity> {
    match individual {
        Individual::Named(iri) => Some(Entity::new(EntityKind::NamedIndividual, iri.clone())),
        Individual::Anonymous(_) => None,
    }
}

fn push_named(out: &mut Vec<Entity>, individual: &Individual) {
    if let Some(entity) = named(individual) {
        out.push(entity);
    }
}

fn push_anonymous(out: &mut Vec<AnonymousIndividual>, individual: &Individual) {
    if let Individual::Anonymous(anon) = individual {
        out.push(anon.clone());
    }
}

fn rewrite_individual<V: Vocabulary + ?Sized>(
    individual: &Individual,
    vocabulary: &V,
) -> Option<Individual> {
    match individual {
        Individual::Named(iri) => vocabulary
            .entity(&Entity::individual(iri.clone()))
            .map(|e| Individual::Named(e.iri)),
        Individual::Anonymous(anon) => vocabulary.anonymous(anon).map(Individual::Anonymous),
    }
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axiom::Declaration { entity } => write!(f, "Declaration({})", entity),
            Axiom::SubClassOf { sub, sup } => {
                write!(f, "{} SubClassOf {}", sub.short_form(), sup.short_form())
            }
            Axiom::EquivalentClasses { classes } => {
                write!(f, "EquivalentClasses({})", join_short(classes))
            }
            Axiom::DisjointClasses { classes } => {
                write!(f, "DisjointClasses({})", join_short(classes))
            }
            Axiom::ClassAssertion { class, individual } => {
                write!(f, "{} Type {}", individual, class.short_form())
            }
            Axiom::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => write!(f, "{} {} {}", subject, property.short_form(), object),
            Axiom::DataPropertyAssertion {
                property,
                subject,
                value,
            } => write!(f, "{} {} {}", subject, property.short_form(), value),
            Axiom::AnnotationAssertion {
                property,
                subject,
                value,
            } => {
                let subject = match subject {
                    AnnotationSubject::Iri(iri) => iri.short_form().to_string(),
                    AnnotationSubject::Anonymous(anon) => anon.to_string(),
                };
                write!(f, "{} {} {}", subject, property.short_form(), value)
            }
        }
    }
}

fn join_short(iris: &[Iri]) -> String {
    iris.iter()
        .map(|i| i.short_form())
        .collect::<Vec<_>>()
        .join(", ")
}
