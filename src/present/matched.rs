//! Classified difference records

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::model::Axiom;

/// Category tag attached to a [`MatchedAxiom`] by the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MatchDescription(Cow<'static, str>);

impl MatchDescription {
    /// An axiom only the target version has
    pub const AXIOM_ADDED: MatchDescription = MatchDescription::from_static("axiom-added");
    /// An axiom only the source version has
    pub const AXIOM_DELETED: MatchDescription = MatchDescription::from_static("axiom-deleted");

    pub const fn from_static(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }

    pub fn new(tag: impl Into<String>) -> Self {
        Self(Cow::Owned(tag.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// One of the two tags every change model starts with
    pub fn is_default(&self) -> bool {
        *self == Self::AXIOM_ADDED || *self == Self::AXIOM_DELETED
    }
}

impl fmt::Display for MatchDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One classified difference.
///
/// At least one side is always present; equality is by value over all
/// three fields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MatchedAxiom {
    source: Option<Axiom>,
    target: Option<Axiom>,
    description: MatchDescription,
}

impl MatchedAxiom {
    /// `None` when both axioms are absent
    pub fn new(
        source: Option<Axiom>,
        target: Option<Axiom>,
        description: MatchDescription,
    ) -> Option<Self> {
        if source.is_none() && target.is_none() {
            return None;
        }
        Some(Self {
            source,
            target,
            description,
        })
    }

    pub fn added(target: Axiom) -> Self {
        Self::target_only(target, MatchDescription::AXIOM_ADDED)
    }

    pub fn deleted(source: Axiom) -> Self {
        Self::source_only(source, MatchDescription::AXIOM_DELETED)
    }

    pub fn source_only(source: Axiom, description: MatchDescription) -> Self {
        Self {
            source: Some(source),
            target: None,
            description,
        }
    }

    pub fn target_only(target: Axiom, description: MatchDescription) -> Self {
        Self {
            source: None,
            target: Some(target),
            description,
        }
    }

    pub fn paired(source: Axiom, target: Axiom, description: MatchDescription) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
            description,
        }
    }

    pub fn source(&self) -> Option<&Axiom> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&Axiom> {
        self.target.as_ref()
    }

    pub fn description(&self) -> &MatchDescription {
        &self.description
    }

    /// Same axioms under another tag
    pub fn relabeled(&self, description: MatchDescription) -> Self {
        Self {
            source: self.source.clone(),
            target: self.target.clone(),
            description,
        }
    }
}

impl fmt::Display for MatchedAxiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.description)?;
        if let Some(source) = &self.source {
            write!(f, " - {}", source)?;
        }
        if let Some(target) = &self.target {
            write!(f, " + {}", target)?;
        }
        Ok(())
    }
}
