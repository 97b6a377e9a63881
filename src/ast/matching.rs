use serde::{Deserialize, Serialize};

use super::nullable_list;

/// Cardinality of a vector match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    OneToOne,
    /// `group_left`
    ManyToOne,
    /// `group_right`
    OneToMany,
    /// Set operators (`and`, `or`, `unless`)
    ManyToMany,
}

/// Join semantics of a binary operation between two vectors.
///
/// # Example
/// ```text
/// a / on(job) group_left(instance) b
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorMatching {
    /// `on(...)` when true, `ignoring(...)` otherwise
    #[serde(default)]
    pub on: bool,
    #[serde(default, deserialize_with = "nullable_list")]
    pub labels: Vec<String>,
    pub card: Cardinality,
    /// Extra labels copied from the "one" side by `group_left`/`group_right`
    #[serde(default, deserialize_with = "nullable_list")]
    pub include: Vec<String>,
}

impl VectorMatching {
    pub fn on(labels: &[&str]) -> Self {
        VectorMatching {
            on: true,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            card: Cardinality::OneToOne,
            include: Vec::new(),
        }
    }

    pub fn ignoring(labels: &[&str]) -> Self {
        VectorMatching {
            on: false,
            ..Self::on(labels)
        }
    }

    pub fn group(mut self, card: Cardinality, include: &[&str]) -> Self {
        self.card = card;
        self.include = include.iter().map(|l| l.to_string()).collect();
        self
    }

    /// An `on()`/`ignoring()` clause is printed only when it says something.
    pub fn has_clause(&self) -> bool {
        self.on || !self.labels.is_empty()
    }

    /// `group_left`/`group_right` keyword for this cardinality, if any.
    pub fn group_keyword(&self) -> Option<&'static str> {
        match self.card {
            Cardinality::ManyToOne => Some("group_left"),
            Cardinality::OneToMany => Some("group_right"),
            Cardinality::OneToOne | Cardinality::ManyToMany => None,
        }
    }
}
