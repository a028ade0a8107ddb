//! Prerequisite expression model
//!
//! A prerequisite is a disjunction of alternatives. Each alternative is either a
//! single course or a conjunction of courses; the expression is satisfied when any
//! one alternative has every one of its courses satisfied. An empty expression
//! means the course has no prerequisite.

use super::CourseKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One alternative of a prerequisite expression
///
/// Serialized as either a plain string (`"MATH 1320"`) or a list of strings
/// (`["CMP SCI 1250", "MATH 1320"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    /// A single course
    Single(CourseKey),
    /// Every listed course
    AllOf(Vec<CourseKey>),
}

impl Requirement {
    /// Build an alternative from a list of keys, collapsing one-element lists to [`Requirement::Single`]
    #[must_use]
    pub fn from_keys(mut keys: Vec<CourseKey>) -> Self {
        if keys.len() == 1 {
            Self::Single(keys.remove(0))
        } else {
            Self::AllOf(keys)
        }
    }

    /// Courses that must all be satisfied for this alternative
    #[must_use]
    pub fn keys(&self) -> &[CourseKey] {
        match self {
            Self::Single(key) => std::slice::from_ref(key),
            Self::AllOf(keys) => keys,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(key) => write!(f, "{key}"),
            Self::AllOf(keys) => {
                let parts: Vec<&str> = keys.iter().map(CourseKey::as_str).collect();
                write!(f, "({})", parts.join(" and "))
            }
        }
    }
}

/// Prerequisite expression in OR-of-AND form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrerequisiteExpr(Vec<Requirement>);

impl PrerequisiteExpr {
    /// An expression satisfied by any of `alternatives`
    #[must_use]
    pub const fn any_of(alternatives: Vec<Requirement>) -> Self {
        Self(alternatives)
    }

    /// An expression with a single alternative requiring every key
    #[must_use]
    pub fn all_of(keys: Vec<CourseKey>) -> Self {
        if keys.is_empty() {
            return Self::default();
        }
        Self(vec![Requirement::from_keys(keys)])
    }

    /// `true` when the course has no prerequisite
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Alternatives in catalog order
    #[must_use]
    pub fn alternatives(&self) -> &[Requirement] {
        &self.0
    }

    /// Every course key mentioned anywhere in the expression
    pub fn referenced_keys(&self) -> impl Iterator<Item = &CourseKey> {
        self.0.iter().flat_map(Requirement::keys)
    }
}

impl fmt::Display for PrerequisiteExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("none");
        }
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(" or "))
    }
}
