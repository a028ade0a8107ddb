//! Course model

use super::{PrerequisiteExpr, Term};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Credit value used when the catalog does not specify one
pub const DEFAULT_CREDIT_HOURS: u32 = 3;

/// Normalized course identifier: subject and number separated by a single space
/// (e.g. `CMP SCI 3130`, `MATH 1320`).
///
/// Whitespace is collapsed and the subject is upper-cased on construction, so
/// `"cmp  sci 3130"` and `"CMP SCI 3130"` produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseKey(String);

/// Error returned when a course key cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid course key '{0}': expected \"SUBJECT NUMBER\"")]
pub struct InvalidCourseKey(pub String);

impl CourseKey {
    /// Build a key from its subject and number parts
    ///
    /// # Errors
    /// Returns an error if either part is blank or the number contains whitespace.
    pub fn new(subject: &str, number: &str) -> Result<Self, InvalidCourseKey> {
        format!("{subject} {number}").parse()
    }

    /// Wrap text that is already in normalized form
    pub(crate) fn from_normalized(text: &str) -> Self {
        debug_assert_eq!(text.parse::<Self>().ok().as_ref().map(Self::as_str), Some(text));
        Self(text.to_string())
    }

    /// Subject part (e.g. `CMP SCI`)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.0.rsplit_once(' ').map_or("", |(subject, _)| subject)
    }

    /// Number part (e.g. `3130`)
    #[must_use]
    pub fn number(&self) -> &str {
        self.0.rsplit_once(' ').map_or(self.0.as_str(), |(_, number)| number)
    }

    /// The normalized key text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CourseKey {
    type Err = InvalidCourseKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let Some((number, subject)) = words.split_last() else {
            return Err(InvalidCourseKey(s.to_string()));
        };
        if subject.is_empty() {
            return Err(InvalidCourseKey(s.to_string()));
        }
        let subject = subject.join(" ").to_uppercase();
        Ok(Self(format!("{subject} {}", number.to_uppercase())))
    }
}

impl TryFrom<String> for CourseKey {
    type Error = InvalidCourseKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CourseKey> for String {
    fn from(key: CourseKey) -> Self {
        key.0
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog course, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique key (subject + number)
    pub key: CourseKey,

    /// Display name (e.g. "Data Structures")
    pub name: String,

    /// Free-text catalog description
    #[serde(default)]
    pub description: String,

    /// Credit hours
    pub credits: u32,

    /// Prerequisite expression in OR-of-AND form
    #[serde(default)]
    pub prerequisite: PrerequisiteExpr,

    /// Terms in which the course is offered
    pub offered: BTreeSet<Term>,

    /// Prerequisite that may be taken in the same term as this course
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrent: Option<CourseKey>,
}

impl Course {
    /// Create a course with no prerequisites that is never offered
    ///
    /// Use the builder-style methods to fill in the remaining attributes.
    #[must_use]
    pub fn new(key: CourseKey, name: impl Into<String>, credits: u32) -> Self {
        Self {
            key,
            name: name.into(),
            description: String::new(),
            credits,
            prerequisite: PrerequisiteExpr::default(),
            offered: BTreeSet::new(),
            concurrent: None,
        }
    }

    /// Set the terms in which the course is offered
    #[must_use]
    pub fn offered_in(mut self, terms: impl IntoIterator<Item = Term>) -> Self {
        self.offered = terms.into_iter().collect();
        self
    }

    /// Set the prerequisite expression
    #[must_use]
    pub fn with_prerequisite(mut self, prerequisite: PrerequisiteExpr) -> Self {
        self.prerequisite = prerequisite;
        self
    }

    /// Mark a prerequisite that may be taken in the same term
    #[must_use]
    pub fn with_concurrent(mut self, concurrent: CourseKey) -> Self {
        self.concurrent = Some(concurrent);
        self
    }

    /// Set the catalog description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether the course runs in `term`
    #[must_use]
    pub fn is_offered_in(&self, term: Term) -> bool {
        self.offered.contains(&term)
    }

    /// Course number used to order the requirement pool
    #[must_use]
    pub fn number(&self) -> &str {
        self.key.number()
    }
}
