//! Prerequisite markup as written in catalog files, and its resolution into
//! the canonical OR-of-AND [`PrerequisiteExpr`].
//!
//! Markup is a tree of `one_of` / `all_of` groups whose leaves are course names:
//!
//! ```toml
//! prerequisite = { one_of = [ { all_of = ["CMP SCI 1250", "MATH 1320"] }, "CMP SCI 1500" ] }
//! ```
//!
//! Resolution distributes conjunctions over disjunctions. A bare course name that
//! is a direct member of a `one_of` group with more than one member is kept only
//! when its subject is restricted (by default `CMP SCI` or `MATH`); other names in
//! that position are free-text requirements and are dropped.

use crate::core::models::{CourseKey, InvalidCourseKey, PrerequisiteExpr, Requirement};
use serde::Deserialize;

/// Subjects whose bare course names may stand in as their own alternative
pub const RESTRICTED_SUBJECTS: [&str; 2] = ["CMP SCI", "MATH"];

/// One node of a prerequisite markup tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PrerequisiteMarkup {
    /// A bare course name
    Course(String),
    /// Any one member satisfies the group
    OneOf {
        /// Alternatives
        one_of: Members,
    },
    /// Every member is required
    AllOf {
        /// Required members
        all_of: Members,
    },
}

/// Group members: a single node or a list of nodes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Members {
    /// List of nodes
    Many(Vec<PrerequisiteMarkup>),
    /// A lone node written without brackets
    One(Box<PrerequisiteMarkup>),
}

impl Members {
    fn as_slice(&self) -> &[PrerequisiteMarkup] {
        match self {
            Self::Many(items) => items,
            Self::One(item) => std::slice::from_ref(item),
        }
    }
}

/// Disjunctive normal form: a list of conjunctions
type Dnf = Vec<Vec<CourseKey>>;

impl PrerequisiteMarkup {
    /// Resolve the markup tree into a canonical prerequisite expression
    ///
    /// # Errors
    /// Returns an error if a course name that must be kept is not a valid key.
    pub fn resolve<S: AsRef<str>>(
        &self,
        restricted_subjects: &[S],
    ) -> Result<PrerequisiteExpr, InvalidCourseKey> {
        let dnf = self.to_dnf(restricted_subjects, false)?;
        // An empty conjunction is trivially satisfied, which makes the whole expression vacuous.
        if dnf.iter().any(Vec::is_empty) {
            return Ok(PrerequisiteExpr::default());
        }
        Ok(PrerequisiteExpr::any_of(
            dnf.into_iter().map(Requirement::from_keys).collect(),
        ))
    }

    fn to_dnf<S: AsRef<str>>(
        &self,
        restricted_subjects: &[S],
        choice_member: bool,
    ) -> Result<Dnf, InvalidCourseKey> {
        match self {
            Self::Course(name) => {
                if choice_member && !is_restricted(name, restricted_subjects) {
                    return Ok(Vec::new());
                }
                Ok(vec![vec![name.parse()?]])
            }
            Self::OneOf { one_of } => {
                let members = one_of.as_slice();
                let in_choice = members.len() > 1;
                let mut dnf = Dnf::new();
                for member in members {
                    for conjunction in member.to_dnf(restricted_subjects, in_choice)? {
                        if !dnf.contains(&conjunction) {
                            dnf.push(conjunction);
                        }
                    }
                }
                Ok(dnf)
            }
            Self::AllOf { all_of } => {
                let mut product: Dnf = vec![Vec::new()];
                for member in all_of.as_slice() {
                    let member_dnf = member.to_dnf(restricted_subjects, false)?;
                    if member_dnf.is_empty() {
                        continue;
                    }
                    product = cross(&product, &member_dnf);
                }
                Ok(product)
            }
        }
    }
}

fn is_restricted<S: AsRef<str>>(name: &str, restricted_subjects: &[S]) -> bool {
    name.parse::<CourseKey>()
        .is_ok_and(|key| restricted_subjects.iter().any(|s| key.subject() == s.as_ref()))
}

fn cross(left: &Dnf, right: &Dnf) -> Dnf {
    let mut out = Dnf::with_capacity(left.len() * right.len());
    for a in left {
        for b in right {
            let mut conjunction = a.clone();
            for key in b {
                if !conjunction.contains(key) {
                    conjunction.push(key.clone());
                }
            }
            out.push(conjunction);
        }
    }
    out
}
