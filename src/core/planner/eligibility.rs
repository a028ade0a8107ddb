//! Prerequisite evaluation

use super::state::{OpenSemester, TakenCourses};
use crate::core::catalog::{Catalog, Certificate};
use crate::core::models::{Course, CourseKey, Requirement};
use std::collections::HashSet;

/// Decides whether a course's prerequisites are met
///
/// Keys that the evaluator does not know (absent from the catalog and the
/// selected certificate) can never be satisfied, so any alternative naming one
/// is skipped.
#[derive(Debug, Clone)]
pub struct PrerequisiteEvaluator {
    known: HashSet<CourseKey>,
}

impl PrerequisiteEvaluator {
    /// Evaluator over the catalog and, optionally, a certificate's courses
    #[must_use]
    pub fn new(catalog: &Catalog, certificate: Option<&Certificate>) -> Self {
        let known = catalog
            .keys()
            .chain(certificate.into_iter().flat_map(|c| c.courses().map(|c| &c.key)))
            .cloned()
            .collect();
        Self { known }
    }

    /// Evaluator that knows exactly `keys`
    #[must_use]
    pub fn with_known<I: IntoIterator<Item = CourseKey>>(keys: I) -> Self {
        Self {
            known: keys.into_iter().collect(),
        }
    }

    /// Whether `key` exists in the catalog
    #[must_use]
    pub fn knows(&self, key: &CourseKey) -> bool {
        self.known.contains(key)
    }

    /// Whether `course` may be scheduled now
    ///
    /// True when the course has no prerequisite or at least one alternative is
    /// satisfied. A key in `in_progress` only counts when it is the course's
    /// declared concurrent companion.
    #[must_use]
    pub fn is_eligible(
        &self,
        course: &Course,
        taken: &TakenCourses,
        in_progress: &OpenSemester,
    ) -> bool {
        if course.prerequisite.is_empty() {
            return true;
        }
        course
            .prerequisite
            .alternatives()
            .iter()
            .any(|alternative| self.satisfies(alternative, course, taken, in_progress))
    }

    fn satisfies(
        &self,
        alternative: &Requirement,
        course: &Course,
        taken: &TakenCourses,
        in_progress: &OpenSemester,
    ) -> bool {
        alternative.keys().iter().all(|key| {
            self.knows(key)
                && taken.contains(key)
                && (!in_progress.contains(key) || course.concurrent.as_ref() == Some(key))
        })
    }

    /// Every (course, missing key) pair among `courses` whose prerequisite names an unknown key
    pub fn unresolved<'a>(
        &'a self,
        courses: impl IntoIterator<Item = &'a Course> + 'a,
    ) -> impl Iterator<Item = (&'a CourseKey, &'a CourseKey)> + 'a {
        courses.into_iter().flat_map(move |course| {
            let mut seen = HashSet::new();
            course
                .prerequisite
                .referenced_keys()
                .filter(move |key| !self.knows(key) && seen.insert(*key))
                .map(move |key| (&course.key, key))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{PrerequisiteExpr, ScheduledItem};

    fn key(s: &str) -> CourseKey {
        s.parse().unwrap()
    }

    fn evaluator() -> PrerequisiteEvaluator {
        PrerequisiteEvaluator::with_known(["A 1", "B 2", "C 3", "X 9"].map(key))
    }

    fn taken(keys: &[&str]) -> TakenCourses {
        keys.iter().map(|k| key(k)).collect()
    }

    fn course_with(prerequisite: PrerequisiteExpr) -> Course {
        Course::new(key("X 9"), "X", 3).with_prerequisite(prerequisite)
    }

    #[test]
    fn test_empty_prerequisite_always_eligible() {
        let course = course_with(PrerequisiteExpr::default());
        assert!(evaluator().is_eligible(&course, &taken(&[]), &OpenSemester::default()));
    }

    #[test]
    fn test_or_semantics() {
        let course = course_with(PrerequisiteExpr::any_of(vec![
            Requirement::AllOf(vec![key("A 1"), key("B 2")]),
            Requirement::Single(key("C 3")),
        ]));
        assert!(evaluator().is_eligible(&course, &taken(&["C 3"]), &OpenSemester::default()));
    }

    #[test]
    fn test_and_semantics() {
        let course = course_with(PrerequisiteExpr::all_of(vec![key("A 1"), key("B 2")]));
        let open = OpenSemester::default();
        assert!(!evaluator().is_eligible(&course, &taken(&["A 1"]), &open));
        assert!(evaluator().is_eligible(&course, &taken(&["A 1", "B 2"]), &open));
    }

    #[test]
    fn test_same_term_prerequisite_blocked_unless_concurrent() {
        let a = Course::new(key("A 1"), "A", 3);
        let open = OpenSemester {
            classes: vec![ScheduledItem::course(&a)],
            credits: 3,
            ..OpenSemester::default()
        };
        let taken = taken(&["A 1"]);

        let course = course_with(PrerequisiteExpr::all_of(vec![key("A 1")]));
        assert!(!evaluator().is_eligible(&course, &taken, &open));

        let concurrent = course.with_concurrent(key("A 1"));
        assert!(evaluator().is_eligible(&concurrent, &taken, &open));
    }

    #[test]
    fn test_unknown_key_makes_alternative_unsatisfiable() {
        let course = course_with(PrerequisiteExpr::any_of(vec![
            Requirement::Single(key("GHOST 100")),
            Requirement::Single(key("A 1")),
        ]));
        let eval = evaluator();
        assert!(!eval.is_eligible(&course, &taken(&["GHOST 100"]), &OpenSemester::default()));
        assert!(eval.is_eligible(&course, &taken(&["A 1"]), &OpenSemester::default()));

        let unresolved: Vec<_> = eval.unresolved([&course]).collect();
        assert_eq!(unresolved, vec![(&key("X 9"), &key("GHOST 100"))]);
    }
}
