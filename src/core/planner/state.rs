//! Planning state: everything a planning run reads and mutates
//!
//! The state is a plain value owned by the caller. It serializes to JSON so a
//! host can stop after one semester, store the state, and resume later with an
//! identical result.

use super::certificate::augment;
use super::config::DEFAULT_UPPER_DIVISION_ELECTIVES;
use super::error::ConfigError;
use crate::core::catalog::{Catalog, Certificate, CertificateCatalog};
use crate::core::models::{
    Course, CourseKey, FillerKind, ScheduledItem, SemesterRecord, Term, TermCalendar,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

/// Courses already placed or credited, in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CourseKey>", into = "Vec<CourseKey>")]
pub struct TakenCourses {
    order: Vec<CourseKey>,
    members: HashSet<CourseKey>,
}

impl TakenCourses {
    /// Record a course; returns `false` if it was already present
    pub fn insert(&mut self, key: CourseKey) -> bool {
        if self.members.contains(&key) {
            return false;
        }
        self.members.insert(key.clone());
        self.order.push(key);
        true
    }

    /// Whether the course has been taken
    #[must_use]
    pub fn contains(&self, key: &CourseKey) -> bool {
        self.members.contains(key)
    }

    /// Keys in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CourseKey> {
        self.order.iter()
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been taken
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl From<Vec<CourseKey>> for TakenCourses {
    fn from(keys: Vec<CourseKey>) -> Self {
        let mut taken = Self::default();
        for key in keys {
            taken.insert(key);
        }
        taken
    }
}

impl From<TakenCourses> for Vec<CourseKey> {
    fn from(taken: TakenCourses) -> Self {
        taken.order
    }
}

impl FromIterator<CourseKey> for TakenCourses {
    fn from_iter<I: IntoIterator<Item = CourseKey>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

/// The semester currently being built and its per-term counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenSemester {
    /// Items placed so far, in placement order
    pub classes: Vec<ScheduledItem>,
    /// Credits placed this term
    pub credits: u32,
    /// Required-course credits placed this term
    pub core_credits: u32,
    /// Combined CS and Math credits this term (required courses plus CS fillers)
    pub cs_math_credits: u32,
    /// Credits of 3000+ elective fillers stacked this term
    pub upper_elective_credits: u32,
    /// Credits of certificate elective fillers stacked this term
    #[serde(default)]
    pub certificate_elective_credits: u32,
}

impl OpenSemester {
    /// Whether `key` was placed in this semester
    #[must_use]
    pub fn contains(&self, key: &CourseKey) -> bool {
        self.classes.iter().any(|item| item.key() == Some(key))
    }

    /// Whether nothing has been placed yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Remaining elective requirements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectiveQuotas {
    /// 3000+-level CMP SCI electives still to schedule
    pub upper_division: u32,
    /// Certificate elective slots still to schedule
    pub certificate_slots: u32,
    /// Major electives satisfied by certificate core courses
    pub fulfilled_by_certificate: u32,
}

/// Parameters of a first invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSetup {
    /// Term of the first planned semester
    pub start_term: Term,
    /// Terms the student will enroll in
    pub terms: Vec<Term>,
    /// Credits earned before planning
    pub credits_earned: u32,
    /// Courses already completed
    pub taken: Vec<CourseKey>,
    /// Courses the student does not need to take
    pub waived: Vec<CourseKey>,
    /// 3000+-level CMP SCI electives required by the major
    pub upper_division_electives: u32,
    /// Certificate to layer on the degree
    pub certificate: Option<String>,
}

impl Default for PlanSetup {
    fn default() -> Self {
        Self {
            start_term: Term::Fall,
            terms: vec![Term::Fall, Term::Spring],
            credits_earned: 0,
            taken: Vec::new(),
            waived: Vec::new(),
            upper_division_electives: DEFAULT_UPPER_DIVISION_ELECTIVES,
            certificate: None,
        }
    }
}

/// Mutable state of a planning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningState {
    /// Courses placed or credited, in insertion order
    pub courses_taken: TakenCourses,
    /// Courses removed from the requirement pool without credit
    #[serde(default)]
    pub courses_waived: BTreeSet<CourseKey>,
    /// Semester under construction
    #[serde(default)]
    pub current_semester: OpenSemester,
    /// Credits accumulated, including those earned before planning
    pub total_credits_accumulated: u32,
    /// Credits earned before the first invocation
    #[serde(default)]
    pub starting_credits: u32,
    /// Term of the open semester
    pub current_term: Term,
    /// Zero-based index of the open semester
    pub semester_index: u32,
    /// Whether Summer is part of the rotation
    pub include_summer: bool,
    /// Outstanding required courses, ordered by course number
    pub remaining_required_courses: Vec<Course>,
    /// Elective quotas
    pub quotas: ElectiveQuotas,
    /// Selected certificate id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    /// Closed semesters in order
    #[serde(default)]
    pub schedule: Vec<SemesterRecord>,
}

impl PlanningState {
    /// Build the state for a first invocation
    ///
    /// The certificate (if any) is merged into the requirement pool before taken
    /// and waived courses are removed from it. Waived courses satisfy
    /// prerequisites but earn no credits.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] for an invalid term selection or an unknown certificate.
    pub fn new(
        catalog: &Catalog,
        certificates: Option<&CertificateCatalog>,
        setup: &PlanSetup,
    ) -> Result<Self, ConfigError> {
        let calendar = calendar(setup)?;
        let certificate = resolve_certificate(certificates, setup.certificate.as_deref())?;

        let mut pool: Vec<Course> = catalog.required().cloned().collect();
        let mut quotas = ElectiveQuotas {
            upper_division: setup.upper_division_electives,
            ..ElectiveQuotas::default()
        };
        if let Some(certificate) = certificate {
            augment(&mut pool, &mut quotas, certificate);
        }

        let mut courses_taken = TakenCourses::default();
        for key in &setup.taken {
            courses_taken.insert(key.clone());
        }
        let courses_waived: BTreeSet<CourseKey> = setup.waived.iter().cloned().collect();
        for key in &courses_waived {
            courses_taken.insert(key.clone());
        }

        pool.retain(|course| !courses_taken.contains(&course.key));
        sort_pool(&mut pool);

        Ok(Self {
            courses_taken,
            courses_waived,
            current_semester: OpenSemester::default(),
            total_credits_accumulated: setup.credits_earned,
            starting_credits: setup.credits_earned,
            current_term: setup.start_term,
            semester_index: 0,
            include_summer: calendar.includes_summer(),
            remaining_required_courses: pool,
            quotas,
            certificate: certificate.map(|c| c.id.clone()),
            schedule: Vec::new(),
        })
    }

    /// Credits placed by the planner so far, closed and open semesters together
    #[must_use]
    pub fn placed_credits(&self) -> u32 {
        let closed: u32 = self.schedule.iter().map(|s| s.credit_total).sum();
        closed + self.current_semester.credits
    }

    /// Whether the degree total has been reached
    #[must_use]
    pub const fn is_complete(&self, degree_credits: u32) -> bool {
        self.total_credits_accumulated >= degree_credits
    }

    /// Number of filler slots of `kind` scheduled so far
    #[must_use]
    pub fn filler_count(&self, kind: FillerKind) -> usize {
        let open = self
            .current_semester
            .classes
            .iter()
            .filter(|item| item.filler() == Some(kind))
            .count();
        self.schedule
            .iter()
            .map(|s| s.filler_count(kind))
            .sum::<usize>()
            + open
    }

    /// Credits still needed to reach `degree_credits`
    #[must_use]
    pub const fn credits_remaining(&self, degree_credits: u32) -> u32 {
        degree_credits.saturating_sub(self.total_credits_accumulated)
    }
}

fn calendar(setup: &PlanSetup) -> Result<TermCalendar, ConfigError> {
    if !setup.terms.contains(&Term::Fall) || !setup.terms.contains(&Term::Spring) {
        return Err(ConfigError::MissingRegularTerm);
    }
    TermCalendar::new(setup.start_term, &setup.terms)
        .ok_or(ConfigError::StartTermNotSelected(setup.start_term))
}

fn resolve_certificate<'a>(
    certificates: Option<&'a CertificateCatalog>,
    id: Option<&str>,
) -> Result<Option<&'a Certificate>, ConfigError> {
    let Some(id) = id else {
        return Ok(None);
    };
    certificates
        .and_then(|c| c.get(id))
        .map(Some)
        .ok_or_else(|| ConfigError::UnknownCertificate(id.to_string()))
}

/// Order the requirement pool by catalog course number, ties broken by key
pub fn sort_pool(pool: &mut [Course]) {
    pool.sort_by(pool_order);
}

fn pool_order(a: &Course, b: &Course) -> Ordering {
    number_rank(a.number())
        .cmp(&number_rank(b.number()))
        .then_with(|| a.number().cmp(b.number()))
        .then_with(|| a.key.cmp(&b.key))
}

/// Leading digits of a course number; numbers without digits sort last
fn number_rank(number: &str) -> u32 {
    let digits: String = number.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Category;

    fn key(s: &str) -> CourseKey {
        s.parse().unwrap()
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new("Test");
        for (k, cat) in [
            ("CMP SCI 2250", Category::Core),
            ("MATH 1320", Category::Math),
            ("CMP SCI 1250", Category::Core),
            ("ENGLISH 1100", Category::Other),
            ("CMP SCI 4200", Category::Elective),
        ] {
            catalog
                .insert(Course::new(key(k), k, 3).offered_in([Term::Fall]), cat)
                .unwrap();
        }
        catalog
    }

    #[test]
    fn test_taken_courses_keep_order_and_dedupe() {
        let mut taken = TakenCourses::default();
        assert!(taken.insert(key("MATH 1320")));
        assert!(taken.insert(key("CMP SCI 1250")));
        assert!(!taken.insert(key("math 1320")));
        let keys: Vec<&str> = taken.iter().map(CourseKey::as_str).collect();
        assert_eq!(keys, vec!["MATH 1320", "CMP SCI 1250"]);

        let json = serde_json::to_string(&taken).unwrap();
        assert_eq!(json, r#"["MATH 1320","CMP SCI 1250"]"#);
        let back: TakenCourses = serde_json::from_str(r#"["A 1","A 1","B 2"]"#).unwrap();
        assert_eq!(back.len(), 2);
    }

    #[test]
    fn test_initial_pool_sorted_by_number() {
        let state = PlanningState::new(&catalog(), None, &PlanSetup::default()).unwrap();
        let keys: Vec<&str> = state
            .remaining_required_courses
            .iter()
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(
            keys,
            vec!["ENGLISH 1100", "CMP SCI 1250", "MATH 1320", "CMP SCI 2250"]
        );
        assert_eq!(state.quotas.upper_division, DEFAULT_UPPER_DIVISION_ELECTIVES);
        assert_eq!(state.semester_index, 0);
        assert!(!state.include_summer);
    }

    #[test]
    fn test_taken_and_waived_leave_the_pool() {
        let setup = PlanSetup {
            credits_earned: 3,
            taken: vec![key("CMP SCI 1250")],
            waived: vec![key("ENGLISH 1100")],
            ..PlanSetup::default()
        };
        let state = PlanningState::new(&catalog(), None, &setup).unwrap();
        assert_eq!(state.remaining_required_courses.len(), 2);
        assert!(state.courses_taken.contains(&key("ENGLISH 1100")));
        assert!(state.courses_waived.contains(&key("ENGLISH 1100")));
        assert_eq!(state.total_credits_accumulated, 3);
        assert_eq!(state.starting_credits, 3);
    }

    #[test]
    fn test_invalid_term_selection() {
        let setup = PlanSetup {
            terms: vec![Term::Fall, Term::Summer],
            ..PlanSetup::default()
        };
        assert_eq!(
            PlanningState::new(&catalog(), None, &setup),
            Err(ConfigError::MissingRegularTerm)
        );

        let setup = PlanSetup {
            start_term: Term::Summer,
            ..PlanSetup::default()
        };
        assert_eq!(
            PlanningState::new(&catalog(), None, &setup),
            Err(ConfigError::StartTermNotSelected(Term::Summer))
        );
    }

    #[test]
    fn test_unknown_certificate() {
        let setup = PlanSetup {
            certificate: Some("NOPE".to_string()),
            ..PlanSetup::default()
        };
        assert_eq!(
            PlanningState::new(&catalog(), Some(&CertificateCatalog::default()), &setup),
            Err(ConfigError::UnknownCertificate("NOPE".to_string()))
        );
    }

    #[test]
    fn test_number_rank() {
        assert_eq!(number_rank("1250"), 1250);
        assert_eq!(number_rank("2261L"), 2261);
        assert_eq!(number_rank("X"), u32::MAX);
    }

    #[test]
    fn test_credits_remaining_saturates() {
        let setup = PlanSetup {
            credits_earned: 30,
            ..PlanSetup::default()
        };
        let state = PlanningState::new(&catalog(), None, &setup).unwrap();
        assert_eq!(state.credits_remaining(120), 90);
        assert_eq!(state.credits_remaining(24), 0);
    }
}
