//! Schedule engine: the greedy first-fit tick loop
//!
//! Each tick places at most one item. The requirement pool is scanned in course
//! number order and the first placeable course wins; when nothing qualifies a
//! single filler slot is placed instead. After every placement the closing
//! conditions are checked, degree completion first.

use super::config::{PlannerConfig, RunMode};
use super::eligibility::PrerequisiteEvaluator;
use super::error::{ConfigError, PlanError};
use super::semester::SemesterBuilder;
use super::state::PlanningState;
use crate::core::catalog::{Catalog, Certificate};
use crate::core::models::{CourseKey, SemesterRecord};
use logger::{info, warn};
use serde::{Deserialize, Serialize};

/// How a planning invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// A semester closed and the degree total is not yet reached
    SemesterClosed,
    /// The degree total has been reached
    Complete,
}

/// Result of one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// Terminal status of this invocation
    pub status: PlanStatus,
    /// Semesters closed during this invocation
    pub semesters: Vec<SemesterRecord>,
}

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tick {
    Building,
    Closed,
    Complete,
}

/// Course-placement engine over an immutable catalog
#[derive(Debug, Clone)]
pub struct Planner<'a> {
    catalog: &'a Catalog,
    certificate: Option<&'a Certificate>,
    config: &'a PlannerConfig,
    evaluator: PrerequisiteEvaluator,
}

impl<'a> Planner<'a> {
    /// Build a planner, validating the policy and reporting unresolved prerequisites
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the policy is invalid.
    pub fn new(
        catalog: &'a Catalog,
        certificate: Option<&'a Certificate>,
        config: &'a PlannerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let planner = Self {
            catalog,
            certificate,
            config,
            evaluator: PrerequisiteEvaluator::new(catalog, certificate),
        };
        for (course, missing) in planner.unresolved_prerequisites() {
            warn!("{course} requires {missing}, which is not in the catalog; that alternative can never be met");
        }
        Ok(planner)
    }

    /// Every (course, missing prerequisite) pair across the catalog and certificate
    #[must_use]
    pub fn unresolved_prerequisites(&self) -> Vec<(CourseKey, CourseKey)> {
        let certificate_courses = self.certificate.into_iter().flat_map(Certificate::courses);
        let courses = self
            .catalog
            .required()
            .chain(self.catalog.electives())
            .chain(certificate_courses);
        self.evaluator
            .unresolved(courses)
            .map(|(course, missing)| (course.clone(), missing.clone()))
            .collect()
    }


    /// Run the tick loop on `state` until the run mode says stop
    ///
    /// # Errors
    /// Returns [`PlanError::Config`] if the state names a certificate this planner
    /// was not given, and [`PlanError::Stalled`] if the tick bound is exceeded.
    pub fn run(&self, state: &mut PlanningState) -> Result<PlanOutcome, PlanError> {
        self.check_certificate(state)?;

        let first_new = state.schedule.len();
        let outcome = |state: &PlanningState, status| PlanOutcome {
            status,
            semesters: state.schedule[first_new..].to_vec(),
        };

        if state.is_complete(self.config.degree_credits) {
            info!(
                "Degree total already reached ({} credits)",
                state.total_credits_accumulated
            );
            return Ok(outcome(state, PlanStatus::Complete));
        }

        for _ in 0..self.config.max_ticks {
            match self.tick(state) {
                Tick::Building => {}
                Tick::Complete => {
                    info!(
                        "Plan complete after {} semesters with {} credits",
                        state.schedule.len(),
                        state.total_credits_accumulated
                    );
                    return Ok(outcome(state, PlanStatus::Complete));
                }
                Tick::Closed => {
                    if self.config.run_mode == RunMode::SingleSemester {
                        return Ok(outcome(state, PlanStatus::SemesterClosed));
                    }
                }
            }
        }

        Err(PlanError::Stalled {
            ticks: self.config.max_ticks,
            total_credits: state.total_credits_accumulated,
        })
    }

    fn check_certificate(&self, state: &PlanningState) -> Result<(), ConfigError> {
        match (&state.certificate, self.certificate) {
            (Some(id), Some(cert)) if *id == cert.id => Ok(()),
            (Some(id), _) => Err(ConfigError::CertificateMismatch(id.clone())),
            (None, _) => Ok(()),
        }
    }

    fn tick(&self, state: &mut PlanningState) -> Tick {
        let builder = SemesterBuilder::new(self.config);

        let placed = builder.core_ceiling_open(&state.current_semester)
            && self.place_first_eligible(&builder, state);
        if !placed {
            builder.place_filler(state);
        }

        if state.is_complete(self.config.degree_credits) {
            builder.close(state);
            Tick::Complete
        } else if builder.load_met(state) {
            builder.close(state);
            Tick::Closed
        } else {
            Tick::Building
        }
    }

    fn place_first_eligible(&self, builder: &SemesterBuilder<'_>, state: &mut PlanningState) -> bool {
        let term = state.current_term;
        let credits = state.total_credits_accumulated;
        let position = state.remaining_required_courses.iter().position(|course| {
            !state.courses_taken.contains(&course.key)
                && course.is_offered_in(term)
                && self.config.passes_credit_gates(&course.key, credits)
                && self
                    .evaluator
                    .is_eligible(course, &state.courses_taken, &state.current_semester)
        });
        let Some(index) = position else {
            return false;
        };
        let course = state.remaining_required_courses[index].clone();
        if !builder.place_course(state, &course) {
            return false;
        }
        state.remaining_required_courses.remove(index);
        true
    }
}
