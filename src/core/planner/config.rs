//! Planner policy knobs

use super::error::ConfigError;
use crate::core::models::CourseKey;
use serde::{Deserialize, Serialize};

/// Credits a full-time student must take each semester
pub const DEFAULT_MIN_SEMESTER_CREDITS: u32 = 15;
/// Credits required to graduate
pub const DEFAULT_DEGREE_CREDITS: u32 = 120;
/// Credits below which only general-education filler is used
pub const DEFAULT_LOWER_DIVISION_CREDITS: u32 = 60;
/// 3000+-level CMP SCI electives required by the major
pub const DEFAULT_UPPER_DIVISION_ELECTIVES: u32 = 5;
/// Stacked 3000+ elective filler credits allowed per term (exclusive bound)
pub const DEFAULT_ELECTIVE_TERM_CAP: u32 = 6;
/// Upper bound on ticks per invocation
pub const DEFAULT_MAX_TICKS: u32 = 10_000;
/// Credit value of every filler slot
pub const FILLER_CREDITS: u32 = 3;

/// A course that may only be placed once enough credits are accumulated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditGate {
    /// Gated course
    pub course: CourseKey,
    /// Cumulative credits required before placement
    pub min_credits: u32,
}

impl CreditGate {
    /// Junior-level writing requirement: `ENGLISH 3130` after 56 credits
    #[must_use]
    pub fn junior_writing() -> Self {
        Self {
            course: CourseKey::from_normalized("ENGLISH 3130"),
            min_credits: 56,
        }
    }

    /// Whether `course` may be placed with `credits` accumulated
    #[must_use]
    pub fn admits(&self, course: &CourseKey, credits: u32) -> bool {
        &self.course != course || credits >= self.min_credits
    }
}

/// When a planning invocation returns control to the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Stop after exactly one semester closes
    SingleSemester,
    /// Keep going until the degree total is reached
    #[default]
    FullPlan,
}

/// Numeric policy shared by every invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Credits that close a semester
    pub min_semester_credits: u32,
    /// Credits that complete the plan
    pub degree_credits: u32,
    /// Credits below which filler is always general education
    pub lower_division_credits: u32,
    /// Exclusive per-term bound on stacked 3000+ filler credits
    pub elective_term_cap: u32,
    /// Tick bound per invocation
    pub max_ticks: u32,
    /// Courses with a cumulative-credit requirement
    pub credit_gates: Vec<CreditGate>,
    /// Single semester or full plan
    pub run_mode: RunMode,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            min_semester_credits: DEFAULT_MIN_SEMESTER_CREDITS,
            degree_credits: DEFAULT_DEGREE_CREDITS,
            lower_division_credits: DEFAULT_LOWER_DIVISION_CREDITS,
            elective_term_cap: DEFAULT_ELECTIVE_TERM_CAP,
            max_ticks: DEFAULT_MAX_TICKS,
            credit_gates: vec![CreditGate::junior_writing()],
            run_mode: RunMode::FullPlan,
        }
    }
}

impl PlannerConfig {
    /// Same policy with a different run mode
    #[must_use]
    pub fn with_run_mode(mut self, run_mode: RunMode) -> Self {
        self.run_mode = run_mode;
        self
    }

    /// Reject values that would make planning meaningless
    ///
    /// # Errors
    /// Returns a [`ConfigError`] for a zero semester load, degree total or tick bound.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.min_semester_credits == 0 {
            return Err(ConfigError::ZeroSemesterCredits);
        }
        if self.degree_credits == 0 {
            return Err(ConfigError::ZeroDegreeCredits);
        }
        if self.max_ticks == 0 {
            return Err(ConfigError::ZeroMaxTicks);
        }
        Ok(())
    }

    /// Whether every credit gate admits `course` at `credits`
    #[must_use]
    pub fn passes_credit_gates(&self, course: &CourseKey, credits: u32) -> bool {
        self.credit_gates.iter().all(|gate| gate.admits(course, credits))
    }
}
