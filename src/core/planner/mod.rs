//! Schedule-generation engine
//!
//! A [`Planner`] borrows an immutable [`Catalog`](crate::core::catalog::Catalog)
//! and a [`PlannerConfig`], and advances a caller-owned [`PlanningState`] one
//! tick at a time until a semester closes or the degree total is reached.
//!
//! ```ignore
//! let catalog = load_catalog("catalog.toml")?;
//! let config = PlannerConfig::default();
//! let mut state = PlanningState::new(&catalog, None, &PlanSetup::default())?;
//! let outcome = Planner::new(&catalog, None, &config)?.run(&mut state)?;
//! ```

pub mod certificate;
pub mod config;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod semester;
pub mod state;

pub use config::{
    CreditGate, PlannerConfig, RunMode, DEFAULT_DEGREE_CREDITS, DEFAULT_ELECTIVE_TERM_CAP,
    DEFAULT_LOWER_DIVISION_CREDITS, DEFAULT_MAX_TICKS, DEFAULT_MIN_SEMESTER_CREDITS,
    DEFAULT_UPPER_DIVISION_ELECTIVES, FILLER_CREDITS,
};
pub use eligibility::PrerequisiteEvaluator;
pub use engine::{PlanOutcome, PlanStatus, Planner};
pub use error::{ConfigError, PlanError};
pub use semester::SemesterBuilder;
pub use state::{ElectiveQuotas, OpenSemester, PlanSetup, PlanningState, TakenCourses};
