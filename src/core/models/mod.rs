//! Data models for `degree-planner`

pub mod course;
pub mod prerequisite;
pub mod schedule;
pub mod term;

pub use course::{Course, CourseKey, InvalidCourseKey, DEFAULT_CREDIT_HOURS};
pub use prerequisite::{PrerequisiteExpr, Requirement};
pub use schedule::{FillerKind, ScheduledItem, SemesterRecord};
pub use term::{Term, TermCalendar, UnknownTerm};
