//! Schedule reports
//!
//! Renders a finished (or partial) plan as Markdown or HTML. Both formats are
//! built from a [`ReportContext`] that borrows the planning state.

pub mod formats;

use crate::core::models::{FillerKind, SemesterRecord};
use crate::core::planner::PlanningState;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Errors raised while rendering or writing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The report file could not be written
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    /// The HTML template failed to render
    #[error("failed to render template: {0}")]
    Template(#[from] askama::Error),
}

/// Data context for report generation
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Program name shown in the title
    pub program: &'a str,
    /// Certificate name, if one was selected
    pub certificate: Option<&'a str>,
    /// Planning state holding the schedule
    pub state: &'a PlanningState,
    /// Credits required for the degree
    pub degree_credits: u32,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(program: &'a str, state: &'a PlanningState, degree_credits: u32) -> Self {
        Self {
            program,
            certificate: None,
            state,
            degree_credits,
        }
    }

    /// Attach the selected certificate's display name
    #[must_use]
    pub const fn with_certificate(mut self, certificate: Option<&'a str>) -> Self {
        self.certificate = certificate;
        self
    }

    /// Closed semesters in order
    #[must_use]
    pub fn semesters(&self) -> &'a [SemesterRecord] {
        &self.state.schedule
    }

    /// Credits accumulated, including prior credit
    #[must_use]
    pub const fn total_credits(&self) -> u32 {
        self.state.total_credits_accumulated
    }

    /// Credits earned before planning
    #[must_use]
    pub const fn starting_credits(&self) -> u32 {
        self.state.starting_credits
    }

    /// Credits still missing from the degree total
    #[must_use]
    pub const fn credits_remaining(&self) -> u32 {
        self.state.credits_remaining(self.degree_credits)
    }

    /// Whether the plan reaches the degree total
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.state.is_complete(self.degree_credits)
    }

    /// Required courses that were never placed
    #[must_use]
    pub fn unscheduled(&self) -> Vec<String> {
        self.state
            .remaining_required_courses
            .iter()
            .map(|c| c.key.to_string())
            .collect()
    }

    /// Filler slots of each kind across the plan
    #[must_use]
    pub fn filler_counts(&self) -> Vec<(FillerKind, usize)> {
        [
            FillerKind::GenEdOrElective,
            FillerKind::UpperDivisionElective,
            FillerKind::CertificateElective,
        ]
        .into_iter()
        .map(|kind| (kind, self.state.filler_count(kind)))
        .filter(|(_, count)| *count > 0)
        .collect()
    }

    /// Semester heading, e.g. "Semester 1 (Fall)"
    #[must_use]
    pub fn semester_label(record: &SemesterRecord) -> String {
        format!("Semester {} ({})", record.semester_index + 1, record.term)
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ReportError> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, ReportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{Catalog, Category};
    use crate::core::models::{Course, Term};
    use crate::core::planner::PlanSetup;

    #[test]
    fn test_unscheduled_lists_remaining_pool() {
        let mut catalog = Catalog::new("Test");
        let course = Course::new("CMP SCI 4280".parse().unwrap(), "Compilers", 3)
            .offered_in([Term::Spring]);
        catalog.insert(course, Category::Core).unwrap();
        let state = PlanningState::new(&catalog, None, &PlanSetup::default()).unwrap();

        let ctx = ReportContext::new("Test", &state, 120);
        assert_eq!(ctx.unscheduled(), vec!["CMP SCI 4280".to_string()]);
        assert!(ctx.filler_counts().is_empty());
        assert!(!ctx.is_complete());
        assert_eq!(ctx.credits_remaining(), 120);
    }
}
