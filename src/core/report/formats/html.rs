//! HTML report generator
//!
//! Renders a self-contained HTML page (embedded CSS, no scripts) through the
//! `templates/schedule.html` askama template. All text is escaped by the
//! template engine.

use crate::core::models::ScheduledItem;
use crate::core::report::{ReportContext, ReportError, ReportGenerator};
use askama::Template;

/// One table row
struct RowView<'a> {
    code: &'a str,
    title: &'a str,
    credits: u32,
    filler: bool,
}

/// One semester card
struct SemesterView<'a> {
    label: String,
    credits: u32,
    rows: Vec<RowView<'a>>,
}

/// Filler totals line
struct FillerView {
    label: &'static str,
    count: usize,
}

#[derive(Template)]
#[template(path = "schedule.html")]
struct ScheduleTemplate<'a> {
    program: &'a str,
    certificate: Option<&'a str>,
    total_credits: u32,
    degree_credits: u32,
    starting_credits: u32,
    credits_remaining: u32,
    complete: bool,
    semesters: Vec<SemesterView<'a>>,
    fillers: Vec<FillerView>,
    unscheduled: Vec<String>,
}

impl<'a> ScheduleTemplate<'a> {
    fn from_context(ctx: &ReportContext<'a>) -> Self {
        let semesters = ctx
            .semesters()
            .iter()
            .map(|record| SemesterView {
                label: ReportContext::semester_label(record),
                credits: record.credit_total,
                rows: record.course_list.iter().map(row).collect(),
            })
            .collect();
        let fillers = ctx
            .filler_counts()
            .into_iter()
            .map(|(kind, count)| FillerView {
                label: kind.label(),
                count,
            })
            .collect();

        Self {
            program: ctx.program,
            certificate: ctx.certificate,
            total_credits: ctx.total_credits(),
            degree_credits: ctx.degree_credits,
            starting_credits: ctx.starting_credits(),
            credits_remaining: ctx.credits_remaining(),
            complete: ctx.is_complete(),
            semesters,
            fillers,
            unscheduled: ctx.unscheduled(),
        }
    }
}

fn row(item: &ScheduledItem) -> RowView<'_> {
    RowView {
        code: item.code(),
        title: item.title(),
        credits: item.credits(),
        filler: item.filler().is_some(),
    }
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, ReportError> {
        Ok(ScheduleTemplate::from_context(ctx).render()?)
    }
}
