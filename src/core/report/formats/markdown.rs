//! Markdown report generator
//!
//! Renders the schedule as one table per semester plus a summary. The output
//! reads well in GitHub, GitLab, and VS Code.

use crate::core::report::{ReportContext, ReportError, ReportGenerator};
use std::fmt::Write;

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compact overview table: one row per semester
    #[must_use]
    pub fn schedule_table(ctx: &ReportContext) -> String {
        let mut table = String::new();
        table.push_str("| Semester | Term | Courses | Credits |\n");
        table.push_str("|---|---|---|---|\n");

        for record in ctx.semesters() {
            let courses: Vec<&str> = record.course_list.iter().map(|item| item.code()).collect();
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} |",
                record.semester_index + 1,
                record.term,
                courses.join(", "),
                record.credit_total
            );
        }

        let unscheduled = ctx.unscheduled();
        if !unscheduled.is_empty() {
            let _ = writeln!(table, "| ⚠️ Unscheduled | - | {} | - |", unscheduled.join(", "));
        }

        table
    }

    fn semester_details(ctx: &ReportContext) -> String {
        let mut out = String::new();
        for record in ctx.semesters() {
            let _ = writeln!(out, "### {}\n", ReportContext::semester_label(record));
            out.push_str("| Course | Title | Credits |\n");
            out.push_str("|---|---|---|\n");
            for item in &record.course_list {
                let _ = writeln!(out, "| {} | {} | {} |", item.code(), item.title(), item.credits());
            }
            let _ = writeln!(out, "| **Total** | | **{}** |\n", record.credit_total);
        }
        out
    }

    fn summary(ctx: &ReportContext) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "- **Semesters:** {}", ctx.semesters().len());
        let _ = writeln!(
            out,
            "- **Credits:** {} of {} ({} earned before planning)",
            ctx.total_credits(),
            ctx.degree_credits,
            ctx.starting_credits()
        );
        if let Some(certificate) = ctx.certificate {
            let _ = writeln!(out, "- **Certificate:** {certificate}");
        }
        for (kind, count) in ctx.filler_counts() {
            let _ = writeln!(out, "- **{kind}:** {count}");
        }
        if ctx.credits_remaining() > 0 {
            let _ = writeln!(out, "- **Credits remaining:** {}", ctx.credits_remaining());
        }
        let status = if ctx.is_complete() { "complete" } else { "in progress" };
        let _ = writeln!(out, "- **Status:** {status}");
        out
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, ReportError> {
        let mut output = String::new();
        let _ = writeln!(output, "# Degree Plan: {}\n", ctx.program);
        output.push_str("## Summary\n\n");
        output.push_str(&Self::summary(ctx));
        output.push_str("\n## Schedule\n\n");
        output.push_str(&Self::schedule_table(ctx));
        output.push_str("\n## Semesters\n\n");
        output.push_str(&Self::semester_details(ctx));
        Ok(output)
    }
}
