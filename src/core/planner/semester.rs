//! Semester builder: placement, filler selection and semester closing

use super::config::{PlannerConfig, FILLER_CREDITS};
use super::state::{OpenSemester, PlanningState};
use crate::core::models::{Course, FillerKind, ScheduledItem, SemesterRecord};
use logger::{debug, info};

/// Applies placements to the open semester of a [`PlanningState`]
#[derive(Debug, Clone, Copy)]
pub struct SemesterBuilder<'a> {
    config: &'a PlannerConfig,
}

impl<'a> SemesterBuilder<'a> {
    /// Builder using `config` for the credit limits
    #[must_use]
    pub const fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// Whether required courses may still be placed this term
    ///
    /// Required credits may reach but not exceed half the minimum load.
    #[must_use]
    pub const fn core_ceiling_open(&self, open: &OpenSemester) -> bool {
        open.core_credits * 2 <= self.config.min_semester_credits
    }

    /// Place a required course
    ///
    /// Returns `false` without touching the state when the course is not
    /// offered in the current term or has already been taken.
    pub fn place_course(&self, state: &mut PlanningState, course: &Course) -> bool {
        if !course.is_offered_in(state.current_term) || !state.courses_taken.insert(course.key.clone()) {
            return false;
        }
        let open = &mut state.current_semester;
        open.classes.push(ScheduledItem::course(course));
        open.credits += course.credits;
        open.core_credits += course.credits;
        open.cs_math_credits += course.credits;
        state.total_credits_accumulated += course.credits;
        debug!(
            "{} {}: placed {} ({} cr), {} total",
            state.current_term,
            state.semester_index,
            course.key,
            course.credits,
            state.total_credits_accumulated
        );
        true
    }

    /// Choose the filler for this tick, consuming the matching quota
    ///
    /// 3000+ and certificate fillers each have their own per-term stack and
    /// share the term's CS+Math cap.
    pub fn choose_filler(&self, state: &mut PlanningState) -> FillerKind {
        if state.total_credits_accumulated < self.config.lower_division_credits {
            return FillerKind::GenEdOrElective;
        }
        let open = &state.current_semester;
        let upper_fits = self.filler_fits(open, open.upper_elective_credits);
        let certificate_fits = self.filler_fits(open, open.certificate_elective_credits);
        let quotas = &mut state.quotas;
        if quotas.upper_division > 0 && upper_fits {
            quotas.upper_division -= 1;
            return FillerKind::UpperDivisionElective;
        }
        if quotas.upper_division == 0 && quotas.certificate_slots > 0 && certificate_fits {
            quotas.certificate_slots -= 1;
            return FillerKind::CertificateElective;
        }
        FillerKind::GenEdOrElective
    }

    fn filler_fits(&self, open: &OpenSemester, stacked: u32) -> bool {
        let cs_math_limit = self
            .config
            .min_semester_credits
            .saturating_sub(FILLER_CREDITS);
        stacked + FILLER_CREDITS < self.config.elective_term_cap
            && open.cs_math_credits + FILLER_CREDITS <= cs_math_limit
    }

    /// Place one filler slot chosen by [`Self::choose_filler`]
    pub fn place_filler(&self, state: &mut PlanningState) -> FillerKind {
        let kind = self.choose_filler(state);
        let open = &mut state.current_semester;
        open.classes.push(ScheduledItem::Filler {
            filler: kind,
            credits: FILLER_CREDITS,
        });
        open.credits += FILLER_CREDITS;
        if kind.is_cs_math() {
            open.cs_math_credits += FILLER_CREDITS;
        }
        match kind {
            FillerKind::UpperDivisionElective => open.upper_elective_credits += FILLER_CREDITS,
            FillerKind::CertificateElective => {
                open.certificate_elective_credits += FILLER_CREDITS;
            }
            FillerKind::GenEdOrElective => {}
        }
        state.total_credits_accumulated += FILLER_CREDITS;
        debug!(
            "{} {}: placed filler '{kind}', {} total",
            state.current_term, state.semester_index, state.total_credits_accumulated
        );
        kind
    }

    /// Whether the open semester has met the minimum load
    #[must_use]
    pub const fn load_met(&self, state: &PlanningState) -> bool {
        state.current_semester.credits >= self.config.min_semester_credits
    }

    /// Close the open semester: append its record, reset the counters and advance the term
    pub fn close(&self, state: &mut PlanningState) -> SemesterRecord {
        let open = std::mem::take(&mut state.current_semester);
        let record = SemesterRecord {
            term: state.current_term,
            semester_index: state.semester_index,
            credit_total: open.credits,
            course_list: open.classes,
        };
        info!(
            "Semester {} ({}) closed with {} credits, {} accumulated",
            record.semester_index + 1,
            record.term,
            record.credit_total,
            state.total_credits_accumulated
        );
        state.schedule.push(record.clone());
        state.current_term = state.current_term.next(state.include_summer);
        state.semester_index += 1;
        record
    }
}
