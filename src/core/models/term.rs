//! Academic terms and the rotation used to advance the calendar cursor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One recurring scheduling unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    /// Fall semester
    Fall,
    /// Spring semester
    Spring,
    /// Summer session
    Summer,
}

impl Term {
    /// All terms in calendar order, starting with Fall
    pub const ALL: [Self; 3] = [Self::Fall, Self::Spring, Self::Summer];

    /// The term that follows `self` in the rotation
    ///
    /// Fall → Spring → Summer → Fall, with Summer skipped when `include_summer` is false.
    #[must_use]
    pub const fn next(self, include_summer: bool) -> Self {
        match self {
            Self::Fall => Self::Spring,
            Self::Spring if include_summer => Self::Summer,
            Self::Spring | Self::Summer => Self::Fall,
        }
    }

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fall => "Fall",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for an unrecognized term name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown term '{0}' (expected Fall, Spring, or Summer)")]
pub struct UnknownTerm(pub String);

impl FromStr for Term {
    type Err = UnknownTerm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fall" | "fa" => Ok(Self::Fall),
            "spring" | "sp" => Ok(Self::Spring),
            "summer" | "su" => Ok(Self::Summer),
            _ => Err(UnknownTerm(s.to_string())),
        }
    }
}

/// The ordered list of terms a student will enroll in, rotated to start at the chosen term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCalendar {
    terms: Vec<Term>,
}

impl TermCalendar {
    /// Build the calendar from the selected terms, starting at `start`
    ///
    /// Returns `None` when the combination is not schedulable: Fall and Spring
    /// must both be selected and `start` must be one of the selected terms.
    #[must_use]
    pub fn new(start: Term, selected: &[Term]) -> Option<Self> {
        if !selected.contains(&Term::Fall) || !selected.contains(&Term::Spring) {
            return None;
        }
        if !selected.contains(&start) {
            return None;
        }
        let first = Term::ALL.iter().position(|t| *t == start).unwrap_or(0);
        let terms = Term::ALL[first..]
            .iter()
            .chain(&Term::ALL[..first])
            .copied()
            .filter(|t| selected.contains(t))
            .collect();
        Some(Self { terms })
    }

    /// Selected terms in enrollment order
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Whether Summer is part of the rotation
    #[must_use]
    pub fn includes_summer(&self) -> bool {
        self.terms.contains(&Term::Summer)
    }
}
