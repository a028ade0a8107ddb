//! Planner error types

use crate::core::models::Term;

/// Invalid invocation parameters, rejected before any course is placed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The selected terms must include both Fall and Spring
    #[error("the selected terms must include both Fall and Spring")]
    MissingRegularTerm,
    /// The starting term is not one of the selected terms
    #[error("starting term {0} is not among the selected terms")]
    StartTermNotSelected(Term),
    /// A semester must require at least one credit
    #[error("minimum semester credits must be greater than zero")]
    ZeroSemesterCredits,
    /// The degree total must be at least one credit
    #[error("degree credit total must be greater than zero")]
    ZeroDegreeCredits,
    /// The tick bound must allow at least one tick
    #[error("maximum tick count must be greater than zero")]
    ZeroMaxTicks,
    /// The requested certificate is not loaded
    #[error("unknown certificate '{0}'")]
    UnknownCertificate(String),
    /// The state names a certificate but the planner was built without it
    #[error("planning state uses certificate '{0}' but it was not supplied")]
    CertificateMismatch(String),
}

/// Errors that abort a planning run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The tick bound was exceeded before the plan completed
    #[error("planning stalled after {ticks} ticks at {total_credits} credits")]
    Stalled {
        /// Ticks executed in this invocation
        ticks: u32,
        /// Credits accumulated when the run gave up
        total_credits: u32,
    },
}
