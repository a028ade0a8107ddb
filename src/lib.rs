//! Library for `degree-planner`
//! Catalog loading, semester-by-semester planning, and schedule reports

pub mod config;
pub mod core;

pub use crate::core::get_version;
