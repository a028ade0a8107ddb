//! CLI command handlers for `degreeplan`.
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod plan;
