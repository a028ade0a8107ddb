//! CLI argument definitions for `degreeplan`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use degree_planner::config::ConfigOverrides;
use degree_planner::core::models::{CourseKey, Term};
use logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `reports_dir`, `max_ticks`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Inputs describing the student and the program, shared by `plan` and `next`
#[derive(Debug, Clone, Args)]
pub struct PlanArgs {
    /// Catalog TOML file with the program's courses
    #[arg(long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Certificate TOML file
    #[arg(long, value_name = "FILE")]
    pub certificates: Option<PathBuf>,

    /// Certificate id to layer on the degree (requires --certificates)
    #[arg(long, value_name = "ID", requires = "certificates")]
    pub certificate: Option<String>,

    /// Term of the first planned semester (Fall, Spring, Summer)
    #[arg(long, value_name = "TERM", default_value = "Fall")]
    pub start_term: Term,

    /// Plan Summer terms too (falls back to config `include_summer`)
    #[arg(long)]
    pub summer: bool,

    /// Minimum credits that close a semester (falls back to config)
    #[arg(long, value_name = "CREDITS")]
    pub min_credits: Option<u32>,

    /// Credits earned before planning
    #[arg(long, value_name = "CREDITS", default_value_t = 0)]
    pub credits_earned: u32,

    /// Course already completed, e.g. "CMP SCI 1250" (repeatable)
    #[arg(long, value_name = "COURSE")]
    pub taken: Vec<CourseKey>,

    /// Course that does not need to be taken (repeatable)
    #[arg(long, value_name = "COURSE")]
    pub waived: Vec<CourseKey>,

    /// 3000+-level CMP SCI electives required (falls back to config)
    #[arg(long, value_name = "COUNT")]
    pub upper_electives: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Plan every remaining semester.
    ///
    /// Prints the schedule as a Markdown table and optionally writes a report
    /// and the final planning state.
    Plan {
        #[command(flatten)]
        plan: PlanArgs,

        /// Generate a report in the specified format (markdown, html)
        #[arg(long, value_name = "FORMAT")]
        report: Option<String>,

        /// Report output path (optional; defaults to config `reports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write the final planning state as JSON
        #[arg(long, value_name = "FILE")]
        state_out: Option<PathBuf>,
    },
    /// Plan the next semester only.
    ///
    /// Creates the state file from the plan flags when it does not exist,
    /// otherwise resumes from it. The updated state is written back.
    Next {
        #[command(flatten)]
        plan: PlanArgs,

        /// Planning state JSON file (relative paths resolve against config `state_dir`)
        #[arg(long, value_name = "FILE")]
        state: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "degreeplan",
    about = "Semester-by-semester degree planner",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override config state directory
    #[arg(long = "config-state-dir", value_name = "DIR")]
    pub config_state_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// The short-form `--reports-dir` takes precedence over `--config-reports-dir`
    /// when both are provided. `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            reports_dir: self
                .reports_dir
                .as_ref()
                .or(self.config_reports_dir.as_ref())
                .map(path_string),
            state_dir: self.config_state_dir.as_ref().map(path_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_reports_dir: None,
            reports_dir: None,
            config_state_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = cli(Command::Config { subcommand: None }).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.state_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let mut args = cli(Command::Config { subcommand: None });
        args.config_level = Some(LogLevelArg::Debug);
        args.config_log_file = Some(PathBuf::from("/tmp/test.log"));
        args.config_verbose = Some(true);
        args.config_reports_dir = Some(PathBuf::from("/long/reports"));
        args.reports_dir = Some(PathBuf::from("/reports"));
        args.config_state_dir = Some(PathBuf::from("/states"));

        let overrides = args.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.reports_dir, Some("/reports".to_string()));
        assert_eq!(overrides.state_dir, Some("/states".to_string()));
    }

    #[test]
    fn test_long_form_when_short_form_absent() {
        let mut args = cli(Command::Config { subcommand: None });
        args.config_reports_dir = Some(PathBuf::from("/long/reports"));
        let overrides = args.to_config_overrides();
        assert_eq!(overrides.reports_dir, Some("/long/reports".to_string()));
    }

    #[test]
    fn test_parse_plan_command() {
        let args = Cli::try_parse_from([
            "degreeplan",
            "plan",
            "--catalog",
            "bscs.toml",
            "--start-term",
            "spring",
            "--summer",
            "--taken",
            "CMP SCI 1250",
            "--taken",
            "math 1320",
            "--report",
            "html",
        ])
        .unwrap();

        let Command::Plan { plan, report, .. } = args.command else {
            panic!("expected plan command");
        };
        assert_eq!(plan.catalog, PathBuf::from("bscs.toml"));
        assert_eq!(plan.start_term, Term::Spring);
        assert!(plan.summer);
        assert_eq!(plan.taken.len(), 2);
        assert_eq!(plan.taken[1].as_str(), "MATH 1320");
        assert_eq!(report.as_deref(), Some("html"));
    }

    #[test]
    fn test_certificate_requires_certificates_file() {
        let result = Cli::try_parse_from([
            "degreeplan",
            "plan",
            "--catalog",
            "bscs.toml",
            "--certificate",
            "AICERTReq",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_next_requires_state() {
        assert!(Cli::try_parse_from(["degreeplan", "next", "--catalog", "bscs.toml"]).is_err());
        let args =
            Cli::try_parse_from(["degreeplan", "next", "--catalog", "c.toml", "--state", "s.json"])
                .unwrap();
        assert!(matches!(args.command, Command::Next { .. }));
    }

    #[test]
    fn test_invalid_term_rejected() {
        let result = Cli::try_parse_from([
            "degreeplan",
            "plan",
            "--catalog",
            "bscs.toml",
            "--start-term",
            "winter",
        ]);
        assert!(result.is_err());
    }
}
