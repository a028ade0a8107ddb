//! Configuration module for `degree-planner`

use crate::core::planner::{
    PlannerConfig, DEFAULT_DEGREE_CREDITS, DEFAULT_LOWER_DIVISION_CREDITS, DEFAULT_MAX_TICKS,
    DEFAULT_MIN_SEMESTER_CREDITS, DEFAULT_UPPER_DIVISION_ELECTIVES,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the configuration directory in path values
const DIR_VARIABLE: &str = "$DEGREE_PLANNER";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
    /// Directory for saved planning states
    #[serde(default)]
    pub state_dir: String,
}

/// Planning policy defaults
///
/// Missing keys take the built-in planner defaults. A zero credit value is
/// treated as unset by [`Config::merge_defaults`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Credits that close a semester
    pub min_semester_credits: u32,
    /// Credits that complete the degree
    pub degree_credits: u32,
    /// Plan Summer terms
    pub include_summer: bool,
    /// 3000+-level CMP SCI electives required
    pub upper_division_electives: u32,
    /// Credits below which only general-education filler is used
    pub lower_division_credits: u32,
    /// Tick bound per planning run
    pub max_ticks: u32,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            min_semester_credits: DEFAULT_MIN_SEMESTER_CREDITS,
            degree_credits: DEFAULT_DEGREE_CREDITS,
            include_summer: false,
            upper_division_electives: DEFAULT_UPPER_DIVISION_ELECTIVES,
            lower_division_credits: DEFAULT_LOWER_DIVISION_CREDITS,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Planner settings
    #[serde(default)]
    pub planner: PlannerSettings,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override saved-state directory
    pub state_dir: Option<String>,
}

fn merge_string(value: &mut String, default: &str) -> bool {
    if value.is_empty() && !default.is_empty() {
        default.clone_into(value);
        return true;
    }
    false
}

fn merge_number(value: &mut u32, default: u32) -> bool {
    if *value == 0 && default != 0 {
        *value = default;
        return true;
    }
    false
}

fn parse_number(key: &str, value: &str) -> Result<u32, String> {
    value
        .parse::<u32>()
        .map_err(|_| format!("Invalid number for '{key}': '{value}'"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse::<bool>()
        .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
}

impl Config {
    /// Get the `$DEGREE_PLANNER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/degreeplan`
    /// - macOS: `~/Library/Application Support/degreeplan`
    /// - Windows: `%APPDATA%\degreeplan`
    #[must_use]
    pub fn get_degree_planner_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("degreeplan")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Empty strings and zero planner values are treated as missing.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        changed |= merge_string(&mut self.logging.level, &defaults.logging.level);
        changed |= merge_string(&mut self.logging.file, &defaults.logging.file);

        changed |= merge_string(&mut self.paths.reports_dir, &defaults.paths.reports_dir);
        changed |= merge_string(&mut self.paths.state_dir, &defaults.paths.state_dir);

        let planner = &mut self.planner;
        let planner_defaults = &defaults.planner;
        changed |= merge_number(
            &mut planner.min_semester_credits,
            planner_defaults.min_semester_credits,
        );
        changed |= merge_number(&mut planner.degree_credits, planner_defaults.degree_credits);
        changed |= merge_number(
            &mut planner.lower_division_credits,
            planner_defaults.lower_division_credits,
        );
        changed |= merge_number(&mut planner.max_ticks, planner_defaults.max_ticks);

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the file on disk is not touched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
        if let Some(state_dir) = &overrides.state_dir {
            self.paths.state_dir.clone_from(state_dir);
        }
    }

    /// Planner policy built from the `[planner]` section
    #[must_use]
    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            min_semester_credits: self.planner.min_semester_credits,
            degree_credits: self.planner.degree_credits,
            lower_division_credits: self.planner.lower_division_credits,
            max_ticks: self.planner.max_ticks,
            ..PlannerConfig::default()
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_degree_planner_dir`](Self::get_degree_planner_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_degree_planner_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$DEGREE_PLANNER` in a string to the configuration directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let app_dir = Self::get_degree_planner_dir();
            value.replace(DIR_VARIABLE, app_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$DEGREE_PLANNER` is expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);
        config.paths.state_dir = Self::expand_variables(&config.paths.state_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds
    /// `DefaultCLIConfigRelease.toml`.
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The defaults
    /// are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file has missing fields merged from the defaults and is saved
    /// back when that changed anything. On first run the defaults are written.
    /// Any read or parse failure falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the platform config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config cannot be
    /// serialized, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `reports_dir`, `state_dir`,
    /// `min_semester_credits`, `degree_credits`, `include_summer`,
    /// `upper_division_electives`, `lower_division_credits`, `max_ticks`.
    /// Dashes may be used instead of underscores.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone(),
            "file" => self.logging.file.clone(),
            "verbose" => self.logging.verbose.to_string(),
            "reports_dir" => self.paths.reports_dir.clone(),
            "state_dir" => self.paths.state_dir.clone(),
            "min_semester_credits" => self.planner.min_semester_credits.to_string(),
            "degree_credits" => self.planner.degree_credits.to_string(),
            "include_summer" => self.planner.include_summer.to_string(),
            "upper_division_electives" => self.planner.upper_division_electives.to_string(),
            "lower_division_credits" => self.planner.lower_division_credits.to_string(),
            "max_ticks" => self.planner.max_ticks.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let planner = &mut self.planner;
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_bool(key, value)?,
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            "state_dir" => self.paths.state_dir = value.to_string(),
            "min_semester_credits" => planner.min_semester_credits = parse_number(key, value)?,
            "degree_credits" => planner.degree_credits = parse_number(key, value)?,
            "include_summer" => planner.include_summer = parse_bool(key, value)?,
            "upper_division_electives" => {
                planner.upper_division_electives = parse_number(key, value)?;
            }
            "lower_division_credits" => planner.lower_division_credits = parse_number(key, value)?,
            "max_ticks" => planner.max_ticks = parse_number(key, value)?,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        let planner = &mut self.planner;
        let planner_defaults = &defaults.planner;
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "reports_dir" => self.paths.reports_dir.clone_from(&defaults.paths.reports_dir),
            "state_dir" => self.paths.state_dir.clone_from(&defaults.paths.state_dir),
            "min_semester_credits" => {
                planner.min_semester_credits = planner_defaults.min_semester_credits;
            }
            "degree_credits" => planner.degree_credits = planner_defaults.degree_credits,
            "include_summer" => planner.include_summer = planner_defaults.include_summer,
            "upper_division_electives" => {
                planner.upper_division_electives = planner_defaults.upper_division_electives;
            }
            "lower_division_credits" => {
                planner.lower_division_credits = planner_defaults.lower_division_credits;
            }
            "max_ticks" => planner.max_ticks = planner_defaults.max_ticks,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// Succeeds without doing anything if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;
        writeln!(f, "  state_dir = \"{}\"", self.paths.state_dir)?;

        writeln!(f, "\n[planner]")?;
        writeln!(f, "  min_semester_credits = {}", self.planner.min_semester_credits)?;
        writeln!(f, "  degree_credits = {}", self.planner.degree_credits)?;
        writeln!(f, "  include_summer = {}", self.planner.include_summer)?;
        writeln!(
            f,
            "  upper_division_electives = {}",
            self.planner.upper_division_electives
        )?;
        writeln!(
            f,
            "  lower_division_credits = {}",
            self.planner.lower_division_credits
        )?;
        writeln!(f, "  max_ticks = {}", self.planner.max_ticks)?;

        Ok(())
    }
}
