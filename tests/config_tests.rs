//! Integration tests for configuration management

use degree_planner::config::{Config, ConfigOverrides};
use degree_planner::core::planner::{RunMode, DEFAULT_ELECTIVE_TERM_CAP};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(!config.paths.reports_dir.is_empty());
    assert!(!config.paths.state_dir.is_empty());
    assert_eq!(config.planner.min_semester_credits, 15);
    assert_eq!(config.planner.degree_credits, 120);
    assert_eq!(config.planner.upper_division_electives, 5);
    assert_eq!(config.planner.lower_division_credits, 60);
    assert!(!config.planner.include_summer);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
reports_dir = "./reports"
state_dir = "./plans"

[planner]
min_semester_credits = 12
degree_credits = 124
include_summer = true
upper_division_electives = 4
lower_division_credits = 58
max_ticks = 500
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.reports_dir, "./reports");
    assert_eq!(config.paths.state_dir, "./plans");
    assert_eq!(config.planner.min_semester_credits, 12);
    assert_eq!(config.planner.degree_credits, 124);
    assert!(config.planner.include_summer);
    assert_eq!(config.planner.upper_division_electives, 4);
    assert_eq!(config.planner.lower_division_credits, 58);
    assert_eq!(config.planner.max_ticks, 500);
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"

[planner]
degree_credits = 128
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.reports_dir, "");
    // Missing planner keys take the built-in defaults
    assert_eq!(config.planner.degree_credits, 128);
    assert_eq!(config.planner.min_semester_credits, 15);
    assert_eq!(config.planner.upper_division_electives, 5);
}

#[test]
fn test_config_rejects_malformed_toml() {
    assert!(Config::from_toml("[planner]\nmax_ticks = \"many\"").is_err());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$DEGREE_PLANNER/test.log"

[paths]
reports_dir = "$DEGREE_PLANNER/reports"
state_dir = "$DEGREE_PLANNER/state"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    for value in [
        &config.logging.file,
        &config.paths.reports_dir,
        &config.paths.state_dir,
    ] {
        assert!(value.contains("degreeplan"), "not expanded: {value}");
        assert!(!value.contains("$DEGREE_PLANNER"));
    }
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config.set("verbose", "true").expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config
        .set("min-semester-credits", "12")
        .expect("Failed to set min credits");
    assert_eq!(config.planner.min_semester_credits, 12);
    assert_eq!(config.get("min_semester_credits").unwrap(), "12");

    config
        .set("include_summer", "true")
        .expect("Failed to set include_summer");
    assert!(config.planner.include_summer);

    config.set("state_dir", "/tmp/plans").expect("Failed to set state_dir");
    assert_eq!(config.get("state-dir").unwrap(), "/tmp/plans");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_bad_values() {
    let mut config = Config::from_defaults();

    let err = config.set("max_ticks", "lots").unwrap_err();
    assert!(err.contains("max_ticks"));
    assert!(config.set("degree_credits", "-3").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert_eq!(config.planner.degree_credits, 120);
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "debug").expect("Failed to set level");
    config.set("degree_credits", "130").expect("Failed to set degree");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config
        .unset("degree_credits", &defaults)
        .expect("Failed to unset degree");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.planner.degree_credits, defaults.planner.degree_credits);
    assert!(config.unset("unknown_key", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("max_ticks", "250").expect("Failed to set max_ticks");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded_config = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded_config.logging.level, "info");
    assert_eq!(loaded_config.planner.max_ticks, 250);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        reports_dir: Some("./custom_reports".to_string()),
        state_dir: Some("./custom_state".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.reports_dir, "./custom_reports");
    assert_eq!(config.paths.state_dir, "./custom_state");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.paths.reports_dir.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };
    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.reports_dir, before);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[planner]"));
    assert!(display_str.contains("state_dir"));
    assert!(display_str.contains("min_semester_credits = 15"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
reports_dir = ""
state_dir = ""

[planner]
min_semester_credits = 0
degree_credits = 0
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(changed, "merge_defaults should return true when fields are added");
    assert_eq!(config.paths.state_dir, defaults.paths.state_dir);
    assert_eq!(config.planner.min_semester_credits, 15);
    assert_eq!(config.planner.degree_credits, 120);
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[planner]
min_semester_credits = 12
upper_division_electives = 0
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.planner.min_semester_credits, 12);
    // Zero upper-division electives is a valid requirement, not a gap
    assert_eq!(config.planner.upper_division_electives, 0);
}

#[test]
fn test_planner_config_from_settings() {
    let mut config = Config::from_defaults();
    config.set("min_semester_credits", "12").unwrap();
    config.set("lower_division_credits", "45").unwrap();

    let planner = config.planner_config();
    assert_eq!(planner.min_semester_credits, 12);
    assert_eq!(planner.degree_credits, 120);
    assert_eq!(planner.lower_division_credits, 45);
    assert_eq!(planner.max_ticks, config.planner.max_ticks);
    assert_eq!(planner.elective_term_cap, DEFAULT_ELECTIVE_TERM_CAP);
    assert_eq!(planner.run_mode, RunMode::FullPlan);
    assert!(planner.validate().is_ok());
}

#[test]
fn test_get_degree_planner_dir() {
    let dir = Config::get_degree_planner_dir();

    assert!(dir.to_string_lossy().contains("degreeplan"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
