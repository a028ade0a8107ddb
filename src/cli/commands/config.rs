//! Config command handler

use crate::args::ConfigSubcommand;
use degree_planner::config::Config;
use logger::{error, info};
use std::io::{self, Write};

/// Keys accepted by `config get/set/unset`
const KEYS: [&str; 11] = [
    "level",
    "file",
    "verbose",
    "reports_dir",
    "state_dir",
    "min_semester_credits",
    "degree_credits",
    "include_summer",
    "upper_division_electives",
    "lower_division_credits",
    "max_ticks",
];

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let result = match subcommand {
        None => {
            show_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: None }) => {
            show_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => show_key(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => set_key(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => unset_key(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => reset(),
    };

    if let Err(err) = result {
        error!("config command failed: {err}");
        eprintln!("✗ {err}");
        std::process::exit(1);
    }
}

fn show_all(config: &Config) {
    println!("\n=== Configuration ===");
    println!("({})\n", Config::get_config_file_path().display());
    print!("{config}");
}

fn show_key(config: &Config, key: &str) -> Result<(), String> {
    let value = config
        .get(key)
        .ok_or_else(|| format!("Unknown config key: '{key}' (expected one of {})", KEYS.join(", ")))?;
    println!("{value}");
    Ok(())
}

fn set_key(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    config.set(key, value)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    info!("config: {key} set to {value}");
    println!("✓ Set {key} = {value}");
    Ok(())
}

fn unset_key(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    config.unset(key, defaults)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    let value = config.get(key).unwrap_or_default();
    info!("config: {key} reset to {value}");
    println!("✓ Reset {key} to default ({value})");
    Ok(())
}

fn reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Reset configuration to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        info!("config reset to defaults");
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
