//! Build script for screencap-firmware
//!
//! Validates device.toml at compile time so a broken configuration never
//! makes it into a binary.

use std::fs;
use std::path::Path;

#[path = "src/text.rs"]
mod text;

/// Widest panel the image encoder can stream
const MAX_WIDTH: i64 = 480;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=assets");
    validate_config();
}

/// Validate device.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds device.toml from the crate directory.       ║\n\
            ║  Create one with [wifi], [http], [gauge], [display] and [loop].  ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();
    validate_required_sections(&config, &mut errors);
    validate_ranges(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid device.toml                                      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=device.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| format!("║  {:<64} ║", text::ellipsize(line, 64)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn validate_required_sections(config: &toml::Value, errors: &mut Vec<String>) {
    for section in ["wifi", "http", "gauge", "display", "loop"] {
        match config.get(section) {
            Some(toml::Value::Table(_)) => {}
            Some(_) => errors.push(format!("[{}] must be a table", section)),
            None => errors.push(format!("Missing [{}] section", section)),
        }
    }

    if let Some(wifi) = config.get("wifi") {
        for key in ["ssid", "passphrase"] {
            if !matches!(wifi.get(key), Some(toml::Value::String(_))) {
                errors.push(format!("[wifi] '{}' must be a string", key));
            }
        }
    }
}

fn integer(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

fn check_range(
    config: &toml::Value,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) {
    if let Some(value) = integer(config, section, key) {
        if !range.contains(&value) {
            errors.push(format!(
                "[{}] {} must be {}-{}",
                section,
                key,
                range.start(),
                range.end()
            ));
        }
    }
}

fn validate_ranges(config: &toml::Value, errors: &mut Vec<String>) {
    check_range(config, "http", "port", 1..=65535, errors);
    check_range(config, "http", "timeout_ms", 1..=60_000, errors);
    check_range(config, "display", "width", 1..=MAX_WIDTH, errors);
    check_range(config, "display", "height", 1..=1024, errors);
    check_range(config, "display", "brightness", 0..=255, errors);
    check_range(config, "gauge", "step", 0..=100, errors);
    check_range(config, "gauge", "tick_ms", 1..=3_600_000, errors);
    check_range(config, "loop", "delay_ms", 0..=10_000, errors);

    if let Some(reference) = config
        .get("gauge")
        .and_then(|g| g.get("reference"))
        .and_then(|r| r.as_float().or_else(|| r.as_integer().map(|i| i as f64)))
    {
        if reference > 100.0 {
            errors.push("[gauge] reference must be at most 100 (negative hides it)".to_string());
        }
    }
}
