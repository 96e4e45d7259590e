//! Build script for systole-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates heartbeat.toml at compile time, with both the `toml` crate
//!   and the `no_std` reader the firmware runs

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Number of user GPIOs on RP2040
const GPIO_COUNT: i64 = 30;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // cortex-m-rt and defmt linker scripts
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate heartbeat.toml configuration at compile time
fn validate_config() {
    // Re-run if heartbeat.toml changes
    println!("cargo:rerun-if-changed=heartbeat.toml");
    println!("cargo:rerun-if-changed=../systole-core/src/config");

    let config_path = Path::new("heartbeat.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: heartbeat.toml not found!                                ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a heartbeat.toml configuration file.      ║\n\
            ║  Please create one in the systole-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read heartbeat.toml                            ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in heartbeat.toml                    ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let errors = validate_heartbeat(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid heartbeat configuration                          ║\n\
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

    // The firmware reads the file with the systole-core reader
    if let Err(e) = systole_core::config::parse_config(&config_content) {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: heartbeat.toml rejected by the firmware config reader    ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            ║  Error: {:<56} ║\n\
            ║  Check for unknown keys or sections.                             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!("{:?}", e)
        );
    }

    println!("cargo:warning=heartbeat.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate the [heartbeat] section
fn validate_heartbeat(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let heartbeat = match config.get("heartbeat") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[heartbeat] must be a table".to_string());
            return errors;
        }
        None => {
            errors.push("Missing [heartbeat] section".to_string());
            return errors;
        }
    };

    match heartbeat.get("pin") {
        Some(toml::Value::Integer(pin)) => {
            if *pin < 0 || *pin >= GPIO_COUNT {
                errors.push(format!("[heartbeat] pin must be 0-{}", GPIO_COUNT - 1));
            }
        }
        Some(toml::Value::String(pin)) => {
            let number = pin.trim_start_matches('!').trim_start_matches("gpio");
            match number.parse::<i64>() {
                Ok(n) if (0..GPIO_COUNT).contains(&n) => {}
                _ => errors.push(format!("[heartbeat] invalid pin '{}'", pin)),
            }
        }
        Some(_) => errors.push("[heartbeat] pin must be a number or \"gpioN\"".to_string()),
        None => errors.push("[heartbeat] missing 'pin'".to_string()),
    }

    for key in ["reverse", "blocked", "enabled"] {
        if let Some(value) = heartbeat.get(key) {
            if !value.is_bool() {
                errors.push(format!("[heartbeat] {} must be true or false", key));
            }
        }
    }

    check_range(heartbeat, "period_s", 0, u32::MAX as i64 / 1000, &mut errors);
    check_range(heartbeat, "period_ms", 0, u32::MAX as i64, &mut errors);
    check_range(heartbeat, "pulse_ms", 0, u8::MAX as i64, &mut errors);

    if heartbeat.contains_key("period_s") && heartbeat.contains_key("period_ms") {
        errors.push("[heartbeat] set either period_s or period_ms, not both".to_string());
    }

    if let Some(toml::Value::Table(timing)) = heartbeat.get("timing") {
        check_range(timing, "default_period_ms", 0, u32::MAX as i64, &mut errors);
        check_range(timing, "default_pulse_ms", 0, u8::MAX as i64, &mut errors);
    }

    errors
}

/// Check an optional integer key is within `min..=max`
fn check_range(
    table: &toml::map::Map<String, toml::Value>,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if *v < min || *v > max => {
            errors.push(format!("{} must be {}-{}", key, min, max));
        }
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push(format!("{} must be an integer", key)),
    }
}
