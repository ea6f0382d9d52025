//! Build script for servoslew-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates servo.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use servoslew_core::config::ServoConfig;

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

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate servo.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=servo.toml");

    let config_path = Path::new("servo.toml");

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(&format!("Failed to read servo.toml: {}", e)),
    };

    let document: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(&format!("Invalid TOML syntax in servo.toml:\n{}", e)),
    };

    let mut servo = match document.get("servo") {
        Some(toml::Value::Table(t)) => t.clone(),
        Some(_) => fail("[servo] must be a table"),
        None => fail("Missing [servo] section"),
    };

    if let Some(extra) = document
        .as_table()
        .and_then(|t| t.keys().find(|k| k.as_str() != "servo"))
    {
        fail(&format!("Unknown section [{}]", extra));
    }

    // speed_dps is shorthand for rate_ms; the firmware parser accepts one or
    // the other, never both
    if servo.contains_key("speed_dps") && servo.contains_key("rate_ms") {
        fail("rate_ms and speed_dps are exclusive; set only one");
    }
    if let Some(dps) = servo.remove("speed_dps") {
        let dps = match dps {
            toml::Value::Integer(v) if (0..=i64::from(u16::MAX)).contains(&v) => v.max(1),
            _ => fail("speed_dps must be an integer 0-65535"),
        };
        servo.insert(
            "rate_ms".to_string(),
            toml::Value::Integer((1000 / dps).max(1)),
        );
    }

    let config: ServoConfig = match toml::Value::Table(servo).try_into() {
        Ok(config) => config,
        Err(e) => fail(&format!("Invalid [servo] section:\n{}", e)),
    };

    if let Err(e) = config.validate() {
        fail(&format!("Invalid [servo] section: {}", e));
    }

    println!(
        "cargo:warning=servo.toml validated: {} ms/deg, limits {}-{}",
        config.ms_per_degree, config.min_angle, config.max_angle
    );
}

fn fail(msg: &str) -> ! {
    let body = msg
        .lines()
        .map(|line| format!("║  {:<64} ║", line))
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: servo.toml                                               ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        body
    );
}
