//! Minimal parser for servo configuration files
//!
//! Handles only the subset of TOML the firmware's `servo.toml` uses:
//!
//! - A single `[servo]` section header
//! - `key = integer` pairs (negative values allowed for `trim`)
//! - Comments (`# ...`), including trailing comments, and blank lines
//!
//! Strings, floats, arrays and tables are rejected. The firmware build
//! script checks the same file with a full TOML parser at compile time.

use core::fmt;

use super::types::{ConfigError, ServoConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// No `[servo]` section, or a key appeared before it
    MissingSection,
    /// A section other than `[servo]`
    UnknownSection,
    /// A key this parser does not understand
    UnknownKey,
    /// A value that is not an integer in range for its key, or a
    /// malformed line
    InvalidValue,
    /// Both `rate_ms` and `speed_dps` set
    ConflictingRate,
    /// The parsed configuration failed validation
    Invalid(ConfigError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingSection => f.write_str("missing [servo] section"),
            ParseError::UnknownSection => f.write_str("unknown section"),
            ParseError::UnknownKey => f.write_str("unknown key"),
            ParseError::InvalidValue => f.write_str("invalid value"),
            ParseError::ConflictingRate => f.write_str("rate_ms and speed_dps are exclusive"),
            ParseError::Invalid(e) => write!(f, "invalid config: {}", e),
        }
    }
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Parse and validate a servo configuration
///
/// Keys that are absent keep their [`ServoConfig::default`] values.
pub fn parse_servo_config(input: &str) -> Result<ServoConfig, ParseError> {
    let mut config = ServoConfig::default();
    let mut in_servo = false;
    let mut rate_keys = 0;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::InvalidValue)?
                .trim();
            if name != "servo" {
                return Err(ParseError::UnknownSection);
            }
            in_servo = true;
            continue;
        }

        if !in_servo {
            return Err(ParseError::MissingSection);
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidValue)?;
        let key = key.trim();
        if matches!(key, "rate_ms" | "speed_dps") {
            rate_keys += 1;
            if rate_keys > 1 {
                return Err(ParseError::ConflictingRate);
            }
        }
        apply_key(&mut config, key, parse_int(value.trim())?)?;
    }

    if !in_servo {
        return Err(ParseError::MissingSection);
    }

    config.validate()?;
    Ok(config)
}

fn apply_key(config: &mut ServoConfig, key: &str, value: i32) -> Result<(), ParseError> {
    match key {
        "initial_angle" => config.initial_angle = to_u8(value)?,
        "min_angle" => config.min_angle = to_u8(value)?,
        "max_angle" => config.max_angle = to_u8(value)?,
        "rate_ms" => config.ms_per_degree = to_u16(value)?,
        "speed_dps" => {
            let dps = to_u16(value)?.max(1);
            config.ms_per_degree = (1000 / dps).max(1);
        }
        "trim" => config.trim = i8::try_from(value).map_err(|_| ParseError::InvalidValue)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn parse_int(value: &str) -> Result<i32, ParseError> {
    value.parse::<i32>().map_err(|_| ParseError::InvalidValue)
}

fn to_u8(value: i32) -> Result<u8, ParseError> {
    u8::try_from(value).map_err(|_| ParseError::InvalidValue)
}

fn to_u16(value: i32) -> Result<u16, ParseError> {
    u16::try_from(value).map_err(|_| ParseError::InvalidValue)
}
