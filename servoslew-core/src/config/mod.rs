//! Configuration types
//!
//! Board-agnostic servo configuration, its validation rules, and a
//! minimal parser for the firmware's embedded `servo.toml`.

pub mod parse;
pub mod types;

pub use parse::{parse_servo_config, ParseError};
pub use types::*;
