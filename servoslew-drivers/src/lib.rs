//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in servoslew-core:
//!
//! - Servo drivers (hobby servo on any `embedded-hal` PWM channel)
//! - Time sources (embassy-time, behind the `embassy` feature)

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod servo;
