//! Servo configuration

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::stepper::{AngleStepper, ABSOLUTE_MAX_ANGLE, DEFAULT_ANGLE, DEFAULT_RATE_MS};
use crate::traits::{ActuatorDriver, TimeSource};

/// Errors found while validating a [`ServoConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// An angle is above 180 degrees
    AngleOutOfRange,
    /// `min_angle` is greater than `max_angle`
    InvertedLimits,
    /// `ms_per_degree` is zero
    ZeroRate,
    /// `initial_angle` lies outside [min_angle, max_angle]
    InitialAngleOutsideLimits,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::AngleOutOfRange => "angle must be 0-180",
            ConfigError::InvertedLimits => "min_angle must not exceed max_angle",
            ConfigError::ZeroRate => "rate must be at least 1 ms per degree",
            ConfigError::InitialAngleOutsideLimits => {
                "initial_angle must lie between min_angle and max_angle"
            }
        };
        f.write_str(msg)
    }
}

/// Configuration for one servo axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ServoConfig {
    /// Angle the servo is assumed to rest at on boot
    pub initial_angle: u8,
    /// Minimum milliseconds per degree of travel
    #[cfg_attr(feature = "serde", serde(rename = "rate_ms"))]
    pub ms_per_degree: u16,
    /// Lowest target angle
    pub min_angle: u8,
    /// Highest target angle
    pub max_angle: u8,
    /// Mechanical trim offset in degrees
    pub trim: i8,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            initial_angle: DEFAULT_ANGLE,
            ms_per_degree: DEFAULT_RATE_MS,
            min_angle: 0,
            max_angle: ABSOLUTE_MAX_ANGLE,
            trim: 0,
        }
    }
}

impl ServoConfig {
    /// Check the configuration for values the stepper would silently clamp
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_angle > ABSOLUTE_MAX_ANGLE
            || self.min_angle > ABSOLUTE_MAX_ANGLE
            || self.max_angle > ABSOLUTE_MAX_ANGLE
        {
            return Err(ConfigError::AngleOutOfRange);
        }
        if self.min_angle > self.max_angle {
            return Err(ConfigError::InvertedLimits);
        }
        if self.ms_per_degree == 0 {
            return Err(ConfigError::ZeroRate);
        }
        if !(self.min_angle..=self.max_angle).contains(&self.initial_angle) {
            return Err(ConfigError::InitialAngleOutsideLimits);
        }
        Ok(())
    }

    /// Apply rate, limits and trim, then seed the stepper at `initial_angle`
    pub fn apply<C: TimeSource, A: ActuatorDriver>(&self, stepper: &mut AngleStepper<C, A>) {
        stepper.set_rate(self.ms_per_degree);
        // Widen first so the new limits can't collide with the old ones
        stepper.set_min(0);
        stepper.set_max(ABSOLUTE_MAX_ANGLE);
        stepper.set_min(self.min_angle);
        stepper.set_max(self.max_angle);
        stepper.set_trim(self.trim);
        stepper.begin(self.initial_angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{FnClock, NoActuator};

    #[test]
    fn test_default_is_valid() {
        assert_eq!(ServoConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_errors() {
        let base = ServoConfig::default();

        let config = ServoConfig {
            max_angle: 200,
            ..base
        };
        assert_eq!(config.validate(), Err(ConfigError::AngleOutOfRange));

        let config = ServoConfig {
            min_angle: 120,
            max_angle: 60,
            ..base
        };
        assert_eq!(config.validate(), Err(ConfigError::InvertedLimits));

        let config = ServoConfig {
            ms_per_degree: 0,
            ..base
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroRate));

        let config = ServoConfig {
            min_angle: 100,
            max_angle: 150,
            initial_angle: 90,
            ..base
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialAngleOutsideLimits)
        );
    }

    #[test]
    fn test_apply() {
        let config = ServoConfig {
            initial_angle: 45,
            ms_per_degree: 15,
            min_angle: 20,
            max_angle: 60,
            trim: -3,
        };
        let mut stepper: AngleStepper<_, NoActuator> = AngleStepper::new(FnClock(|| 0u32));
        stepper.set_min(100);
        stepper.set_angle(150);

        config.apply(&mut stepper);

        assert_eq!(stepper.rate(), 15);
        assert_eq!(stepper.min_angle(), 20);
        assert_eq!(stepper.max_angle(), 60);
        assert_eq!(stepper.trim(), -3);
        assert_eq!(stepper.angle(), 45);
        assert!(!stepper.moving());
    }
}
