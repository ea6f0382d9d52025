//! Absolute servo range and clamping helpers

/// Lowest angle any actuator may be commanded to
pub const ABSOLUTE_MIN_ANGLE: u8 = 0;

/// Highest angle any actuator may be commanded to
pub const ABSOLUTE_MAX_ANGLE: u8 = 180;

/// Clamp an angle into the absolute actuator range
#[inline]
pub fn clamp_absolute(angle: u8) -> u8 {
    angle.clamp(ABSOLUTE_MIN_ANGLE, ABSOLUTE_MAX_ANGLE)
}

/// Physical command for a logical angle with trim applied
///
/// Trim may push the command past either end of the servo range, so the
/// sum is clamped back into [0, 180].
#[inline]
pub fn output_angle(logical: u8, trim: i8) -> u8 {
    let raw = logical as i16 + trim as i16;
    raw.clamp(ABSOLUTE_MIN_ANGLE as i16, ABSOLUTE_MAX_ANGLE as i16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_absolute() {
        assert_eq!(clamp_absolute(0), 0);
        assert_eq!(clamp_absolute(180), 180);
        assert_eq!(clamp_absolute(181), 180);
        assert_eq!(clamp_absolute(255), 180);
    }

    #[test]
    fn test_output_angle_trim() {
        assert_eq!(output_angle(100, 5), 105);
        assert_eq!(output_angle(100, -5), 95);
        assert_eq!(output_angle(178, 5), 180);
        assert_eq!(output_angle(2, -5), 0);
        assert_eq!(output_angle(180, i8::MAX), 180);
        assert_eq!(output_angle(0, i8::MIN), 0);
    }
}
