// Unit conversions between degrees, motor steps and device speed units
//
// The device's stepper advances STEP_ANGLE degrees per full step. Step counts
// reported by the firmware are in microsteps at a fixed 1/128 resolution.

/// Degrees per full motor step
pub const STEP_ANGLE: f64 = 1.8;

/// Microsteps per full step assumed by `step_to_angle`
pub const MICROSTEPS: f64 = 128.0;

/// Firmware timer scale used for speed registers (2^28)
const SPEED_TICK_SCALE: f64 = 268_435_456.0;

/// Convert degrees to full steps for the given step angle. Not rounded.
pub fn angle_to_step(angle: f64, step_angle: f64) -> f64 {
    angle / step_angle
}

/// Convert a microstep count to degrees for the given step angle.
///
/// The 1/128 microstep resolution is fixed; a driver configured for a
/// different resolution will get a wrong answer here.
pub fn step_to_angle(step: f64, step_angle: f64) -> f64 {
    step * step_angle / MICROSTEPS
}

/// Convert a step rate to the firmware's speed register unit
pub fn speed_per_second_by_step(step: f64) -> f64 {
    SPEED_TICK_SCALE * step / 1e9 * 250.0
}

/// Convert an angular rate (degrees) to the firmware's speed register unit
pub fn speed_per_second_by_angle(angle: f64, step_angle: f64) -> f64 {
    speed_per_second_by_step(angle_to_step(angle, step_angle))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_angle_to_step_divides_by_step_angle() {
        assert_eq!(angle_to_step(90.0, STEP_ANGLE), 90.0 / 1.8);
        assert_eq!(angle_to_step(0.0, STEP_ANGLE), 0.0);
        assert_eq!(angle_to_step(-45.0, STEP_ANGLE), -45.0 / 1.8);
    }

    #[test]
    fn test_angle_to_step_is_not_rounded() {
        let steps = angle_to_step(1.0, STEP_ANGLE);
        assert!(steps.fract() != 0.0);
    }

    #[test]
    fn test_step_to_angle_uses_fixed_microstep_divisor() {
        assert_eq!(step_to_angle(128.0, STEP_ANGLE), 128.0 * 1.8 / 128.0);
        assert_eq!(step_to_angle(6400.0, STEP_ANGLE), 6400.0 * 1.8 / 128.0);
    }

    #[test]
    fn test_angle_step_round_trip_through_microsteps() {
        for angle in [0.0, 1.8, 33.3, 90.0, 360.0, -720.5] {
            let back = step_to_angle(angle_to_step(angle, STEP_ANGLE) * MICROSTEPS, STEP_ANGLE);
            assert!((back - angle).abs() < EPSILON, "{} came back as {}", angle, back);
        }
    }

    #[test]
    fn test_speed_by_step_is_linear() {
        let coefficient = 2f64.powi(28) / 10f64.powi(9) * 250.0;

        assert_eq!(speed_per_second_by_step(0.0), 0.0);
        for step in [1.0, 10.0, 200.0, -3.5] {
            let speed = speed_per_second_by_step(step);
            assert!((speed - coefficient * step).abs() < 1e-6 * speed.abs().max(1.0));
        }
    }

    #[test]
    fn test_speed_by_angle_goes_through_steps() {
        let expected = speed_per_second_by_step(180.0 / 1.8);
        assert_eq!(speed_per_second_by_angle(180.0, STEP_ANGLE), expected);
    }
}
