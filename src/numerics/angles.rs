//! Angle arithmetic shared by the crank, cam and valve models.

use std::f64::consts::{PI, TAU};

/// One full four-stroke cycle: two crankshaft revolutions, in radians.
pub const CYCLE: f64 = 2.0 * TAU;

/// Wraps `angle` into one revolution, `[0, 2π)`.
pub fn wrap_angle(angle: f64) -> f64 {
    wrap_into(angle, TAU)
}

/// Wraps `angle` into one four-stroke cycle, `[0, 4π)`.
pub fn wrap_cycle(angle: f64) -> f64 {
    wrap_into(angle, CYCLE)
}

/// Shortest signed angular difference, in `[-π, π)`.
///
/// # Examples
/// ```
/// use lmb_engine_kinematics::numerics::angles::normalize_angle;
/// use std::f64::consts::PI;
/// let d = normalize_angle(1.5 * PI);
/// assert!((d + 0.5 * PI).abs() < 1e-12);
/// ```
pub fn normalize_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

fn wrap_into(angle: f64, period: f64) -> f64 {
    let wrapped = angle.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn wrap_angle_stays_in_one_revolution() {
        assert!(close(wrap_angle(TAU + 0.25), 0.25));
        assert!(close(wrap_angle(-0.25), TAU - 0.25));
        assert_eq!(wrap_angle(0.0), 0.0);
        assert_eq!(wrap_angle(TAU), 0.0);
        let tiny = wrap_angle(-1e-18);
        assert!(tiny >= 0.0 && tiny < TAU);
    }

    #[test]
    fn wrap_cycle_keeps_two_revolutions() {
        assert!(close(wrap_cycle(3.0 * PI), 3.0 * PI));
        assert!(close(wrap_cycle(5.0 * PI), PI));
        assert!(close(wrap_cycle(-PI), 3.0 * PI));
    }

    #[test]
    fn normalize_angle_is_the_shortest_path() {
        assert!(close(normalize_angle(0.1), 0.1));
        assert!(close(normalize_angle(-0.1), -0.1));
        assert!(close(normalize_angle(TAU - 0.1), -0.1));
        assert!(close(normalize_angle(7.0 * TAU + 0.3), 0.3));
        let d = normalize_angle(PI);
        assert!(d >= -PI && d <= PI);
    }
}
