//! Cam lobe lift laws
//!
//! A lobe opens its valve inside a window of `duration` cam radians centered on the
//! lobe center, and keeps it shut everywhere else. The shape of the lift inside the
//! window is given by a [`LiftProfile`].

use crate::error::EngineError;
use crate::numerics::angles::normalize_angle;
use dyn_clone::DynClone;
use std::f64::consts::{PI, TAU};
use std::fmt::Debug;

/// Raised-cosine lobe lift.
///
/// `0` when the cam is more than `duration/2` away from `lobe_center` (shortest
/// angular path), otherwise `max_lift·(cos(d/(duration/2)·π) + 1)/2`.
///
/// # Examples
/// ```
/// use lmb_engine_kinematics::kinematics::valve_lift::lift;
/// assert_eq!(lift(1.0, 1.0, 0.8, 9.3e-3), 9.3e-3);
/// assert_eq!(lift(2.0, 1.0, 0.8, 9.3e-3), 0.0);
/// ```
pub fn lift(cam_phase: f64, lobe_center: f64, duration: f64, max_lift: f64) -> f64 {
    let half_width = 0.5 * duration;
    let d = normalize_angle(cam_phase - lobe_center);
    if !(half_width > 0.0) || d.abs() > half_width {
        return 0.0;
    }
    max_lift * RaisedCosine.shape(d / half_width)
}

/// Shape of the lift inside the lobe window.
pub trait LiftProfile: DynClone + Debug {
    fn profile_name(&self) -> &str;
    /// Normalized lift for `x` in `[-1, 1]` (`-1` opening edge, `0` lobe center, `1`
    /// closing edge). Must return `0` at both edges and `1` at the center.
    fn shape(&self, x: f64) -> f64;
}

dyn_clone::clone_trait_object!(LiftProfile);

/// Hann-like bump. Velocity is continuous at opening and closing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RaisedCosine;

impl LiftProfile for RaisedCosine {
    fn profile_name(&self) -> &str {
        "raised cosine"
    }
    fn shape(&self, x: f64) -> f64 {
        0.5 * ((x * PI).cos() + 1.0)
    }
}

/// Piecewise-parabolic lift: constant positive acceleration at the flanks, constant
/// negative acceleration over the nose. `acceler_ratio` is nose over flank
/// acceleration and must be negative.
#[derive(Debug, Clone)]
pub struct ConstantAcceleration {
    acceler_ratio: f64,
    consts: [f64; 7],
    intervals: [f64; 2],
}

impl ConstantAcceleration {
    pub fn new(acceler_ratio: f64) -> Result<ConstantAcceleration, EngineError> {
        if !(acceler_ratio < 0.0) || !acceler_ratio.is_finite() {
            return Err(EngineError::InvalidLobe {
                name: "constant acceleration".to_string(),
                reason: format!("acceleration ratio must be negative: got {}", acceler_ratio),
            });
        }
        // window normalized to unit length and unit lift
        let a1 = 4.0 * (1.0 - acceler_ratio);
        let b1 = a1 / acceler_ratio;
        let b2 = -b1;
        let b3 = -b2 * (1.0 / (4.0 * (1.0 - acceler_ratio)));
        let c1 = a1;
        let c2 = -2.0 * a1;
        let c3 = a1;
        let n = 2.0 * (1.0 - acceler_ratio);
        Ok(ConstantAcceleration {
            acceler_ratio,
            consts: [a1, b1, b2, b3, c1, c2, c3],
            intervals: [1.0 / n, (n - 1.0) / n],
        })
    }

    pub fn acceler_ratio(&self) -> f64 {
        self.acceler_ratio
    }
}

impl Default for ConstantAcceleration {
    fn default() -> Self {
        ConstantAcceleration {
            acceler_ratio: -2.0,
            consts: [12.0, -6.0, 6.0, -0.5, 12.0, -24.0, 12.0],
            intervals: [1.0 / 6.0, 5.0 / 6.0],
        }
    }
}

impl LiftProfile for ConstantAcceleration {
    fn profile_name(&self) -> &str {
        "constant acceleration"
    }
    fn shape(&self, x: f64) -> f64 {
        let t = 0.5 * (x + 1.0);
        let c = &self.consts;
        let lift = if t <= self.intervals[0] {
            c[0] * t * t
        } else if t >= self.intervals[1] {
            c[4] * t * t + c[5] * t + c[6]
        } else {
            c[1] * t * t + c[2] * t + c[3]
        };
        lift.max(0.0)
    }
}

/// Builds a profile from its configuration name.
pub fn profile_by_name(name: &str) -> Result<Box<dyn LiftProfile>, EngineError> {
    match name {
        "raised_cosine" | "raised cosine" => Ok(Box::new(RaisedCosine)),
        "constant_acceleration" | "constant acceleration" => {
            Ok(Box::new(ConstantAcceleration::default()))
        }
        _ => Err(EngineError::UnknownProfile(name.to_string())),
    }
}

/// One cam lobe. Angles are cam angles [rad], lift in meters.
#[derive(Debug, Clone)]
pub struct ValveLobe {
    center: f64,
    duration: f64,
    max_lift: f64,
    profile: Box<dyn LiftProfile>,
}

impl ValveLobe {
    /// Raised-cosine lobe. `duration` must be in `(0, 2π]`, `max_lift` non-negative.
    pub fn new(name: &str, center: f64, duration: f64, max_lift: f64) -> Result<ValveLobe, EngineError> {
        ValveLobe::with_profile(name, center, duration, max_lift, Box::new(RaisedCosine))
    }

    pub fn with_profile(
        name: &str,
        center: f64,
        duration: f64,
        max_lift: f64,
        profile: Box<dyn LiftProfile>,
    ) -> Result<ValveLobe, EngineError> {
        let invalid = |reason: String| EngineError::InvalidLobe {
            name: name.to_string(),
            reason,
        };
        if !center.is_finite() {
            return Err(invalid(format!("lobe center must be finite: got {}", center)));
        }
        if !(duration > 0.0 && duration <= TAU) {
            return Err(invalid(format!(
                "duration must be within (0, 360] cam degrees: got {:.1}",
                duration.to_degrees()
            )));
        }
        if !(max_lift >= 0.0) || !max_lift.is_finite() {
            return Err(invalid(format!("max lift cannot be negative: got {}", max_lift)));
        }
        Ok(ValveLobe {
            center,
            duration,
            max_lift,
            profile,
        })
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn max_lift(&self) -> f64 {
        self.max_lift
    }

    pub fn profile(&self) -> &dyn LiftProfile {
        self.profile.as_ref()
    }

    /// Valve lift [m] for a cam angle measured from the cylinder's cam reference.
    pub fn lift(&self, cam_phase: f64) -> f64 {
        let half_width = 0.5 * self.duration;
        let d = normalize_angle(cam_phase - self.center);
        if d.abs() > half_width {
            0.0
        } else {
            self.max_lift * self.profile.shape(d / half_width)
        }
    }

    /// True while the valve is off its seat.
    pub fn is_open(&self, cam_phase: f64) -> bool {
        self.lift(cam_phase) > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_LIFT: f64 = 8.5e-3;

    fn sweep() -> impl Iterator<Item = f64> {
        (0..=1440).map(|i| (i as f64 * 0.5 - 360.0).to_radians())
    }

    #[test]
    fn closed_outside_the_window() {
        let center = 1.2;
        let duration = 120f64.to_radians();
        for cam in sweep() {
            if normalize_angle(cam - center).abs() >= 0.5 * duration {
                assert!(lift(cam, center, duration, MAX_LIFT).abs() < 1e-15);
            }
        }
        assert!(lift(center + 0.5 * duration, center, duration, MAX_LIFT) < 1e-15);
        assert_eq!(lift(center + PI, center, duration, MAX_LIFT), 0.0);
    }

    #[test]
    fn peaks_at_the_lobe_center() {
        assert_eq!(lift(0.4, 0.4, 1.0, MAX_LIFT), MAX_LIFT);
        // accumulated cam revolutions make no difference
        assert!((lift(0.4 + 3.0 * TAU, 0.4, 1.0, MAX_LIFT) - MAX_LIFT).abs() < 1e-15);
    }

    #[test]
    fn symmetric_continuous_and_non_negative() {
        let center = -2.0;
        let duration = 1.9;
        for i in 0..1000 {
            let x = i as f64 / 1000.0 * 0.5 * duration;
            let up = lift(center + x, center, duration, MAX_LIFT);
            let down = lift(center - x, center, duration, MAX_LIFT);
            assert!((up - down).abs() < 1e-12);
        }
        let mut previous = lift(-4.0 * PI, center, duration, MAX_LIFT);
        for i in 1..=20000 {
            let cam = -4.0 * PI + i as f64 * (8.0 * PI / 20000.0);
            let value = lift(cam, center, duration, MAX_LIFT);
            assert!(value >= 0.0 && value <= MAX_LIFT);
            assert!((value - previous).abs() < 1e-2 * MAX_LIFT);
            previous = value;
        }
    }

    #[test]
    fn zero_duration_keeps_the_valve_shut() {
        assert_eq!(lift(0.0, 0.0, 0.0, MAX_LIFT), 0.0);
    }

    #[test]
    fn lobe_matches_the_free_function() {
        let lobe = ValveLobe::new("intake", 4.1, 1.6, MAX_LIFT).unwrap();
        for cam in sweep() {
            assert!((lobe.lift(cam) - lift(cam, 4.1, 1.6, MAX_LIFT)).abs() < 1e-15);
        }
        assert!(lobe.is_open(4.1));
        assert!(!lobe.is_open(4.1 + PI));
        assert_eq!(lobe.profile().profile_name(), "raised cosine");
    }

    #[test]
    fn lobe_validation() {
        assert!(ValveLobe::new("intake", 0.0, 0.0, MAX_LIFT).is_err());
        assert!(ValveLobe::new("intake", 0.0, 7.0, MAX_LIFT).is_err());
        assert!(ValveLobe::new("intake", 0.0, 1.0, -1.0).is_err());
        assert!(ValveLobe::new("intake", f64::NAN, 1.0, 1.0).is_err());
        assert!(ValveLobe::new("intake", 0.0, TAU, 0.0).is_ok());
    }

    #[test]
    fn constant_acceleration_profile() {
        let profile = ConstantAcceleration::default();
        let built = ConstantAcceleration::new(-2.0).unwrap();
        for i in 0..=200 {
            let x = -1.0 + i as f64 / 100.0;
            assert!((profile.shape(x) - built.shape(x)).abs() < 1e-12);
            assert!((profile.shape(x) - profile.shape(-x)).abs() < 1e-12);
        }
        assert!(profile.shape(-1.0).abs() < 1e-12);
        assert!(profile.shape(1.0).abs() < 1e-12);
        assert!((profile.shape(0.0) - 1.0).abs() < 1e-12);
        // flank and nose parabolas meet at a third of the lift
        assert!((profile.shape(-1.0 + 1.0 / 3.0) - 1.0 / 3.0).abs() < 1e-12);
        assert!(ConstantAcceleration::new(1.0).is_err());

        let other = ConstantAcceleration::new(-3.0).unwrap();
        assert!((other.shape(0.0) - 1.0).abs() < 1e-12);
        assert_eq!(other.acceler_ratio(), -3.0);
    }

    #[test]
    fn boxed_profiles_clone() {
        let lobe = ValveLobe::with_profile(
            "exhaust",
            2.0,
            1.5,
            MAX_LIFT,
            profile_by_name("constant_acceleration").unwrap(),
        )
        .unwrap();
        let copy = lobe.clone();
        assert_eq!(copy.profile().profile_name(), "constant acceleration");
        assert!((copy.lift(2.0) - MAX_LIFT).abs() < 1e-12);
        assert!(profile_by_name("square").is_err());
    }
}
