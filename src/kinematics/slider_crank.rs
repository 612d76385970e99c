//! Slider-crank mechanism: crank throw, connecting rod and piston on one cylinder axis.

use super::crankshaft::{journal_position, CYLINDER_AXIS};
use glam::{DQuat, DVec3};
use serde::Serialize;

/// Canonical direction of a connecting rod in its rest pose (big end to small end).
pub const ROD_REST_AXIS: DVec3 = CYLINDER_AXIS;

/// Piston-pin displacement from the crank center along the cylinder axis.
///
/// `r·cos θ + sqrt(l² − (r·sin θ)²)`. The radicand is clamped to zero so rods shorter
/// than the throw give a defined (if unphysical) `r·cos θ` instead of `NaN`.
pub fn piston_offset(angle: f64, throw: f64, conrod: f64) -> f64 {
    let sin = throw * angle.sin();
    let radicand = (conrod * conrod - sin * sin).max(0.0);
    throw * angle.cos() + radicand.sqrt()
}

/// Orientation of a connecting rod between crank pin and piston pin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RodPose {
    /// Unit vector from the crank pin to the piston pin.
    pub direction: DVec3,
    /// Instantaneous pin-to-pin distance [m].
    pub length: f64,
    /// `length / conrod`. Should stay at 1 for a valid mechanism.
    pub scale: f64,
    /// Minimal rotation taking [`ROD_REST_AXIS`] onto `direction`.
    pub rotation: DQuat,
}

impl RodPose {
    /// Orients a rod of rest length `conrod` between `crank_pin` and `piston_pin`.
    pub fn between(crank_pin: DVec3, piston_pin: DVec3, conrod: f64) -> RodPose {
        let span = piston_pin - crank_pin;
        let length = span.length();
        let direction = span.try_normalize().unwrap_or(ROD_REST_AXIS);
        RodPose {
            direction,
            length,
            scale: length / conrod,
            rotation: DQuat::from_rotation_arc(ROD_REST_AXIS, direction),
        }
    }

    /// Rod obliquity [rad]: signed angle between the rod and the cylinder axis,
    /// positive when the big end swings towards +Z.
    pub fn angle(&self) -> f64 {
        (-self.direction.z).atan2(self.direction.y)
    }
}

/// Pose of one slider-crank at a given local crank angle, in the cylinder frame
/// (crank center at the origin, cylinder axis +Y).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderCrank {
    /// Piston-pin displacement from the crank center [m].
    pub piston_offset: f64,
    /// `deck_height - piston_offset`: distance of the piston pin below the deck plane [m].
    pub piston_axial: f64,
    pub crank_pin: DVec3,
    pub piston_pin: DVec3,
    pub rod: RodPose,
}

impl SliderCrank {
    /// Solves the mechanism. `angle` is the cylinder's local crank angle [rad], `throw`
    /// and `conrod` in meters, `deck_height` is the axial distance from the crank center
    /// to the deck plane [m].
    pub fn solve(angle: f64, throw: f64, conrod: f64, deck_height: f64) -> SliderCrank {
        let offset = piston_offset(angle, throw, conrod);
        let crank_pin = journal_position(angle, throw);
        let piston_pin = offset * CYLINDER_AXIS;
        SliderCrank {
            piston_offset: offset,
            piston_axial: deck_height - offset,
            crank_pin,
            piston_pin,
            rod: RodPose::between(crank_pin, piston_pin, conrod),
        }
    }

    /// Moves the pose from the cylinder frame to a cylinder placed at `origin`.
    pub fn translated(mut self, origin: DVec3) -> SliderCrank {
        self.crank_pin += origin;
        self.piston_pin += origin;
        self
    }

    /// Same as `RodPose::angle`.
    pub fn rod_angle(&self) -> f64 {
        self.rod.angle()
    }
}
