use glam::DVec3;

/// Crankshaft rotation axis. Cylinders are spaced along it.
pub const CRANK_AXIS: DVec3 = DVec3::X;

/// Cylinder axis. The crank pin sits on it at zero crank angle (TDC).
pub const CYLINDER_AXIS: DVec3 = DVec3::Y;

/// Returns the crank-pin (journal) position relative to the crank center.
/// `angle` in radians, `throw` is the center-to-pin distance in meters.
pub fn journal_position(angle: f64, throw: f64) -> DVec3 {
    DVec3::new(0.0, throw * angle.cos(), throw * angle.sin())
}
