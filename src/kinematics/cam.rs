use crate::numerics::angles::wrap_angle;
use serde::Serialize;

/// Camshaft turns once for every two crankshaft turns (four-stroke cycle).
pub const CAM_TO_CRANK_RATIO: f64 = 0.5;

/// Camshaft angle for a given crank angle. Defined for negative and
/// multi-revolution inputs alike, without wrapping.
pub fn cam_angle(crank_angle: f64) -> f64 {
    crank_angle / 2.0
}

/// Angles of the timing-drive sprockets. No slip, no backlash.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SprocketAngles {
    pub crank: f64,
    pub intake_cam: f64,
    pub exhaust_cam: f64,
}

/// Timing drive between crankshaft and camshafts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CamTiming {
    ratio: f64,
}

impl CamTiming {
    pub fn new() -> CamTiming {
        CamTiming {
            ratio: CAM_TO_CRANK_RATIO,
        }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Unwrapped camshaft angle.
    pub fn cam_angle(&self, crank_angle: f64) -> f64 {
        crank_angle * self.ratio
    }

    /// Sprocket angles wrapped to one revolution each.
    pub fn sprockets(&self, crank_angle: f64) -> SprocketAngles {
        let cam = wrap_angle(self.cam_angle(crank_angle));
        SprocketAngles {
            crank: wrap_angle(crank_angle),
            intake_cam: cam,
            exhaust_cam: cam,
        }
    }
}

impl Default for CamTiming {
    fn default() -> Self {
        CamTiming::new()
    }
}
