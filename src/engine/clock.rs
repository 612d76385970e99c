use crate::error::{non_negative, positive, EngineError};
use crate::numerics::angles::{wrap_angle, wrap_cycle};
use log::warn;
use std::f64::consts::PI;

/// Longest frame the clock will integrate [s]. Anything slower (a stalled or
/// backgrounded render loop) is treated as one step of this length.
pub const DEFAULT_MAX_STEP: f64 = 0.1;

/// Crank-angle accumulator owned by the render loop.
///
/// Keeps the angle over a full four-stroke cycle (`[0, 4π)`) so the camshafts, which
/// turn at half speed, complete whole revolutions.
#[derive(Debug, Clone)]
pub struct FrameClock {
    speed: f64,      // [RPM]
    sec_to_rad: f64, // constant: 2*PI*speed/60
    max_step: f64,   // [s]
    cycle_angle: f64,
}

impl FrameClock {
    /// `speed` in RPM, `max_step` in seconds.
    pub fn new(speed: f64, max_step: f64) -> Result<FrameClock, EngineError> {
        let speed = non_negative("speed", speed)?;
        let max_step = positive("max_step", max_step)?;
        Ok(FrameClock {
            speed,
            sec_to_rad: 2.0 * PI * speed / 60.0,
            max_step,
            cycle_angle: 0.0,
        })
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<(), EngineError> {
        let clock = FrameClock::new(speed, self.max_step)?;
        self.speed = clock.speed;
        self.sec_to_rad = clock.sec_to_rad;
        Ok(())
    }

    /// Crank angle in `[0, 2π)`.
    pub fn crank_angle(&self) -> f64 {
        wrap_angle(self.cycle_angle)
    }

    /// Position in the four-stroke cycle, `[0, 4π)`.
    pub fn cycle_angle(&self) -> f64 {
        self.cycle_angle
    }

    /// Advances by `dt` seconds of wall-clock time and returns the new cycle angle.
    pub fn advance(&mut self, dt: f64) -> f64 {
        let mut step = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if step > self.max_step {
            warn!("frame took {:.3} s, integrating {:.3} s only", step, self.max_step);
            step = self.max_step;
        }
        self.cycle_angle = wrap_cycle(self.cycle_angle + self.sec_to_rad * step);
        self.cycle_angle
    }
}
