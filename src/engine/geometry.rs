use crate::error::{finite, positive, EngineError};
use crate::kinematics::cam::CamTiming;
use crate::kinematics::valve_lift::ValveLobe;
use crate::numerics::angles::{wrap_cycle, CYCLE};
use ansi_term::Style;
use log::{debug, warn};

/// Crank throw of the reference four-cylinder [m].
pub const DEFAULT_THROW: f64 = 0.043;
/// Connecting-rod length of the reference four-cylinder [m].
pub const DEFAULT_CONROD: f64 = 0.145;
/// Distance between neighbouring bore centers [m].
pub const DEFAULT_BORE_SPACING: f64 = 0.09;

/// Placement of one cylinder along the crankshaft.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderLayout {
    name: String,
    offset: f64, // [m] along the crank axis
    phase: f64,  // [rad] added to the global crank angle
}

impl CylinderLayout {
    pub fn new(name: String, offset: f64, phase: f64) -> CylinderLayout {
        CylinderLayout {
            name,
            offset,
            phase,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Local crank angle of this cylinder, not wrapped.
    pub fn local_angle(&self, crank_angle: f64) -> f64 {
        crank_angle + self.phase
    }
}

/// Immutable description of the crank train and valve train.
#[derive(Debug, Clone)]
pub struct EngineGeometry {
    throw: f64,       // [m] crank center to crank pin
    conrod: f64,      // [m] pin to pin
    deck_height: f64, // [m] crank center to deck plane
    cylinders: Vec<CylinderLayout>,
    cam_timing: CamTiming,
    intake: ValveLobe,
    exhaust: ValveLobe,
}

impl EngineGeometry {
    pub fn builder() -> GeometryBuilder {
        GeometryBuilder::new()
    }

    /// Inline four with firing order 1-3-4-2: crank phases `{0, π, π, 0}` modulo one
    /// revolution, spread over the full four-stroke cycle for the valve train.
    pub fn inline_four() -> Result<EngineGeometry, EngineError> {
        GeometryBuilder::new().firing_order(&[1, 3, 4, 2]).build()
    }

    pub fn throw(&self) -> f64 {
        self.throw
    }

    pub fn stroke(&self) -> f64 {
        2.0 * self.throw
    }

    pub fn conrod(&self) -> f64 {
        self.conrod
    }

    pub fn deck_height(&self) -> f64 {
        self.deck_height
    }

    pub fn cylinders(&self) -> &[CylinderLayout] {
        &self.cylinders
    }

    pub fn num_cylinders(&self) -> usize {
        self.cylinders.len()
    }

    pub fn cam_timing(&self) -> &CamTiming {
        &self.cam_timing
    }

    pub fn intake(&self) -> &ValveLobe {
        &self.intake
    }

    pub fn exhaust(&self) -> &ValveLobe {
        &self.exhaust
    }

    /// `true` when the rod is long enough for the piston to follow the crank over a
    /// full revolution.
    pub fn is_physical(&self) -> bool {
        self.conrod > self.throw
    }
}

impl std::fmt::Display for EngineGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}
        throw: {:.1} [mm] \t\t conrod: {:.1} [mm] \t\t deck height: {:.1} [mm]
        {}
        intake lobe: {:.1} [cam deg], {:.1} [cam deg] wide, {:.2} [mm] ({})
        exhaust lobe: {:.1} [cam deg], {:.1} [cam deg] wide, {:.2} [mm] ({})",
            Style::new().underline().paint("     Geometry     "),
            self.throw * 1e3,
            self.conrod * 1e3,
            self.deck_height * 1e3,
            Style::new().underline().paint("    Valve train    "),
            self.intake.center().to_degrees(),
            self.intake.duration().to_degrees(),
            self.intake.max_lift() * 1e3,
            self.intake.profile().profile_name(),
            self.exhaust.center().to_degrees(),
            self.exhaust.duration().to_degrees(),
            self.exhaust.max_lift() * 1e3,
            self.exhaust.profile().profile_name(),
        )?;
        for cyl in self.cylinders.iter() {
            write!(
                f,
                "\n        {}: offset {:.1} [mm], phase {:.1} [CA deg]",
                Style::new().bold().paint(&cyl.name),
                cyl.offset * 1e3,
                cyl.phase.to_degrees()
            )?;
        }
        Ok(())
    }
}

/// Phases of the cylinders for a firing order given as 1-based cylinder numbers, e.g.
/// `[1, 3, 4, 2]`. Firings are evenly spaced over the four-stroke cycle; the returned
/// phase of cylinder `i` (index `i - 1`) is in `[0, 4π)`.
pub fn phases_from_firing_order(order: &[usize]) -> Result<Vec<f64>, EngineError> {
    let n = order.len();
    let invalid = || {
        let text: Vec<String> = order.iter().map(|c| c.to_string()).collect();
        EngineError::InvalidFiringOrder(text.join("-"))
    };
    if n == 0 {
        return Err(invalid());
    }
    let mut phases = vec![f64::NAN; n];
    let division = CYCLE / n as f64;
    for (k, &cyl) in order.iter().enumerate() {
        if cyl == 0 || cyl > n || !phases[cyl - 1].is_nan() {
            return Err(invalid());
        }
        // cylinder reaches firing TDC when global + phase = 0 (mod 4π)
        phases[cyl - 1] = wrap_cycle(-(k as f64) * division);
    }
    Ok(phases)
}

/// Parses a firing order written as `"1-3-4-2"`.
pub fn parse_firing_order(text: &str) -> Result<Vec<usize>, EngineError> {
    text.split('-')
        .map(|s| {
            s.trim()
                .parse::<usize>()
                .map_err(|_| EngineError::InvalidFiringOrder(text.to_string()))
        })
        .collect()
}

/// Evenly spaced bore centers, symmetric about the middle of the crankshaft.
pub fn bore_offsets(num_cylinders: usize, spacing: f64) -> Vec<f64> {
    let middle = 0.5 * (num_cylinders as f64 - 1.0);
    (0..num_cylinders)
        .map(|i| (i as f64 - middle) * spacing)
        .collect()
}

/// Collects the engine description and validates it in `build()`.
#[derive(Debug, Clone)]
pub struct GeometryBuilder {
    throw: f64,
    conrod: f64,
    deck_height: Option<f64>,
    bore_spacing: f64,
    offsets: Vec<f64>,
    phases: Vec<f64>,
    firing_order: Option<Vec<usize>>,
    names: Vec<String>,
    intake: Option<ValveLobe>,
    exhaust: Option<ValveLobe>,
}

impl GeometryBuilder {
    pub fn new() -> GeometryBuilder {
        GeometryBuilder {
            throw: DEFAULT_THROW,
            conrod: DEFAULT_CONROD,
            deck_height: None,
            bore_spacing: DEFAULT_BORE_SPACING,
            offsets: Vec::new(),
            phases: Vec::new(),
            firing_order: None,
            names: Vec::new(),
            intake: None,
            exhaust: None,
        }
    }

    /// Crank throw in meters.
    pub fn throw<'a>(&'a mut self, throw: f64) -> &'a mut Self {
        self.throw = throw;
        self
    }

    /// Connecting-rod length in meters.
    pub fn conrod<'a>(&'a mut self, conrod: f64) -> &'a mut Self {
        self.conrod = conrod;
        self
    }

    /// Crank center to deck plane, in meters. Defaults to `throw + conrod`.
    pub fn deck_height<'a>(&'a mut self, deck_height: f64) -> &'a mut Self {
        self.deck_height = Some(deck_height);
        self
    }

    /// Used when no explicit offsets are given.
    pub fn bore_spacing<'a>(&'a mut self, spacing: f64) -> &'a mut Self {
        self.bore_spacing = spacing;
        self
    }

    pub fn offsets<'a>(&'a mut self, offsets: Vec<f64>) -> &'a mut Self {
        self.offsets = offsets;
        self
    }

    /// Per-cylinder phases in radians. Replaces any firing order.
    pub fn phases<'a>(&'a mut self, phases: Vec<f64>) -> &'a mut Self {
        self.phases = phases;
        self.firing_order = None;
        self
    }

    /// Derives the phases from a firing order. Replaces any explicit phases.
    pub fn firing_order<'a>(&'a mut self, order: &[usize]) -> &'a mut Self {
        self.firing_order = Some(order.to_vec());
        self.phases.clear();
        self
    }

    pub fn names<'a>(&'a mut self, names: Vec<String>) -> &'a mut Self {
        self.names = names;
        self
    }

    pub fn intake<'a>(&'a mut self, lobe: ValveLobe) -> &'a mut Self {
        self.intake = Some(lobe);
        self
    }

    pub fn exhaust<'a>(&'a mut self, lobe: ValveLobe) -> &'a mut Self {
        self.exhaust = Some(lobe);
        self
    }

    pub fn build(&self) -> Result<EngineGeometry, EngineError> {
        let throw = positive("throw", self.throw)?;
        let conrod = positive("conrod", self.conrod)?;
        let deck_height = finite("deck_height", self.deck_height.unwrap_or(throw + conrod))?;
        if conrod <= throw {
            warn!(
                "connecting rod ({:.1} mm) is not longer than the crank throw ({:.1} mm): \
                 piston motion is clamped and no longer physical",
                conrod * 1e3,
                throw * 1e3
            );
        }

        let phases = match &self.firing_order {
            Some(order) => phases_from_firing_order(order)?,
            None => self.phases.clone(),
        };
        if phases.is_empty() {
            return Err(EngineError::NoCylinders);
        }
        let offsets = if self.offsets.is_empty() {
            bore_offsets(phases.len(), finite("bore_spacing", self.bore_spacing)?)
        } else {
            self.offsets.clone()
        };
        if offsets.len() != phases.len() {
            return Err(EngineError::LengthMismatch {
                phases: phases.len(),
                offsets: offsets.len(),
            });
        }

        let mut cylinders = Vec::with_capacity(phases.len());
        for (i, (offset, phase)) in offsets.iter().zip(phases.iter()).enumerate() {
            let name = match self.names.get(i) {
                Some(name) => name.clone(),
                None => format!("cyl_{}", i + 1),
            };
            cylinders.push(CylinderLayout::new(
                name,
                finite("offset", *offset)?,
                finite("phase", *phase)?,
            ));
        }

        let intake = match &self.intake {
            Some(lobe) => lobe.clone(),
            None => default_intake_lobe()?,
        };
        let exhaust = match &self.exhaust {
            Some(lobe) => lobe.clone(),
            None => default_exhaust_lobe()?,
        };

        debug!(
            "engine geometry: {} cylinders, throw {} m, conrod {} m, deck {} m",
            cylinders.len(),
            throw,
            conrod,
            deck_height
        );
        Ok(EngineGeometry {
            throw,
            conrod,
            deck_height,
            cylinders,
            cam_timing: CamTiming::new(),
            intake,
            exhaust,
        })
    }
}

impl Default for GeometryBuilder {
    fn default() -> Self {
        GeometryBuilder::new()
    }
}

// Cam reference zero is the cylinder's firing TDC. Centerlines 105 CA deg either side
// of the overlap TDC (360 CA deg), 240 CA deg of opening.
fn default_intake_lobe() -> Result<ValveLobe, EngineError> {
    ValveLobe::new("intake", 232.5f64.to_radians(), 120f64.to_radians(), 8.5e-3)
}

fn default_exhaust_lobe() -> Result<ValveLobe, EngineError> {
    ValveLobe::new("exhaust", 127.5f64.to_radians(), 120f64.to_radians(), 8.0e-3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::angles::wrap_angle;
    use std::f64::consts::PI;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn firing_order_1342() {
        let phases = phases_from_firing_order(&[1, 3, 4, 2]).unwrap();
        assert!(close(phases[0], 0.0));
        assert!(close(phases[1], PI));
        assert!(close(phases[2], 3.0 * PI));
        assert!(close(phases[3], 2.0 * PI));
        let crank: Vec<f64> = phases.iter().map(|p| wrap_angle(*p)).collect();
        assert!(close(crank[0], 0.0) && close(crank[3], 0.0));
        assert!(close(crank[1], PI) && close(crank[2], PI));
    }

    #[test]
    fn bad_firing_orders() {
        assert!(phases_from_firing_order(&[]).is_err());
        assert!(phases_from_firing_order(&[1, 1, 2, 3]).is_err());
        assert!(phases_from_firing_order(&[1, 2, 5, 3]).is_err());
        assert!(phases_from_firing_order(&[0, 1, 2]).is_err());
        assert_eq!(parse_firing_order("1-3-4-2").unwrap(), vec![1, 3, 4, 2]);
        assert_eq!(parse_firing_order(" 1 - 2 ").unwrap(), vec![1, 2]);
        assert!(parse_firing_order("1-x-2").is_err());
    }

    #[test]
    fn bore_offsets_are_centered() {
        let offsets = bore_offsets(4, 0.09);
        assert!(close(offsets[0], -0.135));
        assert!(close(offsets[3], 0.135));
        assert!(close(offsets.iter().sum::<f64>(), 0.0));
        assert_eq!(bore_offsets(1, 0.09), vec![0.0]);
    }

    #[test]
    fn inline_four_defaults() {
        let geometry = EngineGeometry::inline_four().unwrap();
        assert_eq!(geometry.num_cylinders(), 4);
        assert_eq!(geometry.throw(), DEFAULT_THROW);
        assert_eq!(geometry.conrod(), DEFAULT_CONROD);
        assert!(close(geometry.deck_height(), DEFAULT_THROW + DEFAULT_CONROD));
        assert!(close(geometry.stroke(), 0.086));
        assert!(geometry.is_physical());
        let names: Vec<&str> = geometry.cylinders().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["cyl_1", "cyl_2", "cyl_3", "cyl_4"]);
        assert!(geometry.to_string().contains("cyl_4"));
    }

    #[test]
    fn explicit_phase_list() {
        let geometry = EngineGeometry::builder()
            .phases(vec![0.0, PI, PI, 0.0])
            .offsets(vec![0.0, 0.1, 0.2, 0.3])
            .deck_height(0.25)
            .names(vec!["a".to_string()])
            .build()
            .unwrap();
        let cyl = &geometry.cylinders()[1];
        assert_eq!(cyl.phase(), PI);
        assert_eq!(cyl.offset(), 0.1);
        assert_eq!(cyl.name(), "cyl_2");
        assert_eq!(geometry.cylinders()[0].name(), "a");
        assert!(close(cyl.local_angle(0.5), 0.5 + PI));
        assert_eq!(geometry.deck_height(), 0.25);
    }

    #[test]
    fn rejects_invalid_geometry() {
        assert!(matches!(
            EngineGeometry::builder().throw(0.0).phases(vec![0.0]).build(),
            Err(EngineError::NonPositive { name: "throw", .. })
        ));
        assert!(matches!(
            EngineGeometry::builder().conrod(-0.1).phases(vec![0.0]).build(),
            Err(EngineError::NonPositive { name: "conrod", .. })
        ));
        assert!(matches!(
            EngineGeometry::builder().build(),
            Err(EngineError::NoCylinders)
        ));
        assert!(matches!(
            EngineGeometry::builder()
                .phases(vec![0.0, PI])
                .offsets(vec![0.0])
                .build(),
            Err(EngineError::LengthMismatch { phases: 2, offsets: 1 })
        ));
        assert!(EngineGeometry::builder()
            .phases(vec![f64::NAN])
            .build()
            .is_err());
    }

    #[test_log::test]
    fn short_rod_is_accepted_with_a_warning() {
        let geometry = EngineGeometry::builder()
            .throw(0.2)
            .conrod(0.1)
            .phases(vec![0.0])
            .build()
            .unwrap();
        assert!(!geometry.is_physical());
    }

    #[test]
    fn later_phase_source_wins() {
        let geometry = EngineGeometry::builder()
            .phases(vec![0.0, PI])
            .firing_order(&[1, 3, 2])
            .build()
            .unwrap();
        assert_eq!(geometry.num_cylinders(), 3);
        let geometry = EngineGeometry::builder()
            .firing_order(&[1, 3, 2])
            .phases(vec![0.0, PI])
            .build()
            .unwrap();
        assert_eq!(geometry.num_cylinders(), 2);
    }
}
