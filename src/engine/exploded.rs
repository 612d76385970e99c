//! Exploded-view layout. Purely cosmetic: the kinematics never read it.

use glam::DVec3;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Part {
    Crankshaft,
    Piston,
    ConnectingRod,
    Camshaft,
    Sprocket,
    Valve,
    Head,
}

pub const PARTS: [Part; 7] = [
    Part::Crankshaft,
    Part::Piston,
    Part::ConnectingRod,
    Part::Camshaft,
    Part::Sprocket,
    Part::Valve,
    Part::Head,
];

/// Displacement of each part when fully exploded (`t = 1`). Placements are linearly
/// interpolated from the assembled position (`t = 0`).
#[derive(Debug, Clone, PartialEq)]
pub struct ExplodedView {
    offsets: Vec<(Part, DVec3)>,
}

impl ExplodedView {
    pub fn new(offsets: Vec<(Part, DVec3)>) -> ExplodedView {
        ExplodedView { offsets }
    }

    /// Full displacement of `part`, zero when the part does not move.
    pub fn offset(&self, part: Part) -> DVec3 {
        match self.offsets.iter().find(|(p, _)| *p == part) {
            Some((_, offset)) => *offset,
            None => DVec3::ZERO,
        }
    }

    /// Displacement of `part` at factor `t`, clamped to `[0, 1]`.
    pub fn placement(&self, part: Part, t: f64) -> DVec3 {
        DVec3::ZERO.lerp(self.offset(part), t.max(0.0).min(1.0))
    }

    /// Placements of every part at factor `t`.
    pub fn layout(&self, t: f64) -> Layout {
        Layout {
            factor: t.max(0.0).min(1.0),
            placements: PARTS.iter().map(|&p| (p, self.placement(p, t))).collect(),
        }
    }
}

impl Default for ExplodedView {
    /// Crankshaft drops, head and valve train lift away, sprockets slide forward.
    fn default() -> Self {
        ExplodedView::new(vec![
            (Part::Crankshaft, DVec3::new(0.0, -0.15, 0.0)),
            (Part::Piston, DVec3::new(0.0, 0.10, 0.0)),
            (Part::ConnectingRod, DVec3::new(0.0, -0.02, 0.0)),
            (Part::Head, DVec3::new(0.0, 0.25, 0.0)),
            (Part::Valve, DVec3::new(0.0, 0.32, 0.0)),
            (Part::Camshaft, DVec3::new(0.0, 0.40, 0.0)),
            (Part::Sprocket, DVec3::new(-0.12, 0.0, 0.0)),
        ])
    }
}

/// Part placements for one exploded-view factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub factor: f64,
    pub placements: Vec<(Part, DVec3)>,
}

impl Layout {
    pub fn placement(&self, part: Part) -> DVec3 {
        match self.placements.iter().find(|(p, _)| *p == part) {
            Some((_, placement)) => *placement,
            None => DVec3::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_between_assembled_and_exploded() {
        let view = ExplodedView::default();
        assert_eq!(view.placement(Part::Head, 0.0), DVec3::ZERO);
        assert!((view.placement(Part::Head, 1.0) - DVec3::new(0.0, 0.25, 0.0)).length() < 1e-15);
        assert!((view.placement(Part::Head, 0.5) - DVec3::new(0.0, 0.125, 0.0)).length() < 1e-15);
    }

    #[test]
    fn factor_is_clamped() {
        let view = ExplodedView::default();
        assert_eq!(view.placement(Part::Camshaft, 3.0), view.placement(Part::Camshaft, 1.0));
        assert_eq!(view.placement(Part::Camshaft, -1.0), DVec3::ZERO);
        assert_eq!(view.layout(2.0).factor, 1.0);
    }

    #[test]
    fn layout_covers_every_part() {
        let view = ExplodedView::new(vec![(Part::Valve, DVec3::X)]);
        let layout = view.layout(0.25);
        assert_eq!(layout.placements.len(), PARTS.len());
        assert_eq!(layout.placement(Part::Valve), DVec3::new(0.25, 0.0, 0.0));
        assert_eq!(layout.placement(Part::Piston), DVec3::ZERO);
    }
}
