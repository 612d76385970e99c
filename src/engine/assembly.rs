use super::exploded::{ExplodedView, Layout};
use super::geometry::EngineGeometry;
use super::state::AssemblyState;
use crate::kinematics::crankshaft::CRANK_AXIS;
use crate::kinematics::slider_crank::SliderCrank;
use crate::numerics::angles::wrap_angle;
use log::warn;

/// Poses every moving part of the engine from a single crank angle.
///
/// The solver side is a pure function of `(EngineGeometry, crank angle)`; the assembly
/// only keeps the last state around so it can be refreshed in place every frame, and
/// the exploded-view factor, which never reaches the kinematics.
#[derive(Debug, Clone)]
pub struct EngineAssembly {
    geometry: EngineGeometry,
    exploded_view: ExplodedView,
    exploded: f64,
    state: AssemblyState,
}

impl EngineAssembly {
    pub fn new(geometry: EngineGeometry) -> EngineAssembly {
        let mut state = AssemblyState::with_cylinders(geometry.cylinders().iter().map(|c| c.name()));
        solve_into(&geometry, 0.0, 0.0, &mut state);
        EngineAssembly {
            geometry,
            exploded_view: ExplodedView::default(),
            exploded: 0.0,
            state,
        }
    }

    pub fn with_exploded_view(mut self, view: ExplodedView) -> EngineAssembly {
        self.exploded_view = view;
        self
    }

    pub fn geometry(&self) -> &EngineGeometry {
        &self.geometry
    }

    /// State computed by the last `update`.
    pub fn state(&self) -> &AssemblyState {
        &self.state
    }

    /// Recomputes the state in place for `crank_angle` [rad].
    ///
    /// Crank-side quantities only depend on the angle modulo `2π`; the camshafts need
    /// the full four-stroke cycle angle (`[0, 4π)`, see `FrameClock::cycle_angle`) to
    /// complete their revolution.
    pub fn update(&mut self, crank_angle: f64) -> &AssemblyState {
        solve_into(&self.geometry, crank_angle, self.exploded, &mut self.state);
        &self.state
    }

    /// Same computation as `update`, without touching the assembly.
    pub fn solve(&self, crank_angle: f64) -> AssemblyState {
        let mut state = self.state.clone();
        solve_into(&self.geometry, crank_angle, self.exploded, &mut state);
        state
    }

    /// Sets the exploded-view factor, clamped to `[0, 1]`.
    pub fn set_exploded(&mut self, t: f64) {
        let clamped = if t.is_nan() { 0.0 } else { t.max(0.0).min(1.0) };
        if clamped != t {
            warn!("exploded factor {} clamped to {}", t, clamped);
        }
        self.exploded = clamped;
        self.state.exploded = clamped;
    }

    pub fn exploded(&self) -> f64 {
        self.exploded
    }

    /// Part placements for the current exploded factor.
    pub fn layout(&self) -> Layout {
        self.exploded_view.layout(self.exploded)
    }
}

/// Poses the whole engine for `crank_angle` [rad].
pub fn solve(geometry: &EngineGeometry, crank_angle: f64) -> AssemblyState {
    let mut state = AssemblyState::with_cylinders(geometry.cylinders().iter().map(|c| c.name()));
    solve_into(geometry, crank_angle, 0.0, &mut state);
    state
}

fn solve_into(geometry: &EngineGeometry, crank_angle: f64, exploded: f64, state: &mut AssemblyState) {
    let timing = geometry.cam_timing();
    state.crank_angle = wrap_angle(crank_angle);
    state.cam_angle = wrap_angle(timing.cam_angle(crank_angle));
    state.sprockets = timing.sprockets(crank_angle);
    state.exploded = exploded;

    let (throw, conrod, deck) = (geometry.throw(), geometry.conrod(), geometry.deck_height());
    let cylinders = state.cylinders.iter_mut().zip(state.valves.iter_mut());
    for (layout, (cyl, valve)) in geometry.cylinders().iter().zip(cylinders) {
        let local = layout.local_angle(crank_angle);
        let pose = SliderCrank::solve(local, throw, conrod, deck).translated(layout.offset() * CRANK_AXIS);
        let cam_reference = wrap_angle(timing.cam_angle(local));
        cyl.set(wrap_angle(local), cam_reference, &pose);
        valve.intake = geometry.intake().lift(cam_reference);
        valve.exhaust = geometry.exhaust().lift(cam_reference);
    }
}
