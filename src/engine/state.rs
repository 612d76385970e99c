use crate::core::traits::SaveData;
use crate::kinematics::cam::SprocketAngles;
use crate::kinematics::slider_crank::{RodPose, SliderCrank};
use ansi_term::Style;
use glam::{DQuat, DVec3};
use ndarray::*;
use serde::Serialize;

/// Pose of one cylinder's moving parts. Recomputed every frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CylinderState {
    pub name: String,
    /// Local crank angle, global + phase, in `[0, 2π)` [rad].
    pub crank_angle: f64,
    /// Local cam reference in `[0, 2π)`: zero at this cylinder's firing TDC [rad].
    pub cam_angle: f64,
    /// Piston-pin displacement from the crank center [m].
    pub piston_offset: f64,
    /// Piston-pin distance below the deck plane [m].
    pub piston_axial: f64,
    pub crank_pin: DVec3,
    pub piston_pin: DVec3,
    pub rod: RodPose,
}

impl CylinderState {
    pub(crate) fn new(name: &str) -> CylinderState {
        CylinderState {
            name: name.to_string(),
            crank_angle: 0.0,
            cam_angle: 0.0,
            piston_offset: 0.0,
            piston_axial: 0.0,
            crank_pin: DVec3::ZERO,
            piston_pin: DVec3::ZERO,
            rod: RodPose {
                direction: DVec3::Y,
                length: 0.0,
                scale: 0.0,
                rotation: DQuat::IDENTITY,
            },
        }
    }

    pub(crate) fn set(&mut self, crank_angle: f64, cam_angle: f64, pose: &SliderCrank) {
        self.crank_angle = crank_angle;
        self.cam_angle = cam_angle;
        self.piston_offset = pose.piston_offset;
        self.piston_axial = pose.piston_axial;
        self.crank_pin = pose.crank_pin;
        self.piston_pin = pose.piston_pin;
        self.rod = pose.rod;
    }
}

impl std::fmt::Display for CylinderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: angle {:.1} [CA deg] \t piston {:.2} [mm] below deck \t rod {:.2} [deg], scale {:.4}",
            Style::new().bold().paint(&self.name),
            self.crank_angle.to_degrees(),
            self.piston_axial * 1e3,
            self.rod.angle().to_degrees(),
            self.rod.scale,
        )
    }
}

/// Intake and exhaust lift of one cylinder [m].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ValveState {
    pub intake: f64,
    pub exhaust: f64,
}

/// Everything a renderer needs to pose the engine for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssemblyState {
    /// Global crank angle in `[0, 2π)` [rad].
    pub crank_angle: f64,
    /// Camshaft angle in `[0, 2π)` [rad].
    pub cam_angle: f64,
    pub sprockets: SprocketAngles,
    pub cylinders: Vec<CylinderState>,
    pub valves: Vec<ValveState>,
    /// Exploded-view factor in `[0, 1]`. Layout only.
    pub exploded: f64,
}

impl AssemblyState {
    pub(crate) fn with_cylinders<'a, I>(names: I) -> AssemblyState
    where
        I: Iterator<Item = &'a str>,
    {
        let cylinders: Vec<CylinderState> = names.map(CylinderState::new).collect();
        let valves = vec![ValveState::default(); cylinders.len()];
        AssemblyState {
            crank_angle: 0.0,
            cam_angle: 0.0,
            sprockets: SprocketAngles {
                crank: 0.0,
                intake_cam: 0.0,
                exhaust_cam: 0.0,
            },
            cylinders,
            valves,
            exploded: 0.0,
        }
    }

    pub fn cylinder(&self, name: &str) -> Option<(&CylinderState, &ValveState)> {
        let i = self.cylinders.iter().position(|c| c.name == name)?;
        Some((&self.cylinders[i], &self.valves[i]))
    }
}

impl SaveData for AssemblyState {
    fn get_headers(&self) -> String {
        let mut headers = vec!["crank-angle [deg]".to_string(), "cam-angle [deg]".to_string()];
        for cyl in self.cylinders.iter() {
            headers.push(format!("{} piston [mm]", cyl.name));
            headers.push(format!("{} rod [deg]", cyl.name));
            headers.push(format!("{} intake lift [mm]", cyl.name));
            headers.push(format!("{} exhaust lift [mm]", cyl.name));
        }
        headers.join("\t")
    }
    fn num_storable_variables(&self) -> usize {
        2 + 4 * self.cylinders.len()
    }
    fn get_storable_data(&self) -> Array1<f64> {
        let mut data = Vec::with_capacity(self.num_storable_variables());
        data.push(self.crank_angle.to_degrees());
        data.push(self.cam_angle.to_degrees());
        for (cyl, valve) in self.cylinders.iter().zip(self.valves.iter()) {
            data.push(cyl.piston_axial * 1e3);
            data.push(cyl.rod.angle().to_degrees());
            data.push(valve.intake * 1e3);
            data.push(valve.exhaust * 1e3);
        }
        Array1::from_vec(data)
    }
}

impl std::fmt::Display for AssemblyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: crank {:.1} [CA deg] \t cam {:.1} [deg] \t exploded {:.2}",
            Style::new().bold().paint("engine"),
            self.crank_angle.to_degrees(),
            self.cam_angle.to_degrees(),
            self.exploded,
        )?;
        for (cyl, valve) in self.cylinders.iter().zip(self.valves.iter()) {
            write!(
                f,
                "\n        {} \t intake {:.2} [mm] \t exhaust {:.2} [mm]",
                cyl,
                valve.intake * 1e3,
                valve.exhaust * 1e3
            )?;
        }
        Ok(())
    }
}
