//! Reading an engine description from a `.json` file.
//!
//! Lengths are given in millimeters, angles in degrees (crank degrees for cylinder
//! phases, cam degrees for lobes) and the speed in RPM. See `doc::inline_four_engine`
//! for a complete file.

use super::geometry::{parse_firing_order, EngineGeometry, GeometryBuilder};
use crate::error::EngineError;
use crate::kinematics::valve_lift::{profile_by_name, ValveLobe};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JsonEngine {
    pub speed: f64,               // [RPM]
    pub crank_throw: f64,         // [mm]
    pub conrod: f64,              // [mm]
    pub deck_height: Option<f64>, // [mm]
    pub bore_spacing: Option<f64>, // [mm]
    pub firing_order: Option<String>,
    pub cylinders: Vec<JsonCylinder>,
    pub intake: JsonLobe,
    pub exhaust: JsonLobe,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JsonCylinder {
    pub name: String,
    pub offset: Option<f64>, // [mm]
    pub phase: Option<f64>,  // [CA deg]
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JsonLobe {
    pub lobe_center: f64, // [cam deg]
    pub duration: f64,    // [cam deg]
    pub max_lift: f64,    // [mm]
    pub profile: Option<String>,
}

impl JsonEngine {
    /// Reads and parses `file_name`.
    pub fn from_file(file_name: &str) -> Result<JsonEngine, EngineError> {
        let json_file = std::fs::read_to_string(file_name)?;
        let engine = JsonEngine::parse(&json_file)?;
        debug!("read engine file `{}`", file_name);
        Ok(engine)
    }

    pub fn parse(text: &str) -> Result<JsonEngine, EngineError> {
        let data: JsonEngine = serde_json::from_str(text)?;
        Ok(data)
    }

    /// Converts to SI units and validates.
    pub fn geometry(&self) -> Result<EngineGeometry, EngineError> {
        let mut builder = GeometryBuilder::new();
        builder
            .throw(self.crank_throw * 1e-3)
            .conrod(self.conrod * 1e-3)
            .names(self.cylinders.iter().map(|c| c.name.clone()).collect())
            .intake(self.intake.lobe("intake")?)
            .exhaust(self.exhaust.lobe("exhaust")?);
        if let Some(deck) = self.deck_height {
            builder.deck_height(deck * 1e-3);
        }
        if let Some(spacing) = self.bore_spacing {
            builder.bore_spacing(spacing * 1e-3);
        }

        let offsets: Vec<f64> = self.cylinders.iter().filter_map(|c| c.offset).collect();
        if offsets.len() == self.cylinders.len() {
            builder.offsets(offsets.iter().map(|o| o * 1e-3).collect());
        } else if !offsets.is_empty() {
            warn!("only some cylinders have an `offset`: using evenly spaced bores for all");
        }

        match &self.firing_order {
            Some(text) => {
                let order = parse_firing_order(text)?;
                if order.len() != self.cylinders.len() {
                    return Err(EngineError::InvalidFiringOrder(format!(
                        "`{}` has {} entries for {} cylinders",
                        text,
                        order.len(),
                        self.cylinders.len()
                    )));
                }
                builder.firing_order(&order);
            }
            None => {
                let phases = self
                    .cylinders
                    .iter()
                    .map(|c| c.phase.unwrap_or(0.0).to_radians())
                    .collect();
                builder.phases(phases);
            }
        }
        builder.build()
    }
}

impl JsonLobe {
    fn lobe(&self, name: &str) -> Result<ValveLobe, EngineError> {
        let profile = match &self.profile {
            Some(p) => profile_by_name(p)?,
            None => profile_by_name("raised_cosine")?,
        };
        ValveLobe::with_profile(
            name,
            self.lobe_center.to_radians(),
            self.duration.to_radians(),
            self.max_lift * 1e-3,
            profile,
        )
    }
}
