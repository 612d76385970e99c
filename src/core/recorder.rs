use crate::core::traits::SaveData;
use crate::engine::assembly::EngineAssembly;
use crate::error::{positive, EngineError};
use ndarray::*;
use std::io::Write;

/// Smallest sampling step accepted by `CycleRecorder::record` [CA deg].
pub const MIN_D_ANGLE: f64 = 1e-3;

const CYCLE_HEADER: &str = "cycle-angle [deg]";

/// One four-stroke cycle (720 CA deg) of assembly states, one row per sample.
///
/// The first column is the unwrapped cycle angle of the sample, the others are the
/// `SaveData` row of the `AssemblyState`.
#[derive(Debug, Clone)]
pub struct CycleRecorder {
    d_angle: f64, // [CA deg]
    headers: String,
    data: Array2<f64>,
}

impl CycleRecorder {
    /// Samples the assembly every `d_angle` crank degrees from 0 to 720 (excluded).
    pub fn record(assembly: &EngineAssembly, d_angle: f64) -> Result<CycleRecorder, EngineError> {
        let d_angle = positive("d_angle", d_angle)?;
        if d_angle < MIN_D_ANGLE {
            return Err(EngineError::StepTooSmall {
                value: d_angle,
                min: MIN_D_ANGLE,
            });
        }
        // every i*d_angle below 720, without an extra sample when d_angle divides 720
        let num_samples = ((720.0 / d_angle - 1e-9).ceil() as usize).max(1);
        let first = assembly.solve(0.0);
        let mut data = Array2::zeros((num_samples, 1 + first.num_storable_variables()));
        for i in 0..num_samples {
            let angle = i as f64 * d_angle;
            let state = assembly.solve(angle.to_radians());
            let mut row = data.row_mut(i);
            row[0] = angle;
            row.slice_mut(s![1..]).assign(&state.get_storable_data());
        }
        Ok(CycleRecorder {
            d_angle,
            headers: format!("{}\t{}", CYCLE_HEADER, first.get_headers()),
            data,
        })
    }

    /// Sampling step [CA deg].
    pub fn d_angle(&self) -> f64 {
        self.d_angle
    }

    /// Cycle angle of every sample, `[0, 720)` [CA deg].
    pub fn cycle_angles(&self) -> ArrayView1<f64> {
        self.data.column(0)
    }

    pub fn headers(&self) -> Vec<&str> {
        self.headers.split('\t').collect()
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn num_samples(&self) -> usize {
        self.data.nrows()
    }

    /// Column whose header is `name`, e.g. `"cyl_1 piston [mm]"`.
    pub fn column(&self, name: &str) -> Option<ArrayView1<f64>> {
        let j = self.headers().iter().position(|h| *h == name)?;
        Some(self.data.column(j))
    }

    /// Writes the recorded cycle as a tab-separated table with a header line.
    pub fn write_to_file(&self, file_name: &str) -> Result<(), EngineError> {
        let mut result: Vec<String> = Vec::with_capacity(self.num_samples() + 1);
        result.push(format!("{}\n", self.headers));
        for row in self.data.genrows() {
            let line: Vec<String> = row.iter().map(|v| format!("{:.6}", v)).collect();
            result.push(format!("{}\n", line.join("\t")));
        }
        let mut file = std::fs::File::create(file_name)?;
        write!(file, "{}", result.join(""))?;
        Ok(())
    }
}
