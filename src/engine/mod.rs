//! Engine description and the per-frame assembly solver
pub mod assembly;
pub mod clock;
pub mod exploded;
pub mod geometry;
pub mod json_reader;
pub mod state;
