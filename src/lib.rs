//! # lmb_engine_kinematics
//!
//! The `lmb_engine_kinematics` crate poses the moving parts of a multi-cylinder engine
//! (pistons, connecting rods, crankshaft, camshafts and valves) from a single crank angle,
//! for visualizers and animation loops.
//!
//! ```
//! use lmb_engine_kinematics as lmb;
//!
//! let geometry = lmb::EngineGeometry::inline_four().unwrap();
//! let mut engine = lmb::EngineAssembly::new(geometry);
//! let mut clock = lmb::FrameClock::new(3000.0, lmb::DEFAULT_MAX_STEP).unwrap();
//!
//! let angle = clock.advance(1.0 / 60.0);
//! let state = engine.update(angle);
//! assert_eq!(state.cylinders.len(), 4);
//! ```
//!
//! An engine can also be read from a `.json` file, see [`doc::inline_four_engine`].

pub mod core;
pub mod doc;
pub mod engine;
pub mod error;
pub mod kinematics;
pub mod numerics;

// Re-exporting
pub use crate::core::recorder::CycleRecorder;
pub use crate::core::traits::SaveData;
pub use crate::engine::assembly::{solve, EngineAssembly};
pub use crate::engine::clock::{FrameClock, DEFAULT_MAX_STEP};
pub use crate::engine::exploded::{ExplodedView, Layout, Part};
pub use crate::engine::geometry::{CylinderLayout, EngineGeometry, GeometryBuilder};
pub use crate::engine::json_reader::JsonEngine;
pub use crate::engine::state::{AssemblyState, CylinderState, ValveState};
pub use crate::error::EngineError;
pub use crate::kinematics::valve_lift::{LiftProfile, ValveLobe};
