//! # Example of a 1.6 L inline-four engine
//!
//! ## The engine.json file
//!
//! ```json
//! {
//!     "speed": 3000.0,
//!     "crank_throw": 43.0,
//!     "conrod": 145.0,
//!     "deck_height": 200.0,
//!     "bore_spacing": 90.0,
//!     "firing_order": "1-3-4-2",
//!     "cylinders": [
//!         { "name": "cyl_1" },
//!         { "name": "cyl_2" },
//!         { "name": "cyl_3" },
//!         { "name": "cyl_4" }
//!     ],
//!     "intake": {
//!         "lobe_center": 232.5,
//!         "duration": 120.0,
//!         "max_lift": 8.5
//!     },
//!     "exhaust": {
//!         "lobe_center": 127.5,
//!         "duration": 120.0,
//!         "max_lift": 8.0,
//!         "profile": "constant_acceleration"
//!     }
//! }
//! ```
//!
//! ## Fields
//!
//! * `speed`: crankshaft speed [RPM], used by the binary's frame clock
//! * `crank_throw`: crank radius [mm]
//! * `conrod`: connecting-rod length [mm]
//! * `deck_height`: distance from the crank center to the deck plane [mm].
//!   Defaults to `crank_throw + conrod`
//! * `bore_spacing`: distance between neighbouring bores [mm], used when the cylinders
//!   carry no `offset`
//! * `firing_order`: cylinders in firing order, 1-based. When absent each cylinder's
//!   `phase` [CA deg] is used instead (default 0)
//! * `cylinders`: `name`, and optionally `offset` [mm] along the crankshaft and `phase`
//! * `intake`, `exhaust`: `lobe_center` and `duration` in cam degrees after the
//!   cylinder's firing TDC, `max_lift` [mm] and an optional lift `profile`
//!   (`raised_cosine`, the default, or `constant_acceleration`)
//!
//! ## Using it
//!
//! ```no_run
//! use lmb_engine_kinematics as lmb;
//!
//! let json = lmb::JsonEngine::from_file("engine.json").unwrap();
//! let engine = lmb::EngineAssembly::new(json.geometry().unwrap());
//! println!("{}", engine.state());
//! ```
