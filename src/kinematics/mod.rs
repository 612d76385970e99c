//! Closed-form kinematics of the crank train and valve train
pub mod cam;
pub mod crankshaft;
pub mod slider_crank;
pub mod valve_lift;
