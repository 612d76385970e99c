pub mod plot;
pub mod recorder;
pub mod traits;
