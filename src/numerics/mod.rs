//! Numeric helpers
pub mod angles;
