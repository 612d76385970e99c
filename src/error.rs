use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("`{name}` must be a positive, finite value: got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("`{name}` must be a non-negative, finite value: got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("`{name}` must be a finite value: got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("an engine needs at least one cylinder")]
    NoCylinders,
    #[error("`phases` and `offsets` must have the same length: {phases} phases, {offsets} offsets")]
    LengthMismatch { phases: usize, offsets: usize },
    #[error("invalid firing order `{0}`")]
    InvalidFiringOrder(String),
    #[error("invalid valve lobe `{name}`: {reason}")]
    InvalidLobe { name: String, reason: String },
    #[error("unknown lift profile `{0}`")]
    UnknownProfile(String),
    #[error("no recorded column named `{0}`")]
    UnknownColumn(String),
    #[error("sampling step of {value} CA deg is below the minimum of {min} CA deg")]
    StepTooSmall { value: f64, min: f64 },
    #[error("unable to plot: {0}")]
    Plot(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse engine file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::NonPositive { name, value })
    }
}

/// Checks that `value` is finite and not below zero.
pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EngineError::Negative { name, value })
    }
}

pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFinite { name, value })
    }
}
