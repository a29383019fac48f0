// strut_core/src/error.rs

use thiserror::Error;

/// Rejected wheel or friction-curve parameters.
///
/// Every variant carries the offending value so the host can report it
/// next to the name of the wheel being assembled.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("asymptote slip ({asymptote}) must be greater than extremum slip ({extremum})")]
    DegenerateFrictionCurve { extremum: f64, asymptote: f64 },

    #[error("max suspension length ({max}) is shorter than min suspension length ({min})")]
    InvertedSuspension { min: f64, max: f64 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// --- Small validation helpers shared by the models ---

pub(crate) fn finite(field: &'static str, value: f64) -> ConfigResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> ConfigResult<f64> {
    if finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> ConfigResult<f64> {
    if finite(field, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
