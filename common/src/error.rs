//! Error types shared by the simulation crates.
//!
//! Invalid configuration is rejected up front so it never turns into
//! NaNs inside the integration loop.

use std::fmt;

/// Errors raised when rejecting invalid simulation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Body and particle masses must be strictly positive.
    NonPositiveMass(f64),
    /// The timestep must be strictly positive and finite.
    NonPositiveTimestep(f64),
    /// Field magnitudes must be non-negative and finite.
    NegativeFieldMagnitude(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveMass(m) => {
                write!(f, "mass must be strictly positive, got {} kg", m)
            }
            ConfigError::NonPositiveTimestep(dt) => {
                write!(f, "timestep must be strictly positive, got {} s", dt)
            }
            ConfigError::NegativeFieldMagnitude(mag) => {
                write!(f, "field magnitude must be non-negative, got {}", mag)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
