//! Common utilities for physics simulations
//!
//! This crate provides the shared simulation clock, configuration error
//! types, and readout formatting used by both the solar system and
//! cyclotron simulation projects.

pub mod clock;
pub mod error;
pub mod view;

pub use clock::*;
pub use error::*;
pub use view::*;

/// Physical constants used in simulations
pub mod constants {
    /// Gravitational constant, m³ kg⁻¹ s⁻²
    pub const G: f64 = 6.674e-11;

    /// One astronomical unit in meters
    pub const AU: f64 = 1.496e11;

    /// Seconds in one day
    pub const SECONDS_PER_DAY: f64 = 86_400.0;

    /// Elementary charge, coulombs
    pub const E_CHARGE: f64 = 1.6e-19;

    /// Electron rest mass, kg
    pub const ELECTRON_MASS: f64 = 9.109e-31;

    /// Vacuum permittivity ε₀, F/m
    pub const EPSILON_0: f64 = 8.854e-12;
}
