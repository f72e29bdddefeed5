//! The global simulation clock.

use crate::error::ConfigError;

/// Simulation time `t` and step size `dt`, both in seconds.
///
/// `t` only ever increases, and only through [`SimClock::advance`],
/// which the integrator calls once per step. `dt` may be overwritten
/// between steps by external control but never mid-step; every body in
/// a given step sees the same `dt`.
#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    t: f64,
    dt: f64,
}

impl SimClock {
    /// Create a clock at `t = 0` with the given step size.
    pub fn new(dt: f64) -> Result<Self, ConfigError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ConfigError::NonPositiveTimestep(dt));
        }
        Ok(Self { t: 0.0, dt })
    }

    /// Elapsed simulation time in seconds.
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Current step size in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Replace the step size. Takes effect at the next step; the clock
    /// is left unchanged when the new value is rejected.
    pub fn set_dt(&mut self, dt: f64) -> Result<(), ConfigError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ConfigError::NonPositiveTimestep(dt));
        }
        self.dt = dt;
        Ok(())
    }

    /// Advance the clock by one step. Called by the integrator only.
    pub fn advance(&mut self) {
        self.t += self.dt;
    }
}
