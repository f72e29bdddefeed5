//! Charged-particle dynamics inside a cyclotron.
//!
//! A particle feels the electric field only between the accelerating
//! plates and the magnetic field only inside the dee radius. Plate
//! polarity flips whenever a particle crosses past a plate, so the
//! electric force keeps pumping energy into the particle on every pass
//! while the magnetic field bends it back around.
//!
//! Integration is semi-implicit Euler with the magnetic term evaluated
//! at the start-of-step velocity.

use glam::DVec3;

use common::constants::{ELECTRON_MASS, E_CHARGE};
use common::{ConfigError, SimClock};

/// Default dee radius in meters.
pub const DEFAULT_RADIUS: f64 = 10.0;
/// Default plate half-gap in meters.
pub const DEFAULT_HALF_GAP: f64 = 0.5;
/// Default timestep in seconds.
pub const DEFAULT_DT: f64 = 1e-14;
/// Default electric field magnitude, N/C.
pub const DEFAULT_E_MAG: f64 = 1e7;
/// Default magnetic field magnitude, T.
pub const DEFAULT_B_MAG: f64 = 1e-2;

/// Sign state of the accelerating plates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Electric field points along +y. Initial state.
    Up,
    /// Electric field points along -y.
    Down,
}

/// A charged particle. Charge may carry either sign; mass must be
/// strictly positive.
#[derive(Debug, Clone)]
pub struct Particle {
    pub name: String,
    /// Charge in coulombs.
    pub charge: f64,
    /// Mass in kg. Strictly positive, enforced at construction.
    pub mass: f64,
    /// Position in meters.
    pub position: DVec3,
    /// Velocity in m/s.
    pub velocity: DVec3,
    pub color: [f32; 4],
}

impl Particle {
    /// Create a particle at rest at the origin.
    pub fn new(name: &str, charge: f64, mass: f64) -> Result<Self, ConfigError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass(mass));
        }
        Ok(Self {
            name: name.to_string(),
            charge,
            mass,
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            color: [1.0; 4],
        })
    }

    /// The electron used by the demonstration preset: at rest, one
    /// meter out from the center.
    pub fn electron() -> Self {
        Self {
            name: "Electron".to_string(),
            charge: E_CHARGE,
            mass: ELECTRON_MASS,
            position: DVec3::new(1.0, 0.0, 0.0),
            velocity: DVec3::ZERO,
            color: [1.0, 1.0, 0.0, 1.0],
        }
    }

    /// Place the particle at a position.
    pub fn at(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    /// Give the particle a velocity.
    pub fn moving(mut self, velocity: DVec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Distance from the chamber center, for infobox readouts.
    pub fn orbit_radius(&self) -> f64 {
        self.position.length()
    }

    /// Speed in m/s, for infobox readouts.
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

/// The cyclotron chamber: field configuration plus the tracked particles.
///
/// Particle order is stable (it doubles as the UI focus index) but has
/// no physical meaning; the field forces act on each particle
/// independently and particles do not interact with each other.
pub struct Cyclotron {
    pub particles: Vec<Particle>,
    /// Dee radius in meters. The magnetic field exists strictly inside it.
    radius: f64,
    /// Plate half-gap in meters. The electric field exists for
    /// `-half_gap <= y <= half_gap`, endpoints included.
    half_gap: f64,
    e_mag: f64,
    b_mag: f64,
    e_field: DVec3,
    b_field: DVec3,
    polarity: Polarity,
    clock: SimClock,
}

impl Cyclotron {
    /// Create an empty chamber with the default field magnitudes.
    pub fn new(radius: f64, half_gap: f64, dt: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            particles: Vec::new(),
            radius,
            half_gap,
            e_mag: DEFAULT_E_MAG,
            b_mag: DEFAULT_B_MAG,
            e_field: DVec3::new(0.0, DEFAULT_E_MAG, 0.0),
            b_field: DVec3::new(0.0, 0.0, -DEFAULT_B_MAG),
            polarity: Polarity::Up,
            clock: SimClock::new(dt)?,
        })
    }

    /// The canonical demonstration setup: default geometry and fields
    /// with a single electron at rest.
    pub fn electron_demo() -> Result<Self, ConfigError> {
        let mut cyclotron = Self::new(DEFAULT_RADIUS, DEFAULT_HALF_GAP, DEFAULT_DT)?;
        cyclotron.particles.push(Particle::electron());
        Ok(cyclotron)
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn half_gap(&self) -> f64 {
        self.half_gap
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn e_field(&self) -> DVec3 {
        self.e_field
    }

    pub fn b_field(&self) -> DVec3 {
        self.b_field
    }

    /// Replace the timestep; applies from the next step on.
    pub fn set_dt(&mut self, dt: f64) -> Result<(), ConfigError> {
        self.clock.set_dt(dt)
    }

    /// Replace the electric field magnitude. The field vector is
    /// re-derived immediately, keeping the current polarity sign.
    pub fn set_e_mag(&mut self, e_mag: f64) -> Result<(), ConfigError> {
        if !e_mag.is_finite() || e_mag < 0.0 {
            return Err(ConfigError::NegativeFieldMagnitude(e_mag));
        }
        self.e_mag = e_mag;
        self.e_field = match self.polarity {
            Polarity::Up => DVec3::new(0.0, e_mag, 0.0),
            Polarity::Down => DVec3::new(0.0, -e_mag, 0.0),
        };
        Ok(())
    }

    /// Replace the magnetic field magnitude. The field stays along -z.
    pub fn set_b_mag(&mut self, b_mag: f64) -> Result<(), ConfigError> {
        if !b_mag.is_finite() || b_mag < 0.0 {
            return Err(ConfigError::NegativeFieldMagnitude(b_mag));
        }
        self.b_mag = b_mag;
        self.b_field = DVec3::new(0.0, 0.0, -b_mag);
        Ok(())
    }

    /// Force the plates to `Up` polarity. Returns whether the state
    /// changed, so the visualization layer can toggle its indicator.
    pub fn polarity_up(&mut self) -> bool {
        if self.polarity != Polarity::Up {
            self.polarity = Polarity::Up;
            self.e_field = DVec3::new(0.0, self.e_mag, 0.0);
            return true;
        }
        false
    }

    /// Force the plates to `Down` polarity. Returns whether the state
    /// changed.
    pub fn polarity_down(&mut self) -> bool {
        if self.polarity != Polarity::Down {
            self.polarity = Polarity::Down;
            self.e_field = DVec3::new(0.0, -self.e_mag, 0.0);
            return true;
        }
        false
    }

    /// Electric force on a particle: `q·E` between the plates
    /// (inclusive on both ends), zero outside.
    pub fn electric_force(&self, particle: &Particle) -> DVec3 {
        let y = particle.position.y;
        if (-self.half_gap..=self.half_gap).contains(&y) {
            self.e_field * particle.charge
        } else {
            DVec3::ZERO
        }
    }

    /// Magnetic Lorentz force on a particle: `q·(v × B)` strictly
    /// inside the dee radius, zero outside.
    pub fn magnetic_force(&self, particle: &Particle) -> DVec3 {
        if particle.position.length() < self.radius {
            particle.velocity.cross(self.b_field) * particle.charge
        } else {
            DVec3::ZERO
        }
    }

    /// Advance every particle by one timestep.
    ///
    /// Both force contributions are evaluated from start-of-step state
    /// (the magnetic term uses the pre-update velocity), velocities
    /// update first, positions follow from the updated velocities, and
    /// plate crossings are judged on the post-step positions.
    pub fn step(&mut self) {
        let dt = self.clock.dt();

        for i in 0..self.particles.len() {
            let mass = self.particles[i].mass;
            let a_electric = self.electric_force(&self.particles[i]) / mass;
            let a_magnetic = self.magnetic_force(&self.particles[i]) / mass;

            let particle = &mut self.particles[i];
            particle.velocity += (a_electric + a_magnetic) * dt;
            particle.position += particle.velocity * dt;
        }

        self.clock.advance();
        self.check_plate_crossings();
    }

    /// Flip polarity for any particle that ended the step past a plate.
    /// No-op while the state already matches, so a particle loitering
    /// beyond a plate flips the field exactly once.
    fn check_plate_crossings(&mut self) {
        for i in 0..self.particles.len() {
            let y = self.particles[i].position.y;
            let flipped = if y < -self.half_gap {
                self.polarity_up()
            } else if y > self.half_gap {
                self.polarity_down()
            } else {
                false
            };

            if flipped {
                log::debug!(
                    "{} crossed a plate at t = {:.3e}; polarity now {:?}",
                    self.particles[i].name,
                    self.clock.time(),
                    self.polarity
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: DVec3, expected: DVec3, tolerance: f64) {
        let scale = expected.length().max(1.0);
        assert!(
            (actual - expected).length() <= tolerance * scale,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    fn chamber() -> Cyclotron {
        Cyclotron::new(DEFAULT_RADIUS, DEFAULT_HALF_GAP, DEFAULT_DT).unwrap()
    }

    #[test]
    fn test_particle_mass_must_be_positive() {
        assert_eq!(
            Particle::new("Bad", 1.0, 0.0).unwrap_err(),
            ConfigError::NonPositiveMass(0.0)
        );
        // Negative charge is legal.
        assert!(Particle::new("Anion", -E_CHARGE, ELECTRON_MASS).is_ok());
    }

    #[test]
    fn test_no_magnetic_force_outside_radius() {
        let cyclotron = chamber();
        let particle = Particle::electron()
            .at(DVec3::new(11.0, 0.0, 0.0))
            .moving(DVec3::new(1e6, 2e6, -3e6));

        assert_eq!(cyclotron.magnetic_force(&particle), DVec3::ZERO);

        // The boundary itself is outside: the region is strict.
        let on_rim = Particle::electron().at(DVec3::new(DEFAULT_RADIUS, 0.0, 0.0));
        assert_eq!(cyclotron.magnetic_force(&on_rim), DVec3::ZERO);
    }

    #[test]
    fn test_no_electric_force_outside_gap() {
        let cyclotron = chamber();
        let above = Particle::electron().at(DVec3::new(1.0, 0.6, 0.0));
        let below = Particle::electron().at(DVec3::new(1.0, -0.6, 0.0));

        assert_eq!(cyclotron.electric_force(&above), DVec3::ZERO);
        assert_eq!(cyclotron.electric_force(&below), DVec3::ZERO);

        // Plate positions themselves are inside the region.
        let on_top_plate = Particle::electron().at(DVec3::new(1.0, DEFAULT_HALF_GAP, 0.0));
        let on_bottom_plate = Particle::electron().at(DVec3::new(1.0, -DEFAULT_HALF_GAP, 0.0));
        assert!(cyclotron.electric_force(&on_top_plate).length() > 0.0);
        assert!(cyclotron.electric_force(&on_bottom_plate).length() > 0.0);
    }

    #[test]
    fn test_electric_force_is_q_times_e() {
        let cyclotron = chamber();
        let particle = Particle::electron();

        let force = cyclotron.electric_force(&particle);
        assert_close(
            force,
            DVec3::new(0.0, E_CHARGE * DEFAULT_E_MAG, 0.0),
            1e-12,
        );

        // Flipping the charge sign flips the force.
        let anion = Particle::new("Anion", -E_CHARGE, ELECTRON_MASS)
            .unwrap()
            .at(DVec3::new(1.0, 0.0, 0.0));
        assert_close(
            cyclotron.electric_force(&anion),
            DVec3::new(0.0, -E_CHARGE * DEFAULT_E_MAG, 0.0),
            1e-12,
        );
    }

    #[test]
    fn test_first_step_velocity_kick() {
        let mut cyclotron = Cyclotron::electron_demo().unwrap();
        cyclotron.step();

        // a = qE/m; dv = a·dt. The magnetic term contributes nothing at
        // rest (v × B = 0).
        let expected_dv = E_CHARGE * DEFAULT_E_MAG / ELECTRON_MASS * DEFAULT_DT;
        let electron = &cyclotron.particles[0];

        assert_close(electron.velocity, DVec3::new(0.0, expected_dv, 0.0), 1e-12);
        // Position moved with the updated velocity (semi-implicit).
        assert_close(
            electron.position,
            DVec3::new(1.0, expected_dv * DEFAULT_DT, 0.0),
            1e-12,
        );
        assert_eq!(cyclotron.clock().time(), DEFAULT_DT);
    }

    #[test]
    fn test_magnetic_term_uses_start_of_step_velocity() {
        let mut cyclotron = chamber();
        cyclotron.set_e_mag(0.0).unwrap();
        cyclotron
            .particles
            .push(Particle::electron().moving(DVec3::new(1e6, 0.0, 0.0)));

        cyclotron.step();

        // F = q(v0 × B) with v0 = (1e6, 0, 0), B = (0, 0, -1e-2):
        // v0 × B = (0, 1e4, 0).
        let expected_dv = E_CHARGE * 1e4 / ELECTRON_MASS * DEFAULT_DT;
        let electron = &cyclotron.particles[0];

        assert_eq!(electron.velocity.x, 1e6);
        assert_close(
            electron.velocity,
            DVec3::new(1e6, expected_dv, 0.0),
            1e-12,
        );
    }

    #[test]
    fn test_polarity_flips_once_per_crossing() {
        let mut cyclotron = chamber();
        cyclotron
            .particles
            .push(Particle::electron().at(DVec3::new(1.0, 0.7, 0.0)));
        assert_eq!(cyclotron.polarity(), Polarity::Up);

        // Above the top plate: no electric force out there, the particle
        // stays put, and polarity flips to Down exactly once.
        cyclotron.step();
        assert_eq!(cyclotron.polarity(), Polarity::Down);
        assert_eq!(cyclotron.e_field(), DVec3::new(0.0, -DEFAULT_E_MAG, 0.0));

        cyclotron.step();
        cyclotron.step();
        assert_eq!(cyclotron.polarity(), Polarity::Down);

        // Teleport below the bottom plate: flips back to Up.
        cyclotron.particles[0].position = DVec3::new(1.0, -0.7, 0.0);
        cyclotron.particles[0].velocity = DVec3::ZERO;
        cyclotron.step();
        assert_eq!(cyclotron.polarity(), Polarity::Up);
        assert_eq!(cyclotron.e_field(), DVec3::new(0.0, DEFAULT_E_MAG, 0.0));
    }

    #[test]
    fn test_field_setters_validate_and_rederive() {
        let mut cyclotron = chamber();

        assert!(cyclotron.set_e_mag(-1.0).is_err());
        assert_eq!(cyclotron.e_field(), DVec3::new(0.0, DEFAULT_E_MAG, 0.0));

        cyclotron.set_b_mag(5e-3).unwrap();
        assert_eq!(cyclotron.b_field(), DVec3::new(0.0, 0.0, -5e-3));

        // With Down polarity the new magnitude keeps the negative sign.
        cyclotron.polarity_down();
        cyclotron.set_e_mag(2e7).unwrap();
        assert_eq!(cyclotron.e_field(), DVec3::new(0.0, -2e7, 0.0));
    }

    #[test]
    fn test_manual_polarity_override_is_idempotent() {
        let mut cyclotron = chamber();
        assert!(!cyclotron.polarity_up());
        assert!(cyclotron.polarity_down());
        assert!(!cyclotron.polarity_down());
        assert!(cyclotron.polarity_up());
    }

    #[test]
    fn test_electron_gains_speed_over_many_steps() {
        let mut cyclotron = Cyclotron::electron_demo().unwrap();
        for _ in 0..10_000 {
            cyclotron.step();
        }
        assert!(cyclotron.particles[0].speed() > 0.0);
        assert!(cyclotron.particles[0].velocity.is_finite());
    }
}
