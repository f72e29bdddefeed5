//! N-body gravitational physics in SI units.
//!
//! Bodies attract each other through the exact Newtonian pairwise law
//! and are advanced with semi-implicit Euler integration: velocities
//! update from start-of-step accelerations, then positions update from
//! the already-updated velocities. That ordering is a stability choice
//! and must be preserved.

use glam::DVec3;
use rand::Rng;

use common::constants::{AU, G};
use common::{ConfigError, SimClock};

/// Mass of the Sun in kg.
pub const SUN_MASS: f64 = 1.989e30;

/// Celestial body kinds. Presentation-only: a `Star` renders as a light
/// source, a `Spaceship` as a marker mesh. The force law ignores the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
    Spaceship,
}

/// A gravitational body: point mass with position and velocity.
#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub kind: BodyKind,
    /// Mass in kg. Strictly positive, enforced at construction.
    pub mass: f64,
    /// Position in meters.
    pub position: DVec3,
    /// Velocity in m/s.
    pub velocity: DVec3,
    /// Visual radius in meters. No physical effect.
    pub radius: f64,
    pub color: [f32; 4],
}

impl Body {
    /// Create a body at rest at the origin.
    pub fn new(
        name: &str,
        kind: BodyKind,
        mass: f64,
        radius: f64,
        color: [f32; 4],
    ) -> Result<Self, ConfigError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass(mass));
        }
        Ok(Self {
            name: name.to_string(),
            kind,
            mass,
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            radius,
            color,
        })
    }

    /// Place the body at an absolute position.
    pub fn at(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    /// Give the body an absolute velocity.
    pub fn moving(mut self, velocity: DVec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Place the body on a circular orbit in the xy plane around a
    /// central mass sitting at the origin: `v = sqrt(G·M/r)` tangential.
    pub fn on_circular_orbit(mut self, central_mass: f64, distance: f64, angle: f64) -> Self {
        let speed = (G * central_mass / distance).sqrt();
        self.position = DVec3::new(angle.cos(), angle.sin(), 0.0) * distance;
        self.velocity = DVec3::new(-angle.sin(), angle.cos(), 0.0) * speed;
        self
    }

    /// Rebase position and velocity, currently interpreted as relative
    /// to `parent`, into absolute coordinates. One-time transform used
    /// at construction; no parent link is kept afterwards.
    pub fn relative_to(mut self, parent: &Body) -> Self {
        let (position, velocity) = absolute_from_relative(parent, self.position, self.velocity);
        self.position = position;
        self.velocity = velocity;
        self
    }

    /// Distance from the system origin, for infobox readouts.
    pub fn orbit_radius(&self) -> f64 {
        self.position.length()
    }

    /// Speed in m/s, for infobox readouts.
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

/// Convert parent-relative initial conditions into absolute coordinates.
pub fn absolute_from_relative(
    parent: &Body,
    relative_position: DVec3,
    relative_velocity: DVec3,
) -> (DVec3, DVec3) {
    (
        parent.position + relative_position,
        parent.velocity + relative_velocity,
    )
}

/// Gravitational acceleration imposed on `target` by `source`.
///
/// With `d = target.position - source.position` and `r = |d|`, the
/// result is `(-G·m_source / r²) · d/r`, i.e. attraction toward the
/// source. The law is singular at `r = 0`: callers must never pass
/// coincident bodies, otherwise the division produces non-finite
/// components that corrupt all subsequent state.
pub fn gravitational_acceleration(target: &Body, source: &Body) -> DVec3 {
    let d = target.position - source.position;
    let r = d.length();
    let a = -G * source.mass / (r * r);
    d * (a / r)
}

/// A gravitational system: an ordered list of bodies plus the clock.
///
/// Body order is stable (it doubles as the UI focus index) but has no
/// physical meaning; each body's acceleration sums contributions from
/// every other body regardless of position in the list.
pub struct SolarSystem {
    pub bodies: Vec<Body>,
    clock: SimClock,
}

impl SolarSystem {
    pub fn new(dt: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            bodies: Vec::new(),
            clock: SimClock::new(dt)?,
        })
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Replace the timestep; applies from the next step on.
    pub fn set_dt(&mut self, dt: f64) -> Result<(), ConfigError> {
        self.clock.set_dt(dt)
    }

    /// Load the Sun, the eight planets, and Earth's Moon with real
    /// orbital data (NASA planetary fact sheet), circular-orbit
    /// approximation. The Moon is specified relative to Earth.
    pub fn init_sol(&mut self) -> Result<(), ConfigError> {
        self.bodies.clear();

        let sun = Body::new("Sun", BodyKind::Star, SUN_MASS, 6.9551e8, [1.0, 0.95, 0.3, 1.0])?;
        self.bodies.push(sun);

        let planets: [(&str, f64, f64, f64, f64, [f32; 4]); 8] = [
            ("Mercury", 3.285e23, 2.4397e6, 5.79e10, 0.0, [0.7, 0.7, 0.7, 1.0]),
            ("Venus", 4.867e24, 6.0518e6, 1.082e11, 0.8, [0.9, 0.7, 0.5, 1.0]),
            ("Earth", 5.972e24, 6.371e6, 1.496e11, 1.5, [0.2, 0.4, 0.8, 1.0]),
            ("Mars", 6.39e23, 3.3895e6, 2.279e11, 2.3, [0.8, 0.4, 0.2, 1.0]),
            ("Jupiter", 1.898e27, 6.9911e7, 7.785e11, 3.5, [0.9, 0.8, 0.6, 1.0]),
            ("Saturn", 5.683e26, 5.8232e7, 1.4335e12, 4.2, [0.9, 0.85, 0.6, 1.0]),
            ("Uranus", 8.681e25, 2.5362e7, 2.8725e12, 5.0, [0.6, 0.8, 0.9, 1.0]),
            ("Neptune", 1.024e26, 2.4622e7, 4.4951e12, 5.8, [0.3, 0.4, 0.8, 1.0]),
        ];

        for (name, mass, radius, distance, angle, color) in planets {
            let planet = Body::new(name, BodyKind::Planet, mass, radius, color)?
                .on_circular_orbit(SUN_MASS, distance, angle);
            self.bodies.push(planet);
        }

        // Earth's Moon, given in Earth-relative coordinates.
        if let Some(earth) = self.find_body("Earth").cloned() {
            let moon =
                Body::new("Moon", BodyKind::Moon, 7.342e22, 1.7374e6, [0.6, 0.6, 0.6, 1.0])?
                    .at(DVec3::new(3.844e8, 0.0, 0.0))
                    .moving(DVec3::new(0.0, 1.022e3, 0.0))
                    .relative_to(&earth);
            self.bodies.push(moon);
        }

        Ok(())
    }

    /// Scatter `count` minor bodies on near-circular orbits between 2.1
    /// and 3.3 AU around the Sun.
    pub fn init_debris(&mut self, count: usize) -> Result<(), ConfigError> {
        self.bodies.clear();

        let sun = Body::new("Sun", BodyKind::Star, SUN_MASS, 6.9551e8, [1.0, 0.95, 0.3, 1.0])?;
        self.bodies.push(sun);

        let mut rng = rand::thread_rng();
        for i in 0..count {
            let distance = AU * (2.1 + rng.gen::<f64>() * 1.2);
            let angle = rng.gen::<f64>() * std::f64::consts::TAU;
            let speed_variation = 0.95 + rng.gen::<f64>() * 0.1;

            let mass = 1e15 + rng.gen::<f64>() * 1e17;
            let mut body = Body::new(
                &format!("Debris {}", i + 1),
                BodyKind::Spaceship,
                mass,
                5e4,
                [0.5, 0.5, 0.5, 1.0],
            )?
            .on_circular_orbit(SUN_MASS, distance, angle);
            body.velocity *= speed_variation;
            self.bodies.push(body);
        }

        Ok(())
    }

    /// Advance the system by one timestep.
    pub fn step(&mut self) {
        let n = self.bodies.len();
        let dt = self.clock.dt();

        // Accelerations from start-of-step positions only; no body sees
        // another body's mid-step update.
        let mut accelerations = vec![DVec3::ZERO; n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    accelerations[i] +=
                        gravitational_acceleration(&self.bodies[i], &self.bodies[j]);
                }
            }
        }

        // Semi-implicit Euler: new velocity first, then position from it.
        for (body, acceleration) in self.bodies.iter_mut().zip(&accelerations) {
            body.velocity += *acceleration * dt;
            body.position += body.velocity * dt;
        }

        self.clock.advance();
    }

    /// Total linear momentum, kg·m/s.
    pub fn total_momentum(&self) -> DVec3 {
        self.bodies.iter().map(|b| b.velocity * b.mass).sum()
    }

    /// Total mechanical energy in joules: kinetic plus pairwise potential.
    pub fn total_energy(&self) -> f64 {
        let mut energy = 0.0;
        for (i, body) in self.bodies.iter().enumerate() {
            energy += 0.5 * body.mass * body.velocity.length_squared();
            for other in &self.bodies[i + 1..] {
                let r = (body.position - other.position).length();
                energy -= G * body.mass * other.mass / r;
            }
        }
        energy
    }

    /// Find a body by name.
    pub fn find_body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }
}
