//! Solar System Simulation (headless driver)
//!
//! Advances the solar system preset with a fixed timestep and reports
//! per-body readouts through the log. Rendering, camera control, and
//! widgets belong to a separate front end that reads the same state;
//! this driver only decides pacing and termination.
//!
//! Usage: solar_sim [STEPS] [DT_SECONDS] [REPORT_EVERY]
//!
//! Defaults: 86400 steps of 100 s (100 simulated days), reporting every
//! 8640 steps.

mod physics;

use common::{body_label, time_label_days, ViewOptions};
use physics::SolarSystem;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let steps: u64 = parse_arg(&args, 1)?.unwrap_or(86_400);
    let dt: f64 = parse_arg(&args, 2)?.unwrap_or(100.0);
    let report_every: u64 = parse_arg(&args, 3)?.unwrap_or(8_640);

    let mut system = SolarSystem::new(dt)?;
    system.init_sol()?;
    let view = ViewOptions::default();

    log::info!(
        "simulating {} bodies for {} steps, dt = {:.2e}s",
        system.bodies.len(),
        steps,
        system.clock().dt()
    );

    for step in 0..steps {
        system.step();
        if report_every > 0 && (step + 1) % report_every == 0 {
            report(&system, &view);
        }
    }
    report(&system, &view);

    Ok(())
}

/// Emit the readouts the on-screen labels would show.
fn report(system: &SolarSystem, view: &ViewOptions) {
    log::info!("{}", time_label_days(system.clock().time()));

    if view.show_labels {
        for body in &system.bodies {
            log::info!("{}", body_label(&body.name, body.orbit_radius(), body.speed()));
        }
    }

    if let Some(focus) = system.bodies.get(view.focus) {
        log::debug!("camera focus: {}", focus.name);
    }
}

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize) -> Result<Option<T>, String>
where
    T::Err: std::fmt::Display,
{
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| format!("bad argument {:?}: {}", raw, e)),
        None => Ok(None),
    }
}
