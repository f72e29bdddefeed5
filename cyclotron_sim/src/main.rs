//! Cyclotron Simulation (headless driver)
//!
//! Accelerates an electron between charged plates while a magnetic
//! field bends it into an outward spiral. Rendering and widgets belong
//! to a separate front end; this driver decides pacing and termination
//! and feeds the configuration surface (dt, |E|, |B|).
//!
//! Usage: cyclotron_sim [STEPS] [DT_SECONDS] [E_MAG] [B_MAG]
//!
//! Defaults: 1_000_000 steps of 1e-14 s, |E| = 1e7 N/C, |B| = 1e-2 T.

mod physics;

use common::{body_label, time_label, ViewOptions};
use physics::Cyclotron;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let steps: u64 = parse_arg(&args, 1)?.unwrap_or(1_000_000);

    let mut cyclotron = Cyclotron::electron_demo()?;
    if let Some(dt) = parse_arg(&args, 2)? {
        cyclotron.set_dt(dt)?;
    }
    if let Some(e_mag) = parse_arg(&args, 3)? {
        cyclotron.set_e_mag(e_mag)?;
    }
    if let Some(b_mag) = parse_arg(&args, 4)? {
        cyclotron.set_b_mag(b_mag)?;
    }
    let view = ViewOptions::default();

    log::info!(
        "cyclotron: dee radius {}m, dt = {:.2e}s, E = {:?}, B = {:?}",
        cyclotron.radius(),
        cyclotron.clock().dt(),
        cyclotron.e_field(),
        cyclotron.b_field()
    );

    let report_every = (steps / 20).max(1);
    for step in 0..steps {
        cyclotron.step();
        if (step + 1) % report_every == 0 {
            report(&cyclotron, &view);
        }
    }
    report(&cyclotron, &view);

    Ok(())
}

/// Emit the readouts the on-screen labels would show.
fn report(cyclotron: &Cyclotron, view: &ViewOptions) {
    log::info!("{}", time_label(cyclotron.clock().time()));

    if view.show_labels {
        for particle in &cyclotron.particles {
            log::info!(
                "{}",
                body_label(&particle.name, particle.orbit_radius(), particle.speed())
            );
        }
    }

    if let Some(focus) = cyclotron.particles.get(view.focus) {
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
