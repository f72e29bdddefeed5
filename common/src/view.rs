//! Readout formatting for the visualization layer.
//!
//! Rendering, camera control, and widgets are external concerns; the
//! simulation side only produces body positions and the label strings
//! defined here, and keeps the presentation-only selection state.

use crate::constants::SECONDS_PER_DAY;

/// Presentation-only view state: which body the camera follows and
/// whether per-body infoboxes are drawn. No physical effect.
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    /// Index into the system's body list for camera-follow.
    pub focus: usize,
    /// Whether infobox labels are visible.
    pub show_labels: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            focus: 0,
            show_labels: true,
        }
    }
}

/// Infobox text for one body: name, distance from the origin, speed.
pub fn body_label(name: &str, orbit_radius: f64, speed: f64) -> String {
    format!("{}\n|r| = {:.2e}m\n|v| = {:.2e}m/s", name, orbit_radius, speed)
}

/// Clock text for the solar system variant, with the elapsed day count.
pub fn time_label_days(t: f64) -> String {
    let day = (t / SECONDS_PER_DAY).floor() as i64;
    format!("t = {:.3e} (Day {})", t, day)
}

/// Clock text for the cyclotron variant.
pub fn time_label(t: f64) -> String {
    format!("t = {:.3e}", t)
}
