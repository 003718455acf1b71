//! Arc and circle commands.
//!
//! Three resolvers normalize different user parameterizations (chord and
//! height, diameter and bearings, explicit center) into an [`ArcSpec`] and
//! hand it to the canonical planner.

mod center;
mod chord;
mod diameter;
mod planner;

pub use center::{cut_center_circle, CenterCircle};
pub use chord::{cut_chord_arc, ChordArc};
pub use diameter::{cut_diameter_circle, DiameterCircle};
pub use planner::{cut_arc, pocket_steps, ArcSpec, CircleOption};

use cutkit_core::{require_finite, CutError, Result, Vector2};

/// Offsets closer to zero than this are written as exactly zero.
const SNAP_TOLERANCE: f64 = 1e-9;

pub(crate) fn default_repetitions() -> u32 {
    1
}

pub(crate) fn default_prop() -> f64 {
    1.0
}

/// Clear trigonometric noise such as `cos(pi/2)`.
pub(crate) fn snap(v: Vector2) -> Vector2 {
    let clean = |c: f64| if c.abs() < SNAP_TOLERANCE { 0.0 } else { c };
    Vector2::new(clean(v.x), clean(v.y))
}

/// Validate a diameter and return the compensated radius.
pub(crate) fn compensated_radius(
    command: &'static str,
    diameter: Option<f64>,
    radius_offset: f64,
) -> Result<f64> {
    let diameter = cutkit_core::require_present(command, "diameter", diameter)?;
    if diameter <= 0.0 {
        return Err(CutError::geometry(
            command,
            format!("diameter must be positive, got {diameter}"),
        ));
    }
    let radius = diameter / 2.0 + radius_offset;
    if radius <= 0.0 {
        return Err(CutError::geometry(
            command,
            format!("compensated radius must be positive, got {radius}"),
        ));
    }
    Ok(radius)
}

/// Validate start and end bearings, returning them in radians.
pub(crate) fn bearings(command: &'static str, start: f64, end: f64) -> Result<(f64, f64)> {
    let start = require_finite(command, "start_bearing", start)?;
    let end = require_finite(command, "end_bearing", end)?;
    Ok((
        crate::geometry::bearing_to_radians(start),
        crate::geometry::bearing_to_radians(end),
    ))
}
