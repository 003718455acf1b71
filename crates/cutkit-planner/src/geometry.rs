//! Angle conventions, rotation and cutter-side selectors.

use cutkit_core::{CutError, Point2, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on pocket passes for one shape.
pub const MAX_POCKET_STEPS: u32 = 10_000;

/// Rebase a bearing (degrees clockwise from north) onto the standard
/// counter-clockwise-from-east convention, folded into (-360, 360).
pub fn rebase_bearing(bearing_deg: f64) -> f64 {
    let mut wrapped = 450.0 - bearing_deg;
    if wrapped >= 360.0 {
        wrapped -= 360.0;
    } else if wrapped <= -360.0 {
        wrapped += 360.0;
    }
    wrapped
}

/// Bearing in degrees to a trigonometric angle in radians.
pub fn bearing_to_radians(bearing_deg: f64) -> f64 {
    rebase_bearing(bearing_deg).to_radians()
}

/// Rotate `p` about `pivot` by `angle_deg` (counter-clockwise positive).
pub fn rotate_point(p: Point2, pivot: Point2, angle_deg: f64) -> Point2 {
    let angle_rad = angle_deg.to_radians();
    let s = angle_rad.sin();
    let c = angle_rad.cos();
    let dx = p.x - pivot.x;
    let dy = p.y - pivot.y;
    Point2 {
        x: pivot.x + dx * c - dy * s,
        y: pivot.y + dx * s + dy * c,
    }
}

/// Number of whole `step_over` steps that fit in `span`.
///
/// Fails when the count exceeds [`MAX_POCKET_STEPS`], which happens with a
/// pocket overlap close to 100 %.
pub fn pocket_step_count(command: &'static str, span: f64, step_over: f64) -> Result<u32> {
    if !(step_over > 0.0) {
        return Err(CutError::parameter(command, "step_over", "must be > 0"));
    }
    let count = (span.abs() / step_over).floor();
    if !(count <= f64::from(MAX_POCKET_STEPS)) {
        return Err(CutError::parameter(
            command,
            "step_over",
            format!("{step_over} needs {count} pocket passes, limit is {MAX_POCKET_STEPS}"),
        ));
    }
    Ok(count as u32)
}

/// Which side of the programmed line the cutter runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compensation {
    #[serde(alias = "I")]
    Inside,
    #[default]
    #[serde(alias = "T")]
    None,
    #[serde(alias = "O")]
    Outside,
}

impl Compensation {
    /// -1 inside, 0 none, +1 outside.
    pub fn sign(&self) -> f64 {
        match self {
            Self::Inside => -1.0,
            Self::None => 0.0,
            Self::Outside => 1.0,
        }
    }

    /// Signed radius offset for a cutter of `diameter`.
    pub fn radius_offset(&self, diameter: f64) -> f64 {
        self.sign() * diameter / 2.0
    }
}

/// Cutting direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    #[serde(alias = "clockwise")]
    Cw,
    #[serde(alias = "counterclockwise")]
    Ccw,
}

impl Direction {
    pub fn is_clockwise(&self) -> bool {
        matches!(self, Self::Cw)
    }

    /// +1 clockwise, -1 counter-clockwise.
    pub fn sign(&self) -> f64 {
        if self.is_clockwise() {
            1.0
        } else {
            -1.0
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Self::Cw => Self::Ccw,
            Self::Ccw => Self::Cw,
        }
    }
}
