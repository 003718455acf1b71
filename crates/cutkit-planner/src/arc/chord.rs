//! Arc by chord length and height (CA).

use super::planner::{plan_arc, ArcSpec};
use super::{default_prop, default_repetitions};
use crate::geometry::{Compensation, Direction};
use cutkit_core::{require_present, CutError, CuttingContext, MotionEmitter, Point2, Result, Vector2};
use cutkit_settings::ToolConfig;
use serde::{Deserialize, Serialize};

const COMMAND: &str = "CA";

/// Arc spanning `chord` along +X (or -X counter-clockwise), bulging by `height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordArc {
    pub chord: Option<f64>,
    pub height: Option<f64>,
    #[serde(default)]
    pub compensation: Compensation,
    #[serde(default)]
    pub direction: Direction,
    /// Accepted for compatibility; does not affect the path
    #[serde(default)]
    pub angle: Option<f64>,
    #[serde(default)]
    pub plunge: f64,
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,
    #[serde(default = "default_prop")]
    pub prop_x: f64,
    #[serde(default = "default_prop")]
    pub prop_y: f64,
    /// Accepted for compatibility; tabs are not cut
    #[serde(default)]
    pub tabs: Option<u32>,
    #[serde(default)]
    pub no_pull_up: bool,
    #[serde(default)]
    pub plunge_from_zero: bool,
}

impl ChordArc {
    pub fn new(chord: f64, height: f64) -> Self {
        Self {
            chord: Some(chord),
            height: Some(height),
            compensation: Compensation::None,
            direction: Direction::Cw,
            angle: None,
            plunge: 0.0,
            repetitions: 1,
            prop_x: 1.0,
            prop_y: 1.0,
            tabs: None,
            no_pull_up: false,
            plunge_from_zero: false,
        }
    }

    /// Radius of the arc after cutter compensation.
    pub fn radius(&self, tool: &ToolConfig) -> Result<f64> {
        let chord = require_present(COMMAND, "chord", self.chord)?.abs();
        let height = require_present(COMMAND, "height", self.height)?.abs();
        if height == 0.0 {
            return Err(CutError::geometry(COMMAND, "height is zero"));
        }
        let radius = height / 2.0
            + (chord * chord) / (8.0 * height)
            + self.compensation.radius_offset(tool.cutter_diameter);
        if radius <= 0.0 {
            return Err(CutError::geometry(
                COMMAND,
                format!("radius must be positive, got {radius}"),
            ));
        }
        Ok(radius)
    }

    /// Canonical arc starting at `start`.
    pub fn resolve(&self, start: Point2, tool: &ToolConfig) -> Result<ArcSpec> {
        let radius = self.radius(tool)?;
        // radius() has already checked both are present
        let chord = self.chord.unwrap_or_default().abs();
        let height = self.height.unwrap_or_default().abs();

        let half = if self.direction.is_clockwise() {
            chord / 2.0
        } else {
            -chord / 2.0
        };
        let offset = Vector2::new(half, height - radius);
        let end = start.offset(Vector2::new(2.0 * half, 0.0));

        Ok(ArcSpec::new(end, offset, self.direction)
            .with_plunge(self.plunge, self.repetitions)
            .with_scale(self.prop_x, self.prop_y)
            .with_no_pull_up(self.no_pull_up)
            .with_plunge_from_zero(self.plunge_from_zero))
    }
}

/// Cut a chord/height arc from the current position.
pub fn cut_chord_arc<E: MotionEmitter + ?Sized>(
    ctx: &mut CuttingContext,
    tool: &ToolConfig,
    emitter: &mut E,
    arc: &ChordArc,
) -> Result<()> {
    if let Some(angle) = arc.angle {
        tracing::warn!(angle, "CA angle is accepted but not used");
    }
    if let Some(tabs) = arc.tabs {
        tracing::warn!(tabs, "CA tabs are accepted but not cut");
    }
    let spec = arc.resolve(Point2::from(ctx.position), tool)?;
    tracing::debug!(end_x = spec.end.x, end_y = spec.end.y, "resolved chord arc");
    plan_arc(COMMAND, ctx, tool, emitter, &spec)
}
