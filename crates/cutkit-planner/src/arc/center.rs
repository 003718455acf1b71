//! Circle or arc around an explicit center (CP).

use super::planner::{plan_arc, preflight, ArcSpec, CircleOption};
use super::{bearings, compensated_radius, default_prop, default_repetitions, snap};
use crate::geometry::{Compensation, Direction};
use crate::motion::Motion;
use cutkit_core::{require_finite, CuttingContext, MotionEmitter, Point2, Result, Vector2};
use cutkit_settings::ToolConfig;
use serde::{Deserialize, Serialize};

const COMMAND: &str = "CP";

/// Circle around `(center_x, center_y)`, entered at `start_bearing`.
///
/// A missing center coordinate defaults to the current position. When the
/// tool is not already on the entry point it is moved there first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterCircle {
    pub diameter: Option<f64>,
    #[serde(default)]
    pub center_x: Option<f64>,
    #[serde(default)]
    pub center_y: Option<f64>,
    #[serde(default)]
    pub compensation: Compensation,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub start_bearing: f64,
    #[serde(default)]
    pub end_bearing: f64,
    #[serde(default)]
    pub plunge: f64,
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,
    #[serde(default = "default_prop")]
    pub prop_x: f64,
    #[serde(default = "default_prop")]
    pub prop_y: f64,
    #[serde(default)]
    pub option: CircleOption,
    #[serde(default)]
    pub no_pull_up: bool,
    #[serde(default)]
    pub plunge_from_zero: bool,
}

impl CenterCircle {
    pub fn new(diameter: f64, center: Point2) -> Self {
        Self {
            diameter: Some(diameter),
            center_x: Some(center.x),
            center_y: Some(center.y),
            compensation: Compensation::None,
            direction: Direction::Cw,
            start_bearing: 0.0,
            end_bearing: 0.0,
            plunge: 0.0,
            repetitions: 1,
            prop_x: 1.0,
            prop_y: 1.0,
            option: CircleOption::Profile,
            no_pull_up: false,
            plunge_from_zero: false,
        }
    }

    pub fn with_bearings(mut self, start: f64, end: f64) -> Self {
        self.start_bearing = start;
        self.end_bearing = end;
        self
    }

    /// Entry point on the circumference and the canonical arc from there.
    pub fn resolve(&self, position: Point2, tool: &ToolConfig) -> Result<(Point2, ArcSpec)> {
        let radius = compensated_radius(
            COMMAND,
            self.diameter,
            self.compensation.radius_offset(tool.cutter_diameter),
        )?;
        let (begin, finish) = bearings(COMMAND, self.start_bearing, self.end_bearing)?;
        let center = Point2::new(
            require_finite(COMMAND, "center_x", self.center_x.unwrap_or(position.x))?,
            require_finite(COMMAND, "center_y", self.center_y.unwrap_or(position.y))?,
        );

        let entry = center.offset(Vector2::new(radius * begin.cos(), radius * begin.sin()));
        let offset = snap(entry.to(center));
        let end = if self.start_bearing == self.end_bearing {
            entry
        } else {
            center.offset(Vector2::new(radius * finish.cos(), radius * finish.sin()))
        };

        let spec = ArcSpec::new(end, offset, self.direction)
            .with_plunge(self.plunge, self.repetitions)
            .with_scale(self.prop_x, self.prop_y)
            .with_option(self.option)
            .with_no_pull_up(self.no_pull_up)
            .with_plunge_from_zero(self.plunge_from_zero);
        Ok((entry, spec))
    }
}

/// Cut a circle around an explicit center, approaching the entry point if needed.
pub fn cut_center_circle<E: MotionEmitter + ?Sized>(
    ctx: &mut CuttingContext,
    tool: &ToolConfig,
    emitter: &mut E,
    circle: &CenterCircle,
) -> Result<()> {
    let start = ctx.position;
    let (entry, spec) = circle.resolve(Point2::from(start), tool)?;
    preflight(COMMAND, &spec, tool)?;

    if !start.same_xy(entry.x, entry.y) {
        tracing::debug!(x = entry.x, y = entry.y, "approaching circle entry point");
        let keep_depth = ctx.last_no_pullup;
        let mut motion = Motion::new(ctx, emitter);
        if start.z < tool.safe_z && !keep_depth {
            motion.rapid_z(tool.safe_z);
        }
        motion.rapid_xy(entry);
        if motion.position().z != start.z && !keep_depth {
            motion.plunge_to(start.z);
        }
    }

    plan_arc(COMMAND, ctx, tool, emitter, &spec)
}
