//! Circle or arc by diameter and bearings, starting at the current position (CC).

use super::planner::{plan_arc, ArcSpec, CircleOption};
use super::{bearings, compensated_radius, default_prop, default_repetitions, snap};
use crate::geometry::{Compensation, Direction};
use cutkit_core::{CuttingContext, MotionEmitter, Point2, Result, Vector2};
use cutkit_settings::ToolConfig;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const COMMAND: &str = "CC";

/// Circle whose start point lies on the circumference at `start_bearing`.
///
/// Bearings are degrees clockwise from north. Equal bearings cut a full circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiameterCircle {
    pub diameter: Option<f64>,
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

impl DiameterCircle {
    pub fn new(diameter: f64) -> Self {
        Self {
            diameter: Some(diameter),
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

    /// Canonical arc starting at `start`.
    pub fn resolve(&self, start: Point2, tool: &ToolConfig) -> Result<ArcSpec> {
        let radius = compensated_radius(
            COMMAND,
            self.diameter,
            self.compensation.radius_offset(tool.cutter_diameter),
        )?;
        let (begin, finish) = bearings(COMMAND, self.start_bearing, self.end_bearing)?;

        let offset = snap(Vector2::new(
            radius * (begin + PI).cos(),
            radius * (begin + PI).sin(),
        ));
        let center = start.offset(offset);
        let end = if self.start_bearing == self.end_bearing {
            start
        } else {
            center.offset(Vector2::new(radius * finish.cos(), radius * finish.sin()))
        };

        Ok(ArcSpec::new(end, offset, self.direction)
            .with_plunge(self.plunge, self.repetitions)
            .with_scale(self.prop_x, self.prop_y)
            .with_option(self.option)
            .with_no_pull_up(self.no_pull_up)
            .with_plunge_from_zero(self.plunge_from_zero))
    }
}

/// Cut a diameter/bearing circle from the current position.
pub fn cut_diameter_circle<E: MotionEmitter + ?Sized>(
    ctx: &mut CuttingContext,
    tool: &ToolConfig,
    emitter: &mut E,
    circle: &DiameterCircle,
) -> Result<()> {
    let spec = circle.resolve(Point2::from(ctx.position), tool)?;
    tracing::debug!(
        center_x = spec.center_offset.x,
        center_y = spec.center_offset.y,
        "resolved diameter circle"
    );
    plan_arc(COMMAND, ctx, tool, emitter, &spec)
}
