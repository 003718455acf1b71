//! Canonical executor for all circular motion.
//!
//! Every arc and circle command ends up here as an [`ArcSpec`]: an end point
//! and a center offset relative to the current position. The planner decides
//! between direct circular moves and interpolated line segments, then handles
//! repetitions, plunging and pocketing.

use crate::geometry::{pocket_step_count, Direction};
use crate::interpolate::{ArcInterpolator, ArcPath, EllipseFrame, ZProfile};
use crate::motion::Motion;
use cutkit_core::{
    require_finite, CutError, CuttingContext, MotionEmitter, MoveDirective, Point2, Result,
    Vector2,
};
use cutkit_settings::ToolConfig;
use serde::{Deserialize, Serialize};

/// What a circular command cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleOption {
    /// Cut the outline only
    #[default]
    Profile,
    /// Clear the inside with nested rings, outside in
    Pocket,
    /// Ramp down by the plunge while cutting each pass
    Spiral,
    /// Spiral, then one flat pass at the final depth
    SpiralWithBottom,
}

impl CircleOption {
    pub fn is_spiral(&self) -> bool {
        matches!(self, Self::Spiral | Self::SpiralWithBottom)
    }
}

/// Canonical arc or circle description.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSpec {
    /// Absolute end point, unscaled
    pub end: Point2,
    /// Center relative to the start position, unscaled
    pub center_offset: Vector2,
    pub direction: Direction,
    /// Depth change per repetition (negative cuts deeper)
    pub plunge: f64,
    pub repetitions: u32,
    /// X/Y proportions applied about the start point
    pub scale: Vector2,
    pub option: CircleOption,
    pub no_pull_up: bool,
    pub plunge_from_zero: bool,
}

impl ArcSpec {
    pub fn new(end: Point2, center_offset: Vector2, direction: Direction) -> Self {
        Self {
            end,
            center_offset,
            direction,
            plunge: 0.0,
            repetitions: 1,
            scale: Vector2::new(1.0, 1.0),
            option: CircleOption::Profile,
            no_pull_up: false,
            plunge_from_zero: false,
        }
    }

    pub fn with_plunge(mut self, plunge: f64, repetitions: u32) -> Self {
        self.plunge = plunge;
        self.repetitions = repetitions;
        self
    }

    pub fn with_scale(mut self, x: f64, y: f64) -> Self {
        self.scale = Vector2::new(x, y);
        self
    }

    pub fn with_option(mut self, option: CircleOption) -> Self {
        self.option = option;
        self
    }

    pub fn with_no_pull_up(mut self, no_pull_up: bool) -> Self {
        self.no_pull_up = no_pull_up;
        self
    }

    pub fn with_plunge_from_zero(mut self, plunge_from_zero: bool) -> Self {
        self.plunge_from_zero = plunge_from_zero;
        self
    }

    fn validate(&self, command: &'static str) -> Result<()> {
        require_finite(command, "end_x", self.end.x)?;
        require_finite(command, "end_y", self.end.y)?;
        require_finite(command, "center_x", self.center_offset.x)?;
        require_finite(command, "center_y", self.center_offset.y)?;
        require_finite(command, "plunge", self.plunge)?;
        if self.repetitions == 0 {
            return Err(CutError::parameter(command, "repetitions", "must be at least 1"));
        }
        for (param, value) in [("prop_x", self.scale.x), ("prop_y", self.scale.y)] {
            require_finite(command, param, value)?;
            if value == 0.0 {
                return Err(CutError::parameter(command, param, "must not be zero"));
            }
        }
        if self.center_offset.is_zero() {
            return Err(CutError::geometry(command, "center offset is zero"));
        }
        Ok(())
    }
}

/// Cut an arc or circle from the current position (the CG command).
pub fn cut_arc<E: MotionEmitter + ?Sized>(
    ctx: &mut CuttingContext,
    tool: &ToolConfig,
    emitter: &mut E,
    spec: &ArcSpec,
) -> Result<()> {
    plan_arc("CG", ctx, tool, emitter, spec)
}

/// Shared entry point for CG and the resolvers; errors carry `command`.
pub(crate) fn plan_arc<E: MotionEmitter + ?Sized>(
    command: &'static str,
    ctx: &mut CuttingContext,
    tool: &ToolConfig,
    emitter: &mut E,
    spec: &ArcSpec,
) -> Result<()> {
    let ring_step = preflight(command, spec, tool)?;

    ctx.arc_start = ctx.position;
    let start = ctx.arc_start;
    let origin = Point2::from(start);
    let scale = spec.scale;

    let force_interpolation = scale.x.abs() != scale.y.abs() || ctx.transforms.any_active();
    let mirrored = (scale.x < 0.0) != (scale.y < 0.0);
    let closed = origin.approx_eq(spec.end);

    let run = ArcRun {
        frame: EllipseFrame::new(origin, scale),
        origin,
        spec,
        tool,
        force_interpolation,
        ring_step,
        // Mirroring a circular move reverses its rotation sense
        arc_clockwise: spec.direction.is_clockwise() != mirrored,
    };
    tracing::debug!(
        command,
        option = ?spec.option,
        force_interpolation,
        closed,
        radius = spec.center_offset.length(),
        "planning arc"
    );

    ctx.last_no_pullup = spec.plunge_from_zero;
    let mut motion = Motion::new(ctx, emitter);
    let mut current_z = start.z;

    if spec.plunge_from_zero && current_z != 0.0 {
        current_z = 0.0;
        motion.rapid_z(current_z);
    }

    let spiral = spec.option.is_spiral();
    for rep in 0..spec.repetitions {
        if spec.plunge != 0.0 && !spiral {
            current_z += spec.plunge;
            motion.plunge_to(current_z);
        }

        if spec.option == CircleOption::Pocket {
            run.pocket(&mut motion, current_z);
            continue;
        }

        if spiral {
            run.shape(&mut motion, ZProfile::spiral(current_z, spec.plunge));
            current_z += spec.plunge;
        } else {
            run.shape(&mut motion, ZProfile::flat(current_z));
        }

        if rep + 1 < spec.repetitions && !closed {
            motion.retract(tool.safe_z);
            motion.rapid_xy(origin);
            if spiral {
                motion.plunge_to(current_z);
            }
        }
    }

    if spec.option == CircleOption::SpiralWithBottom {
        if !closed {
            motion.retract(tool.safe_z);
            motion.rapid_xy(origin);
            motion.plunge_to(current_z);
        }
        run.shape(&mut motion, ZProfile::flat(current_z));
    }

    if !spec.no_pull_up && motion.position().z != start.z {
        motion.rapid_z(start.z);
    }
    Ok(())
}

/// Check everything that can fail before any directive is emitted.
///
/// Returns the unscaled distance between pocket rings (zero unless pocketing).
pub(crate) fn preflight(
    command: &'static str,
    spec: &ArcSpec,
    tool: &ToolConfig,
) -> Result<f64> {
    spec.validate(command)?;
    if spec.option != CircleOption::Pocket {
        return Ok(0.0);
    }
    // Ring spacing after scaling must not exceed step_over
    let ring_step = tool.step_over() / spec.scale.x.abs().max(spec.scale.y.abs());
    pocket_step_count(command, spec.center_offset.length(), ring_step)?;
    Ok(ring_step)
}

/// Offsets of successive pocket rings from the start point.
///
/// Rings step by `step_over` toward the center and stop before the offset
/// reaches the radius, so neither axis ever exceeds it. Empty when
/// `step_over` is not positive.
pub fn pocket_steps(center_offset: Vector2, step_over: f64) -> impl Iterator<Item = Vector2> {
    let radius = center_offset.length();
    let bearing = center_offset.y.atan2(center_offset.x);
    let step = Vector2::new(step_over * bearing.cos(), step_over * bearing.sin());
    let count = if step_over > 0.0 && radius > 0.0 {
        // Saturating cast; the take_while below is the real bound
        (radius / step_over).ceil().min(f64::from(u32::MAX)) as u32
    } else {
        0
    };

    (0..count)
        .map(move |j| step.scale(f64::from(j), f64::from(j)))
        .take_while(move |s| s.length() < radius)
}

struct ArcRun<'a> {
    spec: &'a ArcSpec,
    tool: &'a ToolConfig,
    origin: Point2,
    frame: EllipseFrame,
    force_interpolation: bool,
    /// Unscaled distance between pocket rings
    ring_step: f64,
    arc_clockwise: bool,
}

impl ArcRun<'_> {
    /// The programmed arc, once.
    fn shape<E: MotionEmitter + ?Sized>(&self, motion: &mut Motion<'_, E>, z: ZProfile) {
        self.segment(
            motion,
            ArcPath {
                start: self.origin,
                end: self.spec.end,
                center_offset: self.spec.center_offset,
                clockwise: self.spec.direction.is_clockwise(),
            },
            z,
        );
    }

    /// Emit one arc, given on the unscaled circle.
    fn segment<E: MotionEmitter + ?Sized>(
        &self,
        motion: &mut Motion<'_, E>,
        path: ArcPath,
        z: ZProfile,
    ) {
        let feed = motion.xy_feed();
        if self.force_interpolation {
            for directive in ArcInterpolator::new(path, self.frame, z, self.tool.arc_step, feed) {
                motion.emit(directive);
            }
            return;
        }

        let end = self.frame.map(path.end);
        let offset = self.frame.map_offset(path.center_offset);
        let mut directive =
            MoveDirective::arc(self.arc_clockwise, end.x, end.y, offset.x, offset.y, feed);
        if z.spiral {
            directive = directive.with_z(z.start_z + z.plunge);
        }
        motion.emit(directive);
    }

    /// Nested full circles stepping from the start point toward the center.
    fn pocket<E: MotionEmitter + ?Sized>(
        &self,
        motion: &mut Motion<'_, E>,
        current_z: f64,
    ) {
        let offset = self.spec.center_offset;

        let mut rings = 0usize;
        for stepped in pocket_steps(offset, self.ring_step) {
            let ring_start = self.origin.offset(stepped);
            if rings > 0 {
                motion.line_to(self.frame.map(ring_start));
            }
            self.segment(
                motion,
                ArcPath {
                    start: ring_start,
                    end: ring_start,
                    center_offset: offset.sub(stepped),
                    clockwise: self.spec.direction.is_clockwise(),
                },
                ZProfile::flat(current_z),
            );
            rings += 1;
        }
        tracing::debug!(rings, ring_step = self.ring_step, "pocketed circle");

        motion.rapid_z(self.tool.safe_z);
        motion.rapid_xy(self.origin);
    }
}
