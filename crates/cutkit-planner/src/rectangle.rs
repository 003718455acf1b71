//! Rectangle profiling and pocketing (CR).
//!
//! Corners are numbered 1 to 4. Seen from the start corner the rectangle
//! extends along the start corner's axis signs; corner 4 is always the
//! start corner itself and every lap ends there.

use crate::geometry::{pocket_step_count, rotate_point, Compensation, Direction};
use crate::motion::Motion;
use cutkit_core::{
    require_finite, require_present, CutError, CuttingContext, MotionEmitter, MoveDirective,
    Point2, Result,
};
use cutkit_settings::ToolConfig;
use serde::{Deserialize, Serialize};

const COMMAND: &str = "CR";

/// Fractions of the per-pass plunge reached at each corner of a spiral first lap.
const SPIRAL_FRACTIONS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];

/// Where the rectangle starts relative to the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StartCorner {
    /// The current position (or explicit center) is the rectangle center
    Center,
    First,
    Second,
    Third,
    /// Bottom-left start, extending toward +X and +Y
    #[default]
    Fourth,
}

impl StartCorner {
    /// Traversal sign along X and Y.
    pub fn axis_signs(&self) -> (f64, f64) {
        match self {
            Self::First => (1.0, -1.0),
            Self::Second => (-1.0, -1.0),
            Self::Third => (-1.0, 1.0),
            Self::Fourth | Self::Center => (1.0, 1.0),
        }
    }
}

impl TryFrom<u8> for StartCorner {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Center),
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            4 => Ok(Self::Fourth),
            other => Err(format!("start corner must be 0-4, got {other}")),
        }
    }
}

impl From<StartCorner> for u8 {
    fn from(corner: StartCorner) -> Self {
        match corner {
            StartCorner::Center => 0,
            StartCorner::First => 1,
            StartCorner::Second => 2,
            StartCorner::Third => 3,
            StartCorner::Fourth => 4,
        }
    }
}

/// Corner visit order for a start corner and direction.
pub fn corner_order(corner: StartCorner, direction: Direction) -> [u8; 4] {
    let reversed = matches!(
        (corner, direction),
        (StartCorner::First, Direction::Ccw)
            | (StartCorner::Second, Direction::Cw)
            | (StartCorner::Third, Direction::Ccw)
            | (StartCorner::Fourth, Direction::Cw)
            | (StartCorner::Center, Direction::Cw)
    );
    if reversed {
        [3, 2, 1, 4]
    } else {
        [1, 2, 3, 4]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectOption {
    #[default]
    Profile,
    PocketOutsideIn,
    PocketInsideOut,
}

impl RectOption {
    pub fn is_pocket(&self) -> bool {
        !matches!(self, Self::Profile)
    }
}

/// Axis used for plunging. Only Z motion is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlungeAxis {
    #[default]
    Z,
    A,
}

/// Rectangle command parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleSpec {
    pub len_x: Option<f64>,
    pub len_y: Option<f64>,
    #[serde(default)]
    pub compensation: Compensation,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub start_corner: StartCorner,
    #[serde(default)]
    pub plunge: f64,
    #[serde(default = "crate::arc::default_repetitions")]
    pub repetitions: u32,
    #[serde(default)]
    pub option: RectOption,
    #[serde(default)]
    pub plunge_from_zero: bool,
    /// Degrees, counter-clockwise positive
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub plunge_axis: PlungeAxis,
    /// Ramp down over the corners of the first lap
    #[serde(default)]
    pub spiral_first_pass: bool,
    #[serde(default)]
    pub center_x: Option<f64>,
    #[serde(default)]
    pub center_y: Option<f64>,
    #[serde(default)]
    pub no_pull_up: bool,
}

impl RectangleSpec {
    pub fn new(len_x: f64, len_y: f64) -> Self {
        Self {
            len_x: Some(len_x),
            len_y: Some(len_y),
            compensation: Compensation::None,
            direction: Direction::Cw,
            start_corner: StartCorner::Fourth,
            plunge: 0.0,
            repetitions: 1,
            option: RectOption::Profile,
            plunge_from_zero: false,
            rotation: 0.0,
            plunge_axis: PlungeAxis::Z,
            spiral_first_pass: false,
            center_x: None,
            center_y: None,
            no_pull_up: false,
        }
    }

    pub fn with_plunge(mut self, plunge: f64, repetitions: u32) -> Self {
        self.plunge = plunge;
        self.repetitions = repetitions;
        self
    }

    /// Corners of the outer lap in visit order, as cut from `position`.
    pub fn outline(&self, position: Point2, tool: &ToolConfig) -> Result<[Point2; 4]> {
        let layout = Layout::resolve(self, position, tool)?;
        Ok(layout.order.map(|n| layout.corner(n, layout.inset(0))))
    }
}

/// Resolved rectangle geometry.
#[derive(Debug, Clone)]
struct Layout {
    base: Point2,
    len_x: f64,
    len_y: f64,
    x_dir: f64,
    y_dir: f64,
    order: [u8; 4],
    pivot: Point2,
    rotation: f64,
    step_over: f64,
    steps: u32,
    option: RectOption,
}

impl Layout {
    fn resolve(spec: &RectangleSpec, position: Point2, tool: &ToolConfig) -> Result<Self> {
        let len_x = require_present(COMMAND, "len_x", spec.len_x)?;
        let len_y = require_present(COMMAND, "len_y", spec.len_y)?;
        let rotation = require_finite(COMMAND, "rotation", spec.rotation)?;
        require_finite(COMMAND, "plunge", spec.plunge)?;
        if spec.repetitions == 0 {
            return Err(CutError::parameter(COMMAND, "repetitions", "must be at least 1"));
        }

        let (x_dir, y_dir) = spec.start_corner.axis_signs();
        let growth = spec.compensation.sign() * tool.cutter_diameter;
        let compensated = |param: &str, len: f64| {
            let len = len + growth;
            if len <= 0.0 {
                Err(CutError::geometry(
                    COMMAND,
                    format!("compensated {param} must be positive, got {len}"),
                ))
            } else {
                Ok(len)
            }
        };
        let len_x = compensated("len_x", len_x)? * x_dir;
        let len_y = compensated("len_y", len_y)? * y_dir;

        let (base, pivot) = match spec.start_corner {
            StartCorner::Center => {
                let center = Point2::new(
                    require_finite(COMMAND, "center_x", spec.center_x.unwrap_or(position.x))?,
                    require_finite(COMMAND, "center_y", spec.center_y.unwrap_or(position.y))?,
                );
                (
                    Point2::new(center.x - len_x / 2.0, center.y - len_y / 2.0),
                    center,
                )
            }
            _ => {
                let shift = growth / 2.0;
                (
                    Point2::new(position.x - shift * x_dir, position.y - shift * y_dir),
                    position,
                )
            }
        };

        let step_over = tool.step_over();
        let steps = if spec.option.is_pocket() {
            // Bounded by the shorter side
            let half = len_x.abs().min(len_y.abs()) / 2.0;
            pocket_step_count(COMMAND, half, step_over)? + 1
        } else {
            1
        };

        Ok(Self {
            base,
            len_x,
            len_y,
            x_dir,
            y_dir,
            order: corner_order(spec.start_corner, spec.direction),
            pivot,
            rotation,
            step_over,
            steps,
            option: spec.option,
        })
    }

    /// Inward offset of pocket step `j`.
    fn inset(&self, j: u32) -> f64 {
        match self.option {
            RectOption::Profile => 0.0,
            RectOption::PocketOutsideIn => self.step_over * f64::from(j),
            RectOption::PocketInsideOut => self.step_over * f64::from(self.steps - 1 - j),
        }
    }

    fn corner(&self, n: u8, inset: f64) -> Point2 {
        let dx = inset * self.x_dir;
        let dy = inset * self.y_dir;
        let (bx, by) = (self.base.x, self.base.y);
        let p = match n {
            1 => Point2::new(bx + self.len_x - dx, by + dy),
            2 => Point2::new(bx + self.len_x - dx, by + self.len_y - dy),
            3 => Point2::new(bx + dx, by + self.len_y - dy),
            _ => Point2::new(bx + dx, by + dy),
        };
        if self.rotation == 0.0 {
            p
        } else {
            rotate_point(p, self.pivot, self.rotation)
        }
    }
}

/// Cut a rectangle from the current position.
pub fn cut_rectangle<E: MotionEmitter + ?Sized>(
    ctx: &mut CuttingContext,
    tool: &ToolConfig,
    emitter: &mut E,
    spec: &RectangleSpec,
) -> Result<()> {
    let start = ctx.position;
    let layout = Layout::resolve(spec, Point2::from(start), tool)?;
    if spec.plunge_axis == PlungeAxis::A {
        tracing::warn!("CR plunge axis A is accepted; plunging on Z");
    }
    tracing::debug!(
        len_x = layout.len_x,
        len_y = layout.len_y,
        steps = layout.steps,
        order = ?layout.order,
        "planning rectangle"
    );

    let keep_depth = ctx.last_no_pullup;
    let mut motion = Motion::new(ctx, emitter);
    let mut current_z = if spec.plunge != 0.0 && spec.plunge_from_zero {
        0.0
    } else {
        start.z
    };

    let entry = layout.corner(4, layout.inset(0));
    if !motion.position().same_xy(entry.x, entry.y) {
        if motion.position().z < tool.safe_z && !keep_depth {
            motion.rapid_z(tool.safe_z);
        }
        motion.rapid_xy(entry);
        if motion.position().z != current_z && !keep_depth {
            motion.plunge_to(current_z);
        }
    }

    for rep in 0..spec.repetitions {
        let spiral = spec.spiral_first_pass && rep == 0 && spec.plunge != 0.0;
        if !spiral && spec.plunge != 0.0 {
            current_z += spec.plunge;
            motion.plunge_to(current_z);
        }

        for j in 0..layout.steps {
            let inset = layout.inset(j);
            if spiral && j == 0 {
                let feed = motion.xy_feed();
                for (n, fraction) in layout.order.iter().zip(SPIRAL_FRACTIONS) {
                    let p = layout.corner(*n, inset);
                    let z = current_z + spec.plunge * fraction;
                    motion.emit(MoveDirective::linear_xy(p.x, p.y, feed).with_z(z));
                }
                current_z += spec.plunge;
                if spec.repetitions == 1 {
                    lap(&mut motion, &layout, inset);
                }
            } else {
                lap(&mut motion, &layout, inset);
            }

            if j + 1 < layout.steps {
                motion.line_to(layout.corner(4, layout.inset(j + 1)));
            }
        }

        if !motion.position().same_xy(entry.x, entry.y) {
            motion.retract(tool.safe_z);
            motion.rapid_xy(entry);
            if rep + 1 < spec.repetitions {
                motion.plunge_to(current_z);
            }
        }
    }

    if !spec.no_pull_up && motion.position().z != start.z {
        motion.rapid_z(start.z);
    }
    if spec.option == RectOption::PocketInsideOut {
        motion.rapid_xy(Point2::from(start));
    }
    Ok(())
}

fn lap<E: MotionEmitter + ?Sized>(motion: &mut Motion<'_, E>, layout: &Layout, inset: f64) {
    for n in layout.order {
        motion.line_to(layout.corner(n, inset));
    }
}
