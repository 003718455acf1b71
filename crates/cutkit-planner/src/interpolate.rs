//! Line-segment approximation of circular and elliptical arcs.
//!
//! Used whenever a uniform circular move cannot express the path: unequal X/Y
//! proportions, or an active coordinate transform downstream. The arc is
//! parameterized on the unscaled circle using bearings (clockwise from north)
//! and each point is then mapped through an [`EllipseFrame`].

use cutkit_core::{MoveDirective, Point2, Vector2, EPSILON};
use std::f64::consts::TAU;

/// Included angles below this are treated as no motion.
pub const MIN_SWEEP: f64 = 1e-5;

/// Snap onto the end point when the remaining angle is within this many steps.
const SNAP_FACTOR: f64 = 1.01;

/// Per-axis scale applied about a fixed origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseFrame {
    pub origin: Point2,
    pub scale: Vector2,
}

impl EllipseFrame {
    pub fn new(origin: Point2, scale: Vector2) -> Self {
        Self { origin, scale }
    }

    /// A frame that leaves points unchanged.
    pub fn identity(origin: Point2) -> Self {
        Self::new(origin, Vector2::new(1.0, 1.0))
    }

    pub fn map(&self, p: Point2) -> Point2 {
        self.origin
            .offset(self.origin.to(p).scale(self.scale.x, self.scale.y))
    }

    pub fn map_offset(&self, v: Vector2) -> Vector2 {
        v.scale(self.scale.x, self.scale.y)
    }
}

/// An arc on the unscaled circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub start: Point2,
    pub end: Point2,
    /// Center relative to `start`
    pub center_offset: Vector2,
    pub clockwise: bool,
}

impl ArcPath {
    pub fn is_closed(&self) -> bool {
        self.start.approx_eq(self.end)
    }
}

/// Z behaviour along an interpolated arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZProfile {
    pub start_z: f64,
    pub plunge: f64,
    /// Ramp Z with the traversed angle instead of holding it
    pub spiral: bool,
}

impl ZProfile {
    /// Hold Z constant at `z`.
    pub fn flat(z: f64) -> Self {
        Self {
            start_z: z,
            plunge: 0.0,
            spiral: false,
        }
    }

    /// Ramp from `start_z` down (or up) by `plunge` over the whole sweep.
    pub fn spiral(start_z: f64, plunge: f64) -> Self {
        Self {
            start_z,
            plunge,
            spiral: plunge != 0.0,
        }
    }

    fn z_at(&self, fraction: f64) -> f64 {
        if self.spiral {
            self.start_z + self.plunge * fraction
        } else {
            self.start_z + self.plunge
        }
    }
}

/// Lazy, finite sequence of linear moves along an arc or ellipse.
///
/// The last emitted point is exactly the mapped end point. A full circle is
/// swept when start and end coincide.
#[derive(Debug, Clone)]
pub struct ArcInterpolator {
    center: Point2,
    radius: f64,
    begin: f64,
    sweep: f64,
    step: f64,
    dir: f64,
    traversed: f64,
    end: Point2,
    frame: EllipseFrame,
    z: ZProfile,
    feed: f64,
    done: bool,
}

impl ArcInterpolator {
    pub fn new(path: ArcPath, frame: EllipseFrame, z: ZProfile, arc_step: f64, feed: f64) -> Self {
        let center = path.start.offset(path.center_offset);
        let radius = path.center_offset.length();
        let begin = (path.start.x - center.x).atan2(path.start.y - center.y);
        let finish = (path.end.x - center.x).atan2(path.end.y - center.y);

        let sweep = if path.is_closed() {
            TAU
        } else if path.clockwise {
            (finish - begin).rem_euclid(TAU)
        } else {
            (begin - finish).rem_euclid(TAU)
        };

        let quarter = 0.25 * sweep;
        let step = if arc_step > 0.0 {
            arc_step.min(quarter)
        } else {
            quarter
        };

        let done = radius <= EPSILON || sweep < MIN_SWEEP;
        if done {
            tracing::debug!(sweep, radius, "degenerate arc, nothing to interpolate");
        } else {
            tracing::trace!(sweep, step, radius, "interpolating arc");
        }

        Self {
            center,
            radius,
            begin,
            sweep,
            step,
            dir: if path.clockwise { 1.0 } else { -1.0 },
            traversed: 0.0,
            end: frame.map(path.end),
            frame,
            z,
            feed,
            done,
        }
    }

    /// Included angle in radians.
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// True when the arc produces no moves at all.
    pub fn is_degenerate(&self) -> bool {
        self.radius <= EPSILON || self.sweep < MIN_SWEEP
    }
}

impl Iterator for ArcInterpolator {
    type Item = MoveDirective;

    fn next(&mut self) -> Option<MoveDirective> {
        if self.done {
            return None;
        }

        let remaining = self.sweep - self.traversed;
        let point = if remaining < SNAP_FACTOR * self.step {
            self.traversed = self.sweep;
            self.done = true;
            self.end
        } else {
            self.traversed += self.step;
            let angle = self.begin + self.dir * self.traversed;
            self.frame.map(Point2::new(
                self.center.x + self.radius * angle.sin(),
                self.center.y + self.radius * angle.cos(),
            ))
        };

        let z = self.z.z_at(self.traversed / self.sweep);
        Some(MoveDirective::linear_xy(point.x, point.y, self.feed).with_z(z))
    }
}

impl std::iter::FusedIterator for ArcInterpolator {}
