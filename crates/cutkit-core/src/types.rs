//! Points and offsets used by the geometry engine.

use serde::{Deserialize, Serialize};

/// Tolerance for coordinate equality (closed-shape tests, end-point snapping).
pub const EPSILON: f64 = 1e-6;

/// Compare two values within [`EPSILON`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// Machine position in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position
    pub z: f64,
}

impl Point3 {
    /// Create a new point with X, Y, Z coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True when the XY components match `(x, y)` within [`EPSILON`].
    pub fn same_xy(&self, x: f64, y: f64) -> bool {
        approx_eq(self.x, x) && approx_eq(self.y, y)
    }
}

/// Planar position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both coordinates match `other` within [`EPSILON`].
    pub fn approx_eq(&self, other: Point2) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }

    pub fn offset(&self, v: Vector2) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }

    /// Vector from this point to `other`.
    pub fn to(&self, other: Point2) -> Vector2 {
        Vector2::new(other.x - self.x, other.y - self.y)
    }
}

impl From<Point3> for Point2 {
    fn from(p: Point3) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Planar offset, e.g. an arc-center offset (I, J) relative to the arc start
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// True when both components are within [`EPSILON`] of zero.
    pub fn is_zero(&self) -> bool {
        self.x.abs() <= EPSILON && self.y.abs() <= EPSILON
    }

    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        Self::new(self.x * sx, self.y * sy)
    }

    pub fn sub(&self, other: Vector2) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}
