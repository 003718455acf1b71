//! Mutable state threaded through command execution.
//!
//! One `CuttingContext` lives for one program run and is owned by the command
//! chain executing it. Every emitted directive updates the tracked position.

use crate::directive::MoveDirective;
use crate::types::Point3;
use serde::{Deserialize, Serialize};

/// Move speeds in units per second, as the controller stores them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedRates {
    pub xy: f64,
    pub z: f64,
}

impl FeedRates {
    pub fn new(xy: f64, z: f64) -> Self {
        Self { xy, z }
    }

    /// XY feed in units per minute, as carried by directives.
    pub fn xy_per_minute(&self) -> f64 {
        self.xy * 60.0
    }

    /// Z feed in units per minute, as carried by directives.
    pub fn z_per_minute(&self) -> f64 {
        self.z * 60.0
    }
}

impl Default for FeedRates {
    fn default() -> Self {
        Self { xy: 1.0, z: 0.5 }
    }
}

/// A single transform toggle with its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformToggle {
    pub apply: bool,
    pub magnitude: f64,
}

impl TransformToggle {
    pub fn enabled(magnitude: f64) -> Self {
        Self {
            apply: true,
            magnitude,
        }
    }
}

/// Active coordinate transforms.
///
/// Applying them is the Motion Emitter's job. The engine only needs to know whether
/// any is active, since a transformed arc can no longer be emitted as a circular move.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformState {
    #[serde(default)]
    pub scale: TransformToggle,
    #[serde(default)]
    pub shear_x: TransformToggle,
    #[serde(default)]
    pub shear_y: TransformToggle,
    #[serde(default)]
    pub level: TransformToggle,
}

impl TransformState {
    /// True when any transform is enabled
    pub fn any_active(&self) -> bool {
        self.scale.apply || self.shear_x.apply || self.shear_y.apply || self.level.apply
    }
}

/// Cutting state shared by the commands of one job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CuttingContext {
    /// Current tool position
    pub position: Point3,
    /// Position snapshot taken when the last arc started
    pub arc_start: Point3,
    pub feeds: FeedRates,
    /// Set by the last arc command; suppresses the Z pull-up of a following approach
    pub last_no_pullup: bool,
    pub transforms: TransformState,
}

impl CuttingContext {
    /// Create a context with the tool at `position`
    pub fn new(position: Point3, feeds: FeedRates) -> Self {
        Self {
            position,
            arc_start: position,
            feeds,
            last_no_pullup: false,
            transforms: TransformState::default(),
        }
    }

    pub fn with_transforms(mut self, transforms: TransformState) -> Self {
        self.transforms = transforms;
        self
    }

    /// Update the tracked position with the axis words of `directive`.
    pub fn track(&mut self, directive: &MoveDirective) {
        if let Some(x) = directive.x {
            self.position.x = x;
        }
        if let Some(y) = directive.y {
            self.position.y = y;
        }
        if let Some(z) = directive.z {
            self.position.z = z;
        }
    }
}
