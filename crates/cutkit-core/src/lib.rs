//! # CutKit Core
//!
//! Core types shared by the CutKit geometry engine.
//! Provides the motion directive stream consumed by the machine driver,
//! the mutable cutting context threaded through command execution,
//! and the error taxonomy reported back to the command dispatcher.

pub mod context;
pub mod directive;
pub mod emitter;
pub mod error;
pub mod gcode;
pub mod types;

pub use context::{CuttingContext, FeedRates, TransformState};
pub use directive::{MotionMode, MoveDirective};
pub use emitter::{MotionEmitter, MoveQueue};
pub use error::{require_finite, require_present, CutError, Result};
pub use gcode::GcodeWriter;
pub use types::{approx_eq, Point2, Point3, Vector2, EPSILON};
