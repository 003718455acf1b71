//! # CutKit Planner
//!
//! Turns arc, circle and rectangle cutting commands into ordered motion
//! directives. Every planner reads and updates a [`CuttingContext`] and writes
//! to a [`MotionEmitter`]; tool geometry comes from a [`ToolConfig`] snapshot.
//!
//! [`CuttingContext`]: cutkit_core::CuttingContext
//! [`MotionEmitter`]: cutkit_core::MotionEmitter
//! [`ToolConfig`]: cutkit_settings::ToolConfig

pub mod arc;
pub mod geometry;
pub mod interpolate;
mod motion;
pub mod rectangle;

pub use arc::{
    cut_arc, cut_center_circle, cut_chord_arc, cut_diameter_circle, ArcSpec, CenterCircle,
    ChordArc, CircleOption, DiameterCircle,
};
pub use geometry::{bearing_to_radians, rebase_bearing, rotate_point, Compensation, Direction};
pub use interpolate::{ArcInterpolator, ArcPath, EllipseFrame, ZProfile};
pub use rectangle::{
    corner_order, cut_rectangle, PlungeAxis, RectOption, RectangleSpec, StartCorner,
};
