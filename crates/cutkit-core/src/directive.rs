//! Motion directives emitted by the geometry engine.
//!
//! Directives form an ordered stream: each one assumes the machine has reached
//! the position implied by the directives before it.

use crate::error::{CutError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Motion mode of a single directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionMode {
    Rapid,
    Linear,
    ArcCW,
    ArcCCW,
}

impl MotionMode {
    /// The G word for this mode.
    pub fn gcode_word(&self) -> &'static str {
        match self {
            Self::Rapid => "G0",
            Self::Linear => "G1",
            Self::ArcCW => "G2",
            Self::ArcCCW => "G3",
        }
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, Self::ArcCW | Self::ArcCCW)
    }
}

impl fmt::Display for MotionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rapid => write!(f, "rapid"),
            Self::Linear => write!(f, "linear"),
            Self::ArcCW => write!(f, "arc cw"),
            Self::ArcCCW => write!(f, "arc ccw"),
        }
    }
}

/// A single machine move.
///
/// Axis words left as `None` keep their current value on the machine.
/// Arc center offsets (`i`, `j`) are relative to the position the arc starts from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveDirective {
    pub mode: MotionMode,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub i: Option<f64>,
    pub j: Option<f64>,
    /// Feed rate in units per minute
    pub feed: Option<f64>,
}

impl MoveDirective {
    /// Creates an empty directive of the given mode.
    pub fn new(mode: MotionMode) -> Self {
        Self {
            mode,
            x: None,
            y: None,
            z: None,
            i: None,
            j: None,
            feed: None,
        }
    }

    /// Rapid XY move.
    pub fn rapid_xy(x: f64, y: f64) -> Self {
        Self::new(MotionMode::Rapid).with_xy(x, y)
    }

    /// Rapid Z-only move.
    pub fn rapid_z(z: f64) -> Self {
        Self::new(MotionMode::Rapid).with_z(z)
    }

    /// Linear feed XY move.
    pub fn linear_xy(x: f64, y: f64, feed: f64) -> Self {
        Self::new(MotionMode::Linear).with_xy(x, y).with_feed(feed)
    }

    /// Linear feed Z-only move.
    pub fn linear_z(z: f64, feed: f64) -> Self {
        Self::new(MotionMode::Linear).with_z(z).with_feed(feed)
    }

    /// Circular move to `(x, y)` around the center offset `(i, j)`.
    pub fn arc(clockwise: bool, x: f64, y: f64, i: f64, j: f64, feed: f64) -> Self {
        let mode = if clockwise {
            MotionMode::ArcCW
        } else {
            MotionMode::ArcCCW
        };
        Self::new(mode)
            .with_xy(x, y)
            .with_center(i, j)
            .with_feed(feed)
    }

    pub fn with_xy(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set the target Z for this directive
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    pub fn with_center(mut self, i: f64, j: f64) -> Self {
        self.i = Some(i);
        self.j = Some(j);
        self
    }

    pub fn with_feed(mut self, feed: f64) -> Self {
        self.feed = Some(feed);
        self
    }

    /// True when the directive moves only the Z axis.
    pub fn is_z_only(&self) -> bool {
        self.z.is_some() && self.x.is_none() && self.y.is_none()
    }

    /// Parse one textual motion line such as `G1X1.5Y2F60` or `g2 x1 y0 i0.5 j0`.
    ///
    /// Only G0-G3 motion lines are accepted. A trailing `;` or `(` comment is ignored.
    pub fn parse_line(line: &str) -> Result<Self> {
        let code = line
            .split([';', '('])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_uppercase();
        if code.is_empty() {
            return Err(CutError::parameter("line", "line", "empty motion line"));
        }

        let mut words = Vec::new();
        let mut chars = code.char_indices().peekable();
        while let Some((start, letter)) = chars.next() {
            if letter.is_whitespace() {
                continue;
            }
            if !letter.is_ascii_alphabetic() {
                return Err(CutError::parameter(
                    "line",
                    letter.to_string(),
                    format!("unexpected character in '{}'", line.trim()),
                ));
            }
            let value_start = start + letter.len_utf8();
            let mut value_end = value_start;
            while let Some(&(idx, c)) = chars.peek() {
                if c.is_ascii_digit() || c == '.' || c == '-' || c == '+' {
                    value_end = idx + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let raw = &code[value_start..value_end];
            let value: f64 = raw.parse().map_err(|_| {
                CutError::parameter(
                    "line",
                    letter.to_string(),
                    format!("malformed number '{raw}'"),
                )
            })?;
            words.push((letter, value));
        }

        let mode = match words.first() {
            Some(('G', g)) if *g == 0.0 => MotionMode::Rapid,
            Some(('G', g)) if *g == 1.0 => MotionMode::Linear,
            Some(('G', g)) if *g == 2.0 => MotionMode::ArcCW,
            Some(('G', g)) if *g == 3.0 => MotionMode::ArcCCW,
            _ => {
                return Err(CutError::parameter(
                    "line",
                    "G",
                    format!("'{}' is not a G0-G3 motion line", line.trim()),
                ))
            }
        };

        let mut directive = Self::new(mode);
        for (letter, value) in words.into_iter().skip(1) {
            match letter {
                'X' => directive.x = Some(value),
                'Y' => directive.y = Some(value),
                'Z' => directive.z = Some(value),
                'I' => directive.i = Some(value),
                'J' => directive.j = Some(value),
                'F' => directive.feed = Some(value),
                other => {
                    return Err(CutError::parameter(
                        "line",
                        other.to_string(),
                        "unsupported word in motion line",
                    ))
                }
            }
        }
        Ok(directive)
    }
}
