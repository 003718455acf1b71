//! Error handling for CutKit
//!
//! Resolvers and planners fail fast: an error aborts only the command that
//! raised it. Directives emitted before the failure remain valid and queued.
//!
//! Degenerate sweeps (an included angle below tolerance) are not errors; the
//! interpolation engine treats them as a silent no-op.

use thiserror::Error;

/// Failure raised while compiling one cutting command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CutError {
    /// Non-positive radius or diameter, or a zero-size shape
    #[error("Invalid geometry in {command}: {reason}")]
    InvalidGeometry {
        /// The command mnemonic (CA, CC, CP, CG, CR).
        command: &'static str,
        /// Why the geometry is unusable.
        reason: String,
    },

    /// Missing or non-finite required argument
    #[error("Invalid parameter '{param}' in {command}: {reason}")]
    InvalidParameter {
        /// The command mnemonic (CA, CC, CP, CG, CR).
        command: &'static str,
        /// The parameter name.
        param: String,
        /// Why the parameter was rejected.
        reason: String,
    },
}

impl CutError {
    /// Create an invalid-geometry error
    pub fn geometry(command: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            command,
            reason: reason.into(),
        }
    }

    /// Create an invalid-parameter error
    pub fn parameter(
        command: &'static str,
        param: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            command,
            param: param.into(),
            reason: reason.into(),
        }
    }

    /// The command that raised this error
    pub fn command(&self) -> &'static str {
        match self {
            Self::InvalidGeometry { command, .. } | Self::InvalidParameter { command, .. } => {
                command
            }
        }
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Self::InvalidGeometry { .. })
    }

    /// Check if this is a parameter error
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Require a finite value for a named parameter.
pub fn require_finite(command: &'static str, param: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CutError::parameter(command, param, format!("must be finite, got {value}")))
    }
}

/// Require a present, finite value for a named parameter.
pub fn require_present(command: &'static str, param: &str, value: Option<f64>) -> Result<f64> {
    match value {
        Some(v) => require_finite(command, param, v),
        None => Err(CutError::parameter(command, param, "is required")),
    }
}

/// Result type using CutError
pub type Result<T> = std::result::Result<T, CutError>;
