//! Configuration structures and file I/O.

use crate::error::{Result, SettingsError};
use cutkit_core::FeedRates;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::path::Path;

/// Cutter geometry and motion resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Cutter diameter in machine units
    pub cutter_diameter: f64,
    /// Overlap between adjacent pocket passes, in percent of the diameter
    pub pocket_overlap: f64,
    /// Absolute retract height clear of the workpiece
    pub safe_z: f64,
    /// Maximum angular step of interpolated arcs, in radians
    pub arc_step: f64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            cutter_diameter: 0.25,
            pocket_overlap: 10.0,
            safe_z: 0.5,
            arc_step: 0.05,
        }
    }
}

impl ToolConfig {
    /// Distance between nested pocket passes.
    pub fn step_over(&self) -> f64 {
        self.cutter_diameter * (100.0 - self.pocket_overlap) / 100.0
    }

    pub fn with_diameter(mut self, cutter_diameter: f64) -> Self {
        self.cutter_diameter = cutter_diameter;
        self
    }

    pub fn with_safe_z(mut self, safe_z: f64) -> Self {
        self.safe_z = safe_z;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.cutter_diameter.is_finite() && self.cutter_diameter > 0.0) {
            return Err(SettingsError::invalid(
                "tool.cutter_diameter",
                "must be > 0",
            ));
        }
        if !(0.0..100.0).contains(&self.pocket_overlap) {
            return Err(SettingsError::invalid(
                "tool.pocket_overlap",
                "must be in [0, 100)",
            ));
        }
        if !self.safe_z.is_finite() {
            return Err(SettingsError::invalid("tool.safe_z", "must be finite"));
        }
        if !(self.arc_step > 0.0 && self.arc_step <= FRAC_PI_2) {
            return Err(SettingsError::invalid(
                "tool.arc_step",
                "must be in (0, pi/2]",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ToolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cutter {:.4} overlap {}% safe Z {:.4} step {:.3} rad",
            self.cutter_diameter, self.pocket_overlap, self.safe_z, self.arc_step
        )
    }
}

/// Move speeds in units per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    pub xy: f64,
    pub z: f64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        let rates = FeedRates::default();
        Self {
            xy: rates.xy,
            z: rates.z,
        }
    }
}

impl From<FeedSettings> for FeedRates {
    fn from(feeds: FeedSettings) -> Self {
        FeedRates::new(feeds.xy, feeds.z)
    }
}

/// Complete configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tool: ToolConfig,
    pub feeds: FeedSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML, chosen by extension)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(SettingsError::UnsupportedFormat(format!(
                    "{} (config file must be .json or .toml)",
                    path.display()
                )))
            }
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), tool = %config.tool, "loaded config");
        Ok(config)
    }

    /// Parse and validate config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            _ => {
                return Err(SettingsError::UnsupportedFormat(format!(
                    "{} (config file must be .json or .toml)",
                    path.display()
                )))
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.tool.validate()?;

        if !(self.feeds.xy.is_finite() && self.feeds.xy > 0.0) {
            return Err(SettingsError::invalid("feeds.xy", "must be > 0"));
        }
        if !(self.feeds.z.is_finite() && self.feeds.z > 0.0) {
            return Err(SettingsError::invalid("feeds.z", "must be > 0"));
        }
        Ok(())
    }
}
