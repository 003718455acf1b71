//! # CutKit Settings
//!
//! Tool geometry and feed configuration, loaded from TOML or JSON files.
//! Planners receive `ToolConfig` as a read-only snapshot for one command.

pub mod config;
pub mod error;

pub use config::{Config, FeedSettings, ToolConfig};
pub use error::{Result, SettingsError};
