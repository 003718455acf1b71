//! # CutKit
//!
//! Shape-cutting command compiler for CNC routers. Arc, circle and rectangle
//! commands are turned into an ordered stream of motion directives that a
//! machine driver can execute or that can be written out as G-code.
//!
//! ## Architecture
//!
//! CutKit is organized as a workspace with multiple crates:
//!
//! 1. **cutkit-core** - Directives, cutting context, emitters, G-code writer, errors
//! 2. **cutkit-settings** - Tool geometry and on-disk configuration
//! 3. **cutkit-planner** - Resolvers, arc planner, interpolation, rectangles
//! 4. **cutkit** - Job runner and the command-line binary

pub mod job;

use anyhow::Context;
use std::path::Path;

pub use cutkit_core::{
    CutError, CuttingContext, FeedRates, GcodeWriter, MotionEmitter, MotionMode, MoveDirective,
    MoveQueue, Point2, Point3, TransformState, Vector2,
};
pub use cutkit_planner::{
    ArcSpec, CenterCircle, ChordArc, CircleOption, Compensation, DiameterCircle, Direction,
    PlungeAxis, RectOption, RectangleSpec, StartCorner,
};
pub use cutkit_settings::{Config, FeedSettings, SettingsError, ToolConfig};
pub use job::{ArcCommand, Command, CommandFailure, Job, JobReport, JobRunner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Log output goes to stderr so that G-code on stdout stays clean.
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}

/// G-code text and run report for one job file.
#[derive(Debug, Clone)]
pub struct CompiledJob {
    pub program: String,
    pub report: JobReport,
}

/// Load a job (and optionally a config file), run it and render G-code.
///
/// Failed commands are listed in the report; the program holds every
/// directive emitted up to and around them.
pub fn compile_job_file(
    job_path: &Path,
    config_path: Option<&Path>,
    writer: &GcodeWriter,
    stop_on_error: bool,
) -> anyhow::Result<CompiledJob> {
    let config = match config_path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::new(),
    };
    let content = std::fs::read_to_string(job_path)
        .with_context(|| format!("failed to read job {}", job_path.display()))?;
    let job = Job::from_json_str(&content)
        .with_context(|| format!("failed to parse job {}", job_path.display()))?;

    let mut ctx =
        CuttingContext::new(job.start, FeedRates::from(config.feeds)).with_transforms(job.transforms);
    let mut queue = MoveQueue::new();
    let report = JobRunner::new(config.tool)
        .with_stop_on_error(stop_on_error)
        .run(&mut ctx, &mut queue, &job.commands);

    Ok(CompiledJob {
        program: writer.write_program(queue.directives()),
        report,
    })
}
