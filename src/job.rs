//! Command records and the sequential job runner.
//!
//! A job is an ordered list of [`Command`]s executed against a single
//! [`CuttingContext`]. Each command either completes or fails on its own;
//! directives emitted before a failure stay queued.

use cutkit_core::{require_present, CutError, CuttingContext, MotionEmitter, Point2, Point3};
use cutkit_core::{TransformState, Vector2};
use cutkit_planner::{
    cut_arc, cut_center_circle, cut_chord_arc, cut_diameter_circle, cut_rectangle, ArcSpec,
    CenterCircle, ChordArc, CircleOption, DiameterCircle, Direction, RectangleSpec,
};
use cutkit_settings::ToolConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

fn one() -> u32 {
    1
}

fn unit() -> f64 {
    1.0
}

/// Arc from the current position to an end point, around a center given as an
/// offset from the start (the CG command).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcCommand {
    /// End X; defaults to the current X
    #[serde(default)]
    pub end_x: Option<f64>,
    /// End Y; defaults to the current Y
    #[serde(default)]
    pub end_y: Option<f64>,
    /// Center X offset from the start point. Required.
    pub center_x: Option<f64>,
    /// Center Y offset from the start point. Required.
    pub center_y: Option<f64>,
    /// Defaults to clockwise
    #[serde(default)]
    pub direction: Direction,
    /// Per-repetition depth change; defaults to 0
    #[serde(default)]
    pub plunge: f64,
    /// Defaults to 1
    #[serde(default = "one")]
    pub repetitions: u32,
    /// Defaults to 1.0
    #[serde(default = "unit")]
    pub prop_x: f64,
    /// Defaults to 1.0
    #[serde(default = "unit")]
    pub prop_y: f64,
    /// Defaults to profile
    #[serde(default)]
    pub option: CircleOption,
    /// Defaults to false
    #[serde(default)]
    pub no_pull_up: bool,
    /// Defaults to false
    #[serde(default)]
    pub plunge_from_zero: bool,
}

impl ArcCommand {
    /// Resolve against the current position.
    pub fn to_spec(&self, position: Point2) -> cutkit_core::Result<ArcSpec> {
        let offset = Vector2::new(
            require_present("CG", "center_x", self.center_x)?,
            require_present("CG", "center_y", self.center_y)?,
        );
        let end = Point2::new(
            self.end_x.unwrap_or(position.x),
            self.end_y.unwrap_or(position.y),
        );
        Ok(ArcSpec::new(end, offset, self.direction)
            .with_plunge(self.plunge, self.repetitions)
            .with_scale(self.prop_x, self.prop_y)
            .with_option(self.option)
            .with_no_pull_up(self.no_pull_up)
            .with_plunge_from_zero(self.plunge_from_zero))
    }
}

/// One cutting command, tagged by its mnemonic in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum Command {
    #[serde(rename = "CA", alias = "chord_arc")]
    ChordArc(ChordArc),
    #[serde(rename = "CC", alias = "diameter_circle")]
    DiameterCircle(DiameterCircle),
    #[serde(rename = "CP", alias = "center_circle")]
    CenterCircle(CenterCircle),
    #[serde(rename = "CG", alias = "arc")]
    Arc(ArcCommand),
    #[serde(rename = "CR", alias = "rectangle")]
    Rectangle(RectangleSpec),
}

impl Command {
    /// Two-letter mnemonic used in logs and error reports.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::ChordArc(_) => "CA",
            Self::DiameterCircle(_) => "CC",
            Self::CenterCircle(_) => "CP",
            Self::Arc(_) => "CG",
            Self::Rectangle(_) => "CR",
        }
    }

    /// Execute this command, emitting directives and updating `ctx`.
    pub fn execute<E: MotionEmitter + ?Sized>(
        &self,
        ctx: &mut CuttingContext,
        tool: &ToolConfig,
        emitter: &mut E,
    ) -> cutkit_core::Result<()> {
        match self {
            Self::ChordArc(arc) => cut_chord_arc(ctx, tool, emitter, arc),
            Self::DiameterCircle(circle) => cut_diameter_circle(ctx, tool, emitter, circle),
            Self::CenterCircle(circle) => cut_center_circle(ctx, tool, emitter, circle),
            Self::Arc(arc) => {
                let spec = arc.to_spec(Point2::from(ctx.position))?;
                cut_arc(ctx, tool, emitter, &spec)
            }
            Self::Rectangle(rect) => cut_rectangle(ctx, tool, emitter, rect),
        }
    }
}

/// A serialized job: start position, active transforms and commands.
///
/// A bare JSON array of commands is also accepted, starting at the origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "JobFile")]
pub struct Job {
    pub start: Point3,
    pub transforms: TransformState,
    pub commands: Vec<Command>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JobFile {
    Commands(Vec<Command>),
    Full {
        #[serde(default)]
        start: Point3,
        #[serde(default)]
        transforms: TransformState,
        commands: Vec<Command>,
    },
}

impl From<JobFile> for Job {
    fn from(file: JobFile) -> Self {
        match file {
            JobFile::Commands(commands) => Self {
                commands,
                ..Self::default()
            },
            JobFile::Full {
                start,
                transforms,
                commands,
            } => Self {
                start,
                transforms,
                commands,
            },
        }
    }
}

impl Job {
    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

/// A command that failed during a job run.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("command #{index} ({command}) failed: {error}")]
pub struct CommandFailure {
    /// Position of the command in the job
    pub index: usize,
    pub command: &'static str,
    #[source]
    pub error: CutError,
}

/// Outcome of a job run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobReport {
    /// Commands that completed
    pub completed: usize,
    pub failures: Vec<CommandFailure>,
    /// Set when the run was cut short by `stop_on_error`
    pub aborted: bool,
}

impl JobReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs commands in order against one context and one emitter.
#[derive(Debug, Clone, Default)]
pub struct JobRunner {
    tool: ToolConfig,
    stop_on_error: bool,
}

impl JobRunner {
    pub fn new(tool: ToolConfig) -> Self {
        Self {
            tool,
            stop_on_error: false,
        }
    }

    /// Abort the remaining commands after the first failure.
    pub fn with_stop_on_error(mut self, stop_on_error: bool) -> Self {
        self.stop_on_error = stop_on_error;
        self
    }

    pub fn run<E: MotionEmitter + ?Sized>(
        &mut self,
        ctx: &mut CuttingContext,
        emitter: &mut E,
        commands: &[Command],
    ) -> JobReport {
        let mut report = JobReport::default();
        tracing::info!(commands = commands.len(), tool = %self.tool, "starting job");

        for (index, command) in commands.iter().enumerate() {
            let mnemonic = command.mnemonic();
            tracing::debug!(index, command = mnemonic, "executing command");
            match command.execute(ctx, &self.tool, emitter) {
                Ok(()) => report.completed += 1,
                Err(error) => {
                    tracing::warn!(index, command = mnemonic, %error, "command failed");
                    report.failures.push(CommandFailure {
                        index,
                        command: mnemonic,
                        error,
                    });
                    if self.stop_on_error {
                        report.aborted = index + 1 < commands.len();
                        break;
                    }
                }
            }
        }

        tracing::info!(
            completed = report.completed,
            failed = report.failures.len(),
            "job finished"
        );
        report
    }
}
