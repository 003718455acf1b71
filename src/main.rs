use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cutkit::{compile_job_file, init_logging, Config, GcodeWriter};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cutkit", version)]
#[command(about = "Compile arc, circle and rectangle cutting commands to G-code", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a job file and print the resulting G-code
    Run {
        /// JSON job: an array of commands, or an object with start/transforms/commands
        job: PathBuf,
        /// Tool and feed configuration (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Prefix each line with an N word
        #[arg(long)]
        line_numbers: bool,
        /// Decimal places for coordinates
        #[arg(long, default_value_t = 4)]
        decimals: usize,
        /// Stop at the first failing command
        #[arg(long)]
        stop_on_error: bool,
    },
    /// Validate a configuration file
    CheckConfig {
        /// Configuration file (.toml or .json)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            job,
            config,
            line_numbers,
            decimals,
            stop_on_error,
        } => {
            let writer = GcodeWriter::new(decimals).with_line_numbers(line_numbers);
            let compiled = compile_job_file(&job, config.as_deref(), &writer, stop_on_error)?;

            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(compiled.program.as_bytes())
                .context("failed to write G-code")?;

            for failure in &compiled.report.failures {
                tracing::error!("{failure}");
            }
            if !compiled.report.is_success() {
                anyhow::bail!(
                    "{} of {} commands failed",
                    compiled.report.failures.len(),
                    compiled.report.completed + compiled.report.failures.len()
                );
            }
        }
        Commands::CheckConfig { file } => {
            let config = Config::load_from_file(&file)
                .with_context(|| format!("invalid config {}", file.display()))?;
            println!("{}: ok ({})", file.display(), config.tool);
        }
    }

    Ok(())
}
