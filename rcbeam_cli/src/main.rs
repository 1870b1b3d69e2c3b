//! # rcbeam
//!
//! Command-line front end for the RC beam capacity engine.
//!
//! # Commands
//! - `rcbeam calculate [--summary]` - IS 456 capacity as JSON (or a table)
//! - `rcbeam predict --model <path>` - learned-model capacity as JSON
//! - `rcbeam report --output <pdf>` - PDF calculation report
//! - `rcbeam equations [--output <md>]` - equation reference in markdown
//!
//! Beam input comes from `--input <file>` (`-` for stdin) and/or per-field
//! flags. Logs go to stderr, filtered by `RUST_LOG`.

mod args;
mod summary;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rcbeam_core::calculations::analyze;
use rcbeam_core::equations::generate_equations_markdown;
use rcbeam_core::errors::CalcError;
use rcbeam_core::prediction::{predict_capacity, ScaledNetwork};
use rcbeam_core::report::render_capacity_pdf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::BeamArgs;

/// RC beam capacity calculator
#[derive(Parser)]
#[command(name = "rcbeam")]
#[command(author, version, about = "Load capacity of simply-supported RC beams (IS 456)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute capacity by the IS 456 procedure
    Calculate {
        #[command(flatten)]
        beam: BeamArgs,

        /// Print a human-readable table instead of JSON
        #[arg(long)]
        summary: bool,
    },

    /// Predict capacity with a trained model
    Predict {
        #[command(flatten)]
        beam: BeamArgs,

        /// Model artifact (JSON)
        #[arg(short, long, env = "RCBEAM_MODEL")]
        model: PathBuf,
    },

    /// Write a PDF calculation report
    Report {
        #[command(flatten)]
        beam: BeamArgs,

        /// Output PDF path
        #[arg(short, long)]
        output: PathBuf,

        /// Engineer name for the report header
        #[arg(long, env = "RCBEAM_ENGINEER", default_value = "")]
        engineer: String,

        /// Job ID for the report header
        #[arg(long, env = "RCBEAM_JOB_ID", default_value = "")]
        job_id: String,
    },

    /// Print or write the equation reference (markdown)
    Equations {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rcbeam_cli=info,rcbeam_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(report_error(&err)),
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Calculate { beam, summary } => run_calculate(&beam, summary),
        Commands::Predict { beam, model } => run_predict(&beam, &model),
        Commands::Report {
            beam,
            output,
            engineer,
            job_id,
        } => run_report(&beam, &output, &engineer, &job_id),
        Commands::Equations { output } => run_equations(output),
    }
}

fn run_calculate(beam: &BeamArgs, summary: bool) -> Result<()> {
    let params = beam.to_parameters()?;
    let spec = params.validate()?;
    let analysis = analyze(&spec)?;

    if summary {
        print!("{}", summary::render(&spec, &analysis)?);
    } else {
        println!("{}", serde_json::to_string_pretty(analysis.result())?);
    }
    Ok(())
}

fn run_predict(beam: &BeamArgs, model_path: &Path) -> Result<()> {
    let params = beam.to_parameters()?;
    let model = ScaledNetwork::load(model_path)
        .with_context(|| format!("Failed to load model: {}", model_path.display()))?;
    let prediction = predict_capacity(&params, &model)?;
    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}

fn run_report(beam: &BeamArgs, output: &Path, engineer: &str, job_id: &str) -> Result<()> {
    let params = beam.to_parameters()?;
    let spec = params.validate()?;
    let analysis = analyze(&spec)?;

    let pdf = render_capacity_pdf(&spec, &analysis, engineer, job_id)?;
    fs::write(output, &pdf).with_context(|| format!("Failed to write report: {}", output.display()))?;
    info!(path = %output.display(), bytes = pdf.len(), "report written");
    Ok(())
}

fn run_equations(output: Option<PathBuf>) -> Result<()> {
    let markdown = generate_equations_markdown();
    match output {
        Some(path) => {
            fs::write(&path, &markdown).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "equation reference written");
        }
        None => print!("{}", markdown),
    }
    Ok(())
}

/// Print the error and pick the exit code: 2 for bad input, 1 otherwise.
///
/// Core errors are also printed in their structured JSON form.
fn report_error(err: &anyhow::Error) -> u8 {
    eprintln!("Error: {:#}", err);

    match err.downcast_ref::<CalcError>() {
        Some(calc_err) => {
            if let Ok(json) = serde_json::to_string_pretty(calc_err) {
                eprintln!("{}", json);
            }
            if calc_err.is_user_error() {
                2
            } else {
                1
            }
        }
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_calculate_flags() {
        let cli = Cli::try_parse_from([
            "rcbeam", "calculate", "--fck", "30", "-b", "300", "--load-type", "Two Point Load", "--summary",
        ])
        .unwrap();
        match cli.command {
            Commands::Calculate { beam, summary } => {
                assert!(summary);
                assert_eq!(beam.fck, Some(30));
                assert_eq!(beam.b, Some(300.0));
                assert_eq!(beam.load_type.as_deref(), Some("Two Point Load"));
            }
            _ => panic!("expected calculate"),
        }
    }

    #[test]
    fn test_user_error_exit_code() {
        let err = anyhow::Error::new(CalcError::invalid_input("fck", "22", "bad grade"));
        assert_eq!(report_error(&err), 2);

        let err = anyhow::Error::new(CalcError::prediction_failed("down")).context("while predicting");
        assert_eq!(report_error(&err), 1);
    }

    #[test]
    fn test_incomplete_input_file_exits_as_user_error() {
        let path = std::env::temp_dir().join(format!("rcbeam_cli_missing_{}.json", std::process::id()));
        fs::write(&path, r#"{"fck": 25, "fy": 415}"#).unwrap();

        let beam = BeamArgs {
            input: Some(path.display().to_string()),
            ..BeamArgs::default()
        };
        let err = run_calculate(&beam, false).unwrap_err();
        fs::remove_file(&path).ok();

        assert_eq!(report_error(&err), 2);
    }

    #[test]
    fn test_equations_to_file() {
        let path = std::env::temp_dir().join(format!("rcbeam_eq_{}.md", std::process::id()));
        run_equations(Some(path.clone())).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();
        assert!(text.starts_with("# RC Beam Capacity Equations Reference"));
    }
}
