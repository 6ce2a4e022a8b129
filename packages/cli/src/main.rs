#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for filtering wind turbine and wind farm tables.
//!
//! Reads the two column-oriented JSON tables, materializes them, and
//! prints either the filter result or the available control options as
//! JSON on stdout.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use wind_map_filter::Dataset;
use wind_map_filter_models::{FilterCriteria, FilterOutcome};
use wind_map_table::TableError;

/// Errors surfaced by the CLI.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// A table could not be loaded or materialized.
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Criteria could not be parsed or output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser)]
#[command(name = "wind_map_cli", about = "Wind turbine and wind farm filter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the tables and print the matching ids and counts
    Filter {
        /// Turbine table (column-oriented JSON)
        #[arg(long)]
        turbines: PathBuf,
        /// Farm table (column-oriented JSON)
        #[arg(long)]
        farms: PathBuf,
        /// Filter criteria (JSON). Defaults to selecting everything the
        /// tables contain.
        #[arg(long)]
        criteria: Option<PathBuf>,
    },
    /// Print the checklist values and slider bounds the tables offer
    Options {
        /// Turbine table (column-oriented JSON)
        #[arg(long)]
        turbines: PathBuf,
        /// Farm table (column-oriented JSON)
        #[arg(long)]
        farms: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    match cli.command {
        Commands::Filter {
            turbines,
            farms,
            criteria,
        } => {
            let dataset = Dataset::load(&turbines, &farms).map_err(CliError::from)?;
            let criteria = criteria.as_deref().map(read_criteria).transpose()?;
            print_json(&run_filter(&dataset, criteria))?;
        }
        Commands::Options { turbines, farms } => {
            let dataset = Dataset::load(&turbines, &farms).map_err(CliError::from)?;
            print_json(&dataset.options())?;
        }
    }

    Ok(())
}

/// Reads criteria from a JSON file.
fn read_criteria(path: &Path) -> Result<FilterCriteria, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let criteria = serde_json::from_str(&contents)?;
    log::debug!("Read criteria from {}", path.display());
    Ok(criteria)
}

/// Filters with `criteria`, or with everything selected when none are
/// given.
fn run_filter(dataset: &Dataset, criteria: Option<FilterCriteria>) -> FilterOutcome {
    let criteria = criteria.unwrap_or_else(|| dataset.options().permissive_criteria());
    dataset.filter(&criteria)
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
