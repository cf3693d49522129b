//! # Rainfall Terminal
//!
//! Command-line dashboard for a synthetic annual rainfall projection.
//!
//! ## Usage
//!
//! ```bash
//! # Print the dashboard
//! rainfall-terminal show --rows 20
//!
//! # Export the series as CSV
//! rainfall-terminal export --output gaziantep_climate_projection.csv
//!
//! # Write a standalone HTML dashboard
//! rainfall-terminal html
//!
//! # Fit and window statistics as JSON
//! rainfall-terminal summary --config rainfall.toml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
