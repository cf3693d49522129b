use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;

use rainfall_terminal::projection::{Projection, ProjectionConfig, TableOrder};

mod config;
mod export;
mod html;
mod show;
mod summary;

use config::Config;

/// Rainfall Terminal - synthetic rainfall projection dashboard
#[derive(Parser)]
#[command(name = "rainfall-terminal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Row order of the table and the CSV export.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OrderArg {
    /// Oldest year first
    Asc,
    /// Newest year first
    Desc,
}

impl From<OrderArg> for TableOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => TableOrder::Ascending,
            OrderArg::Desc => TableOrder::Descending,
        }
    }
}

/// Settings shared by every command. Flags override the config file,
/// which overrides the built-in defaults.
#[derive(Args, Clone, Debug, Default)]
pub struct ProjectionArgs {
    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Region name used in titles and the export file name
    #[arg(long)]
    region: Option<String>,

    /// First year of the series
    #[arg(long, allow_negative_numbers = true)]
    start_year: Option<i32>,

    /// Last year of the series
    #[arg(long, allow_negative_numbers = true)]
    end_year: Option<i32>,

    /// Number of leading years treated as observed
    #[arg(long, value_name = "YEARS")]
    historical: Option<usize>,

    /// Years in each summary window
    #[arg(long, value_name = "YEARS")]
    window: Option<usize>,

    /// Seed of the noise generator
    #[arg(long)]
    seed: Option<u64>,

    /// Value at the first year before noise
    #[arg(long, allow_negative_numbers = true)]
    baseline: Option<f64>,

    /// Linear decrease per year
    #[arg(long, allow_negative_numbers = true)]
    decay_rate: Option<f64>,

    /// Standard deviation of the yearly noise
    #[arg(long, allow_negative_numbers = true)]
    noise_std: Option<f64>,

    /// Values below this are flagged in the table
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<f64>,

    /// Table and export row order
    #[arg(long, value_enum)]
    order: Option<OrderArg>,
}

impl ProjectionArgs {
    /// Merge defaults, the optional config file and the flags
    pub fn resolve(&self) -> Result<ProjectionConfig> {
        let mut config = ProjectionConfig::default();

        if let Some(path) = &self.config {
            info!("Loading settings from {}", path.display());
            Config::from_file(path)?.apply(&mut config);
        }

        if let Some(region) = &self.region {
            config.region = region.clone();
        }
        if let Some(year) = self.start_year {
            config.series.start_year = year;
        }
        if let Some(year) = self.end_year {
            config.series.end_year = year;
        }
        if let Some(len) = self.historical {
            config.historical_len = len;
        }
        if let Some(window) = self.window {
            config.window = window;
        }
        if let Some(seed) = self.seed {
            config.series.seed = seed;
        }
        if let Some(baseline) = self.baseline {
            config.series.baseline = baseline;
        }
        if let Some(rate) = self.decay_rate {
            config.series.decay_rate = rate;
        }
        if let Some(std) = self.noise_std {
            config.series.noise_std = std;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(order) = self.order {
            config.table_order = order.into();
        }

        Ok(config)
    }

    /// Resolve the settings and run the analysis
    pub fn run_projection(&self) -> Result<Projection> {
        let config = self.resolve()?;
        info!(
            "Projecting {} over {}..={} (historical {}, window {}, seed {})",
            config.region,
            config.series.start_year,
            config.series.end_year,
            config.historical_len,
            config.window,
            config.series.seed
        );
        Projection::run(config).context("Analysis failed")
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard to the terminal
    Show {
        #[command(flatten)]
        args: ProjectionArgs,

        /// Print at most this many table rows
        #[arg(long, value_name = "N")]
        rows: Option<usize>,

        /// Height of the ASCII chart in text rows
        #[arg(long, default_value = "16")]
        chart_height: usize,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Export the series as CSV
    Export {
        #[command(flatten)]
        args: ProjectionArgs,

        /// Output CSV path, or `-` for stdout (defaults to <region>_climate_projection.csv)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write a standalone HTML dashboard
    Html {
        #[command(flatten)]
        args: ProjectionArgs,

        /// Output HTML path (defaults to <region>_climate_projection.html)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the computed fit and window statistics as JSON
    Summary {
        #[command(flatten)]
        args: ProjectionArgs,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Show {
            args,
            rows,
            chart_height,
            no_color,
        } => show::run(&args, rows, chart_height, no_color),
        Commands::Export { args, output } => export::run(&args, output),
        Commands::Html { args, output } => html::run(&args, output),
        Commands::Summary { args } => summary::run(&args),
    }
}
