use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::path::PathBuf;

use rainfall_terminal::export::{export_csv_file, to_csv_bytes};

use super::ProjectionArgs;

/// Export the series as CSV to a file or stdout
pub fn run(args: &ProjectionArgs, output: Option<PathBuf>) -> Result<()> {
    let projection = args.run_projection()?;

    let output =
        output.unwrap_or_else(|| PathBuf::from(projection.config.csv_file_name()));

    if output.as_os_str() == "-" {
        let bytes = to_csv_bytes(&projection).context("Failed to encode CSV")?;
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(&bytes).context("Failed to write CSV to stdout")?;
        handle.flush()?;
        return Ok(());
    }

    export_csv_file(&projection, &output)
        .with_context(|| format!("Failed to export CSV to {}", output.display()))?;

    info!("Rows exported: {}", projection.series.len());
    println!("{}", output.display());
    Ok(())
}
