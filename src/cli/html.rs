use anyhow::{Context, Result};
use std::path::PathBuf;

use rainfall_terminal::render::html::export_html_file;

use super::ProjectionArgs;

/// Write the standalone HTML dashboard
pub fn run(args: &ProjectionArgs, output: Option<PathBuf>) -> Result<()> {
    let projection = args.run_projection()?;

    let output = output.unwrap_or_else(|| {
        let csv_name = projection.config.csv_file_name();
        PathBuf::from(csv_name.trim_end_matches(".csv")).with_extension("html")
    });

    export_html_file(&projection, &output)
        .with_context(|| format!("Failed to write dashboard to {}", output.display()))?;

    println!("{}", output.display());
    Ok(())
}
