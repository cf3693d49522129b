use anyhow::{Context, Result};

use rainfall_terminal::export::ProjectionSummary;

use super::ProjectionArgs;

/// Print the run summary as JSON
pub fn run(args: &ProjectionArgs) -> Result<()> {
    let projection = args.run_projection()?;
    let json = ProjectionSummary::new(&projection)
        .to_json()
        .context("Failed to serialize summary")?;
    println!("{}", json);
    Ok(())
}
