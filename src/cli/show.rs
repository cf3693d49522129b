use anyhow::Result;

use rainfall_terminal::render::{Dashboard, TerminalDashboard};

use super::ProjectionArgs;

/// Print the dashboard to stdout
pub fn run(
    args: &ProjectionArgs,
    rows: Option<usize>,
    chart_height: usize,
    no_color: bool,
) -> Result<()> {
    let projection = args.run_projection()?;
    let dashboard = Dashboard::new(&projection);

    let mut terminal = TerminalDashboard::new(&dashboard).with_chart_height(chart_height);
    if let Some(rows) = rows {
        terminal = terminal.with_max_rows(rows);
    }

    if no_color {
        println!("{}", terminal);
    } else {
        println!("{}", terminal.format_colored());
    }

    Ok(())
}
