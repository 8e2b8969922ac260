use anyhow::Result;
use std::io;
use tracing_subscriber::EnvFilter;

use expense_tracker::{run_tracker, ChartMode, Config, PieRenderer, TextPieRenderer};

fn main() -> Result<()> {
    // Logs go to stderr so the menu on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = Config::from_env()?;
    let renderer = chart_renderer(config.chart_mode);

    // A file with missing columns stops us before the menu
    let stdin = io::stdin();
    run_tracker(&config.data_file, stdin.lock(), io::stdout(), renderer)?;

    Ok(())
}

#[cfg(feature = "tui")]
fn chart_renderer(mode: ChartMode) -> Box<dyn PieRenderer> {
    use std::io::IsTerminal;

    // The canvas needs a real terminal on both ends
    if mode == ChartMode::Terminal && io::stdout().is_terminal() && io::stdin().is_terminal() {
        Box::new(expense_tracker::ui::TerminalPieRenderer)
    } else {
        Box::new(TextPieRenderer::new(io::stdout()))
    }
}

#[cfg(not(feature = "tui"))]
fn chart_renderer(mode: ChartMode) -> Box<dyn PieRenderer> {
    if mode == ChartMode::Terminal {
        tracing::warn!("terminal chart needs the \"tui\" feature, falling back to text");
    }
    Box::new(TextPieRenderer::new(io::stdout()))
}
