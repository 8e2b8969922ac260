//! Runtime configuration, read from the environment (and `.env` if present).

use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "expenses.csv";

/// How option 4 draws the pie chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// Full-screen ratatui canvas (needs the `tui` feature)
    Terminal,
    /// Proportional bars printed to stdout
    Text,
}

impl ChartMode {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "terminal" | "tui" => Ok(ChartMode::Terminal),
            "text" => Ok(ChartMode::Text),
            other => bail!("unknown chart mode {:?} (expected \"terminal\" or \"text\")", other),
        }
    }
}

impl Default for ChartMode {
    fn default() -> Self {
        if cfg!(feature = "tui") {
            ChartMode::Terminal
        } else {
            ChartMode::Text
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// CSV file holding the expense table
    pub data_file: PathBuf,
    pub chart_mode: ChartMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            chart_mode: ChartMode::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // .env is optional
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(path) = get("EXPENSE_TRACKER_FILE") {
            config.data_file = PathBuf::from(path);
        }
        if let Some(mode) = get("EXPENSE_TRACKER_CHART") {
            config.chart_mode = ChartMode::parse(&mode)?;
        }

        Ok(config)
    }
}
