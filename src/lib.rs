// Expense Tracker - Core Library
// Exposes all modules for the CLI binary and tests

pub mod analysis;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod expense;
pub mod report;
pub mod store;

// Pie chart on a ratatui canvas
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use analysis::{by_category, totals, CategorySummary, Totals};
pub use chart::{render_chart, PieChart, PieRenderer, PieSlice, TextPieRenderer};
pub use cli::{run_tracker, MenuChoice, Session};
pub use config::{ChartMode, Config};
pub use error::{ExpenseError, ParseError};
pub use expense::{Expense, ExpenseDate, NewExpense};
pub use report::{format_expenses, format_report, ExpenseListing, Report};
pub use store::{append, load, save, Loaded, Table};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
