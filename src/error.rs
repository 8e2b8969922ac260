// ⚠️ Error taxonomy for the expense tracker
// Schema errors abort startup, parse errors re-prompt, empty dataset is just a message

use std::fmt;

/// Why user input could not become an expense record
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Date did not match YYYY-MM-DD (or named an impossible day)
    InvalidDate(String),
    /// Amount was not a finite number
    InvalidAmount(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidDate(raw) => write!(f, "Invalid date format! ({:?}, expected YYYY-MM-DD)", raw),
            ParseError::InvalidAmount(raw) => write!(f, "Invalid amount! ({:?})", raw),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    #[error("CSV missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("No expenses to analyze!")]
    EmptyDataset,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ExpenseError {
    /// Errors the menu loop reports and moves past
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExpenseError::Parse(_) | ExpenseError::EmptyDataset)
    }
}
