// 🧾 Expense record - the one row type of the tracker
// Four typed fields, capitalized category, amount rounded to cents

use crate::error::ParseError;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

/// Column names of the persisted file, in write order
pub const HEADERS: [&str; 4] = ["Date", "Category", "Amount", "Description"];

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date cell of a record
///
/// Entry only ever produces `Parsed`. Rows loaded from the file keep whatever
/// text they had when it is not a YYYY-MM-DD date, so saving writes it back as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseDate {
    Parsed(NaiveDate),
    Raw(String),
}

impl ExpenseDate {
    pub fn from_stored(raw: &str) -> Self {
        match parse_date(raw) {
            Ok(date) => ExpenseDate::Parsed(date),
            Err(_) => ExpenseDate::Raw(raw.to_string()),
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            ExpenseDate::Parsed(date) => Some(*date),
            ExpenseDate::Raw(_) => None,
        }
    }
}

impl From<NaiveDate> for ExpenseDate {
    fn from(date: NaiveDate) -> Self {
        ExpenseDate::Parsed(date)
    }
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseDate::Parsed(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            ExpenseDate::Raw(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for ExpenseDate {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    #[serde(rename = "Date")]
    pub date: ExpenseDate,

    #[serde(rename = "Category")]
    pub category: String,

    #[serde(rename = "Amount", serialize_with = "serialize_amount")]
    pub amount: f64,

    #[serde(rename = "Description")]
    pub description: String,
}

fn serialize_amount<S: Serializer>(amount: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("{:.2}", amount))
}

/// Raw answers collected by the "add expense" prompts
#[derive(Debug, Clone, Default)]
pub struct NewExpense {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

impl Expense {
    pub fn new(date: NaiveDate, category: &str, amount: f64, description: &str) -> Self {
        Expense {
            date: date.into(),
            category: category.to_string(),
            amount,
            description: description.to_string(),
        }
    }

    /// Validate prompt answers and build a record
    /// Date is checked before amount, so a bad date wins when both are wrong
    pub fn from_input(input: &NewExpense) -> Result<Self, ParseError> {
        let date = parse_date(&input.date)?;
        let amount = parse_amount(&input.amount)?;

        Ok(Expense {
            date: date.into(),
            category: capitalize(input.category.trim()),
            amount,
            description: input.description.trim().to_string(),
        })
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(raw.to_string()))
}

/// Parse a user-typed amount, rounded to 2 decimals
pub fn parse_amount(raw: &str) -> Result<f64, ParseError> {
    let value = coerce_amount(raw).ok_or_else(|| ParseError::InvalidAmount(raw.to_string()))?;
    Ok(round2(value))
}

/// Lenient numeric coercion used when loading the file: finite or nothing
pub fn coerce_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// First character upper-case, the rest lower-case ("fOOD" -> "Food")
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
