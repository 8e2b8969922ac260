// 💾 Store - CSV file in, CSV file out
// The whole table is rewritten on every save; there is no append-only log

use crate::error::{ExpenseError, ParseError};
use crate::expense::{coerce_amount, round2, Expense, ExpenseDate, NewExpense, HEADERS};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::path::Path;
use tracing::{debug, info, warn};

/// Ordered expense records, insertion order preserved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<Expense>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Expense>) -> Self {
        Table { records }
    }

    pub fn records(&self) -> &[Expense] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expense> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the table and return it with one more record at the end
    pub fn with_record(mut self, expense: Expense) -> Self {
        self.records.push(expense);
        self
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Expense;
    type IntoIter = std::slice::Iter<'a, Expense>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Result of loading the file: the usable rows plus how many were thrown away
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub table: Table,
    pub dropped: usize,
}

/// Positions of the four required columns in the file header
struct ColumnIndex {
    date: usize,
    category: usize,
    amount: usize,
    description: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, ExpenseError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let positions: Vec<Option<usize>> = HEADERS.iter().map(|name| find(*name)).collect();
        let missing: Vec<String> = HEADERS
            .iter()
            .zip(&positions)
            .filter(|(_, pos)| pos.is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        match positions.as_slice() {
            [Some(date), Some(category), Some(amount), Some(description)] => Ok(ColumnIndex {
                date: *date,
                category: *category,
                amount: *amount,
                description: *description,
            }),
            _ => Err(ExpenseError::Schema { missing }),
        }
    }

    /// Lossy row conversion: None only when the amount is not a number
    /// Amounts are rounded to cents so memory matches what `save` writes
    fn to_expense(&self, row: &StringRecord) -> Option<Expense> {
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let amount = round2(coerce_amount(field(self.amount))?);

        Some(Expense {
            date: ExpenseDate::from_stored(field(self.date)),
            category: field(self.category).to_string(),
            amount,
            description: field(self.description).to_string(),
        })
    }
}

/// Load the expense table
///
/// A missing file is an empty table. A file without the four required columns
/// is a `Schema` error. Rows whose amount is not a finite number are dropped
/// on purpose and counted in `Loaded::dropped`. Dates are not validated here.
pub fn load(path: &Path) -> Result<Loaded, ExpenseError> {
    if !path.exists() {
        info!(path = %path.display(), "no expense file yet, starting empty");
        return Ok(Loaded::default());
    }

    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    let columns = ColumnIndex::from_headers(rdr.headers()?)?;

    let mut records = Vec::new();
    let mut dropped = 0;

    for result in rdr.records() {
        let row = result?;
        match columns.to_expense(&row) {
            Some(expense) => records.push(expense),
            None => {
                debug!(line = ?row.position().map(|p| p.line()), "dropping unusable row");
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        warn!(dropped, "dropped rows with invalid amount");
    }
    info!(path = %path.display(), count = records.len(), "loaded expenses");

    Ok(Loaded {
        table: Table::from_records(records),
        dropped,
    })
}

/// Overwrite the file with the full table (header row always written)
pub fn save(path: &Path, table: &Table) -> Result<(), ExpenseError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_path(path)?;

    wtr.write_record(HEADERS)?;
    for expense in table {
        wtr.serialize(expense)?;
    }
    wtr.flush()?;

    info!(path = %path.display(), count = table.len(), "saved expenses");
    Ok(())
}

/// Validate the answers and return a new table with the record appended
///
/// The caller's table is only borrowed, so on error it is left exactly as it was.
pub fn append(table: &Table, input: &NewExpense) -> Result<Table, ParseError> {
    let expense = Expense::from_input(input)?;
    Ok(table.clone().with_record(expense))
}
