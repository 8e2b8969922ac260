// 📊 Analyzer - totals and per-category breakdown
// Everything here is a single pass over the table

use crate::error::ExpenseError;
use crate::expense::{round2, Expense};
use crate::store::Table;
use std::collections::HashMap;

/// Grand total plus the extreme records
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub total: f64,
    pub max: Expense,
    pub min: Expense,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: String,
    pub total: f64,
    pub count: usize,
    /// Share of the grand total, rounded to 2 decimals
    pub percentage: f64,
}

/// Sum, highest and lowest expense
///
/// Ties on max/min resolve to the first record in table order.
pub fn totals(table: &Table) -> Result<Totals, ExpenseError> {
    let mut iter = table.iter();
    let first = iter.next().ok_or(ExpenseError::EmptyDataset)?;

    let mut total = first.amount;
    let mut max = first;
    let mut min = first;

    for expense in iter {
        total += expense.amount;
        if expense.amount > max.amount {
            max = expense;
        }
        if expense.amount < min.amount {
            min = expense;
        }
    }

    Ok(Totals {
        total,
        max: max.clone(),
        min: min.clone(),
    })
}

/// Group by category (as stored, case-sensitive), largest total first
pub fn by_category(table: &Table) -> Vec<CategorySummary> {
    let mut order: Vec<CategorySummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut grand_total = 0.0;

    for expense in table {
        grand_total += expense.amount;
        match index.get(expense.category.as_str()) {
            Some(&i) => {
                order[i].total += expense.amount;
                order[i].count += 1;
            }
            None => {
                index.insert(expense.category.as_str(), order.len());
                order.push(CategorySummary {
                    category: expense.category.clone(),
                    total: expense.amount,
                    count: 1,
                    percentage: 0.0,
                });
            }
        }
    }

    for summary in &mut order {
        summary.percentage = percentage_of(summary.total, grand_total);
    }

    // stable sort keeps first-encountered order among equal totals
    order.sort_by(|a, b| b.total.total_cmp(&a.total));
    order
}

/// A grand total that rounds to zero cents means there is nothing to divide by; report 0%
fn percentage_of(part: f64, whole: f64) -> f64 {
    if round2(whole) == 0.0 {
        0.0
    } else {
        round2(part / whole * 100.0)
    }
}
