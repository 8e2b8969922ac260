// 🖨️ Report formatting - fixed-width text, no business logic

use crate::analysis::{CategorySummary, Totals};
use crate::store::Table;
use std::fmt;

const RULE_WIDTH: usize = 50;

/// Horizontal rule of `RULE_WIDTH` copies of one character
struct Rule(char);

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for _ in 0..RULE_WIDTH {
            write!(f, "{}", self.0)?;
        }
        Ok(())
    }
}

/// Overview section followed by the category table and its TOTAL footer
pub struct Report<'a> {
    pub totals: &'a Totals,
    pub by_category: &'a [CategorySummary],
    pub record_count: usize,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let totals = self.totals;

        writeln!(f, "\n💵 TOTAL SPENDING OVERVIEW")?;
        writeln!(f, "{}", Rule('='))?;
        writeln!(f, "• Total Amount Spent: ${:.2}", totals.total)?;
        writeln!(
            f,
            "• Highest Expense: ${:.2} ({} - {})",
            totals.max.amount, totals.max.category, totals.max.description
        )?;
        writeln!(
            f,
            "• Lowest Expense: ${:.2} ({} - {})",
            totals.min.amount, totals.min.category, totals.min.description
        )?;

        writeln!(f, "\n📊 CATEGORY-WISE ANALYSIS")?;
        writeln!(f, "{}", Rule('='))?;
        writeln!(f, "{:<15} {:>12} {:>8} {:>10}", "Category", "Total", "Count", "%")?;
        writeln!(f, "{}", Rule('-'))?;

        for cat in self.by_category {
            writeln!(
                f,
                "{:<15} ${:>11.2} {:>8} {:>9.2}%",
                cat.category, cat.total, cat.count, cat.percentage
            )?;
        }

        writeln!(f, "{}", Rule('='))?;
        writeln!(
            f,
            "{:<15} ${:>11.2} {:>8} {:>9}%",
            "TOTAL", totals.total, self.record_count, "100.00"
        )
    }
}

pub fn format_report(totals: &Totals, by_category: &[CategorySummary], record_count: usize) -> String {
    Report {
        totals,
        by_category,
        record_count,
    }
    .to_string()
}

/// Aligned listing of every record, in table order
///
/// Column widths are computed from the cells, so dates kept verbatim from the
/// file (any length) still line up.
pub struct ExpenseListing<'a>(pub &'a Table);

impl fmt::Display for ExpenseListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let table = self.0;
        if table.is_empty() {
            return write!(f, "No expenses found");
        }

        let dates: Vec<String> = table.iter().map(|e| e.date.to_string()).collect();
        let amounts: Vec<String> = table.iter().map(|e| format!("{:.2}", e.amount)).collect();

        let dw = column_width(dates.iter().map(|d| d.chars().count()), "Date");
        let cw = column_width(table.iter().map(|e| e.category.chars().count()), "Category");
        let aw = column_width(amounts.iter().map(String::len), "Amount");

        write!(
            f,
            "{:<dw$}  {:<cw$}  {:>aw$}  Description",
            "Date", "Category", "Amount"
        )?;

        for ((expense, date), amount) in table.iter().zip(&dates).zip(&amounts) {
            write!(
                f,
                "\n{:<dw$}  {:<cw$}  {:>aw$}  {}",
                date, expense.category, amount, expense.description
            )?;
        }

        Ok(())
    }
}

fn column_width(cells: impl Iterator<Item = usize>, header: &str) -> usize {
    cells.chain(std::iter::once(header.len())).max().unwrap_or(0)
}

pub fn format_expenses(table: &Table) -> String {
    ExpenseListing(table).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{by_category, totals};
    use crate::expense::{Expense, ExpenseDate};
    use chrono::NaiveDate;

    fn sample_table() -> Table {
        let date = NaiveDate::from_ymd_opt(2024, 2, 13).unwrap();
        Table::from_records(vec![
            Expense::new(date, "Food", 10.0, "lunch"),
            Expense::new(date, "Food", 20.0, "dinner"),
            Expense::new(date, "Transport", 5.0, "bus"),
        ])
    }

    #[test]
    fn test_format_report_layout() {
        let table = sample_table();
        let report = format_report(&totals(&table).unwrap(), &by_category(&table), table.len());

        assert!(report.contains("• Total Amount Spent: $35.00"));
        assert!(report.contains("• Highest Expense: $20.00 (Food - dinner)"));
        assert!(report.contains("• Lowest Expense: $5.00 (Transport - bus)"));
        assert!(report.contains("Category               Total    Count          %"));
        assert!(report.contains("Food            $      30.00        2     85.71%"));
        assert!(report.contains("Transport       $       5.00        1     14.29%"));
        assert!(report.contains("TOTAL           $      35.00        3    100.00%"));
    }

    #[test]
    fn test_format_report_sections_in_order() {
        let table = sample_table();
        let report = format_report(&totals(&table).unwrap(), &by_category(&table), table.len());

        let overview = report.find("TOTAL SPENDING OVERVIEW").unwrap();
        let breakdown = report.find("CATEGORY-WISE ANALYSIS").unwrap();
        let footer = report.rfind("TOTAL ").unwrap();
        assert!(overview < breakdown && breakdown < footer);
    }

    #[test]
    fn test_format_expenses_empty() {
        assert_eq!(format_expenses(&Table::new()), "No expenses found");
    }

    #[test]
    fn test_format_expenses_aligns_columns() {
        let listing = format_expenses(&sample_table());
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Date        Category   Amount  Description");
        assert_eq!(lines[1], "2024-02-13  Food        10.00  lunch");
        assert_eq!(lines[3], "2024-02-13  Transport    5.00  bus");
    }

    #[test]
    fn test_format_expenses_widens_for_stored_dates() {
        let table = sample_table().with_record(Expense {
            date: ExpenseDate::Raw("1st of Feb 2024".to_string()),
            category: "Rent".to_string(),
            amount: 800.0,
            description: "February".to_string(),
        });

        let listing = format_expenses(&table);
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines[0], "Date             Category   Amount  Description");
        assert_eq!(lines[1], "2024-02-13       Food        10.00  lunch");
        assert_eq!(lines[4], "1st of Feb 2024  Rent       800.00  February");
    }
}
