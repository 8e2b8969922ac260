// 💰 Interactive menu loop
// The table is threaded through every action by value and handed back at exit

use crate::analysis::{by_category, totals};
use crate::chart::{render_chart, PieRenderer};
use crate::error::ExpenseError;
use crate::expense::{parse_date, NewExpense};
use crate::report::{format_expenses, format_report};
use crate::store::{self, Table};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const BANNER_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    View,
    Add,
    Analyze,
    Chart,
    Exit,
}

impl MenuChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(MenuChoice::View),
            "2" => Some(MenuChoice::Add),
            "3" => Some(MenuChoice::Analyze),
            "4" => Some(MenuChoice::Chart),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Startup banner: title centered between two rules
pub fn banner() -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!(
        "\n{}\n{:^width$}\n{}",
        rule,
        "EXPENSE TRACKER SYSTEM",
        rule,
        width = BANNER_WIDTH
    )
}

/// Startup sequence: banner, load, dropped-row warning, then the menu
///
/// A file that cannot be loaded (missing columns, unreadable) returns the error
/// before the menu is ever printed.
pub fn run_tracker<R, W, P>(data_file: &Path, input: R, mut output: W, renderer: P) -> Result<Table>
where
    R: BufRead,
    W: Write,
    P: PieRenderer,
{
    writeln!(output, "{}", banner())?;

    let loaded = store::load(data_file)
        .with_context(|| format!("Failed to load {}", data_file.display()))?;

    if loaded.dropped > 0 {
        writeln!(
            output,
            "⚠️  Skipped {} row(s) with an invalid amount in {}",
            loaded.dropped,
            data_file.display()
        )?;
    }

    Session::new(input, output, renderer, data_file.to_path_buf()).run(loaded.table)
}

/// One run of the menu over some input and output
pub struct Session<R, W, P> {
    input: R,
    output: W,
    renderer: P,
    data_file: PathBuf,
}

impl<R: BufRead, W: Write, P: PieRenderer> Session<R, W, P> {
    pub fn new(input: R, output: W, renderer: P, data_file: PathBuf) -> Self {
        Session {
            input,
            output,
            renderer,
            data_file,
        }
    }

    pub fn renderer(&self) -> &P {
        &self.renderer
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Loop until the user exits (or input ends); returns the final table
    pub fn run(&mut self, mut table: Table) -> Result<Table> {
        loop {
            self.print_menu()?;
            let line = match self.prompt("Choose (1-5): ")? {
                Some(line) => line,
                None => {
                    self.say_goodbye(&table)?;
                    return Ok(table);
                }
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => {
                    self.say_goodbye(&table)?;
                    return Ok(table);
                }
                Some(choice) => {
                    debug!(?choice, "menu choice");
                    table = self.dispatch(choice, table)?;
                }
                None => writeln!(self.output, "Invalid choice!")?,
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice, table: Table) -> Result<Table> {
        match choice {
            MenuChoice::View => {
                self.view(&table)?;
                Ok(table)
            }
            MenuChoice::Add => self.add(table),
            MenuChoice::Analyze => {
                self.analyze(&table)?;
                Ok(table)
            }
            MenuChoice::Chart => {
                self.chart(&table)?;
                Ok(table)
            }
            MenuChoice::Exit => Ok(table),
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n💰 EXPENSE TRACKER MENU")?;
        writeln!(self.output, "1. View All Expenses")?;
        writeln!(self.output, "2. Add New Expense")?;
        writeln!(self.output, "3. Run Full Analysis")?;
        writeln!(self.output, "4. Show Pie Chart (Bonus)")?;
        writeln!(self.output, "5. Exit")?;
        Ok(())
    }

    /// Print a label and read one line; None at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn view(&mut self, table: &Table) -> Result<()> {
        writeln!(self.output, "\n📋 ALL EXPENSES")?;
        writeln!(self.output, "{}", format_expenses(table))?;
        Ok(())
    }

    /// Ask Date, Category, Description, Amount; a bad date stops right away
    fn add(&mut self, table: Table) -> Result<Table> {
        writeln!(self.output, "\n➕ Add New Expense")?;

        let Some(date) = self.prompt("Date (YYYY-MM-DD): ")? else {
            return Ok(table);
        };
        if let Err(err) = parse_date(&date) {
            writeln!(self.output, "{}", err)?;
            return Ok(table);
        }

        let Some(category) = self.prompt("Category: ")? else {
            return Ok(table);
        };
        let Some(description) = self.prompt("Description: ")? else {
            return Ok(table);
        };
        let Some(amount) = self.prompt("Amount: ")? else {
            return Ok(table);
        };

        let input = NewExpense {
            date,
            category,
            description,
            amount,
        };

        let updated = match store::append(&table, &input) {
            Ok(updated) => updated,
            Err(err) => {
                writeln!(self.output, "{}", err)?;
                return Ok(table);
            }
        };

        match store::save(&self.data_file, &updated) {
            Ok(()) => writeln!(self.output, "✓ Expense added ({} total)", updated.len())?,
            Err(err) => {
                warn!(error = %err, path = %self.data_file.display(), "save failed");
                writeln!(self.output, "⚠️  Expense kept in memory but not saved: {}", err)?;
            }
        }

        Ok(updated)
    }

    fn analyze(&mut self, table: &Table) -> Result<()> {
        match totals(table) {
            Ok(totals) => {
                let report = format_report(&totals, &by_category(table), table.len());
                write!(self.output, "{}", report)?;
            }
            Err(err) if err.is_recoverable() => writeln!(self.output, "{}", err)?,
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn chart(&mut self, table: &Table) -> Result<()> {
        if table.is_empty() {
            writeln!(self.output, "No data to visualize!")?;
            return Ok(());
        }

        self.output.flush()?;
        if let Err(err) = render_chart(&by_category(table), &mut self.renderer) {
            match err.downcast_ref::<ExpenseError>() {
                Some(e) if e.is_recoverable() => writeln!(self.output, "No data to visualize!")?,
                _ => {
                    warn!(error = %err, "chart rendering failed");
                    writeln!(self.output, "⚠️  Could not draw chart: {:#}", err)?;
                }
            }
        }
        Ok(())
    }

    fn say_goodbye(&mut self, table: &Table) -> Result<()> {
        if table.is_empty() {
            writeln!(self.output, "Goodbye!")?;
        } else {
            writeln!(self.output, "Goodbye! Data saved.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::PieChart;
    use std::io::Cursor;

    #[derive(Default)]
    struct RecordingRenderer {
        charts: Vec<PieChart>,
    }

    impl PieRenderer for RecordingRenderer {
        fn render(&mut self, chart: &PieChart) -> Result<()> {
            self.charts.push(chart.clone());
            Ok(())
        }
    }

    fn run_script(script: &str, table: Table, data_file: PathBuf) -> (Table, String, Vec<PieChart>) {
        let mut session = Session::new(
            Cursor::new(script.to_string()),
            Vec::new(),
            RecordingRenderer::default(),
            data_file,
        );
        let table = session.run(table).unwrap();
        let charts = session.renderer().charts.clone();
        let output = String::from_utf8(session.into_output()).unwrap();
        (table, output, charts)
    }

    #[test]
    fn test_menu_lists_all_five_choices() {
        let dir = tempfile::tempdir().unwrap();
        let (_, output, _) = run_script("5\n", Table::new(), dir.path().join("x.csv"));

        assert!(output.contains("1. View All Expenses"));
        assert!(output.contains("4. Show Pie Chart (Bonus)"));
        assert!(output.contains("5. Exit"));
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::View));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("6"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_banner_is_centered() {
        let banner = banner();
        let lines: Vec<&str> = banner.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].trim(), "EXPENSE TRACKER SYSTEM");
        assert_eq!(lines[1].len(), BANNER_WIDTH);
    }

    #[test]
    fn test_add_then_exit_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expenses.csv");

        let (table, output, _) = run_script(
            "2\n2024-02-13\nfood\nlunch\n12.5\n5\n",
            Table::new(),
            path.clone(),
        );

        assert_eq!(table.len(), 1);
        assert!(output.contains("Goodbye! Data saved."));
        assert_eq!(store::load(&path).unwrap().table, table);
    }

    #[test]
    fn test_bad_date_stops_before_other_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expenses.csv");

        let (table, output, _) = run_script("2\n13/02/2024\n5\n", Table::new(), path.clone());

        assert!(table.is_empty());
        assert!(output.contains("Invalid date format!"));
        assert!(!output.contains("Category: "));
        assert!(!path.exists());
        assert!(output.trim_end().ends_with("Goodbye!"));
    }

    #[test]
    fn test_bad_amount_reprompts_menu() {
        let dir = tempfile::tempdir().unwrap();
        let (table, output, _) = run_script(
            "2\n2024-02-13\nFood\nlunch\nabc\n5\n",
            Table::new(),
            dir.path().join("expenses.csv"),
        );

        assert!(table.is_empty());
        assert!(output.contains("Invalid amount!"));
        assert_eq!(output.matches("EXPENSE TRACKER MENU").count(), 2);
    }

    #[test]
    fn test_analysis_and_chart_on_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let (_, output, charts) = run_script("3\n4\n5\n", Table::new(), dir.path().join("x.csv"));

        assert!(output.contains("No expenses to analyze!"));
        assert!(output.contains("No data to visualize!"));
        assert!(charts.is_empty());
    }

    #[test]
    fn test_chart_with_only_refunds_has_nothing_to_draw() {
        let dir = tempfile::tempdir().unwrap();
        let script = "2\n2024-02-13\nrefund\nshoes\n-40\n4\n5\n";

        let (table, output, charts) = run_script(script, Table::new(), dir.path().join("x.csv"));

        assert_eq!(table.len(), 1);
        assert!(output.contains("No data to visualize!"));
        assert!(!output.contains("Could not draw chart"));
        assert!(charts.is_empty());
    }

    #[test]
    fn test_run_tracker_warns_about_dropped_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expenses.csv");
        std::fs::write(
            &path,
            "Date,Category,Amount,Description\n2024-02-01,Food,ten,typo\n2024-02-02,Food,4,tea\n",
        )
        .unwrap();

        let mut output = Vec::new();
        let table = run_tracker(
            &path,
            Cursor::new("5\n"),
            &mut output,
            RecordingRenderer::default(),
        )
        .unwrap();
        let output = String::from_utf8(output).unwrap();

        assert_eq!(table.len(), 1);
        assert!(output.starts_with(&banner()));
        assert!(output.contains("Skipped 1 row(s) with an invalid amount"));
        assert!(output.contains("EXPENSE TRACKER MENU"));
    }

    #[test]
    fn test_invalid_choice_and_eof() {
        let dir = tempfile::tempdir().unwrap();
        let (_, output, _) = run_script("9\n", Table::new(), dir.path().join("x.csv"));

        assert!(output.contains("Invalid choice!"));
        assert!(output.trim_end().ends_with("Goodbye!"));
    }

    #[test]
    fn test_chart_receives_category_totals() {
        let dir = tempfile::tempdir().unwrap();
        let script = "2\n2024-02-13\nFood\nlunch\n10\n\
                      2\n2024-02-14\nTransport\nbus\n5\n\
                      2\n2024-02-15\nfood\ndinner\n20\n\
                      4\n5\n";

        let (_, _, charts) = run_script(script, Table::new(), dir.path().join("x.csv"));

        assert_eq!(charts.len(), 1);
        let slices: Vec<(&str, f64)> = charts[0]
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect();
        assert_eq!(slices, vec![("Food", 30.0), ("Transport", 5.0)]);
    }
}
