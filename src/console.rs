//! Interactive Console
//!
//! Single-process front end with three views: Mark Attendance, Edit Salary
//! and Dashboard. Each interaction opens a fresh session and re-renders from
//! the database, so nothing typed survives between interactions unless it
//! was written to the store.
//!
//! Input and output are generic so the views can be driven from tests.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};
use thiserror::Error;

use crate::report::{self, ReportError, ReportRow, ReportSummary, REPORT_FILENAME};
use crate::storage::{self, AttendanceMark, AttendanceStatus, Employee, StorageError, Store};

/// Width of the longest dashboard bar, in characters
const CHART_WIDTH: u32 = 40;

/// Errors that end a console interaction
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// The navigable views
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum View {
    /// Record today's attendance for every employee
    Mark,
    /// Change employee salaries
    Salary,
    /// Attendance totals and CSV export
    Dashboard,
}

impl View {
    fn title(&self) -> &'static str {
        match self {
            View::Mark => "Mark Attendance",
            View::Salary => "Edit Salary",
            View::Dashboard => "Dashboard",
        }
    }
}

#[derive(Tabled)]
struct SalaryLine {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Salary (₹)")]
    salary: String,
}

#[derive(Tabled)]
struct ReportLine {
    #[tabled(rename = "Employee Name")]
    name: String,
    #[tabled(rename = "Days Present")]
    present: u32,
    #[tabled(rename = "Days Absent")]
    absent: u32,
}

/// Console front end over a [`Store`]
pub struct Console<R, W> {
    store: Store,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(store: Store, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Consume the console and hand back its output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Menu loop. Returns when the user quits or input ends.
    pub fn run(&mut self) -> ConsoleResult<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Paybook - Attendance & Payroll")?;
            writeln!(self.output, "  1) {}", View::Mark.title())?;
            writeln!(self.output, "  2) {}", View::Salary.title())?;
            writeln!(self.output, "  3) {}", View::Dashboard.title())?;
            writeln!(self.output, "  q) Quit")?;

            let Some(choice) = self.prompt("> ")? else {
                return Ok(());
            };

            let view = match choice.to_lowercase().as_str() {
                "1" | "m" | "mark" => View::Mark,
                "2" | "s" | "salary" => View::Salary,
                "3" | "d" | "dashboard" => View::Dashboard,
                "q" | "quit" | "exit" => return Ok(()),
                "" => continue,
                other => {
                    writeln!(self.output, "Unknown choice: {}", other)?;
                    continue;
                }
            };

            match self.show(view) {
                Ok(()) => {}
                Err(ConsoleError::Io(e)) => return Err(ConsoleError::Io(e)),
                Err(e) => {
                    tracing::error!(view = ?view, error = %e, "Console interaction failed");
                    writeln!(self.output, "Error: {}", e)?;
                }
            }
        }
    }

    /// Render a single view
    pub fn show(&mut self, view: View) -> ConsoleResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "== {} ==", view.title())?;

        match view {
            View::Mark => self.mark_attendance(),
            View::Salary => self.edit_salary(),
            View::Dashboard => self.dashboard(),
        }
    }

    fn mark_attendance(&mut self) -> ConsoleResult<()> {
        let employees = self.store.session()?.employees()?;
        let today = storage::today();

        writeln!(self.output, "Date: {}", today.format("%Y-%m-%d"))?;

        let mut marks = Vec::with_capacity(employees.len());
        for employee in &employees {
            let Some(status) = self.ask_status(employee)? else {
                writeln!(self.output, "Attendance not submitted.")?;
                return Ok(());
            };
            marks.push(AttendanceMark::new(employee.id, status));
        }

        let question = format!("Submit attendance for {} employees? [Y/n]: ", marks.len());
        let confirmed = matches!(
            self.prompt(&question)?.as_deref().map(str::to_lowercase).as_deref(),
            Some("" | "y" | "yes")
        );

        if !confirmed {
            writeln!(self.output, "Attendance not submitted.")?;
            return Ok(());
        }

        self.store.session()?.record_attendance(today, &marks)?;
        writeln!(self.output, "Attendance marked successfully.")?;
        Ok(())
    }

    /// Ask until a valid status is given. `None` when input ends.
    fn ask_status(&mut self, employee: &Employee) -> ConsoleResult<Option<AttendanceStatus>> {
        let question = format!(
            "{} (ID {}) [present/absent] ({}): ",
            employee.name,
            employee.id,
            AttendanceStatus::default()
        );

        loop {
            let Some(answer) = self.prompt(&question)? else {
                return Ok(None);
            };

            if answer.is_empty() {
                return Ok(Some(AttendanceStatus::default()));
            }

            match answer.parse() {
                Ok(status) => return Ok(Some(status)),
                Err(_) => writeln!(self.output, "Please answer present or absent.")?,
            }
        }
    }

    fn edit_salary(&mut self) -> ConsoleResult<()> {
        loop {
            let employees = self.store.session()?.employees()?;

            let lines: Vec<SalaryLine> = employees
                .iter()
                .map(|e| SalaryLine {
                    id: e.id,
                    name: e.name.clone(),
                    salary: format!("{:.2}", e.salary),
                })
                .collect();
            let mut table = Table::new(lines);
            table.with(Style::modern());
            writeln!(self.output, "{table}")?;

            let Some(answer) = self.prompt("Employee ID to update (blank to go back): ")? else {
                return Ok(());
            };
            if answer.is_empty() {
                return Ok(());
            }

            let Ok(id) = answer.parse::<i64>() else {
                writeln!(self.output, "Not a valid employee id: {}", answer)?;
                continue;
            };

            let Some(employee) = employees.iter().find(|e| e.id == id) else {
                writeln!(self.output, "No employee with ID {}.", id)?;
                continue;
            };

            let question = format!(
                "New salary for {} (₹) [{:.2}]: ",
                employee.name, employee.salary
            );
            let Some(amount) = self.prompt(&question)? else {
                return Ok(());
            };
            if amount.is_empty() {
                writeln!(self.output, "Salary unchanged.")?;
                continue;
            }

            let Ok(salary) = amount.parse::<f64>() else {
                writeln!(self.output, "Not a valid amount: {}", amount)?;
                continue;
            };

            self.store.session()?.update_salary(employee.id, salary)?;
            writeln!(self.output, "Updated salary for {}", employee.name)?;
        }
    }

    fn dashboard(&mut self) -> ConsoleResult<()> {
        let rows = self.store.session()?.attendance_report()?;

        let lines: Vec<ReportLine> = rows
            .iter()
            .map(|r| ReportLine {
                name: r.name.clone(),
                present: r.present,
                absent: r.absent,
            })
            .collect();
        let mut table = Table::new(lines);
        table.with(Style::modern());
        writeln!(self.output, "{table}")?;

        self.render_chart(&rows)?;

        let summary = ReportSummary::from_rows(&rows);
        write!(
            self.output,
            "Totals: {} present, {} absent across {} employees",
            summary.present, summary.absent, summary.employees
        )?;
        match summary.present_ratio() {
            Some(ratio) => writeln!(self.output, " ({:.1}% present)", ratio * 100.0)?,
            None => writeln!(self.output)?,
        }

        let Some(choice) = self.prompt("e) Export CSV, Enter) Back: ")? else {
            return Ok(());
        };
        if !choice.eq_ignore_ascii_case("e") {
            return Ok(());
        }

        let question = format!("Export to [{}]: ", REPORT_FILENAME);
        let Some(path) = self.prompt(&question)? else {
            return Ok(());
        };
        let path = if path.is_empty() {
            PathBuf::from(REPORT_FILENAME)
        } else {
            PathBuf::from(path)
        };

        let csv = report::to_csv(&rows)?;
        std::fs::write(&path, &csv)?;

        tracing::info!(path = ?path, rows = rows.len(), "Exported attendance report");
        writeln!(self.output, "Report written to {}", path.display())?;
        Ok(())
    }

    fn render_chart(&mut self, rows: &[ReportRow]) -> ConsoleResult<()> {
        let longest = rows.iter().map(|r| r.present + r.absent).max().unwrap_or(0);
        if longest == 0 {
            writeln!(self.output, "No attendance recorded yet.")?;
            return Ok(());
        }

        let width = |count: u32| (count * CHART_WIDTH).div_ceil(longest) as usize;
        let name_width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);

        writeln!(self.output, "# present  - absent")?;
        for row in rows {
            writeln!(
                self.output,
                "{:<name_width$} |{}{}",
                row.name,
                "#".repeat(width(row.present)),
                "-".repeat(width(row.absent)),
            )?;
        }
        Ok(())
    }

    /// Print `text` and read one trimmed line. `None` on end of input.
    fn prompt(&mut self, text: &str) -> ConsoleResult<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::test_store;
    use std::io::Cursor;

    fn run_console(store: &Store, input: &str) -> String {
        let mut console = Console::new(store.clone(), Cursor::new(input.to_string()), Vec::new());
        console.run().unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_quit_and_eof() {
        let (store, _dir) = test_store();
        run_console(&store, "q\n");
        run_console(&store, "");
    }

    #[test]
    fn test_mark_attendance_defaults_to_present() {
        let (store, _dir) = test_store();

        let input = format!("1\n\n\n\na\n{}y\nq\n", "\n".repeat(6));
        let output = run_console(&store, &input);
        assert!(output.contains("Attendance marked successfully."));

        let records = store.session().unwrap().attendance_records().unwrap();
        assert_eq!(records.len(), 10);
        assert!(records.iter().all(|r| r.date == storage::today()));
        assert_eq!(records[3].emp_id, 4);
        assert_eq!(records[3].status, "absent");
        assert_eq!(
            records.iter().filter(|r| r.status == "present").count(),
            9
        );
    }

    #[test]
    fn test_mark_attendance_reprompts_and_can_cancel() {
        let (store, _dir) = test_store();

        let input = format!("1\nmaybe\nabsent\n{}n\nq\n", "\n".repeat(9));
        let output = run_console(&store, &input);

        assert!(output.contains("Please answer present or absent."));
        assert!(output.contains("Attendance not submitted."));
        assert!(store
            .session()
            .unwrap()
            .attendance_records()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_eof_during_marking_writes_nothing() {
        let (store, _dir) = test_store();

        run_console(&store, "1\n\n\n");
        assert!(store
            .session()
            .unwrap()
            .attendance_records()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_edit_salary() {
        let (store, _dir) = test_store();

        let output = run_console(&store, "2\n3\n35000\n\nq\n");
        assert!(output.contains("Updated salary for Charlie"));
        assert!(output.contains("35000.00"));

        let session = store.session().unwrap();
        assert_eq!(session.employee(3).unwrap().unwrap().salary, 35000.0);
        assert_eq!(session.employee(4).unwrap().unwrap().salary, 31000.0);
    }

    #[test]
    fn test_edit_salary_rejects_bad_input() {
        let (store, _dir) = test_store();
        let before = store.session().unwrap().employees().unwrap();

        let output = run_console(&store, "2\n9999\nabc\n1\nlots\n1\n\n\nq\n");
        assert!(output.contains("No employee with ID 9999."));
        assert!(output.contains("Not a valid employee id: abc"));
        assert!(output.contains("Not a valid amount: lots"));
        assert!(output.contains("Salary unchanged."));

        assert_eq!(store.session().unwrap().employees().unwrap(), before);
    }

    #[test]
    fn test_dashboard_renders_report() {
        let (store, _dir) = test_store();
        store
            .session()
            .unwrap()
            .record_attendance(
                storage::today(),
                &[
                    AttendanceMark::new(1, "present"),
                    AttendanceMark::new(2, "absent"),
                ],
            )
            .unwrap();

        let mut console = Console::new(store.clone(), Cursor::new(String::new()), Vec::new());
        console.show(View::Dashboard).unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();

        assert!(output.contains("Days Present"));
        assert!(output.contains("Alice"));
        assert!(output.contains("Totals: 1 present, 1 absent across 10 employees (50.0% present)"));
    }

    #[test]
    fn test_dashboard_export() {
        let (store, dir) = test_store();
        store
            .session()
            .unwrap()
            .record_attendance(storage::today(), &[AttendanceMark::new(5, "present")])
            .unwrap();

        let path = dir.path().join("export.csv");
        let output = run_console(&store, &format!("3\ne\n{}\nq\n", path.display()));
        assert!(output.contains("Report written to"));

        let report = store.session().unwrap().attendance_report().unwrap();
        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, report::to_csv(&report).unwrap());
    }

    #[test]
    fn test_unknown_menu_choice() {
        let (store, _dir) = test_store();
        let output = run_console(&store, "7\nq\n");
        assert!(output.contains("Unknown choice: 7"));
    }
}
