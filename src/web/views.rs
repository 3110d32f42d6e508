//! HTML Views
//!
//! Server-rendered pages. Every page is rebuilt from freshly queried rows;
//! nothing is cached between requests.

use axum::http::StatusCode;
use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use crate::report::{ReportRow, ReportSummary};
use crate::storage::{AttendanceStatus, Employee};

const STYLE: &str = "
body { font-family: sans-serif; margin: 2rem auto; max-width: 56rem; color: #222; }
nav a { margin-right: 1rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border-bottom: 1px solid #ddd; padding: 0.4rem 0.6rem; text-align: left; }
td.num, th.num { text-align: right; }
.chart { margin: 1rem 0; }
.chart-row { display: flex; align-items: center; margin: 0.2rem 0; }
.chart-label { width: 8rem; }
.bar { height: 0.9rem; }
.bar.present { background: #3c9a5f; }
.bar.absent { background: #c8553d; }
.muted { color: #777; }
";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>{title} - Paybook</title>
<style>{STYLE}</style>
</head>
<body>
<h1>Paybook &ndash; Attendance &amp; Payroll</h1>
<nav><a href=\"/\">Mark Attendance</a><a href=\"/dashboard\">Dashboard</a></nav>
<h2>{title}</h2>
{body}
</body>
</html>
",
        title = encode_text(title),
    )
}

/// Roster with one status selector per employee and a salary edit link
pub fn index(employees: &[Employee], today: NaiveDate) -> String {
    let mut rows = String::new();

    for employee in employees {
        let mut options = String::new();
        for status in AttendanceStatus::all() {
            let selected = if *status == AttendanceStatus::default() {
                " selected"
            } else {
                ""
            };
            let _ = write!(
                options,
                "<option value=\"{value}\"{selected}>{value}</option>",
                value = status.as_str(),
            );
        }

        let _ = write!(
            rows,
            "<tr><td>{id}</td><td>{name}</td><td class=\"num\">{salary:.2}</td>\
             <td><select name=\"{id}\">{options}</select></td>\
             <td><a href=\"/edit_salary/{id}\">Edit salary</a></td></tr>\n",
            id = employee.id,
            name = encode_text(&employee.name),
            salary = employee.salary,
        );
    }

    let body = format!(
        "<p class=\"muted\">Recording attendance for {today}</p>
<form method=\"post\" action=\"/mark_attendance\">
<table>
<thead><tr><th>ID</th><th>Name</th><th class=\"num\">Salary (&#8377;)</th><th>Status</th><th></th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<button type=\"submit\">Submit Attendance</button>
</form>",
        today = today.format("%Y-%m-%d"),
    );

    layout("Mark Attendance", &body)
}

/// Salary form pre-filled with the current value
pub fn edit_salary(employee: &Employee) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/edit_salary/{id}\">
<label for=\"salary\">New salary for {name} (&#8377;)</label>
<input id=\"salary\" name=\"salary\" type=\"number\" step=\"any\" value=\"{salary}\">
<button type=\"submit\">Update {name}</button>
</form>",
        id = employee.id,
        name = encode_text(&employee.name),
        salary = encode_double_quoted_attribute(&employee.salary.to_string()),
    );

    layout("Edit Employee Salary", &body)
}

/// Aggregate table, bar chart and export link
pub fn dashboard(rows: &[ReportRow]) -> Result<String, serde_json::Error> {
    let summary = ReportSummary::from_rows(rows);
    let scale = rows
        .iter()
        .map(|r| r.present + r.absent)
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    let mut table = String::new();
    let mut chart = String::new();

    for row in rows {
        let name = encode_text(&row.name);
        let label = encode_double_quoted_attribute(&row.name);

        let _ = writeln!(
            table,
            "<tr><td>{name}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
            row.present, row.absent,
        );

        let _ = writeln!(
            chart,
            "<div class=\"chart-row\"><span class=\"chart-label\">{name}</span>\
             <span class=\"bar present\" style=\"width: {:.1}%\" title=\"{label} present: {}\"></span>\
             <span class=\"bar absent\" style=\"width: {:.1}%\" title=\"{label} absent: {}\"></span></div>",
            f64::from(row.present) / scale * 80.0,
            row.present,
            f64::from(row.absent) / scale * 80.0,
            row.absent,
        );
    }

    let ratio = summary
        .present_ratio()
        .map(|r| format!("{:.1}% present", r * 100.0))
        .unwrap_or_else(|| "no attendance recorded yet".to_string());

    // `</` inside the JSON would close the script element early
    let chart_data = serde_json::to_string(rows)?.replace("</", "<\\/");

    let body = format!(
        "<table>
<thead><tr><th>Employee Name</th><th class=\"num\">Days Present</th><th class=\"num\">Days Absent</th></tr></thead>
<tbody>
{table}</tbody>
<tfoot><tr><th>Total ({employees} employees)</th><th class=\"num\">{present}</th><th class=\"num\">{absent}</th></tr></tfoot>
</table>
<p class=\"muted\">{ratio}</p>
<div class=\"chart\">
{chart}</div>
<script type=\"application/json\" id=\"chart-data\">{chart_data}</script>
<p><a href=\"/export_dashboard\">Export CSV</a></p>",
        employees = summary.employees,
        present = summary.present,
        absent = summary.absent,
    );

    Ok(layout("Attendance Dashboard", &body))
}

/// Error page for non-success responses
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<p>{}</p>\n<p><a href=\"/\">Back to attendance</a></p>",
        encode_text(message)
    );
    layout(
        status.canonical_reason().unwrap_or("Error"),
        &body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: i64, name: &str, salary: f64) -> Employee {
        Employee {
            id,
            name: name.to_string(),
            salary,
        }
    }

    #[test]
    fn test_names_are_escaped() {
        let html = edit_salary(&employee(8, "<b>Tom & Jerry</b>", 1.0));
        assert!(html.contains("New salary for &lt;b&gt;Tom &amp; Jerry&lt;/b&gt;"));
        assert!(!html.contains("<b>Tom"));

        let rows = vec![ReportRow {
            employee_id: 1,
            name: "Say \"hi\" <now>".to_string(),
            present: 2,
            absent: 1,
        }];
        let html = dashboard(&rows).unwrap();
        assert!(html.contains("<td>Say \"hi\" &lt;now&gt;</td>"));
        assert!(html.contains("title=\"Say &quot;hi&quot; &lt;now&gt; present: 2\""));
    }

    #[test]
    fn test_index_has_selector_per_employee() {
        let employees = vec![employee(1, "Alice", 30000.0), employee(2, "Bob", 28000.0)];
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let html = index(&employees, today);

        assert!(html.contains("<select name=\"1\">"));
        assert!(html.contains("<select name=\"2\">"));
        assert!(html.contains("<option value=\"present\" selected>present</option>"));
        assert!(html.contains("href=\"/edit_salary/2\""));
        assert!(html.contains("2024-06-01"));
    }

    #[test]
    fn test_edit_salary_prefilled() {
        let html = edit_salary(&employee(3, "Charlie", 32000.0));
        assert!(html.contains("action=\"/edit_salary/3\""));
        assert!(html.contains("value=\"32000\""));
        assert!(html.contains("Update Charlie"));
    }

    #[test]
    fn test_dashboard_escapes_chart_data() {
        let rows = vec![ReportRow {
            employee_id: 1,
            name: "</script>".to_string(),
            present: 1,
            absent: 0,
        }];

        let html = dashboard(&rows).unwrap();
        assert!(html.contains("&lt;/script&gt;"));
        assert!(html.contains("<\\/script>"));
        assert_eq!(html.matches("</script>").count(), 1);
    }
}
