//! Attendance Report
//!
//! Per-employee present/absent totals across every recorded date.
//!
//! - **aggregate**: `Session::attendance_report`, one row per employee,
//!   including employees with no attendance rows
//! - **export**: CSV serialization of the same rows

pub mod export;

pub use export::{to_csv, CSV_HEADER, REPORT_FILENAME};

use serde::Serialize;
use thiserror::Error;

use crate::storage::{Session, StorageResult};

/// One line of the aggregate report
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportRow {
    pub employee_id: i64,
    pub name: String,
    pub present: u32,
    pub absent: u32,
}

/// Totals across all report rows
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ReportSummary {
    pub employees: usize,
    pub present: u64,
    pub absent: u64,
}

impl ReportSummary {
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        rows.iter().fold(
            Self {
                employees: rows.len(),
                ..Default::default()
            },
            |mut acc, row| {
                acc.present += u64::from(row.present);
                acc.absent += u64::from(row.absent);
                acc
            },
        )
    }

    /// Share of recorded days that were present, if anything was recorded
    pub fn present_ratio(&self) -> Option<f64> {
        let total = self.present + self.absent;
        if total == 0 {
            None
        } else {
            Some(self.present as f64 / total as f64)
        }
    }
}

/// Errors raised while rendering a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const REPORT_QUERY: &str = "
    SELECT e.id,
           e.name,
           COALESCE(SUM(CASE WHEN a.status = 'present' THEN 1 ELSE 0 END), 0) AS present,
           COALESCE(SUM(CASE WHEN a.status = 'absent' THEN 1 ELSE 0 END), 0) AS absent
    FROM employees e
    LEFT JOIN attendance a ON e.id = a.emp_id
    GROUP BY e.id
    ORDER BY e.id
";

impl Session {
    /// Present/absent counts for every employee, in roster order
    pub fn attendance_report(&self) -> StorageResult<Vec<ReportRow>> {
        let mut stmt = self.conn.prepare_cached(REPORT_QUERY)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ReportRow {
                    employee_id: row.get(0)?,
                    name: row.get(1)?,
                    present: row.get(2)?,
                    absent: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
