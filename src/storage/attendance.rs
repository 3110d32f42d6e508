//! Attendance recorder
//!
//! Inserts one row per submitted mark, all dated the day of submission.
//! Rows are never updated or deleted, so submitting twice on the same day
//! stores both submissions.

use chrono::NaiveDate;
use rusqlite::params;
use std::collections::HashSet;

use super::error::StorageResult;
use super::store::Session;
use super::types::{AttendanceMark, AttendanceRecord};

impl Session {
    /// Store `marks` for `date` in a single transaction.
    ///
    /// Marks for ids that are not on the roster are skipped. Returns the number
    /// of rows inserted; nothing is written if any insert fails.
    pub fn record_attendance(
        &mut self,
        date: NaiveDate,
        marks: &[AttendanceMark],
    ) -> StorageResult<usize> {
        let roster: HashSet<i64> = self.employees()?.into_iter().map(|e| e.id).collect();

        let tx = self.conn.transaction()?;
        let mut inserted = 0;

        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO attendance (emp_id, date, status) VALUES (?1, ?2, ?3)",
            )?;

            for mark in marks {
                if !roster.contains(&mark.emp_id) {
                    tracing::warn!(
                        emp_id = mark.emp_id,
                        status = %mark.status,
                        "Skipping attendance for unknown employee"
                    );
                    continue;
                }

                stmt.execute(params![mark.emp_id, date, mark.status])?;
                inserted += 1;
            }
        }

        tx.commit()?;

        tracing::info!(%date, records = inserted, "Attendance recorded");
        Ok(inserted)
    }

    /// Every stored attendance row in insertion order
    pub fn attendance_records(&self) -> StorageResult<Vec<AttendanceRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, emp_id, date, status FROM attendance ORDER BY id")?;

        let records = stmt
            .query_map([], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Attendance rows for one employee in insertion order
    pub fn attendance_for(&self, emp_id: i64) -> StorageResult<Vec<AttendanceRecord>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, emp_id, date, status FROM attendance WHERE emp_id = ?1 ORDER BY id",
        )?;

        let records = stmt
            .query_map([emp_id], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }
}

fn record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AttendanceRecord> {
    Ok(AttendanceRecord {
        id: row.get(0)?,
        emp_id: row.get(1)?,
        date: row.get(2)?,
        status: row.get(3)?,
    })
}
