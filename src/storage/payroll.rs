//! Salary editor

use rusqlite::params;

use super::error::StorageResult;
use super::store::Session;

impl Session {
    /// Overwrite an employee's salary.
    ///
    /// Any amount is accepted, including zero and negatives. Returns `false`
    /// without error when no employee has `id`; the previous value is not kept.
    pub fn update_salary(&mut self, id: i64, salary: f64) -> StorageResult<bool> {
        let updated = self.conn.execute(
            "UPDATE employees SET salary = ?1 WHERE id = ?2",
            params![salary, id],
        )?;

        if updated == 0 {
            tracing::warn!(emp_id = id, "Salary update for unknown employee ignored");
            return Ok(false);
        }

        tracing::info!(emp_id = id, salary, "Updated salary");
        Ok(true)
    }
}
