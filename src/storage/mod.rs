//! Paybook Storage
//!
//! This module provides the relational store behind both front ends:
//!
//! - **types**: Row types (Employee, AttendanceRecord) and the status enum
//! - **schema**: Table creation and the default roster seed
//! - **store**: Store handle and per-interaction sessions
//! - **attendance**: Attendance recorder
//! - **payroll**: Salary editor
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use paybook::storage::{AttendanceMark, AttendanceStatus, Store};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Store::open("database.db")?;
//!
//!     let mut session = store.session()?;
//!     let today = chrono::Local::now().date_naive();
//!     session.record_attendance(today, &[AttendanceMark::new(1, AttendanceStatus::Present)])?;
//!     session.update_salary(3, 35000.0)?;
//!
//!     Ok(())
//! }
//! ```

pub mod attendance;
pub mod error;
pub mod payroll;
pub mod schema;
pub mod store;
pub mod types;

pub use error::{StorageError, StorageResult};
pub use schema::SEED_EMPLOYEES;
pub use store::{Session, Store};
pub use types::{AttendanceMark, AttendanceRecord, AttendanceStatus, Employee, SeedOutcome};

/// Today's date in local time, the date every new attendance row gets
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
