//! # Paybook
//!
//! Employee attendance and payroll book for a small team, backed by a single
//! SQLite file.
//!
//! ## Features
//!
//! - **Attendance**: Mark every employee present or absent for today in one submission
//! - **Payroll**: Edit each employee's monthly salary
//! - **Dashboard**: Per-employee present/absent totals with CSV export
//! - **Two front ends**: A form-posting web app and an interactive console
//!
//! ## Modules
//!
//! - [`storage`]: Schema, seed roster, attendance recorder and salary editor
//! - [`report`]: Attendance aggregation and CSV export
//! - [`web`]: HTML front end with Axum
//! - [`console`]: Interactive terminal front end
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paybook::storage::{AttendanceMark, AttendanceStatus, Store};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Creates the tables and seeds the roster on first open
//!     let store = Store::open("database.db")?;
//!
//!     let mut session = store.session()?;
//!     session.record_attendance(
//!         paybook::storage::today(),
//!         &[AttendanceMark::new(1, AttendanceStatus::Present)],
//!     )?;
//!
//!     for row in session.attendance_report()? {
//!         println!("{}: {} present, {} absent", row.name, row.present, row.absent);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod console;
pub mod logging;
pub mod report;
pub mod storage;
pub mod web;

// Re-export top-level types for convenience
pub use storage::{
    AttendanceMark, AttendanceRecord, AttendanceStatus, Employee, Session, StorageError,
    StorageResult, Store,
};

pub use report::{to_csv, ReportError, ReportRow, ReportSummary, REPORT_FILENAME};

pub use web::{build_router, serve, AppState, WebError};

pub use console::{Console, ConsoleError, View};

pub use config::{Config, ConfigError};
