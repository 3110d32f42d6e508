//! Web Routes
//!
//! Route handlers organized by front-end page.

pub mod attendance;
pub mod dashboard;
pub mod health;
pub mod salary;
