//! Core data types for the Paybook attendance store
//!
//! This module defines the rows kept in the database:
//! - `Employee`: A roster member with a name and salary
//! - `AttendanceRecord`: One dated presence/absence entry
//! - `AttendanceMark`: A status choice submitted for one employee
//! - `AttendanceStatus`: The two statuses the front ends offer

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A roster member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    /// Assigned by the database on creation, never changes
    pub id: i64,
    /// Display name
    pub name: String,
    /// Current salary, edited in place by the salary editor
    pub salary: f64,
}

/// One stored attendance entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub id: i64,
    /// Employee this entry belongs to
    pub emp_id: i64,
    /// Day the entry was submitted
    pub date: NaiveDate,
    /// Stored verbatim, normally `present` or `absent`
    pub status: String,
}

/// A status choice for one employee, as submitted by a front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceMark {
    pub emp_id: i64,
    pub status: String,
}

impl AttendanceMark {
    pub fn new(emp_id: i64, status: impl Into<String>) -> Self {
        Self {
            emp_id,
            status: status.into(),
        }
    }
}

/// Presence status offered by the attendance forms
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
}

impl AttendanceStatus {
    /// Get all statuses in display order
    pub fn all() -> &'static [AttendanceStatus] {
        &[AttendanceStatus::Present, AttendanceStatus::Absent]
    }

    /// The value written to the `status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "present" | "p" => Ok(AttendanceStatus::Present),
            "absent" | "a" => Ok(AttendanceStatus::Absent),
            other => Err(format!("Unknown attendance status: {}", other)),
        }
    }
}

impl From<AttendanceStatus> for String {
    fn from(status: AttendanceStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Result of running the schema/seed initializer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The roster was empty and this many default employees were inserted
    Seeded(usize),
    /// The roster already had this many employees, nothing was inserted
    AlreadyPopulated(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("present".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Present));
        assert_eq!(" ABSENT ".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Absent));
        assert_eq!("a".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Absent));
        assert!("late".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn test_status_default_is_present() {
        assert_eq!(AttendanceStatus::default(), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::default().as_str(), "present");
    }

    #[test]
    fn test_mark_from_status() {
        let mark = AttendanceMark::new(4, AttendanceStatus::Absent);
        assert_eq!(mark.status, "absent");
    }
}
