//! Form and response types for the web endpoints

use serde::{Deserialize, Serialize};

/// Body of `POST /edit_salary/:id`
#[derive(Debug, Deserialize)]
pub struct SalaryForm {
    pub salary: f64,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or unhealthy
    pub status: String,
    /// Storage status
    pub storage: String,
    /// Employees on the roster, when storage is reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<usize>,
    /// Configured listen address
    pub address: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
