//! Dashboard Routes
//!
//! - GET /dashboard - Aggregate attendance table and chart
//! - GET /export_dashboard - The same rows as a CSV download

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::report::{self, REPORT_FILENAME};
use crate::web::error::WebResult;
use crate::web::state::AppState;
use crate::web::views;

/// GET /dashboard
pub async fn dashboard(State(state): State<Arc<AppState>>) -> WebResult<Html<String>> {
    let rows = state
        .store
        .run(|session| session.attendance_report())
        .await?;

    Ok(Html(views::dashboard(&rows)?))
}

/// GET /export_dashboard
pub async fn export_dashboard(State(state): State<Arc<AppState>>) -> WebResult<Response> {
    let rows = state
        .store
        .run(|session| session.attendance_report())
        .await?;

    let body = report::to_csv(&rows)?;

    tracing::info!(rows = rows.len(), bytes = body.len(), "Exported attendance report");

    let disposition = format!("attachment; filename=\"{}\"", REPORT_FILENAME);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, disposition.as_str()),
        ],
        Body::from(body),
    )
        .into_response())
}
