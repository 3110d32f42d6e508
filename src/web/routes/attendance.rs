//! Attendance Routes
//!
//! - GET / - Roster with one status selector per employee
//! - POST /mark_attendance - Record today's attendance for the submitted employees

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use std::sync::Arc;

use crate::storage::{self, AttendanceMark, Employee};
use crate::web::error::WebResult;
use crate::web::state::AppState;
use crate::web::views;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> WebResult<Html<String>> {
    let employees = state.store.run(|session| session.employees()).await?;

    Ok(Html(views::index(&employees, storage::today())))
}

/// POST /mark_attendance
///
/// The body holds one field per employee id with the chosen status as value.
/// Fields that do not name an employee on the roster are ignored.
pub async fn mark_attendance(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> WebResult<Redirect> {
    let today = storage::today();

    let recorded = state
        .store
        .run(move |session| {
            let roster = session.employees()?;
            let marks = marks_from_form(&roster, &fields);
            session.record_attendance(today, &marks)
        })
        .await?;

    tracing::info!(%today, records = recorded, "Attendance submitted");

    Ok(Redirect::to("/"))
}

/// Match submitted fields to the roster, in roster order.
///
/// The first value wins when an id is submitted more than once.
fn marks_from_form(roster: &[Employee], fields: &[(String, String)]) -> Vec<AttendanceMark> {
    let parsed: Vec<(Option<i64>, &str, &str)> = fields
        .iter()
        .map(|(key, value)| (key.trim().parse().ok(), key.as_str(), value.as_str()))
        .collect();

    for (id, key, _) in &parsed {
        let known = id.map(|id| roster.iter().any(|e| e.id == id)).unwrap_or(false);
        if !known {
            tracing::warn!(field = %key, "Ignoring attendance field that is not an employee id");
        }
    }

    roster
        .iter()
        .filter_map(|employee| {
            parsed
                .iter()
                .find(|(id, _, _)| *id == Some(employee.id))
                .map(|(_, _, status)| AttendanceMark::new(employee.id, *status))
        })
        .collect()
}
