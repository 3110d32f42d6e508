//! Salary Routes
//!
//! - GET /edit_salary/:id - Salary form pre-filled with the current value
//! - POST /edit_salary/:id - Store a new salary

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use std::sync::Arc;

use crate::web::dto::SalaryForm;
use crate::web::error::{WebError, WebResult};
use crate::web::state::AppState;
use crate::web::views;

/// GET /edit_salary/:id
pub async fn edit_salary_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> WebResult<Html<String>> {
    let employee = state
        .store
        .run(move |session| session.employee(id))
        .await?
        .ok_or_else(|| WebError::NotFound(format!("Employee with id {} not found", id)))?;

    Ok(Html(views::edit_salary(&employee)))
}

/// POST /edit_salary/:id
///
/// An unknown id is a silent no-op; the client is redirected either way.
pub async fn update_salary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(form): Form<SalaryForm>,
) -> WebResult<Redirect> {
    let salary = form.salary;
    state
        .store
        .run(move |session| session.update_salary(id, salary))
        .await?;

    Ok(Redirect::to("/"))
}
