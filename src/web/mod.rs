//! Paybook Web Front End
//!
//! Form-posting HTML front end, built with Axum.
//!
//! # Endpoints
//!
//! ## Attendance
//! - `GET /` - Employee list with the attendance form
//! - `POST /mark_attendance` - Record today's attendance, redirects to `/`
//!
//! ## Salary
//! - `GET /edit_salary/:id` - Salary form pre-filled with the current value
//! - `POST /edit_salary/:id` - Update the salary, redirects to `/`
//!
//! ## Dashboard
//! - `GET /dashboard` - Aggregate attendance table and chart
//! - `GET /export_dashboard` - Aggregate as `attendance_report.csv`
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use paybook::config::ServerConfig;
//! use paybook::storage::Store;
//! use paybook::web::{serve, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Store::open("database.db")?;
//!     let config = ServerConfig::default();
//!
//!     serve(AppState::new(store, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;
pub mod views;

pub use error::{WebError, WebResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::attendance::index))
        .route("/mark_attendance", post(routes::attendance::mark_attendance))
        .route(
            "/edit_salary/:id",
            get(routes::salary::edit_salary_form).post(routes::salary::update_salary),
        )
        .route("/dashboard", get(routes::dashboard::dashboard))
        .route("/export_dashboard", get(routes::dashboard::export_dashboard))
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the web server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), WebError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Paybook listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WebError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Paybook shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
