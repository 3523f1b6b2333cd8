//! Route definitions for the AgriFund Weather Advisory Service

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/tasks", task_routes())
        .nest("/alerts", alert_routes())
        .nest("/advisory", advisory_routes())
}

/// Scheduled task routes
fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_task))
        .route("/upcoming", get(handlers::list_upcoming_tasks))
        .route("/project/:project_id", get(handlers::list_project_tasks))
        .route("/:id", get(handlers::get_task))
        .route("/:id", delete(handlers::delete_task))
}

/// Advisory alert routes
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_alerts))
        .route("/expired", delete(handlers::purge_expired_alerts))
        .route("/:id", get(handlers::get_alert))
        .route("/:id/acknowledge", post(handlers::acknowledge_alert))
}

/// Advisory evaluation routes
fn advisory_routes() -> Router<AppState> {
    Router::new()
        .route("/run", post(handlers::run_advisory_cycle))
        .route("/interventions", get(handlers::list_intervention_types))
}
