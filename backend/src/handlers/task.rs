//! HTTP handlers for scheduled task endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::task::{CreateTaskInput, TaskRecord, TaskService};
use crate::AppState;

/// Register a scheduled task
pub async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<CreateTaskInput>,
) -> AppResult<Json<TaskRecord>> {
    let service = TaskService::new(state.db);
    let task = service.create_task(input).await?;
    Ok(Json(task))
}

/// Query parameters for listing upcoming tasks
#[derive(Debug, Deserialize)]
pub struct UpcomingTasksQuery {
    pub horizon_hours: Option<i64>,
}

/// List tasks due within the horizon
pub async fn list_upcoming_tasks(
    State(state): State<AppState>,
    Query(query): Query<UpcomingTasksQuery>,
) -> AppResult<Json<Vec<TaskRecord>>> {
    let service = TaskService::new(state.db.clone());
    let horizon = query
        .horizon_hours
        .unwrap_or(state.config.forecast.horizon_hours);
    let tasks = service.list_upcoming(horizon).await?;
    Ok(Json(tasks))
}

/// List all tasks registered for a project
pub async fn list_project_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> AppResult<Json<Vec<TaskRecord>>> {
    let service = TaskService::new(state.db);
    let tasks = service.list_for_project(project_id).await?;
    Ok(Json(tasks))
}

/// Get a task by ID
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> AppResult<Json<TaskRecord>> {
    let service = TaskService::new(state.db);
    let task = service.get_task(task_id).await?;
    Ok(Json(task))
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let service = TaskService::new(state.db);
    service.delete_task(task_id).await?;
    Ok(Json(serde_json::json!({ "deleted": task_id })))
}
