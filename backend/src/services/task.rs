//! Task service: the evaluator's task source
//!
//! Scheduled tasks are registered by the crowdfunding platform when a project
//! milestone plan is approved; this service stores them and hands upcoming
//! ones to the advisory cycle.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use shared::{GpsCoordinates, ScheduledTask};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Task service for managing scheduled tasks
#[derive(Clone)]
pub struct TaskService {
    db: PgPool,
}

/// Scheduled task record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TaskRecord {
    pub id: Uuid,
    pub project_id: Uuid,
    pub description: String,
    pub culture_name: String,
    pub due_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl From<TaskRecord> for ScheduledTask {
    fn from(record: TaskRecord) -> Self {
        ScheduledTask {
            id: record.id,
            project_id: record.project_id,
            description: record.description,
            culture_name: record.culture_name,
            due_at: record.due_at,
            location: GpsCoordinates::new(record.latitude, record.longitude),
        }
    }
}

/// Input for registering a scheduled task
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskInput {
    pub project_id: Uuid,

    #[validate(length(min = 1, max = 500, message = "Description must be 1-500 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 100, message = "Culture name must be 1-100 characters"))]
    pub culture_name: String,

    pub due_at: DateTime<Utc>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl TaskService {
    /// Create a new TaskService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a scheduled task
    pub async fn create_task(&self, input: CreateTaskInput) -> AppResult<TaskRecord> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let task = sqlx::query_as::<_, TaskRecord>(
            r#"
            INSERT INTO scheduled_tasks (
                project_id, description, culture_name, due_at, latitude, longitude
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, project_id, description, culture_name, due_at,
                      latitude, longitude, created_at
            "#,
        )
        .bind(input.project_id)
        .bind(&input.description)
        .bind(&input.culture_name)
        .bind(input.due_at)
        .bind(input.latitude)
        .bind(input.longitude)
        .fetch_one(&self.db)
        .await?;

        Ok(task)
    }

    /// Get a task by ID
    pub async fn get_task(&self, task_id: Uuid) -> AppResult<TaskRecord> {
        let task = sqlx::query_as::<_, TaskRecord>(
            r#"
            SELECT id, project_id, description, culture_name, due_at,
                   latitude, longitude, created_at
            FROM scheduled_tasks
            WHERE id = $1
            "#,
        )
        .bind(task_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Scheduled task".to_string()))?;

        Ok(task)
    }

    /// List tasks due between now and `horizon_hours` from now
    pub async fn list_upcoming(&self, horizon_hours: i64) -> AppResult<Vec<TaskRecord>> {
        let now = Utc::now();
        let horizon = now + Duration::hours(horizon_hours);

        let tasks = sqlx::query_as::<_, TaskRecord>(
            r#"
            SELECT id, project_id, description, culture_name, due_at,
                   latitude, longitude, created_at
            FROM scheduled_tasks
            WHERE due_at >= $1 AND due_at <= $2
            ORDER BY due_at ASC
            "#,
        )
        .bind(now)
        .bind(horizon)
        .fetch_all(&self.db)
        .await?;

        Ok(tasks)
    }

    /// List tasks for a project
    pub async fn list_for_project(&self, project_id: Uuid) -> AppResult<Vec<TaskRecord>> {
        let tasks = sqlx::query_as::<_, TaskRecord>(
            r#"
            SELECT id, project_id, description, culture_name, due_at,
                   latitude, longitude, created_at
            FROM scheduled_tasks
            WHERE project_id = $1
            ORDER BY due_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.db)
        .await?;

        Ok(tasks)
    }

    /// Delete a task
    pub async fn delete_task(&self, task_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM scheduled_tasks WHERE id = $1")
            .bind(task_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Scheduled task".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CreateTaskInput {
        CreateTaskInput {
            project_id: Uuid::new_v4(),
            description: "Semis de riz parcelle nord".to_string(),
            culture_name: "Riz".to_string(),
            due_at: Utc::now() + Duration::hours(12),
            latitude: -18.9,
            longitude: 47.5,
        }
    }

    #[test]
    fn test_create_input_valid() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_create_input_empty_description_rejected() {
        let mut i = input();
        i.description = String::new();
        assert!(i.validate().is_err());
    }

    #[test]
    fn test_create_input_bad_latitude_rejected() {
        let mut i = input();
        i.latitude = 95.0;
        assert!(i.validate().is_err());
    }

    #[test]
    fn test_record_converts_to_scheduled_task() {
        let record = TaskRecord {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            description: "Irrigation".to_string(),
            culture_name: "Maïs".to_string(),
            due_at: Utc::now(),
            latitude: -18.9,
            longitude: 47.5,
            created_at: Utc::now(),
        };
        let task: ScheduledTask = record.clone().into();
        assert_eq!(task.id, record.id);
        assert_eq!(task.location, GpsCoordinates::new(-18.9, 47.5));
    }
}
