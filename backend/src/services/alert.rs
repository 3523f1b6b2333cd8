//! Alert service: the evaluator's alert sink
//!
//! Persists engine output, deduplicates near-duplicate alerts, and handles
//! acknowledgement and purging. Deduplication is keyed on the task, the
//! triggering condition kind and the recommended action, so two rules firing
//! on the same condition (e.g. a postpone and an urgent escalation for the
//! same rain) each keep their own alert. It is best-effort only, concurrent
//! evaluation runs may still double-insert.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use shared::WeatherAlert;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Alert service for persisting and managing advisory alerts
#[derive(Clone)]
pub struct AlertService {
    db: PgPool,
}

/// Persisted advisory alert
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StoredAlert {
    pub id: String,
    pub task_id: Uuid,
    pub project_id: Uuid,
    pub action: String,
    pub severity: String,
    pub condition_kind: String,
    pub title: String,
    pub message: String,
    pub recommendation: String,
    pub weather_reason: String,
    pub created_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub acknowledged: bool,
    pub acknowledged_at: Option<DateTime<Utc>>,
}

/// Outcome of attempting to persist one alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Inserted,
    Deduplicated,
}

/// Deduplication key of an alert: task, condition kind and action
pub fn dedup_key(alert: &WeatherAlert) -> (Uuid, &'static str, &'static str) {
    (
        alert.task_id,
        alert.condition_kind.code(),
        alert.action.code(),
    )
}

/// Whether a candidate alert duplicates the most recent stored alert with
/// the same key: the stored alert must be unacknowledged and created inside
/// the dedup window before the candidate. Exactly at the window edge the
/// stored alert is considered stale and the candidate goes through.
pub fn is_duplicate(
    existing_created_at: DateTime<Utc>,
    existing_acknowledged: bool,
    candidate_created_at: DateTime<Utc>,
    window_hours: i64,
) -> bool {
    !existing_acknowledged
        && existing_created_at > candidate_created_at - Duration::hours(window_hours)
}

impl AlertService {
    /// Create a new AlertService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Persist an engine-produced alert, unless a recent unacknowledged
    /// alert already covers the same task, condition kind and action.
    pub async fn store_alert(
        &self,
        alert: &WeatherAlert,
        dedup_window_hours: i64,
    ) -> AppResult<StoreOutcome> {
        let (task_id, condition_kind, action) = dedup_key(alert);

        let latest = sqlx::query_as::<_, (DateTime<Utc>, bool)>(
            r#"
            SELECT created_at, acknowledged
            FROM weather_alerts
            WHERE task_id = $1 AND condition_kind = $2 AND action = $3
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(task_id)
        .bind(condition_kind)
        .bind(action)
        .fetch_optional(&self.db)
        .await?;

        if let Some((existing_created_at, existing_acknowledged)) = latest {
            if is_duplicate(
                existing_created_at,
                existing_acknowledged,
                alert.created_at,
                dedup_window_hours,
            ) {
                tracing::debug!(
                    task_id = %task_id,
                    condition = condition_kind,
                    action = action,
                    "skipping duplicate alert"
                );
                return Ok(StoreOutcome::Deduplicated);
            }
        }

        sqlx::query(
            r#"
            INSERT INTO weather_alerts (
                id, task_id, project_id, action, severity, condition_kind,
                title, message, recommendation, weather_reason,
                created_at, valid_until, acknowledged
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, false)
            "#,
        )
        .bind(&alert.id)
        .bind(alert.task_id)
        .bind(alert.project_id)
        .bind(alert.action.code())
        .bind(alert.severity.code())
        .bind(alert.condition_kind.code())
        .bind(&alert.title)
        .bind(&alert.message)
        .bind(&alert.recommendation)
        .bind(&alert.weather_reason)
        .bind(alert.created_at)
        .bind(alert.valid_until)
        .execute(&self.db)
        .await?;

        Ok(StoreOutcome::Inserted)
    }

    /// Get an alert by ID
    pub async fn get_alert(&self, alert_id: &str) -> AppResult<StoredAlert> {
        let alert = sqlx::query_as::<_, StoredAlert>(
            r#"
            SELECT id, task_id, project_id, action, severity, condition_kind,
                   title, message, recommendation, weather_reason,
                   created_at, valid_until, acknowledged, acknowledged_at
            FROM weather_alerts
            WHERE id = $1
            "#,
        )
        .bind(alert_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Weather alert".to_string()))?;

        Ok(alert)
    }

    /// List active (non-expired) alerts, newest first
    pub async fn list_alerts(
        &self,
        project_id: Option<Uuid>,
        unacknowledged_only: bool,
        limit: i64,
    ) -> AppResult<Vec<StoredAlert>> {
        let alerts = sqlx::query_as::<_, StoredAlert>(
            r#"
            SELECT id, task_id, project_id, action, severity, condition_kind,
                   title, message, recommendation, weather_reason,
                   created_at, valid_until, acknowledged, acknowledged_at
            FROM weather_alerts
            WHERE valid_until > NOW()
              AND ($1::uuid IS NULL OR project_id = $1)
              AND (NOT $2 OR acknowledged = false)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(project_id)
        .bind(unacknowledged_only)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(alerts)
    }

    /// Acknowledge an alert. The only mutation permitted after creation.
    pub async fn acknowledge(&self, alert_id: &str) -> AppResult<StoredAlert> {
        let alert = sqlx::query_as::<_, StoredAlert>(
            r#"
            UPDATE weather_alerts
            SET acknowledged = true, acknowledged_at = NOW()
            WHERE id = $1
            RETURNING id, task_id, project_id, action, severity, condition_kind,
                      title, message, recommendation, weather_reason,
                      created_at, valid_until, acknowledged, acknowledged_at
            "#,
        )
        .bind(alert_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Weather alert".to_string()))?;

        Ok(alert)
    }

    /// Delete alerts whose validity window has passed
    pub async fn purge_expired(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM weather_alerts WHERE valid_until <= NOW()")
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
