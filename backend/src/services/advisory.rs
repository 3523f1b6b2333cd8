//! Advisory service: orchestrates evaluation cycles
//!
//! Loads upcoming tasks, fetches the forecast for each task's coordinate,
//! runs the pure engine and hands the resulting alerts to the sink. A failure
//! for one task (provider outage, no forecast in the window, malformed data)
//! is logged and the cycle moves on; advisories are best-effort by design.

use serde::Serialize;
use sqlx::PgPool;
use chrono::Utc;
use shared::{ScheduledTask, WeatherAdvisoryEngine};

use crate::config::AdvisoryConfig;
use crate::error::AppResult;
use crate::external::forecast::ForecastClient;
use crate::services::alert::{AlertService, StoreOutcome};
use crate::services::task::TaskService;

/// Advisory orchestration service
#[derive(Clone)]
pub struct AdvisoryService {
    tasks: TaskService,
    alerts: AlertService,
    forecast: ForecastClient,
    engine: WeatherAdvisoryEngine,
    dedup_window_hours: i64,
    horizon_hours: i64,
}

/// Summary of one evaluation cycle
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub tasks_seen: usize,
    pub tasks_evaluated: usize,
    pub tasks_skipped: usize,
    pub alerts_created: usize,
    pub alerts_deduplicated: usize,
}

impl AdvisoryService {
    pub fn new(
        db: PgPool,
        forecast: ForecastClient,
        advisory_config: &AdvisoryConfig,
        horizon_hours: i64,
    ) -> Self {
        Self {
            tasks: TaskService::new(db.clone()),
            alerts: AlertService::new(db),
            forecast,
            engine: WeatherAdvisoryEngine::default(),
            dedup_window_hours: advisory_config.dedup_window_hours,
            horizon_hours,
        }
    }

    /// Run one evaluation cycle over all upcoming tasks
    pub async fn run_cycle(&self) -> AppResult<RunSummary> {
        let records = self.tasks.list_upcoming(self.horizon_hours).await?;
        let mut summary = RunSummary {
            tasks_seen: records.len(),
            ..Default::default()
        };

        for record in records {
            let task: ScheduledTask = record.into();
            match self.evaluate_task(&task, &mut summary).await {
                Ok(()) => summary.tasks_evaluated += 1,
                Err(err) => {
                    summary.tasks_skipped += 1;
                    tracing::warn!(task_id = %task.id, "skipping task: {}", err);
                }
            }
        }

        tracing::info!(
            tasks_seen = summary.tasks_seen,
            tasks_evaluated = summary.tasks_evaluated,
            tasks_skipped = summary.tasks_skipped,
            alerts_created = summary.alerts_created,
            alerts_deduplicated = summary.alerts_deduplicated,
            "advisory cycle completed"
        );

        Ok(summary)
    }

    /// Evaluate a single task and persist its alerts
    async fn evaluate_task(
        &self,
        task: &ScheduledTask,
        summary: &mut RunSummary,
    ) -> AppResult<()> {
        let samples = self
            .forecast
            .get_hourly_forecast(task.location.latitude, task.location.longitude)
            .await?;

        let alerts = self.engine.evaluate(task, &samples, Utc::now())?;

        for alert in &alerts {
            match self.alerts.store_alert(alert, self.dedup_window_hours).await? {
                StoreOutcome::Inserted => summary.alerts_created += 1,
                StoreOutcome::Deduplicated => summary.alerts_deduplicated += 1,
            }
        }

        Ok(())
    }
}
