//! Weather advisory alert model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{AlertAction, Severity, WeatherConditionKind};

/// Default validity of a freshly created alert, in hours
pub const ALERT_VALIDITY_HOURS: i64 = 24;

/// An advisory alert produced by the engine
///
/// Created by the engine, persisted by the alert sink; after creation the
/// only permitted mutation is acknowledgement, performed by the sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherAlert {
    /// Unique per evaluation: task id, condition kind and evaluation
    /// timestamp in milliseconds
    pub id: String,
    pub task_id: Uuid,
    pub project_id: Uuid,
    pub action: AlertAction,
    pub severity: Severity,
    pub condition_kind: WeatherConditionKind,
    pub title: String,
    pub message: String,
    pub recommendation: String,
    /// Formatted description of the triggering condition,
    /// e.g. "Pluie prévue : 15 mm (prob. max 80 %)"
    pub weather_reason: String,
    pub created_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub acknowledged: bool,
}
