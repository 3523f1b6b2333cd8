//! Scheduled task model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::GpsCoordinates;

/// A scheduled agricultural task awaiting weather evaluation
///
/// Supplied by the task source; read-only input for the advisory engine.
/// The intervention category is inferred from `description` at evaluation
/// time, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledTask {
    pub id: Uuid,
    pub project_id: Uuid,
    pub description: String,
    pub culture_name: String,
    pub due_at: DateTime<Utc>,
    pub location: GpsCoordinates,
}
