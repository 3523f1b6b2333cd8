//! HTTP handlers for advisory alert endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::alert::{AlertService, StoredAlert};
use crate::AppState;

/// Query parameters for listing alerts
#[derive(Debug, Deserialize)]
pub struct ListAlertsQuery {
    pub project_id: Option<Uuid>,
    pub unacknowledged_only: Option<bool>,
    pub limit: Option<i64>,
}

/// List active advisory alerts
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<ListAlertsQuery>,
) -> AppResult<Json<Vec<StoredAlert>>> {
    let service = AlertService::new(state.db);
    let alerts = service
        .list_alerts(
            query.project_id,
            query.unacknowledged_only.unwrap_or(false),
            query.limit.unwrap_or(50),
        )
        .await?;
    Ok(Json(alerts))
}

/// Get an alert by ID
pub async fn get_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<String>,
) -> AppResult<Json<StoredAlert>> {
    let service = AlertService::new(state.db);
    let alert = service.get_alert(&alert_id).await?;
    Ok(Json(alert))
}

/// Acknowledge an alert
pub async fn acknowledge_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<String>,
) -> AppResult<Json<StoredAlert>> {
    let service = AlertService::new(state.db);
    let alert = service.acknowledge(&alert_id).await?;
    Ok(Json(alert))
}

#[derive(Serialize)]
pub struct PurgeResponse {
    pub purged: u64,
}

/// Delete expired alerts
pub async fn purge_expired_alerts(
    State(state): State<AppState>,
) -> AppResult<Json<PurgeResponse>> {
    let service = AlertService::new(state.db);
    let purged = service.purge_expired().await?;
    Ok(Json(PurgeResponse { purged }))
}
