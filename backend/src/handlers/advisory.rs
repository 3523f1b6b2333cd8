//! HTTP handler for triggering advisory evaluation cycles

use axum::{extract::State, Json};
use shared::{intervention_types, InterventionType};

use crate::error::AppResult;
use crate::external::forecast::ForecastClient;
use crate::services::advisory::{AdvisoryService, RunSummary};
use crate::AppState;

/// Run one advisory evaluation cycle over all upcoming tasks
pub async fn run_advisory_cycle(State(state): State<AppState>) -> AppResult<Json<RunSummary>> {
    let client = ForecastClient::new(
        state.config.forecast.api_endpoint.clone(),
        state.config.forecast.horizon_hours,
    );
    let service = AdvisoryService::new(
        state.db.clone(),
        client,
        &state.config.advisory,
        state.config.forecast.horizon_hours,
    );
    let summary = service.run_cycle().await?;
    Ok(Json(summary))
}

/// The intervention-type reference table, for platform dashboards
pub async fn list_intervention_types() -> Json<&'static [InterventionType]> {
    Json(intervention_types())
}
