//! Forecast API client
//!
//! Fetches hourly forecasts from an Open-Meteo-compatible endpoint and maps
//! the provider's parallel-array JSON into `ForecastSample` records.

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use shared::ForecastSample;

use crate::error::{AppError, AppResult};

/// Forecast API client
#[derive(Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
    horizon_hours: i64,
}

/// Raw Open-Meteo forecast response
#[derive(Debug, Deserialize)]
struct OMForecastResponse {
    hourly: OMHourly,
}

/// Parallel arrays: index i across all fields describes the same hour
#[derive(Debug, Deserialize)]
struct OMHourly {
    time: Vec<String>,
    precipitation: Vec<Option<f64>>,
    precipitation_probability: Vec<Option<i32>>,
    wind_speed_10m: Vec<Option<f64>>,
    temperature_2m: Vec<Option<f64>>,
}

impl ForecastClient {
    /// Create a new ForecastClient
    pub fn new(base_url: String, horizon_hours: i64) -> Self {
        Self {
            client: Client::new(),
            base_url,
            horizon_hours,
        }
    }

    /// Fetch the hourly forecast for a coordinate over the configured horizon
    pub async fn get_hourly_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<Vec<ForecastSample>> {
        let url = format!(
            "{}?latitude={}&longitude={}&hourly=temperature_2m,precipitation,precipitation_probability,wind_speed_10m&forecast_hours={}&wind_speed_unit=kmh&timezone=UTC",
            self.base_url, latitude, longitude, self.horizon_hours
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Forecast API request failed: {}", e);
                AppError::ForecastServiceUnavailable
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Forecast API error: {} - {}",
                status, body
            )));
        }

        let data: OMForecastResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse forecast response: {}", e))
        })?;

        Ok(convert_hourly(data.hourly))
    }
}

/// Convert the provider's parallel arrays into samples.
///
/// Hours with an unparseable timestamp or a missing measurement are dropped
/// rather than guessed at; the evaluator treats missing hours as "no
/// forecast" for the affected window.
fn convert_hourly(hourly: OMHourly) -> Vec<ForecastSample> {
    let mut samples = Vec::with_capacity(hourly.time.len());

    for (i, raw_time) in hourly.time.iter().enumerate() {
        let Ok(naive) = NaiveDateTime::parse_from_str(raw_time, "%Y-%m-%dT%H:%M") else {
            tracing::warn!("Skipping forecast hour with invalid timestamp: {}", raw_time);
            continue;
        };
        let (Some(precipitation), Some(wind), Some(temperature)) = (
            hourly.precipitation.get(i).copied().flatten(),
            hourly.wind_speed_10m.get(i).copied().flatten(),
            hourly.temperature_2m.get(i).copied().flatten(),
        ) else {
            continue;
        };
        // The provider omits probability beyond its model horizon
        let probability = hourly
            .precipitation_probability
            .get(i)
            .copied()
            .flatten()
            .unwrap_or(0);

        samples.push(ForecastSample {
            datetime: naive.and_utc(),
            precipitation_mm: precipitation,
            precipitation_probability: probability,
            wind_speed_kmh: wind,
            temperature_celsius: temperature,
        });
    }

    samples
}
