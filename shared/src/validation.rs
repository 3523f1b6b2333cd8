//! Validation utilities for the AgriFund Weather Advisory Service
//!
//! Fail-fast checks for the engine's inputs. The engine has no way to recover
//! from a malformed task or forecast, so these return descriptive errors
//! instead of guessing.

use crate::models::{ForecastSample, ScheduledTask};

// ============================================================================
// Task Validations
// ============================================================================

/// Validate a scheduled task before evaluation
pub fn validate_task(task: &ScheduledTask) -> Result<(), &'static str> {
    if task.description.trim().is_empty() {
        return Err("Task description must not be empty");
    }
    if task.culture_name.trim().is_empty() {
        return Err("Culture name must not be empty");
    }
    validate_coordinates(task.location.latitude, task.location.longitude)
}

/// Validate GPS coordinates are in range
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

// ============================================================================
// Forecast Validations
// ============================================================================

/// Validate a single forecast sample
pub fn validate_forecast_sample(sample: &ForecastSample) -> Result<(), &'static str> {
    if sample.precipitation_mm < 0.0 || !sample.precipitation_mm.is_finite() {
        return Err("Precipitation must be a non-negative number");
    }
    if !(0..=100).contains(&sample.precipitation_probability) {
        return Err("Precipitation probability must be between 0 and 100");
    }
    if sample.wind_speed_kmh < 0.0 || !sample.wind_speed_kmh.is_finite() {
        return Err("Wind speed must be a non-negative number");
    }
    if !sample.temperature_celsius.is_finite() {
        return Err("Temperature must be a finite number");
    }
    Ok(())
}

/// Validate a batch of forecast samples
pub fn validate_forecast_samples(samples: &[ForecastSample]) -> Result<(), &'static str> {
    for sample in samples {
        validate_forecast_sample(sample)?;
    }
    Ok(())
}
