//! Forecast data models
//!
//! `ForecastSample` is the read-only input produced by the external forecast
//! provider. `ForecastWindow` aggregates the samples relevant to a task
//! (between evaluation time and the task's due time) into the measurements
//! the rule table evaluates against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single hourly weather observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastSample {
    pub datetime: DateTime<Utc>,
    pub precipitation_mm: f64,
    pub precipitation_probability: i32,
    pub wind_speed_kmh: f64,
    pub temperature_celsius: f64,
}

/// Aggregated measurements over the samples inside a task's window
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ForecastWindow {
    pub max_precipitation_mm: f64,
    pub max_precipitation_probability: i32,
    pub max_wind_speed_kmh: f64,
    pub mean_temperature_celsius: f64,
    pub sample_count: usize,
}

impl ForecastWindow {
    /// Aggregate the samples with `start <= datetime <= end`.
    ///
    /// Returns `None` when no sample falls inside the window; callers treat
    /// that as "no forecast available" and skip the task.
    pub fn from_samples(
        samples: &[ForecastSample],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Option<Self> {
        let mut max_rain = 0.0f64;
        let mut max_prob = 0i32;
        let mut max_wind = 0.0f64;
        let mut temp_sum = 0.0f64;
        let mut count = 0usize;

        for sample in samples {
            if sample.datetime < start || sample.datetime > end {
                continue;
            }
            max_rain = max_rain.max(sample.precipitation_mm);
            max_prob = max_prob.max(sample.precipitation_probability);
            max_wind = max_wind.max(sample.wind_speed_kmh);
            temp_sum += sample.temperature_celsius;
            count += 1;
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            max_precipitation_mm: max_rain,
            max_precipitation_probability: max_prob,
            max_wind_speed_kmh: max_wind,
            mean_temperature_celsius: temp_sum / count as f64,
            sample_count: count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(at: DateTime<Utc>, rain: f64, wind: f64, temp: f64) -> ForecastSample {
        ForecastSample {
            datetime: at,
            precipitation_mm: rain,
            precipitation_probability: 50,
            wind_speed_kmh: wind,
            temperature_celsius: temp,
        }
    }

    #[test]
    fn test_window_aggregates_inclusive_bounds() {
        let start = Utc::now();
        let end = start + Duration::hours(6);
        let samples = vec![
            sample(start, 1.0, 10.0, 20.0),
            sample(start + Duration::hours(3), 4.0, 30.0, 24.0),
            sample(end, 2.0, 15.0, 28.0),
        ];

        let window = ForecastWindow::from_samples(&samples, start, end).unwrap();
        assert_eq!(window.sample_count, 3);
        assert_eq!(window.max_precipitation_mm, 4.0);
        assert_eq!(window.max_wind_speed_kmh, 30.0);
        assert!((window.mean_temperature_celsius - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_excludes_samples_outside_bounds() {
        let start = Utc::now();
        let end = start + Duration::hours(6);
        let samples = vec![
            sample(start - Duration::hours(1), 50.0, 90.0, 10.0),
            sample(start + Duration::hours(2), 3.0, 12.0, 22.0),
            sample(end + Duration::hours(1), 80.0, 100.0, 5.0),
        ];

        let window = ForecastWindow::from_samples(&samples, start, end).unwrap();
        assert_eq!(window.sample_count, 1);
        assert_eq!(window.max_precipitation_mm, 3.0);
    }

    #[test]
    fn test_window_empty_returns_none() {
        let start = Utc::now();
        let end = start + Duration::hours(6);
        let samples = vec![sample(end + Duration::hours(2), 10.0, 10.0, 20.0)];

        assert!(ForecastWindow::from_samples(&samples, start, end).is_none());
        assert!(ForecastWindow::from_samples(&[], start, end).is_none());
    }
}
