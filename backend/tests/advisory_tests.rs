//! Advisory engine tests
//!
//! Scenario tests for the weather advisory evaluation, covering:
//! - Time-window filtering (past tasks, boundary inclusivity)
//! - Threshold matching and multi-rule independence
//! - Severity resolution (action-implied and magnitude fallback)
//! - Idempotence of evaluation

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use shared::{
    AlertAction, ForecastSample, GpsCoordinates, ScheduledTask, Severity, WeatherAdvisoryEngine,
    WeatherConditionKind,
};

fn task_due_in(description: &str, hours: i64, now: DateTime<Utc>) -> ScheduledTask {
    ScheduledTask {
        id: Uuid::new_v4(),
        project_id: Uuid::new_v4(),
        description: description.to_string(),
        culture_name: "Riz".to_string(),
        due_at: now + Duration::hours(hours),
        location: GpsCoordinates::new(-18.9, 47.5),
    }
}

/// Hourly samples from `now` for `hours` hours with constant measurements
fn flat_forecast(
    now: DateTime<Utc>,
    hours: i64,
    rain_mm: f64,
    wind_kmh: f64,
    temp_c: f64,
) -> Vec<ForecastSample> {
    (0..hours)
        .map(|h| ForecastSample {
            datetime: now + Duration::hours(h),
            precipitation_mm: rain_mm,
            precipitation_probability: 80,
            wind_speed_kmh: wind_kmh,
            temperature_celsius: temp_c,
        })
        .collect()
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[cfg(test)]
mod scenarios {
    use super::*;

    /// Sowing rice in 12h with 15mm of rain forecast: one postpone alert,
    /// high severity, message carries the observed quantity
    #[test]
    fn test_sowing_rain_produces_postpone_high() {
        let engine = WeatherAdvisoryEngine::default();
        let now = Utc::now();
        let task = task_due_in("Semis de riz", 12, now);
        let samples = flat_forecast(now, 24, 15.0, 5.0, 25.0);

        let alerts = engine.evaluate(&task, &samples, now).unwrap();

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].action, AlertAction::Postpone);
        assert_eq!(alerts[0].severity, Severity::High);
        assert!(alerts[0].message.contains("15"));
        assert_eq!(alerts[0].task_id, task.id);
    }

    /// Irrigation in 40h with 6mm of rain: inside the 48h rule window,
    /// one cancel alert at medium severity
    #[test]
    fn test_irrigation_rain_produces_cancel_medium() {
        let engine = WeatherAdvisoryEngine::default();
        let now = Utc::now();
        let task = task_due_in("Irrigation de la parcelle", 40, now);
        let samples = flat_forecast(now, 41, 6.0, 5.0, 25.0);

        let alerts = engine.evaluate(&task, &samples, now).unwrap();

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].action, AlertAction::Cancel);
        assert_eq!(alerts[0].severity, Severity::Medium);
    }

    /// Pesticide treatment with both wind (25 km/h >= 20) and rain
    /// (3mm >= 2) over threshold: two independent alerts
    #[test]
    fn test_pesticide_wind_and_rain_produce_two_alerts() {
        let engine = WeatherAdvisoryEngine::default();
        let now = Utc::now();
        let task = task_due_in("Traitement phytosanitaire", 12, now);
        let samples = flat_forecast(now, 24, 3.0, 25.0, 20.0);

        let alerts = engine.evaluate(&task, &samples, now).unwrap();

        assert_eq!(alerts.len(), 2);
        let wind = alerts
            .iter()
            .find(|a| a.condition_kind == WeatherConditionKind::Wind)
            .expect("wind alert missing");
        let rain = alerts
            .iter()
            .find(|a| a.condition_kind == WeatherConditionKind::Rain)
            .expect("rain alert missing");
        assert_eq!(wind.action, AlertAction::Warning);
        assert_eq!(rain.action, AlertAction::Postpone);
        assert_eq!(rain.severity, Severity::High);
        assert_ne!(wind.id, rain.id);
    }

    /// A harvest task one hour in the past yields nothing regardless of
    /// the forecast
    #[test]
    fn test_past_harvest_yields_no_alerts() {
        let engine = WeatherAdvisoryEngine::default();
        let now = Utc::now();
        let task = task_due_in("Récolte du riz", -1, now);
        let samples = flat_forecast(now - Duration::hours(4), 48, 60.0, 90.0, 25.0);

        let alerts = engine.evaluate(&task, &samples, now).unwrap();
        assert!(alerts.is_empty());
    }

    /// An unrecognized task description yields nothing
    #[test]
    fn test_unrecognized_description_yields_no_alerts() {
        let engine = WeatherAdvisoryEngine::default();
        let now = Utc::now();
        let task = task_due_in("Réunion équipe", 12, now);
        let samples = flat_forecast(now, 24, 60.0, 90.0, 45.0);

        let alerts = engine.evaluate(&task, &samples, now).unwrap();
        assert!(alerts.is_empty());
    }

    /// Heavy rain on a harvest escalates to an urgent alert with the rule's
    /// explicit critical severity
    #[test]
    fn test_harvest_heavy_rain_urgent_critical() {
        let engine = WeatherAdvisoryEngine::default();
        let now = Utc::now();
        let task = task_due_in("Récolte du maïs", 24, now);
        let samples = flat_forecast(now, 25, 25.0, 10.0, 25.0);

        let alerts = engine.evaluate(&task, &samples, now).unwrap();

        let urgent = alerts
            .iter()
            .find(|a| a.action == AlertAction::Urgent)
            .expect("urgent alert missing");
        assert_eq!(urgent.severity, Severity::Critical);
        // The 5mm postpone rule fires independently on the same window
        assert!(alerts.iter().any(|a| a.action == AlertAction::Postpone));
    }

    /// Evaluating the same inputs with the same clock twice produces
    /// structurally identical alerts
    #[test]
    fn test_evaluation_is_idempotent() {
        let engine = WeatherAdvisoryEngine::default();
        let now = Utc::now();
        let task = task_due_in("Semis de riz", 12, now);
        let samples = flat_forecast(now, 24, 15.0, 5.0, 25.0);

        let first = engine.evaluate(&task, &samples, now).unwrap();
        let second = engine.evaluate(&task, &samples, now).unwrap();

        assert_eq!(first, second);
    }

    /// Alert validity defaults to 24 hours from creation
    #[test]
    fn test_alert_validity_window() {
        let engine = WeatherAdvisoryEngine::default();
        let now = Utc::now();
        let task = task_due_in("Semis de riz", 12, now);
        let samples = flat_forecast(now, 24, 15.0, 5.0, 25.0);

        let alerts = engine.evaluate(&task, &samples, now).unwrap();
        assert_eq!(alerts[0].created_at, now);
        assert_eq!(alerts[0].valid_until, now + Duration::hours(24));
        assert!(!alerts[0].acknowledged);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Tasks further out than every rule window never produce alerts,
    /// whatever the weather looks like
    #[test]
    fn prop_tasks_beyond_every_window_produce_nothing(
        hours in 73i64..300,
        rain in 0.0f64..80.0,
        wind in 0.0f64..120.0,
        temp in -10.0f64..45.0,
    ) {
        let engine = WeatherAdvisoryEngine::default();
        let now = Utc::now();
        let task = task_due_in("Récolte du riz", hours, now);
        let samples = flat_forecast(now, hours + 1, rain, wind, temp);

        let alerts = engine.evaluate(&task, &samples, now).unwrap();
        prop_assert!(alerts.is_empty());
    }

    /// When every threshold strictly fails, the result set is empty
    /// (sowing: rain < 10, temperature inside [8, 38])
    #[test]
    fn prop_below_threshold_forecast_produces_nothing(
        rain in 0.0f64..9.99,
        temp in 9.0f64..37.0,
        hours in 1i64..24,
    ) {
        let engine = WeatherAdvisoryEngine::default();
        let now = Utc::now();
        let task = task_due_in("Semis de riz", hours, now);
        let samples = flat_forecast(now, hours + 1, rain, 10.0, temp);

        let alerts = engine.evaluate(&task, &samples, now).unwrap();
        prop_assert!(alerts.is_empty());
    }

    /// Evaluation with a fixed clock is deterministic
    #[test]
    fn prop_evaluation_is_deterministic(
        rain in 0.0f64..50.0,
        wind in 0.0f64..80.0,
        hours in 1i64..48,
    ) {
        let engine = WeatherAdvisoryEngine::default();
        let now = Utc::now();
        let task = task_due_in("Traitement phytosanitaire", hours, now);
        let samples = flat_forecast(now, hours + 1, rain, wind, 20.0);

        let first = engine.evaluate(&task, &samples, now).unwrap();
        let second = engine.evaluate(&task, &samples, now).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Every produced alert references the evaluated task and a rule of its
    /// intervention category, and is unacknowledged on creation
    #[test]
    fn prop_alerts_reference_their_task(
        rain in 0.0f64..50.0,
        wind in 0.0f64..80.0,
        hours in 1i64..24,
    ) {
        let engine = WeatherAdvisoryEngine::default();
        let now = Utc::now();
        let task = task_due_in("Traitement phytosanitaire", hours, now);
        let samples = flat_forecast(now, hours + 1, rain, wind, 20.0);

        let alerts = engine.evaluate(&task, &samples, now).unwrap();
        for alert in alerts {
            prop_assert_eq!(alert.task_id, task.id);
            prop_assert_eq!(alert.project_id, task.project_id);
            prop_assert!(!alert.acknowledged);
            prop_assert!(alert.valid_until > alert.created_at);
        }
    }
}
