//! Weather advisory engine
//!
//! A pure, stateless evaluator: given a scheduled task, the forecast samples
//! covering its window and the evaluation time, it produces zero or more
//! advisory alerts from the static rule table. The engine performs no I/O
//! and never reads the clock; callers pass `now` explicitly, which makes
//! evaluation deterministic and safe to run concurrently across tasks.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::models::{
    classify_intervention, intervention_type, rules_for_intervention, AlertRule, ForecastSample,
    ForecastWindow, RuleCondition, ScheduledTask, WeatherAlert, ALERT_VALIDITY_HOURS,
};
use crate::types::{Language, Severity, WeatherConditionKind};
use crate::validation::{validate_forecast_samples, validate_task};

/// Errors surfaced by the engine for malformed input
///
/// "No matching intervention" and "no forecast in window" are not errors:
/// both yield an empty alert list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdvisoryError {
    #[error("invalid task {task_id}: {reason}")]
    InvalidTask { task_id: String, reason: String },

    #[error("invalid forecast data: {reason}")]
    InvalidForecast { reason: String },
}

/// The advisory engine
///
/// The rule and intervention tables are immutable process-wide reference
/// data; the engine itself carries only the output language, fixed at
/// construction. Cheap to clone and share.
#[derive(Debug, Clone)]
pub struct WeatherAdvisoryEngine {
    language: Language,
}

impl Default for WeatherAdvisoryEngine {
    fn default() -> Self {
        Self::new(Language::French)
    }
}

impl WeatherAdvisoryEngine {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Evaluate one task against its forecast at time `now`.
    ///
    /// Every rule for the task's intervention category whose time window
    /// admits the task and whose threshold is met by the aggregated window
    /// fires independently; one task may yield several alerts.
    pub fn evaluate(
        &self,
        task: &ScheduledTask,
        samples: &[ForecastSample],
        now: DateTime<Utc>,
    ) -> Result<Vec<WeatherAlert>, AdvisoryError> {
        validate_task(task).map_err(|reason| AdvisoryError::InvalidTask {
            task_id: task.id.to_string(),
            reason: reason.to_string(),
        })?;
        validate_forecast_samples(samples).map_err(|reason| AdvisoryError::InvalidForecast {
            reason: reason.to_string(),
        })?;

        let Some(code) = classify_intervention(&task.description) else {
            return Ok(Vec::new());
        };
        if !intervention_type(code).weather_sensitive {
            return Ok(Vec::new());
        }

        let time_until = task.due_at - now;
        // Tasks already in the past get no advisory, whatever the forecast
        if time_until < Duration::zero() {
            return Ok(Vec::new());
        }

        let Some(window) = ForecastWindow::from_samples(samples, now, task.due_at) else {
            return Ok(Vec::new());
        };

        let mut alerts = Vec::new();
        for rule in rules_for_intervention(code) {
            // Boundary is inclusive: a task due exactly at the window edge
            // is still evaluated
            if time_until > Duration::hours(rule.time_window_hours) {
                continue;
            }
            if !condition_met(&rule.condition, &window) {
                continue;
            }
            tracing::debug!(
                task_id = %task.id,
                condition = rule.condition.kind().code(),
                action = rule.action.code(),
                "advisory rule matched"
            );
            alerts.push(self.build_alert(task, rule, &window, now));
        }

        Ok(alerts)
    }

    fn build_alert(
        &self,
        task: &ScheduledTask,
        rule: &AlertRule,
        window: &ForecastWindow,
        now: DateTime<Utc>,
    ) -> WeatherAlert {
        let kind = rule.condition.kind();
        let value = format_observed_value(kind, window, &self.language);
        let (title, message_template, recommendation) = match self.language {
            Language::French => (rule.title_fr, rule.message_fr, rule.recommendation_fr),
            Language::English => (rule.title_en, rule.message_en, rule.recommendation_en),
        };

        WeatherAlert {
            id: format!(
                "{}-{}-{}-{}",
                task.id,
                kind.code(),
                rule.action.code(),
                now.timestamp_millis()
            ),
            task_id: task.id,
            project_id: task.project_id,
            action: rule.action,
            severity: resolve_severity(rule, window),
            condition_kind: kind,
            title: title.to_string(),
            message: message_template.replace("{value}", &value),
            recommendation: recommendation.to_string(),
            weather_reason: format_weather_reason(kind, window, &self.language),
            created_at: now,
            valid_until: now + Duration::hours(ALERT_VALIDITY_HOURS),
            acknowledged: false,
        }
    }
}

/// Whether the aggregated window meets or exceeds the rule's threshold
fn condition_met(condition: &RuleCondition, window: &ForecastWindow) -> bool {
    match condition {
        RuleCondition::RainAtLeast { mm } => window.max_precipitation_mm >= *mm,
        RuleCondition::WindAtLeast { kmh } => window.max_wind_speed_kmh >= *kmh,
        RuleCondition::TemperatureOutside { min, max } => {
            window.mean_temperature_celsius < *min || window.mean_temperature_celsius > *max
        }
    }
}

/// Severity precedence: explicit rule severity, then the action's implied
/// severity, then escalation from the observed magnitude.
fn resolve_severity(rule: &AlertRule, window: &ForecastWindow) -> Severity {
    if let Some(severity) = rule.severity {
        return severity;
    }
    if let Some(severity) = rule.action.implied_severity() {
        return severity;
    }
    magnitude_severity(window)
}

/// Fallback escalation from observed magnitude
fn magnitude_severity(window: &ForecastWindow) -> Severity {
    if window.max_precipitation_mm > 20.0 || window.max_wind_speed_kmh > 40.0 {
        Severity::High
    } else if window.max_precipitation_mm > 10.0 || window.max_wind_speed_kmh > 25.0 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// The observed measurement interpolated into the rule's message template
fn format_observed_value(
    kind: WeatherConditionKind,
    window: &ForecastWindow,
    language: &Language,
) -> String {
    match kind {
        WeatherConditionKind::Rain => format!("{} mm", window.max_precipitation_mm),
        WeatherConditionKind::Wind => format!("{} km/h", window.max_wind_speed_kmh),
        WeatherConditionKind::Temperature => match language {
            Language::French => format!("{:.1} °C", window.mean_temperature_celsius),
            Language::English => format!("{:.1}°C", window.mean_temperature_celsius),
        },
    }
}

/// Formatted description of the triggering condition
fn format_weather_reason(
    kind: WeatherConditionKind,
    window: &ForecastWindow,
    language: &Language,
) -> String {
    match (kind, language) {
        (WeatherConditionKind::Rain, Language::French) => format!(
            "Pluie prévue : {} mm (prob. max {} %)",
            window.max_precipitation_mm, window.max_precipitation_probability
        ),
        (WeatherConditionKind::Rain, Language::English) => format!(
            "Forecast rain: {} mm (max prob. {}%)",
            window.max_precipitation_mm, window.max_precipitation_probability
        ),
        (WeatherConditionKind::Wind, Language::French) => {
            format!("Vent prévu : {} km/h", window.max_wind_speed_kmh)
        }
        (WeatherConditionKind::Wind, Language::English) => {
            format!("Forecast wind: {} km/h", window.max_wind_speed_kmh)
        }
        (WeatherConditionKind::Temperature, Language::French) => format!(
            "Température moyenne prévue : {:.1} °C",
            window.mean_temperature_celsius
        ),
        (WeatherConditionKind::Temperature, Language::English) => format!(
            "Forecast mean temperature: {:.1}°C",
            window.mean_temperature_celsius
        ),
    }
}
