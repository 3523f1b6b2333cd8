//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Supported languages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    French,
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::French => "fr",
            Language::English => "en",
        }
    }
}

/// Alert severity levels, ordered from least to most severe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn code(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// Recommended action carried by an advisory alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertAction {
    Postpone,
    Cancel,
    Warning,
    Urgent,
}

impl AlertAction {
    pub fn code(&self) -> &'static str {
        match self {
            AlertAction::Postpone => "postpone",
            AlertAction::Cancel => "cancel",
            AlertAction::Warning => "warning",
            AlertAction::Urgent => "urgent",
        }
    }

    /// Severity implied by the action, when the rule carries no explicit one.
    /// Warnings carry no implied severity and fall back to magnitude.
    pub fn implied_severity(&self) -> Option<Severity> {
        match self {
            AlertAction::Urgent => Some(Severity::Critical),
            AlertAction::Postpone => Some(Severity::High),
            AlertAction::Cancel => Some(Severity::Medium),
            AlertAction::Warning => None,
        }
    }
}

/// Kind of weather condition a rule evaluates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WeatherConditionKind {
    Rain,
    Wind,
    Temperature,
}

impl WeatherConditionKind {
    pub fn code(&self) -> &'static str {
        match self {
            WeatherConditionKind::Rain => "rain",
            WeatherConditionKind::Wind => "wind",
            WeatherConditionKind::Temperature => "temperature",
        }
    }
}
