//! Intervention types and the free-text task classifier
//!
//! Intervention types are immutable reference data: each agricultural task
//! category carries display names, a weather-sensitivity flag and optional
//! comfort thresholds. The classifier maps a free-text task description to a
//! category through ordered keyword sets (the sets are disjoint, so "first
//! match wins" never has to break a tie).

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Codes for the fixed set of agricultural task categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InterventionCode {
    Sowing,
    Irrigation,
    PesticideTreatment,
    Harvest,
    Plowing,
}

impl InterventionCode {
    pub fn code(&self) -> &'static str {
        match self {
            InterventionCode::Sowing => "sowing",
            InterventionCode::Irrigation => "irrigation",
            InterventionCode::PesticideTreatment => "pesticide_treatment",
            InterventionCode::Harvest => "harvest",
            InterventionCode::Plowing => "plowing",
        }
    }

    pub fn all() -> &'static [InterventionCode] {
        &[
            InterventionCode::Sowing,
            InterventionCode::Irrigation,
            InterventionCode::PesticideTreatment,
            InterventionCode::Harvest,
            InterventionCode::Plowing,
        ]
    }
}

/// Comfort thresholds for a weather-sensitive intervention
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherThresholds {
    pub max_precipitation_mm: Option<f64>,
    pub max_wind_speed_kmh: Option<f64>,
    pub temp_range_celsius: Option<(f64, f64)>,
}

/// Static descriptor of an agricultural task category
#[derive(Debug, Clone, Serialize)]
pub struct InterventionType {
    pub code: InterventionCode,
    pub name_en: &'static str,
    pub name_fr: &'static str,
    pub weather_sensitive: bool,
    pub thresholds: Option<WeatherThresholds>,
}

/// The intervention-type reference table
pub fn intervention_types() -> &'static [InterventionType] {
    static TABLE: OnceLock<Vec<InterventionType>> = OnceLock::new();
    TABLE.get_or_init(|| {
        vec![
            InterventionType {
                code: InterventionCode::Sowing,
                name_en: "Sowing",
                name_fr: "Semis",
                weather_sensitive: true,
                thresholds: Some(WeatherThresholds {
                    max_precipitation_mm: Some(10.0),
                    max_wind_speed_kmh: None,
                    temp_range_celsius: Some((8.0, 38.0)),
                }),
            },
            InterventionType {
                code: InterventionCode::Irrigation,
                name_en: "Irrigation",
                name_fr: "Irrigation",
                weather_sensitive: true,
                thresholds: Some(WeatherThresholds {
                    max_precipitation_mm: Some(5.0),
                    max_wind_speed_kmh: None,
                    temp_range_celsius: None,
                }),
            },
            InterventionType {
                code: InterventionCode::PesticideTreatment,
                name_en: "Pesticide treatment",
                name_fr: "Traitement phytosanitaire",
                weather_sensitive: true,
                thresholds: Some(WeatherThresholds {
                    max_precipitation_mm: Some(2.0),
                    max_wind_speed_kmh: Some(20.0),
                    temp_range_celsius: Some((5.0, 30.0)),
                }),
            },
            InterventionType {
                code: InterventionCode::Harvest,
                name_en: "Harvest",
                name_fr: "Récolte",
                weather_sensitive: true,
                thresholds: Some(WeatherThresholds {
                    max_precipitation_mm: Some(5.0),
                    max_wind_speed_kmh: Some(50.0),
                    temp_range_celsius: None,
                }),
            },
            InterventionType {
                code: InterventionCode::Plowing,
                name_en: "Plowing",
                name_fr: "Labour",
                weather_sensitive: true,
                thresholds: Some(WeatherThresholds {
                    max_precipitation_mm: Some(15.0),
                    max_wind_speed_kmh: None,
                    temp_range_celsius: None,
                }),
            },
        ]
    })
}

/// Look up the descriptor for an intervention code
pub fn intervention_type(code: InterventionCode) -> &'static InterventionType {
    intervention_types()
        .iter()
        .find(|t| t.code == code)
        .expect("intervention table covers every code")
}

/// Ordered keyword sets used by the classifier. French keywords first since
/// task descriptions on the platform are predominantly French.
const CLASSIFIER_KEYWORDS: &[(&[&str], InterventionCode)] = &[
    (
        &["semis", "plantation", "planting", "sowing", "semer"],
        InterventionCode::Sowing,
    ),
    (
        &["irrigation", "arrosage", "watering"],
        InterventionCode::Irrigation,
    ),
    (
        &[
            "traitement",
            "phytosanitaire",
            "pesticide",
            "pulvérisation",
            "fongicide",
            "herbicide",
            "spraying",
        ],
        InterventionCode::PesticideTreatment,
    ),
    (
        &["récolte", "recolte", "moisson", "harvest"],
        InterventionCode::Harvest,
    ),
    (
        &["labour", "labourage", "plowing", "tillage"],
        InterventionCode::Plowing,
    ),
];

/// Classify a free-text task description into an intervention category.
///
/// Case-insensitive substring matching over the ordered keyword sets,
/// first match wins. Returns `None` when no keyword matches, which callers
/// treat as "not weather-evaluable" rather than as an error.
pub fn classify_intervention(description: &str) -> Option<InterventionCode> {
    let normalized = description.to_lowercase();
    for (keywords, code) in CLASSIFIER_KEYWORDS {
        if keywords.iter().any(|kw| normalized.contains(kw)) {
            return Some(*code);
        }
    }
    None
}
