//! Advisory alert rules
//!
//! Immutable reference data: each rule ties an intervention category to a
//! weather condition threshold, a recommended action and bilingual message
//! templates. Several rules may target the same intervention; every rule
//! whose threshold is met fires independently.

use serde::{Deserialize, Serialize};

use crate::types::{AlertAction, Severity, WeatherConditionKind};

use super::intervention::InterventionCode;

/// Threshold condition a rule evaluates against the forecast window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RuleCondition {
    /// Fires when max precipitation in the window reaches the threshold (mm)
    RainAtLeast { mm: f64 },
    /// Fires when max wind speed in the window reaches the threshold (km/h)
    WindAtLeast { kmh: f64 },
    /// Fires when mean temperature over the window falls outside the range (°C)
    TemperatureOutside { min: f64, max: f64 },
}

impl RuleCondition {
    pub fn kind(&self) -> WeatherConditionKind {
        match self {
            RuleCondition::RainAtLeast { .. } => WeatherConditionKind::Rain,
            RuleCondition::WindAtLeast { .. } => WeatherConditionKind::Wind,
            RuleCondition::TemperatureOutside { .. } => WeatherConditionKind::Temperature,
        }
    }
}

/// A single advisory rule
///
/// `severity` is the explicit per-rule priority; when `None` the engine
/// derives one from the action, then from the observed magnitude.
/// Message templates interpolate `{value}` with the observed measurement.
#[derive(Debug, Clone, Serialize)]
pub struct AlertRule {
    pub intervention: InterventionCode,
    pub condition: RuleCondition,
    pub action: AlertAction,
    pub severity: Option<Severity>,
    /// Only tasks due within this many hours are considered by the rule
    pub time_window_hours: i64,
    pub title_en: &'static str,
    pub title_fr: &'static str,
    pub message_en: &'static str,
    pub message_fr: &'static str,
    pub recommendation_en: &'static str,
    pub recommendation_fr: &'static str,
}

/// The static advisory rule table
pub fn alert_rules() -> &'static [AlertRule] {
    static RULES: &[AlertRule] = &[
        AlertRule {
            intervention: InterventionCode::Sowing,
            condition: RuleCondition::RainAtLeast { mm: 10.0 },
            action: AlertAction::Postpone,
            severity: None,
            time_window_hours: 24,
            title_en: "Postpone sowing",
            title_fr: "Report des semis recommandé",
            message_en: "{value} of rain expected before sowing",
            message_fr: "{value} de pluie prévue avant les semis",
            recommendation_en: "Wait for drier conditions before sowing",
            recommendation_fr: "Attendez des conditions plus sèches avant de semer",
        },
        AlertRule {
            intervention: InterventionCode::Sowing,
            condition: RuleCondition::RainAtLeast { mm: 30.0 },
            action: AlertAction::Cancel,
            severity: None,
            time_window_hours: 48,
            title_en: "Cancel sowing",
            title_fr: "Annulation des semis recommandée",
            message_en: "Heavy rain of {value} expected, sowing is compromised",
            message_fr: "Fortes pluies de {value} prévues, les semis sont compromis",
            recommendation_en: "Reschedule sowing for the next dry spell",
            recommendation_fr: "Replanifiez les semis à la prochaine période sèche",
        },
        AlertRule {
            intervention: InterventionCode::Sowing,
            condition: RuleCondition::TemperatureOutside {
                min: 8.0,
                max: 38.0,
            },
            action: AlertAction::Warning,
            severity: None,
            time_window_hours: 24,
            title_en: "Unfavourable temperature for sowing",
            title_fr: "Température défavorable aux semis",
            message_en: "Mean temperature of {value} outside the sowing range",
            message_fr: "Température moyenne de {value} hors de la plage de semis",
            recommendation_en: "Monitor germination conditions closely",
            recommendation_fr: "Surveillez de près les conditions de germination",
        },
        AlertRule {
            intervention: InterventionCode::Irrigation,
            condition: RuleCondition::RainAtLeast { mm: 5.0 },
            action: AlertAction::Cancel,
            severity: None,
            time_window_hours: 48,
            title_en: "Cancel irrigation",
            title_fr: "Annulation de l'irrigation recommandée",
            message_en: "{value} of rain expected, irrigation is unnecessary",
            message_fr: "{value} de pluie prévue, l'irrigation est inutile",
            recommendation_en: "Let the rain do the watering and save water",
            recommendation_fr: "Laissez la pluie arroser et économisez l'eau",
        },
        AlertRule {
            intervention: InterventionCode::PesticideTreatment,
            condition: RuleCondition::WindAtLeast { kmh: 20.0 },
            action: AlertAction::Warning,
            severity: None,
            time_window_hours: 24,
            title_en: "Wind risk during treatment",
            title_fr: "Risque de vent pendant le traitement",
            message_en: "Wind of {value} expected, spray drift is likely",
            message_fr: "Vent de {value} prévu, risque de dérive du produit",
            recommendation_en: "Spray early morning or postpone until the wind drops",
            recommendation_fr: "Pulvérisez tôt le matin ou attendez que le vent tombe",
        },
        AlertRule {
            intervention: InterventionCode::PesticideTreatment,
            condition: RuleCondition::RainAtLeast { mm: 2.0 },
            action: AlertAction::Postpone,
            severity: None,
            time_window_hours: 24,
            title_en: "Postpone treatment",
            title_fr: "Report du traitement recommandé",
            message_en: "{value} of rain expected, the product would wash off",
            message_fr: "{value} de pluie prévue, le produit serait lessivé",
            recommendation_en: "Apply the treatment after the rain has passed",
            recommendation_fr: "Appliquez le traitement après le passage de la pluie",
        },
        AlertRule {
            intervention: InterventionCode::PesticideTreatment,
            condition: RuleCondition::TemperatureOutside {
                min: 5.0,
                max: 30.0,
            },
            action: AlertAction::Warning,
            severity: None,
            time_window_hours: 24,
            title_en: "Unfavourable temperature for treatment",
            title_fr: "Température défavorable au traitement",
            message_en: "Mean temperature of {value} reduces treatment efficacy",
            message_fr: "Température moyenne de {value}, efficacité du traitement réduite",
            recommendation_en: "Treat during cooler hours of the day",
            recommendation_fr: "Traitez aux heures les plus fraîches de la journée",
        },
        AlertRule {
            intervention: InterventionCode::Harvest,
            condition: RuleCondition::RainAtLeast { mm: 5.0 },
            action: AlertAction::Postpone,
            severity: None,
            time_window_hours: 48,
            title_en: "Postpone harvest",
            title_fr: "Report de la récolte recommandé",
            message_en: "{value} of rain expected during the harvest window",
            message_fr: "{value} de pluie prévue pendant la fenêtre de récolte",
            recommendation_en: "Harvest before the rain or wait for the crop to dry",
            recommendation_fr: "Récoltez avant la pluie ou attendez que la culture sèche",
        },
        AlertRule {
            intervention: InterventionCode::Harvest,
            condition: RuleCondition::RainAtLeast { mm: 20.0 },
            action: AlertAction::Urgent,
            severity: Some(Severity::Critical),
            time_window_hours: 72,
            title_en: "Harvest before heavy rain",
            title_fr: "Récoltez avant les fortes pluies",
            message_en: "Heavy rain of {value} expected, the harvest is at risk",
            message_fr: "Fortes pluies de {value} prévues, la récolte est menacée",
            recommendation_en: "Bring the harvest in immediately if maturity allows",
            recommendation_fr: "Rentrez la récolte immédiatement si la maturité le permet",
        },
        AlertRule {
            intervention: InterventionCode::Harvest,
            condition: RuleCondition::WindAtLeast { kmh: 50.0 },
            action: AlertAction::Warning,
            severity: None,
            time_window_hours: 48,
            title_en: "Strong wind during harvest",
            title_fr: "Vent fort pendant la récolte",
            message_en: "Wind of {value} expected, lodging and losses are possible",
            message_fr: "Vent de {value} prévu, risque de verse et de pertes",
            recommendation_en: "Secure equipment and prioritise exposed plots",
            recommendation_fr: "Sécurisez le matériel et priorisez les parcelles exposées",
        },
        AlertRule {
            intervention: InterventionCode::Plowing,
            condition: RuleCondition::RainAtLeast { mm: 15.0 },
            action: AlertAction::Postpone,
            severity: None,
            time_window_hours: 48,
            title_en: "Postpone plowing",
            title_fr: "Report du labour recommandé",
            message_en: "{value} of rain expected, the soil will be waterlogged",
            message_fr: "{value} de pluie prévue, le sol sera détrempé",
            recommendation_en: "Plow once the soil has drained to avoid compaction",
            recommendation_fr: "Labourez une fois le sol ressuyé pour éviter le tassement",
        },
    ];
    RULES
}

/// Rules targeting a given intervention, in table order
pub fn rules_for_intervention(code: InterventionCode) -> impl Iterator<Item = &'static AlertRule> {
    alert_rules().iter().filter(move |r| r.intervention == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_intervention_has_rules() {
        for code in InterventionCode::all() {
            assert!(
                rules_for_intervention(*code).count() > 0,
                "no rules for {code:?}"
            );
        }
    }

    #[test]
    fn test_rule_windows_are_positive() {
        for rule in alert_rules() {
            assert!(rule.time_window_hours > 0);
        }
    }

    #[test]
    fn test_message_templates_interpolate_value() {
        for rule in alert_rules() {
            assert!(rule.message_fr.contains("{value}"));
            assert!(rule.message_en.contains("{value}"));
        }
    }

    #[test]
    fn test_temperature_ranges_are_ordered() {
        for rule in alert_rules() {
            if let RuleCondition::TemperatureOutside { min, max } = rule.condition {
                assert!(min < max);
            }
        }
    }

    #[test]
    fn test_urgent_rules_carry_explicit_critical() {
        for rule in alert_rules() {
            if rule.action == AlertAction::Urgent {
                assert_eq!(rule.severity, Some(Severity::Critical));
            }
        }
    }
}
