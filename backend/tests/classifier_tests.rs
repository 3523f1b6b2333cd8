//! Intervention classifier tests
//!
//! The classifier maps free-text task descriptions to intervention
//! categories by ordered, case-insensitive keyword matching.

use proptest::prelude::*;

use shared::{classify_intervention, InterventionCode};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_each_category_is_reachable() {
        let cases = [
            ("Semis de riz", InterventionCode::Sowing),
            ("Irrigation goutte à goutte", InterventionCode::Irrigation),
            (
                "Traitement phytosanitaire des tomates",
                InterventionCode::PesticideTreatment,
            ),
            ("Récolte du riz", InterventionCode::Harvest),
            ("Labour de la parcelle sud", InterventionCode::Plowing),
        ];

        for (description, expected) in cases {
            assert_eq!(
                classify_intervention(description),
                Some(expected),
                "misclassified: {description}"
            );
        }
    }

    #[test]
    fn test_keyword_inside_longer_sentence() {
        assert_eq!(
            classify_intervention("Préparer la plantation de manioc avant la saison"),
            Some(InterventionCode::Sowing)
        );
    }

    #[test]
    fn test_english_keywords_match() {
        assert_eq!(
            classify_intervention("Harvest the north field"),
            Some(InterventionCode::Harvest)
        );
        assert_eq!(
            classify_intervention("Sowing maize"),
            Some(InterventionCode::Sowing)
        );
    }

    #[test]
    fn test_unrelated_descriptions_do_not_match() {
        for description in ["Réunion équipe", "Achat d'engrais", "Visite de la banque", ""] {
            assert_eq!(classify_intervention(description), None);
        }
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Classification is deterministic: the same input always yields the
    /// same category
    #[test]
    fn prop_classification_is_deterministic(description in ".{0,80}") {
        let first = classify_intervention(&description);
        let second = classify_intervention(&description);
        prop_assert_eq!(first, second);
    }

    /// Case changes never change the result
    #[test]
    fn prop_classification_is_case_insensitive(description in "[a-zA-Zéèêàûô ]{0,60}") {
        let upper = description.to_uppercase();
        prop_assert_eq!(
            classify_intervention(&description),
            classify_intervention(&upper)
        );
    }

    /// Text made only of digits and punctuation never classifies
    #[test]
    fn prop_non_word_text_never_classifies(description in "[0-9 .,;:!?-]{0,60}") {
        prop_assert_eq!(classify_intervention(&description), None);
    }

    /// Embedding a known keyword anywhere in the text classifies to its
    /// category
    #[test]
    fn prop_embedded_keyword_always_matches(prefix in "[0-9 ]{0,20}", suffix in "[0-9 ]{0,20}") {
        let description = format!("{prefix}irrigation{suffix}");
        prop_assert_eq!(
            classify_intervention(&description),
            Some(InterventionCode::Irrigation)
        );
    }
}
