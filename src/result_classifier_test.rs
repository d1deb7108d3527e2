#[cfg(test)]
mod result_classifier_test {
    use crate::disposal_catalog::{DisposalCatalog, BACKGROUND_CLASS};
    use crate::error::Error;
    use crate::image_classifier::interface::Prediction;
    use crate::result_classifier::{
        classify, ConfidenceTier, Thresholds, INCONCLUSIVE_COLOR, SUGGESTION_COLOR,
    };

    fn round(pairs: &[(&str, f32)]) -> Vec<Prediction> {
        pairs
            .iter()
            .map(|(name, probability)| Prediction::new(name, *probability))
            .collect()
    }

    fn classes() -> [&'static str; 6] {
        ["Papel", "Plastico", "Metal", "Vidro", "Organico", BACKGROUND_CLASS]
    }

    #[test]
    fn test_empty_round_is_invalid() {
        let result = classify(&[], &DisposalCatalog::default(), &Thresholds::default());

        assert!(matches!(result, Err(Error::InvalidInput)));
    }

    #[test]
    fn test_single_confident_entry_wins_at_high() {
        let catalog = DisposalCatalog::default();
        let thresholds = Thresholds::default();

        for winner in 0..classes().len() {
            let predictions: Vec<Prediction> = classes()
                .iter()
                .enumerate()
                .map(|(i, name)| Prediction::new(name, if i == winner { 0.9 } else { 0.02 }))
                .collect();

            let result = classify(&predictions, &catalog, &thresholds).unwrap();

            assert_eq!(result.class_name, classes()[winner]);
            assert_eq!(result.tier, ConfidenceTier::High);
        }
    }

    #[test]
    fn test_all_zero_round_resolves_to_background() {
        let predictions = round(&[
            ("Papel", 0.0),
            ("Plastico", 0.0),
            ("Metal", 0.0),
            (BACKGROUND_CLASS, 0.0),
        ]);

        let result = classify(
            &predictions,
            &DisposalCatalog::default(),
            &Thresholds::default(),
        )
        .unwrap();

        assert_eq!(result.class_name, BACKGROUND_CLASS);
        assert_eq!(result.tier, ConfidenceTier::Low);
        assert_eq!(result.probability_percent, 0);
        assert_eq!(result.entry.bin_label, "NENHUM OBJETO");
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        let thresholds = Thresholds::default();

        assert_eq!(
            ConfidenceTier::from_probability(0.85, &thresholds),
            ConfidenceTier::High
        );
        assert_eq!(
            ConfidenceTier::from_probability(0.8499, &thresholds),
            ConfidenceTier::Medium
        );
        assert_eq!(
            ConfidenceTier::from_probability(0.50, &thresholds),
            ConfidenceTier::Medium
        );
        assert_eq!(
            ConfidenceTier::from_probability(0.4999, &thresholds),
            ConfidenceTier::Low
        );
        assert_eq!(
            ConfidenceTier::from_probability(1.0, &thresholds),
            ConfidenceTier::High
        );
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let predictions = round(&[("Metal", 0.4), ("Vidro", 0.4), ("Papel", 0.2)]);

        let result = classify(
            &predictions,
            &DisposalCatalog::default(),
            &Thresholds::default(),
        )
        .unwrap();

        assert_eq!(result.class_name, "Metal");
    }

    #[test]
    fn test_unknown_class_uses_background_entry() {
        let predictions = round(&[("Isopor", 0.95), ("Papel", 0.05)]);

        let result = classify(
            &predictions,
            &DisposalCatalog::default(),
            &Thresholds::default(),
        )
        .unwrap();

        assert_eq!(result.class_name, "Isopor");
        assert_eq!(result.entry.bin_label, "NENHUM OBJETO");
    }

    #[test]
    fn test_nan_never_wins() {
        let predictions = round(&[("Papel", f32::NAN), ("Vidro", 0.7)]);

        let result = classify(
            &predictions,
            &DisposalCatalog::default(),
            &Thresholds::default(),
        )
        .unwrap();

        assert_eq!(result.class_name, "Vidro");
    }

    #[test]
    fn test_scenario_paper_high_confidence() {
        let predictions = round(&[
            ("Papel", 0.91),
            ("Plastico", 0.05),
            ("Metal", 0.02),
            ("Vidro", 0.01),
            ("Organico", 0.01),
            (BACKGROUND_CLASS, 0.00),
        ]);
        let catalog = DisposalCatalog::default();

        let result = classify(&predictions, &catalog, &Thresholds::default()).unwrap();

        assert_eq!(result.tier, ConfidenceTier::High);
        assert_eq!(result.class_name, "Papel");
        assert_eq!(result.probability_percent, 91);
        assert_eq!(result.color(), catalog.lookup("Papel").color);
        let lines = result.message_lines();
        assert_eq!(lines[0], "✅ IDENTIFIED: Papel");
        assert!(lines[1].contains("LIXEIRA AZUL"));
        assert!(lines[2].starts_with("Tip: Papel e Papelão"));
    }

    #[test]
    fn test_scenario_plastic_medium_confidence() {
        let predictions = round(&[
            ("Papel", 0.20),
            ("Plastico", 0.62),
            ("Metal", 0.10),
            ("Vidro", 0.05),
            ("Organico", 0.03),
            (BACKGROUND_CLASS, 0.00),
        ]);

        let result = classify(
            &predictions,
            &DisposalCatalog::default(),
            &Thresholds::default(),
        )
        .unwrap();

        assert_eq!(result.tier, ConfidenceTier::Medium);
        assert_eq!(result.probability_percent, 62);
        assert_eq!(result.color(), SUGGESTION_COLOR);
        let lines = result.message_lines();
        assert_eq!(lines[0], "🤔 I believe it's Plastico (62%)");
        assert!(lines[1].contains("SUGGEST: LIXEIRA VERMELHA"));
    }

    #[test]
    fn test_scenario_organic_low_confidence() {
        let predictions = round(&[
            ("Papel", 0.20),
            ("Plastico", 0.15),
            ("Metal", 0.10),
            ("Vidro", 0.05),
            ("Organico", 0.30),
            (BACKGROUND_CLASS, 0.20),
        ]);

        let result = classify(
            &predictions,
            &DisposalCatalog::default(),
            &Thresholds::default(),
        )
        .unwrap();

        assert_eq!(result.tier, ConfidenceTier::Low);
        assert_eq!(result.class_name, "Organico");
        assert_eq!(result.probability_percent, 30);
        assert_eq!(result.color(), INCONCLUSIVE_COLOR);
        let lines = result.message_lines();
        assert!(lines[0].starts_with("🔍 INCONCLUSIVE"));
        assert!(lines[0].contains("30%"));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = Thresholds {
            high: 0.6,
            medium: 0.3,
        };
        let predictions = round(&[("Metal", 0.62), ("Vidro", 0.38)]);

        let result = classify(&predictions, &DisposalCatalog::default(), &thresholds).unwrap();

        assert_eq!(result.tier, ConfidenceTier::High);
    }
}
