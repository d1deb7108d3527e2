#[cfg(test)]
mod run_test {
    use crate::device_input::interface::UserAction;
    use crate::disposal_catalog::DisposalCatalog;
    use crate::result_classifier::ConfidenceTier;
    use crate::waste_sorter::core::{Display, Mode, State};
    use crate::waste_sorter::tests::fixture::Fixture;
    use image::DynamicImage;
    use std::path::PathBuf;
    use std::time::Duration;

    fn write_test_png(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "waste_sorter_{}_{}.png",
            name,
            std::process::id()
        ));
        DynamicImage::new_rgb8(8, 8).save(&path).unwrap();
        path
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_upload_flow_end_to_end() {
        let path = write_test_png("upload");
        let fixture = Fixture::new(vec![
            (ms(100), UserAction::SelectUpload),
            (ms(50), UserAction::SelectFile(Some(path.clone()))),
            (ms(300), UserAction::Classify),
            (ms(300), UserAction::Quit),
        ]);
        fixture
            .classifier
            .push_round(vec![0.91, 0.05, 0.02, 0.01, 0.01, 0.0]);

        let state = fixture.waste_sorter.run().unwrap();

        match state {
            State::Ready(ready) => {
                assert_eq!(ready.mode, Mode::Upload);
                match ready.display {
                    Display::Result(result) => {
                        assert_eq!(result.class_name, "Papel");
                        assert_eq!(result.tier, ConfidenceTier::High);
                    }
                    other => panic!("expected result, got {:?}", other),
                }
            }
            other => panic!("expected ready state, got {:?}", other),
        }
        assert_eq!(fixture.classifier.predict_calls(), 1);
        assert_eq!(fixture.device_camera.open_attempts(), 0);

        let screen = fixture.device_display.screen();
        assert!(screen.text().contains("IDENTIFIED: Papel"));
        assert_eq!(screen.color.map(|c| c.to_string()).as_deref(), Some("#3f51b5"));
        assert!(screen.controls.classify_enabled);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_webcam_reentry_reuses_camera() {
        let fixture = Fixture::new(vec![
            (ms(100), UserAction::SelectWebcam),
            (ms(200), UserAction::SelectUpload),
            (ms(100), UserAction::SelectWebcam),
            (ms(200), UserAction::Quit),
        ]);

        let state = fixture.waste_sorter.run().unwrap();

        match state {
            State::Ready(ready) => assert_eq!(ready.mode, Mode::Webcam),
            other => panic!("expected ready state, got {:?}", other),
        }
        assert_eq!(fixture.device_camera.open_attempts(), 1);
        assert_eq!(fixture.device_camera.opened(), 1);
        assert!(fixture.classifier.predict_calls() > 0);
        assert!(fixture
            .device_display
            .history()
            .iter()
            .any(|screen| screen.controls.pause_label.is_some()));
    }

    #[test]
    fn test_model_load_failure_is_displayed() {
        let fixture = Fixture::with_failing_model(vec![
            (ms(100), UserAction::SelectWebcam),
            (ms(50), UserAction::Quit),
        ]);

        let state = fixture.waste_sorter.run().unwrap();

        assert!(matches!(state, State::LoadFailed { .. }));
        let screen = fixture.device_display.screen();
        assert!(screen.lines[0].starts_with("ERROR"));
        assert!(!screen.controls.modes_enabled);
        assert_eq!(fixture.device_camera.open_attempts(), 0);
    }

    fn background_only_catalog() -> DisposalCatalog {
        DisposalCatalog::from_json_str(
            r##"{
                "Background": {
                    "bin_label": "NENHUM OBJETO",
                    "color": "#cccccc",
                    "instruction": "Point an object at the camera.",
                    "icon": "🔍"
                }
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn test_strict_catalog_rejects_unmapped_classes() {
        let fixture = Fixture::with_config(
            |config| {
                config.catalog = background_only_catalog();
                config.strict_catalog = true;
            },
            vec![(ms(150), UserAction::Quit)],
        );

        let state = fixture.waste_sorter.run().unwrap();

        match state {
            State::LoadFailed { message } => {
                assert!(message.contains("disposal catalog"));
                assert!(message.contains("no disposal entry"));
                assert!(message.contains("Papel"));
            }
            other => panic!("expected load failure, got {:?}", other),
        }
        assert!(fixture.device_display.screen().lines[0].starts_with("ERROR"));
    }

    #[test]
    fn test_lenient_catalog_loads_with_unmapped_classes() {
        let fixture = Fixture::with_config(
            |config| config.catalog = background_only_catalog(),
            vec![(ms(150), UserAction::Quit)],
        );

        let state = fixture.waste_sorter.run().unwrap();

        match state {
            State::Ready(ready) => assert_eq!(ready.class_names.len(), 6),
            other => panic!("expected ready state, got {:?}", other),
        }
        assert!(fixture.device_display.screen().controls.modes_enabled);
    }
}
