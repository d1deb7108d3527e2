use crate::error::Error;
use crate::image_classifier::interface::{ImageClassifier, ImageClassifierLoader, Prediction};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use rand::distr::{Distribution, Uniform};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const FAKE_CLASSES: [&str; 6] = ["Papel", "Plastico", "Metal", "Vidro", "Organico", "Background"];

pub struct ImageClassifierFake {
    class_names: Vec<String>,
    scripted: Mutex<VecDeque<Vec<f32>>>,
    predict_calls: AtomicUsize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            class_names: FAKE_CLASSES.iter().map(|c| c.to_string()).collect(),
            scripted: Mutex::new(VecDeque::new()),
            predict_calls: AtomicUsize::new(0),
            logger: logger.with_namespace("classifier").with_namespace("fake"),
        }
    }

    /// Queues probability rounds returned in order by `predict`. Once the
    /// queue runs dry predictions are random again.
    pub fn push_round(&self, probabilities: Vec<f32>) {
        self.scripted.lock().unwrap().push_back(probabilities);
    }

    pub fn predict_calls(&self) -> usize {
        self.predict_calls.load(Ordering::SeqCst)
    }

    fn random_round(&self) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();
        let weight_dist = Uniform::new(0.0f32, 1.0)?;
        let winner_dist = Uniform::new(0, self.class_names.len())?;

        let mut weights: Vec<f32> = (0..self.class_names.len())
            .map(|_| weight_dist.sample(&mut rng))
            .collect();
        weights[winner_dist.sample(&mut rng)] += 3.0;

        let total: f32 = weights.iter().sum();
        Ok(weights.into_iter().map(|w| w / total).collect())
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn class_names(&self) -> &[String] {
        &self.class_names
    }

    fn predict(
        &self,
        _image: &DynamicImage,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>> {
        self.predict_calls.fetch_add(1, Ordering::SeqCst);

        let scripted = self.scripted.lock().unwrap().pop_front();
        let probabilities = match scripted {
            Some(probabilities) => probabilities,
            None => self.random_round()?,
        };

        self.logger
            .info(&format!("Predicted {:?}", probabilities))?;

        Ok(self
            .class_names
            .iter()
            .zip(probabilities)
            .map(|(name, probability)| Prediction::new(name, probability))
            .collect())
    }
}

pub struct ImageClassifierFakeLoader {
    classifier: Arc<ImageClassifierFake>,
    fail: bool,
}

impl ImageClassifierFakeLoader {
    pub fn new(classifier: Arc<ImageClassifierFake>) -> Self {
        Self {
            classifier,
            fail: false,
        }
    }

    pub fn failing(classifier: Arc<ImageClassifierFake>) -> Self {
        Self {
            classifier,
            fail: true,
        }
    }
}

impl ImageClassifierLoader for ImageClassifierFakeLoader {
    fn load(&self, model_location: &str) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Error> {
        if self.fail {
            return Err(Error::ModelLoad {
                location: model_location.to_string(),
                source: "fake loader configured to fail".into(),
            });
        }
        Ok(self.classifier.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;

    fn classifier() -> ImageClassifierFake {
        let logger = Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()));
        ImageClassifierFake::new(logger)
    }

    #[test]
    fn test_random_round_is_a_distribution() {
        let classifier = classifier();
        let image = DynamicImage::new_rgb8(4, 4);

        let predictions = classifier.predict(&image).unwrap();

        assert_eq!(predictions.len(), classifier.class_count());
        let total: f32 = predictions.iter().map(|p| p.probability).sum();
        assert!((total - 1.0).abs() < 0.001);
        assert!(predictions
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.probability)));
    }

    #[test]
    fn test_scripted_rounds_come_first() {
        let classifier = classifier();
        classifier.push_round(vec![0.91, 0.05, 0.02, 0.01, 0.01, 0.0]);
        let image = DynamicImage::new_rgb8(4, 4);

        let predictions = classifier.predict(&image).unwrap();

        assert_eq!(predictions[0], Prediction::new("Papel", 0.91));
        assert_eq!(classifier.predict_calls(), 1);
    }

    #[test]
    fn test_failing_loader() {
        let loader = ImageClassifierFakeLoader::failing(Arc::new(classifier()));

        assert!(matches!(
            loader.load("./model"),
            Err(Error::ModelLoad { .. })
        ));
    }
}
