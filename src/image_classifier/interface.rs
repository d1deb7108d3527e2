use crate::error::Error;
use image::DynamicImage;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class_name: String,
    pub probability: f32,
}

impl Prediction {
    pub fn new(class_name: &str, probability: f32) -> Self {
        Self {
            class_name: class_name.to_string(),
            probability,
        }
    }
}

/// A loaded model. `predict` yields exactly one prediction per class, in the
/// order of `class_names`.
pub trait ImageClassifier {
    fn class_names(&self) -> &[String];

    fn class_count(&self) -> usize {
        self.class_names().len()
    }

    fn predict(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait ImageClassifierLoader {
    fn load(&self, model_location: &str) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Error>;
}
