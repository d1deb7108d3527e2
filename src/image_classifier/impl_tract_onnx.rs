use crate::error::Error;
use crate::image_classifier::interface::{ImageClassifier, ImageClassifierLoader, Prediction};
use crate::image_classifier::tract::image::resize_image_to_tensor;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

use super::models::model_config::ModelConfig;

pub struct ImageClassifierTractOnnx {
    model: TypedRunnableModel<TypedModel>,
    config: ModelConfig,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let (width, height) = config.input_shape;
        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)?
            .with_input_fact(
                0,
                f32::fact([1, height as usize, width as usize, 3]).into(),
            )?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { model, config })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn class_names(&self) -> &[String] {
        &self.config.labels
    }

    fn predict(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>> {
        let input = resize_image_to_tensor(
            image,
            self.config.input_shape.0, // width
            self.config.input_shape.1, // height
        )?;

        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output = outputs
            .first()
            .ok_or("model produced no output")?
            .to_array_view::<f32>()?;
        let probabilities: Vec<f32> = output.iter().copied().collect();

        if probabilities.len() != self.config.labels.len() {
            return Err(format!(
                "model produced {} scores for {} labels",
                probabilities.len(),
                self.config.labels.len()
            )
            .into());
        }

        Ok(self
            .config
            .labels
            .iter()
            .zip(probabilities)
            .map(|(label, probability)| Prediction::new(label, probability))
            .collect())
    }
}

pub struct ImageClassifierTractOnnxLoader {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnxLoader {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("classifier").with_namespace("tract"),
        }
    }
}

impl ImageClassifierLoader for ImageClassifierTractOnnxLoader {
    fn load(&self, model_location: &str) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Error> {
        let config = ModelConfig::from_location(model_location)?;
        let _ = self.logger.info(&format!(
            "Loading {} ({} labels, input {}x{})",
            config.onnx_model_path.display(),
            config.labels.len(),
            config.input_shape.0,
            config.input_shape.1
        ));

        let classifier = ImageClassifierTractOnnx::new(config).map_err(|source| Error::ModelLoad {
            location: model_location.to_string(),
            source,
        })?;

        let _ = self.logger.info("Model loaded");
        Ok(Arc::new(classifier))
    }
}
