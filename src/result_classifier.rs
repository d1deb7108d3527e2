use crate::disposal_catalog::{Color, DisposalCatalog, DisposalEntry, BACKGROUND_CLASS};
use crate::error::Error;
use crate::image_classifier::interface::Prediction;

pub const SUGGESTION_COLOR: Color = Color::rgb(0x3f, 0x93, 0xa9);
pub const INCONCLUSIVE_COLOR: Color = Color::rgb(0xff, 0x63, 0x47);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub high: f32,
    pub medium: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: 0.85,
            medium: 0.50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_probability(probability: f32, thresholds: &Thresholds) -> Self {
        if probability >= thresholds.high {
            ConfidenceTier::High
        } else if probability >= thresholds.medium {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayResult {
    pub class_name: String,
    pub probability: f32,
    pub probability_percent: u8,
    pub tier: ConfidenceTier,
    pub entry: DisposalEntry,
}

impl DisplayResult {
    pub fn color(&self) -> Color {
        match self.tier {
            ConfidenceTier::High => self.entry.color,
            ConfidenceTier::Medium => SUGGESTION_COLOR,
            ConfidenceTier::Low => INCONCLUSIVE_COLOR,
        }
    }

    pub fn message_lines(&self) -> Vec<String> {
        match self.tier {
            ConfidenceTier::High => vec![
                format!("✅ IDENTIFIED: {}", self.class_name),
                format!("➡️ {} {}", self.entry.bin_label, self.entry.icon),
                format!("Tip: {}", self.entry.instruction),
            ],
            ConfidenceTier::Medium => vec![
                format!(
                    "🤔 I believe it's {} ({}%)",
                    self.class_name, self.probability_percent
                ),
                format!("➡️ SUGGEST: {} {}", self.entry.bin_label, self.entry.icon),
                format!("Tip: {}", self.entry.instruction),
            ],
            ConfidenceTier::Low => vec![
                format!(
                    "🔍 INCONCLUSIVE: only {}% certain ({})",
                    self.probability_percent, self.class_name
                ),
                "Move the object closer or use Upload mode.".to_string(),
            ],
        }
    }
}

fn to_percent(probability: f32) -> u8 {
    (probability * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Picks the most probable class and turns it into user-facing guidance.
///
/// The running best starts at Background with probability zero and is only
/// replaced by a strictly greater probability, so ties keep the earliest
/// prediction and an all-zero round resolves to Background.
pub fn classify(
    predictions: &[Prediction],
    catalog: &DisposalCatalog,
    thresholds: &Thresholds,
) -> Result<DisplayResult, Error> {
    if predictions.is_empty() {
        return Err(Error::InvalidInput);
    }

    let mut best_class = BACKGROUND_CLASS;
    let mut best_probability = 0.0f32;
    for prediction in predictions {
        if prediction.probability > best_probability {
            best_class = &prediction.class_name;
            best_probability = prediction.probability;
        }
    }

    Ok(DisplayResult {
        class_name: best_class.to_string(),
        probability: best_probability,
        probability_percent: to_percent(best_probability),
        tier: ConfidenceTier::from_probability(best_probability, thresholds),
        entry: catalog.lookup(best_class).clone(),
    })
}
