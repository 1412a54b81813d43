use crate::algorithm::assignment::Scorer;
use crate::simulation::state::Order;
use crate::simulation::state::Robot;
use serde::Deserialize;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Feature order fed to the model: the same schema must be used at training
/// and inference time, so it is versioned inside the persisted bundle.
pub const FEATURE_SCHEMA: &str = "dist-weight-battery-capacity/v1";
pub const FEATURE_COUNT: usize = 4;

pub fn features(order: &Order, robot: &Robot) -> [f64; FEATURE_COUNT] {
    [
        robot.position.euclidean(order.location),
        order.weight,
        robot.battery,
        robot.load_capacity,
    ]
}

/// Persisted scoring oracle: one linear response per class, where a class
/// label is a robot id. The prediction for a feature vector is the label
/// with the maximal response, ties to the first class.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ModelBundle {
    schema: String,
    classes: Vec<ClassWeights>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClassWeights {
    pub label: String,
    pub weights: Vec<f64>,
    pub bias: f64,
}

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("failed to read model bundle: {0}")]
    Io(#[from] std::io::Error),
    #[error("model bundle is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("model bundle schema {found:?} does not match {expected:?}")]
    SchemaMismatch {
        expected: &'static str,
        found: String,
    },
    #[error("class {label:?} carries {count} weights, expected {expected}")]
    MalformedClass {
        label: String,
        count: usize,
        expected: usize,
    },
}

impl ModelBundle {
    pub fn new(classes: Vec<ClassWeights>) -> Result<ModelBundle, BundleError> {
        let bundle = ModelBundle {
            schema: FEATURE_SCHEMA.to_string(),
            classes,
        };
        bundle.validate()?;

        Ok(bundle)
    }
    pub fn load(path: &Path) -> Result<ModelBundle, BundleError> {
        let reader = BufReader::new(File::open(path)?);
        let bundle: ModelBundle = serde_json::from_reader(reader)?;
        bundle.validate()?;

        Ok(bundle)
    }
    fn validate(&self) -> Result<(), BundleError> {
        if self.schema != FEATURE_SCHEMA {
            return Err(BundleError::SchemaMismatch {
                expected: FEATURE_SCHEMA,
                found: self.schema.clone(),
            });
        }
        for class in &self.classes {
            if class.weights.len() != FEATURE_COUNT {
                return Err(BundleError::MalformedClass {
                    label: class.label.clone(),
                    count: class.weights.len(),
                    expected: FEATURE_COUNT,
                });
            }
        }

        Ok(())
    }
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for class in &self.classes {
            let response = class
                .weights
                .iter()
                .zip(features)
                .map(|(weight, feature)| weight * feature)
                .sum::<f64>()
                + class.bias;
            if best.map_or(true, |(_, other)| response > other) {
                best = Some((&class.label, response));
            }
        }

        best.map(|(label, _)| label)
    }
}

/// Scorer backed by a loaded [`ModelBundle`]. A robot is a candidate only
/// when the bundle predicts that very robot for the order's feature vector;
/// candidates are then ranked by proximity. A predicted robot that fails the
/// feasibility filter never reaches this scorer, which makes a bad
/// prediction equivalent to no prediction.
pub struct PredictiveScorer {
    bundle: ModelBundle,
}

impl PredictiveScorer {
    pub fn new(bundle: ModelBundle) -> PredictiveScorer {
        PredictiveScorer { bundle }
    }
    pub fn from_file(path: &Path) -> Result<PredictiveScorer, BundleError> {
        Ok(PredictiveScorer::new(ModelBundle::load(path)?))
    }
}

impl Scorer for PredictiveScorer {
    fn score(&self, order: &Order, robot: &Robot) -> Option<f64> {
        let features = features(order, robot);
        match self.bundle.predict(&features) {
            Some(label) if label == robot.id => Some(-features[0]),
            _ => None,
        }
    }
}
