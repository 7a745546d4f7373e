use serde::{Deserialize, Serialize};

/// Stochastic dual coordinate ascent
pub mod sdca;

pub use sdca::SdcaSolver;

/// A binary linear classifier: one weight per feature plus a bias term
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// Feature weights
    pub weights: Vec<f32>,

    /// Intercept added to every score
    pub bias: f32,
}

impl LinearModel {
    /// The raw linear score `w . x + b` for a feature vector
    pub fn score(&self, features: &[f32]) -> f32 {
        debug_assert_eq!(features.len(), self.weights.len());

        self.weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f32>()
            + self.bias
    }

    /// The number of features the model expects
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }
}

/// A trait for solvers that fit a binary linear classifier, so an
/// alternative optimizer can be substituted without touching evaluation or
/// inference
pub trait Solver {
    /// Fit a model to feature vectors and binary labels
    fn fit(&self, features: &[Vec<f32>], labels: &[bool]) -> Result<LinearModel, TrainingError>;
}

/// Training Error
#[derive(thiserror::Error, Debug)]
pub enum TrainingError {
    /// The training set was empty
    #[error("training data is empty")]
    Empty,

    /// Features and labels disagree in length
    #[error("{features} feature vectors but {labels} labels")]
    LabelMismatch {
        /// Number of feature vectors supplied
        features: usize,

        /// Number of labels supplied
        labels: usize,
    },

    /// Both classes must be present to fit a binary classifier
    #[error("training data must contain both positive and negative examples")]
    MissingClass,

    /// A feature vector differs in dimension from the rest
    #[error("feature vector {index} has dimension {found}, expected {expected}")]
    DimensionMismatch {
        /// Position of the offending vector
        index: usize,

        /// Dimension of the first vector
        expected: usize,

        /// Dimension actually found
        found: usize,
    },
}
