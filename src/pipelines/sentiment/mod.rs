use crate::models::linear::TrainingError;

/// Bag-of-words featurization
pub mod featurizer;

/// Labeled records
pub mod record;

/// Training
pub mod training;

/// The trained model artifact and its persistence
pub mod model;

/// Evaluation
pub mod evaluation;

/// Inference
pub mod inference;

pub use evaluation::{evaluate, Metrics};
pub use featurizer::Featurizer;
pub use inference::{Prediction, Predictor};
pub use model::ModelArtifact;
pub use record::Record;
pub use training::{train, Config};

/// The unique string token that identifies this pipeline
pub static PIPELINE: &str = "sentiment-analysis";

/// Errors raised by the sentiment analysis pipeline
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Text input that cannot enter the pipeline, such as a malformed
    /// dataset record
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Training could not produce a model
    #[error(transparent)]
    Training(#[from] TrainingError),

    /// A persisted model artifact that cannot be read back
    #[error("corrupt model artifact: {0}")]
    CorruptArtifact(String),

    /// An IO failure outside the artifact format itself
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
