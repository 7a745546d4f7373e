use std::sync::Arc;

use serde::Serialize;

use super::{model, ModelArtifact};

/// The scored outcome for a single text
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prediction {
    /// The input text, echoed back
    pub text: String,

    /// True when the text is classified positive
    pub label: bool,

    /// Probability of positive sentiment, the sigmoid of the raw score
    pub probability: f32,

    /// The raw linear score
    pub score: f32,
}

/// Scores texts against a trained artifact.
///
/// The artifact is read-only and shared behind an `Arc`, so clones of the
/// predictor can score concurrently without locking.
#[derive(Clone)]
pub struct Predictor {
    artifact: Arc<ModelArtifact>,
}

impl Predictor {
    /// Wrap a trained artifact for scoring
    pub fn new(artifact: ModelArtifact) -> Self {
        Self {
            artifact: Arc::new(artifact),
        }
    }

    /// The wrapped artifact
    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Score a single text. An empty text is valid and scores as the bias
    /// alone.
    pub fn predict_one(&self, text: &str) -> Prediction {
        let score = self.artifact.score(text);
        let probability = model::sigmoid(score);

        Prediction {
            text: text.to_string(),
            label: probability > 0.5,
            probability,
            score,
        }
    }

    /// Score a batch of texts, one prediction per input in input order
    pub fn predict_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Prediction> {
        texts.iter().map(|t| self.predict_one(t.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::models::linear::LinearModel;
    use crate::pipelines::sentiment::Featurizer;

    use super::*;

    fn predictor() -> Predictor {
        let featurizer = Featurizer::fit(&["good food", "bad food"]);
        let linear = LinearModel {
            weights: vec![0.0, 2.0, 0.0, -2.0],
            bias: 0.0,
        };

        Predictor::new(ModelArtifact::new(featurizer, linear))
    }

    #[test]
    fn batch_matches_single() {
        let predictor = predictor();
        let texts = ["good food", "bad food", "", "something unseen"];

        let batch = predictor.predict_batch(&texts);

        assert_eq!(batch.len(), texts.len());
        for (text, prediction) in texts.iter().zip(&batch) {
            assert_eq!(&predictor.predict_one(text), prediction);
        }
    }

    #[test]
    fn batch_preserves_input_order() {
        let predictor = predictor();
        let texts = ["bad food", "good food"];

        let batch = predictor.predict_batch(&texts);

        assert_eq!(batch[0].text, "bad food");
        assert_eq!(batch[1].text, "good food");
    }

    #[test]
    fn probability_is_the_sigmoid_of_the_score() {
        let prediction = predictor().predict_one("good food");

        assert!(prediction.label);
        assert!(prediction.score > 0.0);
        assert!((prediction.probability - model::sigmoid(prediction.score)).abs() < 1e-6);
    }

    #[test]
    fn empty_text_is_a_valid_prediction() {
        let prediction = predictor().predict_one("");

        assert_eq!(prediction.text, "");
        assert_eq!(prediction.score, 0.0);
        assert_eq!(prediction.probability, 0.5);
    }

    #[test]
    fn clones_share_the_artifact() {
        let predictor = predictor();
        let clone = predictor.clone();

        assert_eq!(
            predictor.predict_one("good food"),
            clone.predict_one("good food"),
        );
    }
}
