use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::models::linear::LinearModel;

use super::{Error, Featurizer};

/// A trained sentiment model: the fitted featurizer together with the
/// classifier weights and bias trained against it. The weights are useless
/// without the exact feature mapping that produced them, so the two are
/// persisted as one unit.
///
/// Immutable once constructed; a new training run replaces it rather than
/// mutating it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// The fitted feature mapping
    pub featurizer: Featurizer,

    /// The trained classifier
    pub linear: LinearModel,
}

impl ModelArtifact {
    /// Bundle a fitted featurizer with the model trained on its output
    pub(crate) fn new(featurizer: Featurizer, linear: LinearModel) -> Self {
        Self { featurizer, linear }
    }

    /// The raw linear score for a text
    pub fn score(&self, text: &str) -> f32 {
        let features = self.featurizer.transform(text);

        self.linear.score(&features)
    }

    /// Serialize the artifact to a single JSON file
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();

        let bytes =
            serde_json::to_vec(self).map_err(|e| Error::CorruptArtifact(e.to_string()))?;
        tokio::fs::write(path, bytes).await?;

        info!("saved model artifact to {}", path.display());

        Ok(())
    }

    /// Read an artifact back from a file written by `save`.
    ///
    /// Malformed bytes and internally inconsistent artifacts, such as
    /// weights that do not match the embedded featurizer, fail with
    /// [`Error::CorruptArtifact`]; a missing file is an IO error.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;

        let artifact: Self =
            serde_json::from_slice(&bytes).map_err(|e| Error::CorruptArtifact(e.to_string()))?;
        artifact.validate()?;

        info!("loaded model artifact from {}", path.display());

        Ok(artifact)
    }

    fn validate(&self) -> Result<(), Error> {
        let dimension = self.featurizer.dimension();

        if self.linear.dimension() != dimension {
            return Err(Error::CorruptArtifact(format!(
                "featurizer dimension {} does not match weight vector length {}",
                dimension,
                self.linear.dimension(),
            )));
        }

        if self.featurizer.max_index() >= dimension {
            return Err(Error::CorruptArtifact(
                "vocabulary index out of range".to_string(),
            ));
        }

        Ok(())
    }
}

/// Logistic link from a raw score to a probability
pub(crate) fn sigmoid(score: f32) -> f32 {
    1.0 / (1.0 + (-score).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> ModelArtifact {
        let featurizer = Featurizer::fit(&["good food", "bad food"]);
        let linear = LinearModel {
            weights: vec![0.0, 1.0, 0.0, -1.0],
            bias: 0.1,
        };

        ModelArtifact::new(featurizer, linear)
    }

    #[tokio::test]
    async fn round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let original = artifact();
        original.save(&path).await.unwrap();

        let restored = ModelArtifact::load(&path).await.unwrap();

        for text in ["good food", "bad food", "unseen words", ""] {
            assert!((original.score(text) - restored.score(text)).abs() < 1e-6);
        }
    }

    #[tokio::test]
    async fn truncated_bytes_are_a_corrupt_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let bytes = serde_json::to_vec(&artifact()).unwrap();
        tokio::fs::write(&path, &bytes[..bytes.len() / 2])
            .await
            .unwrap();

        let err = ModelArtifact::load(&path).await.unwrap_err();
        assert!(matches!(err, Error::CorruptArtifact(_)));
    }

    #[tokio::test]
    async fn mismatched_dimensions_are_a_corrupt_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let mut broken = artifact();
        broken.linear.weights.pop();
        let bytes = serde_json::to_vec(&broken).unwrap();
        tokio::fs::write(&path, bytes).await.unwrap();

        let err = ModelArtifact::load(&path).await.unwrap_err();
        assert!(matches!(err, Error::CorruptArtifact(_)));
    }

    #[tokio::test]
    async fn a_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = ModelArtifact::load(dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
