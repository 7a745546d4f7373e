use log::info;
use serde::{Deserialize, Serialize};

use crate::models::linear::{SdcaSolver, Solver};

use super::{Error, Featurizer, ModelArtifact, Record};

/// Configuration for a training run, passed by value into each stage
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Share of the dataset held out for evaluation. The default keeps the
    /// observed 0.7, which reserves more data for testing than for
    /// training.
    pub test_fraction: f64,

    /// Maximum number of optimizer passes over the training data
    pub max_iterations: usize,

    /// L2 regularization strength
    pub l2_regularization: f32,

    /// Duality-gap threshold that ends training early
    pub convergence_tolerance: f32,

    /// Seed for the data split and the optimizer's example ordering
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test_fraction: 0.7,
            max_iterations: 100,
            l2_regularization: 0.1,
            convergence_tolerance: 1e-3,
            seed: 42,
        }
    }
}

/// Fit the featurizer and classifier on a set of training records.
///
/// The featurizer vocabulary is built from these records only, so held-out
/// and inference text never influences the feature mapping. Any failure
/// aborts the run before an artifact exists, so nothing partial can be
/// persisted.
pub fn train<R: Record>(records: &[R], config: &Config) -> Result<ModelArtifact, Error> {
    info!("training on {} records", records.len());

    let texts: Vec<&str> = records.iter().map(Record::text).collect();
    let featurizer = Featurizer::fit(&texts);

    let features: Vec<Vec<f32>> = texts.iter().map(|t| featurizer.transform(t)).collect();
    let labels: Vec<bool> = records.iter().map(Record::label).collect();

    let solver = SdcaSolver::new(
        config.max_iterations,
        config.l2_regularization,
        config.convergence_tolerance,
        config.seed,
    );
    let linear = solver.fit(&features, &labels)?;

    info!(
        "training finished: {} features, bias {:.4}",
        featurizer.dimension(),
        linear.bias
    );

    Ok(ModelArtifact::new(featurizer, linear))
}

#[cfg(test)]
mod tests {
    use crate::models::linear::TrainingError;

    use super::*;

    fn labeled(text: &str, label: bool) -> (String, bool) {
        (text.to_string(), label)
    }

    #[test]
    fn learns_the_toy_corpus() {
        let records = vec![labeled("good food", true), labeled("bad food", false)];
        let artifact = train(&records, &Config::default()).unwrap();

        assert!(artifact.score("good food") > 0.0);
        assert!(artifact.score("bad food") < 0.0);
    }

    #[test]
    fn training_is_reproducible() {
        let records = vec![
            labeled("the pizza was amazing", true),
            labeled("i love this spaghetti", true),
            labeled("this was a horrible meal", false),
            labeled("i will not eat here again", false),
        ];
        let config = Config::default();

        let first = train(&records, &config).unwrap();
        let second = train(&records, &config).unwrap();

        assert_eq!(first.linear, second.linear);
    }

    #[test]
    fn a_single_class_fails_before_an_artifact_exists() {
        let records = vec![labeled("good", true), labeled("great", true)];

        let err = train(&records, &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Training(TrainingError::MissingClass)));
    }
}
