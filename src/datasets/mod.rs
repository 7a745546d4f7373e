use std::fmt::Display;

use async_trait::async_trait;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::pipelines::sentiment;

/// The Yelp reviews dataset
pub mod yelp;

/// A dataset which can be loaded from a data directory
#[async_trait]
pub trait LoadableDataset: Sized {
    /// Load the dataset
    async fn load(data_dir: &str) -> Result<Self, sentiment::Error>;
}

/// The Dataset enum
pub enum Dataset {
    /// Yelp reviews dataset
    Yelp,
}

impl TryFrom<&str> for Dataset {
    type Error = DatasetError;

    /// Try to convert a string to a Dataset
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.to_lowercase() == yelp::DATASET {
            Ok(Dataset::Yelp)
        } else {
            Err(Self::Error::Unknown(value.to_string()))
        }
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dataset::Yelp => yelp::DATASET,
        };

        write!(f, "{}", name)
    }
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// No dataset found for the given string
    #[error("no dataset found for {0}")]
    Unknown(String),
}

/// Partition records into disjoint test and train subsets.
///
/// A seeded shuffle followed by a cut, so a fixed seed always produces the
/// same partition. `test_fraction` is the share held out as the test
/// subset; together the two subsets cover every record exactly once.
pub fn train_test_split<T: Clone>(
    records: &[T],
    test_fraction: f64,
    seed: u64,
) -> (Vec<T>, Vec<T>) {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = ((records.len() as f64 * test_fraction).round() as usize).min(records.len());
    let (test_indices, train_indices) = indices.split_at(test_len);

    let train = train_indices.iter().map(|&i| records[i].clone()).collect();
    let test = test_indices.iter().map(|&i| records[i].clone()).collect();

    (train, test)
}
