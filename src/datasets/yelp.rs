use async_trait::async_trait;
use derive_new::new;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::pipelines::sentiment::{self, Record};

use super::LoadableDataset;

/// The name of the Yelp reviews dataset
pub static DATASET: &str = "yelp";

/// The labeled data file within the dataset directory
static DATA_FILE: &str = "yelp_labelled.txt";

/// A labeled review: the raw text and its binary sentiment
#[derive(Clone, Debug, Serialize, Deserialize, new)]
pub struct Item {
    /// The review text
    pub text: String,

    /// True for positive sentiment
    pub label: bool,
}

impl Record for Item {
    fn text(&self) -> &str {
        &self.text
    }

    fn label(&self) -> bool {
        self.label
    }
}

/// Struct for the Yelp reviews dataset
pub struct Dataset {
    records: Vec<Item>,
}

impl Dataset {
    /// Returns a specific record from the dataset
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.records.get(index)
    }

    /// Returns the length of the dataset
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns all records
    pub fn records(&self) -> &[Item] {
        &self.records
    }

    /// Returns random labeled samples from the dataset
    pub fn get_samples(&self, count: usize) -> Vec<Item> {
        if self.records.is_empty() {
            return Vec::new();
        }

        let mut rng = rand::thread_rng();

        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            let i = rng.gen_range(0..self.records.len());
            samples.push(self.records[i].clone());
        }

        samples
    }

    /// Parse tab-separated `text<TAB>label` lines, where the label is `0`
    /// or `1` and no header row is present
    fn parse(bytes: &[u8]) -> Result<Vec<Item>, sentiment::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .from_reader(bytes);

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<(String, u8)>().enumerate() {
            let line = index + 1;

            let (text, label) = row.map_err(|e| {
                sentiment::Error::InvalidInput(format!("malformed record on line {line}: {e}"))
            })?;

            let label = match label {
                0 => false,
                1 => true,
                other => {
                    return Err(sentiment::Error::InvalidInput(format!(
                        "label on line {line} must be 0 or 1, got {other}"
                    )))
                }
            };

            records.push(Item::new(text, label));
        }

        Ok(records)
    }
}

#[async_trait]
impl LoadableDataset for Dataset {
    /// Load the tab-separated data file from `<data_dir>/datasets/yelp/`
    async fn load(data_dir: &str) -> Result<Self, sentiment::Error> {
        let path = format!("{}/datasets/{}/{}", data_dir, DATASET, DATA_FILE);
        let bytes = tokio::fs::read(&path).await?;

        let records = Self::parse(&bytes)?;

        Ok(Self { records })
    }
}
