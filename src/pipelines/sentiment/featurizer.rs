use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Index of the bucket that collects tokens unseen during fitting
const OOV_BUCKET: usize = 0;

/// A bag-of-words featurizer with a vocabulary fixed at fit time.
///
/// Tokenization lowercases the text and splits on any non-alphanumeric
/// character, so punctuation is dropped and non-ASCII words are kept whole.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Featurizer {
    /// Token to vector index; known tokens occupy 1..=len, 0 is reserved
    /// for out-of-vocabulary tokens
    vocabulary: HashMap<String, usize>,
}

impl Featurizer {
    /// Build a vocabulary from training texts.
    ///
    /// Indices follow first occurrence, so fitting the same corpus always
    /// produces the same mapping. Held-out and inference text must not pass
    /// through here.
    pub fn fit<S: AsRef<str>>(texts: &[S]) -> Self {
        let mut vocabulary = HashMap::new();

        for text in texts {
            for token in tokenize(text.as_ref()) {
                let next = vocabulary.len() + 1;
                vocabulary.entry(token).or_insert(next);
            }
        }

        Self { vocabulary }
    }

    /// Turn a text into an L2-normalized count vector.
    ///
    /// Deterministic for a fitted instance: tokens outside the vocabulary
    /// fold into the reserved bucket at index 0, and an empty text yields
    /// the zero vector rather than an error.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut counts = vec![0.0f32; self.dimension()];

        for token in tokenize(text) {
            let index = self.vocabulary.get(&token).copied().unwrap_or(OOV_BUCKET);
            counts[index] += 1.0;
        }

        let norm = counts.iter().map(|c| c * c).sum::<f32>().sqrt();
        if norm > 0.0 {
            for count in &mut counts {
                *count /= norm;
            }
        }

        counts
    }

    /// The length of every vector this featurizer produces
    pub fn dimension(&self) -> usize {
        self.vocabulary.len() + 1
    }

    /// The number of distinct tokens seen at fit time
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// The largest index the vocabulary maps to
    pub(crate) fn max_index(&self) -> usize {
        self.vocabulary.values().copied().max().unwrap_or(0)
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
