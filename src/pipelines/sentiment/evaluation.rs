use serde::Serialize;

use super::{model, ModelArtifact, Record};

/// Aggregate quality metrics over a held-out test set
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metrics {
    /// Fraction of correct predictions at the 0.5 threshold
    pub accuracy: f64,

    /// Area under the ROC curve, rank-based with tied scores averaged.
    /// 0.0 when the test set contains a single class, where AUC is
    /// undefined.
    pub auc: f64,

    /// Harmonic mean of precision and recall at the 0.5 threshold
    pub f1: f64,
}

/// Score every record with the artifact's embedded featurizer and
/// classifier and compare against ground truth. An empty test set yields
/// all-zero metrics.
pub fn evaluate<R: Record>(artifact: &ModelArtifact, records: &[R]) -> Metrics {
    if records.is_empty() {
        return Metrics {
            accuracy: 0.0,
            auc: 0.0,
            f1: 0.0,
        };
    }

    let scored: Vec<(f32, bool)> = records
        .iter()
        .map(|r| (model::sigmoid(artifact.score(r.text())), r.label()))
        .collect();

    let mut correct = 0usize;
    let (mut true_pos, mut false_pos, mut false_neg) = (0usize, 0usize, 0usize);

    for &(probability, label) in &scored {
        let predicted = probability > 0.5;

        if predicted == label {
            correct += 1;
        }

        match (predicted, label) {
            (true, true) => true_pos += 1,
            (true, false) => false_pos += 1,
            (false, true) => false_neg += 1,
            (false, false) => {}
        }
    }

    let accuracy = correct as f64 / scored.len() as f64;

    let precision = if true_pos + false_pos > 0 {
        true_pos as f64 / (true_pos + false_pos) as f64
    } else {
        0.0
    };
    let recall = if true_pos + false_neg > 0 {
        true_pos as f64 / (true_pos + false_neg) as f64
    } else {
        0.0
    };
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    Metrics {
        accuracy,
        auc: auc(scored),
        f1,
    }
}

/// Rank-based AUC with average ranks for tied scores
fn auc(mut scored: Vec<(f32, bool)>) -> f64 {
    let positives = scored.iter().filter(|(_, label)| *label).count();
    let negatives = scored.len() - positives;

    if positives == 0 || negatives == 0 {
        return 0.0;
    }

    scored.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut positive_rank_sum = 0.0;
    let mut start = 0;

    while start < scored.len() {
        let mut end = start + 1;
        while end < scored.len() && scored[end].0 == scored[start].0 {
            end += 1;
        }

        // 1-based ranks start+1..=end share their average
        let rank = (start + 1 + end) as f64 / 2.0;
        positive_rank_sum +=
            rank * scored[start..end].iter().filter(|(_, l)| *l).count() as f64;

        start = end;
    }

    let p = positives as f64;
    (positive_rank_sum - p * (p + 1.0) / 2.0) / (p * negatives as f64)
}
