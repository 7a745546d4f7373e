use derive_new::new;
use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use super::{LinearModel, Solver, TrainingError};

/// L2-regularized logistic regression fit by stochastic dual coordinate
/// ascent.
///
/// Each epoch shuffles the example order with a seeded RNG and moves every
/// dual variable toward its closed-form optimum with a damped step, keeping
/// the primal weights in sync incrementally. Training stops when the duality
/// gap drops below `convergence_tolerance`, or after `max_iterations`
/// epochs. The bias is carried as an implicit always-1 feature.
#[derive(Clone, Debug, new)]
pub struct SdcaSolver {
    /// Maximum number of passes over the training data
    pub max_iterations: usize,

    /// L2 regularization strength
    pub l2_regularization: f32,

    /// Duality-gap threshold that ends training early
    pub convergence_tolerance: f32,

    /// Seed for the per-epoch example ordering
    pub seed: u64,
}

impl Default for SdcaSolver {
    fn default() -> Self {
        Self::new(100, 0.1, 1e-3, 42)
    }
}

impl Solver for SdcaSolver {
    fn fit(&self, features: &[Vec<f32>], labels: &[bool]) -> Result<LinearModel, TrainingError> {
        let n = features.len();

        if n == 0 {
            return Err(TrainingError::Empty);
        }

        if labels.len() != n {
            return Err(TrainingError::LabelMismatch {
                features: n,
                labels: labels.len(),
            });
        }

        if labels.iter().all(|&l| l) || labels.iter().all(|&l| !l) {
            return Err(TrainingError::MissingClass);
        }

        let dim = features[0].len();
        for (index, vector) in features.iter().enumerate() {
            if vector.len() != dim {
                return Err(TrainingError::DimensionMismatch {
                    index,
                    expected: dim,
                    found: vector.len(),
                });
            }
        }

        let lambda_n = self.l2_regularization * n as f32;
        let scale = 1.0 / lambda_n;

        // Squared norms include the implicit bias feature.
        let norms: Vec<f32> = features
            .iter()
            .map(|x| x.iter().map(|v| v * v).sum::<f32>() + 1.0)
            .collect();

        let mut weights = vec![0.0f32; dim];
        let mut bias = 0.0f32;
        let mut duals = vec![0.0f32; n];

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut order: Vec<usize> = (0..n).collect();

        for epoch in 0..self.max_iterations {
            order.shuffle(&mut rng);

            for &i in &order {
                let x = &features[i];
                let y = if labels[i] { 1.0f32 } else { -1.0 };

                let margin = y * (dot(x, &weights) + bias);

                // The optimal dual for log loss is sigmoid(-margin); the
                // step toward it is damped by the loss's 1/4-smoothness.
                let target = sigmoid(-margin);
                let step = lambda_n / (lambda_n + 0.25 * norms[i]);
                let delta = (step * (target - duals[i])).clamp(-duals[i], 1.0 - duals[i]);

                if delta != 0.0 {
                    duals[i] += delta;

                    let coeff = delta * y * scale;
                    for (w, v) in weights.iter_mut().zip(x) {
                        *w += coeff * v;
                    }
                    bias += coeff;
                }
            }

            let gap = self.duality_gap(features, labels, &weights, bias, &duals);
            debug!("epoch {}: duality gap {:.6}", epoch + 1, gap);

            if gap <= f64::from(self.convergence_tolerance) {
                break;
            }
        }

        Ok(LinearModel { weights, bias })
    }
}

impl SdcaSolver {
    /// Primal objective minus dual objective; non-negative, zero at the
    /// optimum. Valid because the primal weights are kept equal to the dual
    /// combination throughout.
    fn duality_gap(
        &self,
        features: &[Vec<f32>],
        labels: &[bool],
        weights: &[f32],
        bias: f32,
        duals: &[f32],
    ) -> f64 {
        let n = features.len() as f64;
        let lambda = f64::from(self.l2_regularization);

        let norm_sq = weights
            .iter()
            .map(|w| f64::from(*w) * f64::from(*w))
            .sum::<f64>()
            + f64::from(bias) * f64::from(bias);

        let mut loss = 0.0;
        let mut conjugate = 0.0;

        for ((x, &label), &alpha) in features.iter().zip(labels).zip(duals) {
            let y = if label { 1.0f32 } else { -1.0 };
            let margin = f64::from(y * (dot(x, weights) + bias));

            // log(1 + e^-margin), stable for either sign
            loss += (-margin.abs()).exp().ln_1p() + (-margin).max(0.0);
            conjugate += log_loss_conjugate(f64::from(alpha));
        }

        let primal = 0.5 * lambda * norm_sq + loss / n;
        let dual = -0.5 * lambda * norm_sq - conjugate / n;

        primal - dual
    }
}

fn dot(x: &[f32], w: &[f32]) -> f32 {
    x.iter().zip(w).map(|(a, b)| a * b).sum()
}

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

/// Conjugate of the logistic loss at a dual value in [0, 1], with the
/// 0 * ln(0) = 0 convention at the endpoints
fn log_loss_conjugate(alpha: f64) -> f64 {
    let mut sum = 0.0;

    if alpha > 0.0 {
        sum += alpha * alpha.ln();
    }
    if alpha < 1.0 {
        sum += (1.0 - alpha) * (1.0 - alpha).ln();
    }

    sum
}
