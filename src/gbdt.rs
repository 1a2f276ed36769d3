use crate::tree::{RegressionTree, TreeParams};
use serde::{Deserialize, Serialize};

/// Gradient boosting hyperparameters.
///
/// Defaults match the model this service was trained with: 100 rounds of
/// depth-3 trees with 0.1 shrinkage under squared loss.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GbmParams {
    pub n_estimators: usize,
    pub learning_rate: f64,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
            min_samples_leaf: 1,
        }
    }
}

/// A fitted gradient-boosted ensemble of regression trees.
///
/// Prediction is `base_score + shrinkage * Σ tree(row)`. Fitting uses
/// squared loss, so each round fits a tree to the current residuals; the
/// whole procedure is deterministic for a given input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoostedTrees {
    base_score: f64,
    shrinkage: f64,
    trees: Vec<RegressionTree>,
}

impl GradientBoostedTrees {
    /// Fit the ensemble to encoded rows `x` with targets `y`.
    pub fn fit(x: &[Vec<f64>], y: &[f64], params: &GbmParams) -> Self {
        assert_eq!(x.len(), y.len(), "rows and targets must have the same length");

        if y.is_empty() {
            return Self {
                base_score: 0.0,
                shrinkage: params.learning_rate,
                trees: Vec::new(),
            };
        }

        let base_score = y.iter().sum::<f64>() / y.len() as f64;
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_leaf: params.min_samples_leaf,
        };

        let mut current = vec![base_score; y.len()];
        let mut trees = Vec::with_capacity(params.n_estimators);

        for _ in 0..params.n_estimators {
            let residuals: Vec<f64> = y
                .iter()
                .zip(current.iter())
                .map(|(target, pred)| target - pred)
                .collect();

            let tree = RegressionTree::fit(x, &residuals, &tree_params);
            for (pred, row) in current.iter_mut().zip(x.iter()) {
                *pred += params.learning_rate * tree.predict(row);
            }
            trees.push(tree);
        }

        Self {
            base_score,
            shrinkage: params.learning_rate,
            trees,
        }
    }

    /// Predict a single encoded row.
    pub fn predict(&self, row: &[f64]) -> f64 {
        self.trees
            .iter()
            .fold(self.base_score, |acc, tree| acc + self.shrinkage * tree.predict(row))
    }

    /// Predict a batch of encoded rows.
    pub fn predict_batch(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.iter().map(|row| self.predict(row)).collect()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
