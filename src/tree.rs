use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Limits for a single regression tree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_leaf: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A depth-limited regression tree fit with exact greedy splitting.
///
/// Splits minimize the summed squared error of the two children; candidate
/// thresholds are midpoints between adjacent distinct feature values, so a
/// sample goes left when `value <= threshold`. Fitting is fully
/// deterministic for a given input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    root: Node,
}

impl RegressionTree {
    /// Fit a tree to rows `x` with targets `y`.
    pub fn fit(x: &[Vec<f64>], y: &[f64], params: &TreeParams) -> Self {
        assert_eq!(x.len(), y.len(), "rows and targets must have the same length");
        let indices: Vec<usize> = (0..y.len()).collect();
        Self {
            root: build_node(x, y, &indices, 0, params),
        }
    }

    /// Predict a single encoded row.
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }

    /// Number of leaves, used to sanity-check fitted structure.
    pub fn n_leaves(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Split { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }
}

fn mean(y: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64
}

fn build_node(x: &[Vec<f64>], y: &[f64], indices: &[usize], depth: usize, params: &TreeParams) -> Node {
    let value = mean(y, indices);
    if depth >= params.max_depth || indices.len() < 2 * params.min_samples_leaf {
        return Node::Leaf { value };
    }

    let Some((feature, threshold)) = best_split(x, y, indices, params.min_samples_leaf) else {
        return Node::Leaf { value };
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| x[i][feature] <= threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(build_node(x, y, &left_idx, depth + 1, params)),
        right: Box::new(build_node(x, y, &right_idx, depth + 1, params)),
    }
}

/// Find the (feature, threshold) pair minimizing child SSE, if any split
/// improves on the parent and respects `min_samples_leaf` on both sides.
fn best_split(x: &[Vec<f64>], y: &[f64], indices: &[usize], min_leaf: usize) -> Option<(usize, f64)> {
    let n = indices.len();
    let n_features = x.first().map(|row| row.len()).unwrap_or(0);

    let total_sum: f64 = indices.iter().map(|&i| y[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| y[i] * y[i]).sum();
    let parent_sse = total_sq - total_sum * total_sum / n as f64;

    let mut best: Option<(usize, f64)> = None;
    let mut best_sse = parent_sse - 1e-12;

    let mut order: Vec<usize> = Vec::with_capacity(n);
    for feature in 0..n_features {
        order.clear();
        order.extend_from_slice(indices);
        order.sort_by(|&a, &b| {
            x[a][feature]
                .partial_cmp(&x[b][feature])
                .unwrap_or(Ordering::Equal)
        });

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for k in 1..n {
            let prev = order[k - 1];
            left_sum += y[prev];
            left_sq += y[prev] * y[prev];

            // Only split between strictly distinct values.
            if x[prev][feature] >= x[order[k]][feature] {
                continue;
            }
            if k < min_leaf || n - k < min_leaf {
                continue;
            }

            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / k as f64)
                + (right_sq - right_sum * right_sum / (n - k) as f64);

            if sse < best_sse {
                best_sse = sse;
                let threshold = (x[prev][feature] + x[order[k]][feature]) / 2.0;
                best = Some((feature, threshold));
            }
        }
    }

    best
}
