//! Held-out accuracy metrics for the trained regressor.

use serde::{Deserialize, Serialize};

/// Mean squared error: mean((y_true - y_pred)^2).
pub fn mse(y_true: &[f64], y_pred: &[f64]) -> f64 {
    assert_eq!(y_true.len(), y_pred.len(), "arrays must have the same length");
    if y_true.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).powi(2))
        .sum();
    sum_sq / y_true.len() as f64
}

/// Root mean squared error, in the same units as the target.
pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> f64 {
    mse(y_true, y_pred).sqrt()
}

/// Coefficient of determination: 1 - SS_res / SS_tot.
///
/// Can be negative if the model is arbitrarily worse than predicting the
/// mean. If all true values are identical, returns 1.0 for a perfect fit
/// and 0.0 otherwise.
pub fn r_squared(y_true: &[f64], y_pred: &[f64]) -> f64 {
    assert_eq!(y_true.len(), y_pred.len(), "arrays must have the same length");
    if y_true.is_empty() {
        return 0.0;
    }

    let mean_true: f64 = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|&t| (t - mean_true).powi(2)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }

    1.0 - ss_res / ss_tot
}

/// Both held-out metrics at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionReport {
    pub r_squared: f64,
    pub rmse: f64,
}

impl RegressionReport {
    pub fn from_predictions(y_true: &[f64], y_pred: &[f64]) -> Self {
        Self {
            r_squared: r_squared(y_true, y_pred),
            rmse: rmse(y_true, y_pred),
        }
    }
}
