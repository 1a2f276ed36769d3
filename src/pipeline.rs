use crate::dataset::Dataset;
use crate::encoding::FeatureEncoder;
use crate::error::AppError;
use crate::evaluation::RegressionReport;
use crate::gbdt::{GbmParams, GradientBoostedTrees};
use crate::schema::FeatureRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Bumped whenever the serialized layout changes; a mismatched artifact is
/// refused at load time instead of being misread.
pub const ARTIFACT_VERSION: u32 = 1;

/// Training provenance stored alongside the fitted stages. Serving ignores
/// it; the train command prints it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub trained_at: DateTime<Utc>,
    pub n_train_rows: usize,
    pub n_test_rows: usize,
    pub evaluation: Option<RegressionReport>,
}

/// The persisted artifact: a fitted encoder and a fitted ensemble, always
/// applied in that order.
///
/// Created once by the train command, then loaded read-only once per
/// process. Never mutated or refit at serving time; a retrained model is
/// deployed by replacing the artifact file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedPipeline {
    version: u32,
    encoder: FeatureEncoder,
    model: GradientBoostedTrees,
    pub info: ArtifactInfo,
}

impl FittedPipeline {
    /// Fit encoder and ensemble jointly on the training subset.
    pub fn fit(train: &Dataset, params: &GbmParams) -> Result<Self, AppError> {
        if train.is_empty() {
            return Err(AppError::DatasetError(
                "cannot fit on an empty training set".to_string(),
            ));
        }

        let encoder = FeatureEncoder::fit(&train.rows);
        let x = encoder.transform_batch(&train.rows);
        let model = GradientBoostedTrees::fit(&x, &train.charges, params);

        Ok(Self {
            version: ARTIFACT_VERSION,
            encoder,
            model,
            info: ArtifactInfo {
                trained_at: Utc::now(),
                n_train_rows: train.len(),
                n_test_rows: 0,
                evaluation: None,
            },
        })
    }

    /// Held-out metrics against a labeled dataset.
    pub fn evaluate(&self, test: &Dataset) -> RegressionReport {
        let predictions = self.predict_batch(&test.rows);
        RegressionReport::from_predictions(&test.charges, &predictions)
    }

    /// Attach held-out metrics to the artifact metadata before persisting.
    pub fn record_evaluation(&mut self, report: RegressionReport, n_test_rows: usize) {
        self.info.evaluation = Some(report);
        self.info.n_test_rows = n_test_rows;
    }

    /// Estimate the charge for one row. Total: unknown categories encode as
    /// zeros and the ensemble output is defined for every encoded vector.
    pub fn predict_row(&self, row: &FeatureRow) -> f64 {
        self.model.predict(&self.encoder.transform(row))
    }

    /// Estimate charges for a batch of rows.
    pub fn predict_batch(&self, rows: &[FeatureRow]) -> Vec<f64> {
        self.model.predict_batch(&self.encoder.transform_batch(rows))
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    /// Persist to a single opaque file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::ArtifactError(format!(
                        "cannot create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        let bytes = bincode::serialize(self)?;
        fs::write(path, bytes).map_err(|e| {
            AppError::ArtifactError(format!("cannot write {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Load a persisted pipeline. Missing or corrupt artifacts are fatal to
    /// the caller; there is no retry.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let bytes = fs::read(path).map_err(|e| {
            AppError::ArtifactError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let pipeline: Self = bincode::deserialize(&bytes)?;
        if pipeline.version != ARTIFACT_VERSION {
            return Err(AppError::ArtifactError(format!(
                "artifact version {} does not match expected {}",
                pipeline.version, ARTIFACT_VERSION
            )));
        }
        Ok(pipeline)
    }
}
