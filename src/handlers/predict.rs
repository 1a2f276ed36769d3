use crate::{error::AppError, metrics, pipeline::FittedPipeline, schema::FeatureRow};
use axum::{extract::State, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Application state
///
/// The pipeline is loaded once at startup and shared read-only across
/// requests; nothing mutates it afterwards, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<FittedPipeline>,
    pub metrics: PrometheusHandle,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_charge: f64,
}

/// Handle POST /predict
///
/// The `Json` extractor rejects a body that is missing any of the six
/// fields or carries a wrong type, with a client error, before this
/// handler body runs; the model is never invoked on an invalid row.
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(row): Json<FeatureRow>,
) -> Result<Json<PredictResponse>, AppError> {
    let start = Instant::now();

    let predicted_charge = state.pipeline.predict_row(&row);
    if !predicted_charge.is_finite() {
        metrics::record_error("http", "non_finite_prediction");
        return Err(AppError::PredictionError(
            "model produced a non-finite estimate".to_string(),
        ));
    }

    metrics::record_prediction("http");
    metrics::record_duration("http", start.elapsed());

    tracing::info!(
        region = %row.region,
        smoker = %row.smoker,
        predicted_charge,
        duration_us = start.elapsed().as_micros() as u64,
        "Served charge prediction"
    );

    Ok(Json(PredictResponse { predicted_charge }))
}
