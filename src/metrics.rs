use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the Prometheus metrics exporter for this process.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();

    let handle = builder
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    init_metric_descriptions();

    handle
}

/// Build a handle without installing the global recorder. The returned
/// handle renders only metrics recorded through its own recorder, which is
/// what router tests want.
pub fn unregistered_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "predictions_total",
        "Total number of charge predictions served"
    );
    describe_histogram!(
        "prediction_duration_seconds",
        "Prediction request duration in seconds"
    );
    describe_counter!(
        "prediction_errors_total",
        "Total number of failed prediction requests"
    );
    describe_gauge!("predictor_info", "Predictor version information");

    gauge!("predictor_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a served prediction
pub fn record_prediction(adapter: &str) {
    counter!("predictions_total", "adapter" => adapter.to_string()).increment(1);
}

/// Record prediction duration
pub fn record_duration(adapter: &str, duration: Duration) {
    histogram!(
        "prediction_duration_seconds",
        "adapter" => adapter.to_string(),
    )
    .record(duration.as_secs_f64());
}

/// Record a failed prediction
pub fn record_error(adapter: &str, error_type: &str) {
    counter!(
        "prediction_errors_total",
        "adapter" => adapter.to_string(),
        "error_type" => error_type.to_string(),
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_metrics() {
        init_metric_descriptions();

        record_prediction("http");
        record_duration("http", Duration::from_millis(3));
        record_error("function", "malformed_body");

        // Just verify the recording macros don't panic without a recorder.
    }
}
