use super::predict::AppState;
use axum::extract::State;

/// Render the Prometheus exposition text.
pub async fn metrics_text(State(state): State<AppState>) -> String {
    state.metrics.render()
}
