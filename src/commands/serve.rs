use anyhow::Result;
use colored::Colorize;
use insurance_predictor::{config::Config, pipeline::FittedPipeline, server};
use tracing::info;

/// Execute the serve command
///
/// Loads the persisted pipeline once; a missing or corrupt artifact is
/// fatal here, before the listener binds. The server then shares the
/// loaded model read-only across all requests.
pub async fn execute(cfg: &Config) -> Result<()> {
    println!("{}", "Starting prediction server...".green());

    let pipeline = FittedPipeline::load(&cfg.model.artifact_path).map_err(|e| {
        anyhow::anyhow!(
            "{} (run `predictor train` to produce {})",
            e,
            cfg.model.artifact_path.display()
        )
    })?;

    info!(
        artifact = %cfg.model.artifact_path.display(),
        "Loaded fitted pipeline"
    );

    server::start_server(cfg, pipeline).await
}
