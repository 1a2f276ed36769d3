use anyhow::{Context, Result};
use insurance_predictor::{
    config::Config,
    function::{self, FunctionEvent},
    pipeline::FittedPipeline,
};
use std::fs;
use std::path::Path;

/// Execute the invoke command
///
/// Local harness for the function adapter: loads the artifact, reads one
/// event from a JSON file, and prints the status-coded response envelope.
pub fn execute(cfg: &Config, event_path: &Path) -> Result<()> {
    let pipeline = FittedPipeline::load(&cfg.model.artifact_path)?;

    let raw = fs::read_to_string(event_path)
        .with_context(|| format!("cannot read event file {}", event_path.display()))?;
    let event: FunctionEvent = serde_json::from_str(&raw)
        .with_context(|| format!("event file {} is not valid JSON", event_path.display()))?;

    let response = function::handle(&event, &pipeline);
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
