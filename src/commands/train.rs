use anyhow::Result;
use colored::Colorize;
use insurance_predictor::{
    config::Config,
    dataset::Dataset,
    gbdt::GbmParams,
    pipeline::FittedPipeline,
};
use tracing::info;

/// Execute the train command
///
/// This will:
/// 1. Load the labeled CSV dataset
/// 2. Split it with the configured ratio and seed
/// 3. Fit encoder and ensemble on the training subset only
/// 4. Evaluate on the held-out subset
/// 5. Persist the fitted pipeline as a single artifact
pub fn execute(cfg: &Config) -> Result<()> {
    println!("{}", "Training insurance charges model...".yellow());

    info!(
        data = %cfg.training.data_path.display(),
        "Loading training data"
    );
    let dataset = Dataset::from_csv_path(&cfg.training.data_path)?;

    let (train, test) = dataset.train_test_split(cfg.training.test_ratio, cfg.training.seed);
    info!(
        total_rows = dataset.len(),
        train_rows = train.len(),
        test_rows = test.len(),
        seed = cfg.training.seed,
        "Split dataset"
    );

    let params = GbmParams::from(&cfg.training);
    let mut pipeline = FittedPipeline::fit(&train, &params)?;

    let report = pipeline.evaluate(&test);
    pipeline.record_evaluation(report, test.len());
    info!(
        r_squared = report.r_squared,
        rmse = report.rmse,
        "Evaluated on held-out subset"
    );

    pipeline.save(&cfg.model.artifact_path)?;

    println!("{}", "✓ Training complete".green());
    println!();
    println!("{}", "Held-out evaluation:".bold());
    println!("  {}: {:.3}", "R²".cyan(), report.r_squared);
    println!("  {}: {:.2}", "RMSE".cyan(), report.rmse);
    println!();
    println!(
        "  {}: {} train / {} test rows",
        "Split".cyan(),
        train.len(),
        test.len()
    );
    println!(
        "  {}: {}",
        "Artifact".cyan(),
        cfg.model.artifact_path.display()
    );

    Ok(())
}
