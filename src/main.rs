use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use insurance_predictor::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    // Initialize tracing/logging
    init_tracing();

    // Load configuration (missing file falls back to defaults)
    let cfg = config::load_config(&args.config)?;

    // Dispatch to appropriate command handler
    match args.get_command() {
        cli::Commands::Train => {
            commands::train::execute(&cfg)?;
        }
        cli::Commands::Serve => {
            commands::serve::execute(&cfg).await?;
        }
        cli::Commands::Invoke { event } => {
            commands::invoke::execute(&cfg, &event)?;
        }
        cli::Commands::Version => {
            println!("Insurance Charges Predictor v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
