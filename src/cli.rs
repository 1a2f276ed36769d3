use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "predictor", version, about = "Insurance Charges Predictor")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Train the model and persist the fitted pipeline
    Train,

    /// Serve the trained model over HTTP (default)
    Serve,

    /// Run the function handler against a JSON event file
    Invoke {
        /// Path to the event file
        #[arg(short, long)]
        event: PathBuf,
    },

    /// Show version information
    Version,
}

impl Cli {
    /// Get the command to execute, defaulting to Serve if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
