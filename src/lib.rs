pub mod config;
pub mod dataset;
pub mod encoding;
pub mod error;
pub mod evaluation;
pub mod function;
pub mod gbdt;
pub mod handlers;
pub mod metrics;
pub mod pipeline;
pub mod schema;
pub mod server;
pub mod tree;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
