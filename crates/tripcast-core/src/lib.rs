//! Core types for the Tripcast recommendation engine.
//!
//! Holds the error taxonomy, configuration, and the date-window model shared
//! by the forecast engine and its collaborators.

pub mod config;
pub mod error;
pub mod window;

pub use config::Config;
pub use error::RecommendError;
pub use window::{DateWindow, DayRange, Horizon};

use anyhow::Result;

/// Initialize logging for the application.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Tripcast core initialized");
    Ok(())
}
