//! Logging setup

use tracing::subscriber::SetGlobalDefaultError;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging at INFO
pub fn init_logging() -> Result<(), SetGlobalDefaultError> {
    init_logging_with_level(Level::INFO)
}

/// Initialize logging at `level`; fails if a global subscriber is already set
pub fn init_logging_with_level(level: Level) -> Result<(), SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
