// file: src/logging/logger.rs
// version: 1.0.0
// guid: a93c61e5-4f27-4d80-b5c9-72e8f0a4d616

//! Logger initialization and configuration

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{NetConfigError, Result};

/// Initialize the logging system.
///
/// All diagnostics go to stderr; the `--debug` flag raises the level
/// so the emitters narrate what they write.
pub fn init_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| NetConfigError::LoggerInit(e.to_string()))?;

    Ok(())
}
