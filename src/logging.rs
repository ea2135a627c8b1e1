//! Logging configuration for reviewscope
//!
//! Console output goes to stderr so analysis JSON on stdout stays clean.

use std::path::Path;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::AppConfig;
use crate::Result;

/// Initialize logging with configuration
pub fn init_logging_with_config(config: Option<&AppConfig>) -> Result<()> {
    // Set up environment filter - use config if available, otherwise default
    let env_filter = if let Some(config) = config {
        let level = config.log_level();
        EnvFilter::new(format!("{level},reviewscope={level}"))
    } else {
        // Fallback to environment variable or default
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,reviewscope=info"))
    };

    let file_directory = config
        .filter(|config| config.file_logging_enabled())
        .map(|config| config.logging.directory.as_str());

    init_registry(env_filter, file_directory)?;

    if let Some(config) = config {
        if config.logging.backtrace {
            std::env::set_var("RUST_BACKTRACE", "1");
        }
        tracing::debug!("Logging initialized with level: {}", config.log_level());
    }

    Ok(())
}

/// Initialize console logging with a custom log level
pub fn init_logging_with_level(level: &str) -> Result<()> {
    init_registry(EnvFilter::new(format!("{level},reviewscope={level}")), None)?;
    tracing::debug!("Logging initialized with level: {}", level);
    Ok(())
}

/// Initialize simple logging for testing
pub fn init_simple_logging() -> Result<()> {
    // A subscriber may already be installed by another test
    tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
    Ok(())
}

fn init_registry(env_filter: EnvFilter, file_directory: Option<&str>) -> Result<()> {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    // Set up file layer when requested
    let file_layer = match file_directory {
        Some(directory) => {
            let logs_dir = Path::new(directory);
            if !logs_dir.exists() {
                std::fs::create_dir_all(logs_dir)?;
            }

            let file_appender = tracing_appender::rolling::daily(logs_dir, "reviewscope.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            // Keep the writer alive for the life of the process
            std::mem::forget(guard);

            Some(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .boxed(),
            )
        }
        None => None,
    };

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(directory) = file_directory {
        tracing::info!("Log files will be saved to: {directory}/reviewscope.log.YYYY-MM-DD");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_logging_can_be_called_twice() {
        assert!(init_simple_logging().is_ok());
        assert!(init_simple_logging().is_ok());
    }
}
