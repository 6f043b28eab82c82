//! Telemetry and logging initialization.
//!
//! Logs go to stderr (or a file) so stdout stays clean for hex output.

use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

// The non-blocking writer flushes on drop; keep the guard for the whole run.
static LOG_GUARD: Mutex<Option<tracing_appender::non_blocking::WorkerGuard>> = Mutex::new(None);

/// Initialize telemetry according to the logging configuration.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    match &config.file {
        Some(path) => init_telemetry_with_file(&config.level, path),
        None => init_telemetry(&config.level, config.json),
    }
}

/// Initialize stderr logging.
pub fn init_telemetry(log_level: &str, json_format: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(log_level)?;

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}

/// Initialize telemetry with file output.
pub fn init_telemetry_with_file(log_level: &str, log_file: &std::path::Path) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(log_level)?;

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()?;

    if let Ok(mut g) = LOG_GUARD.lock() {
        *g = Some(guard);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_filter() {
        assert!(init_telemetry("headerproof=notalevel", false).is_err());
    }

    // The only test in this binary that installs a global subscriber.
    #[test]
    fn test_file_logging_writes_events() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("headerproof.log");
        let config = LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: Some(path.clone()),
        };
        init(&config).unwrap();

        tracing::info!("file logging ready");
        tracing::debug!("filtered out");
        // dropping the guard flushes the background writer
        LOG_GUARD.lock().unwrap().take();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("file logging ready"));
        assert!(!contents.contains("filtered out"));

        assert!(init_telemetry("info", false).is_err());
    }
}
