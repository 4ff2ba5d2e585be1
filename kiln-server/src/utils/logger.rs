//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments
//! Features:
//! - Console output, pretty or JSON
//! - Daily rotating application logs under `{log_dir}/app`, pruned after the retention window

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Prefix of rotated application log files (`app.YYYY-MM-DD`)
const APP_LOG_PREFIX: &str = "app";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Clean up application log files older than `retention_days`
///
/// Returns the number of files removed
pub fn cleanup_old_logs(log_dir: &Path, retention_days: i64) -> anyhow::Result<usize> {
    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(retention_days);

    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        // Match app.YYYY-MM-DD written by the daily appender
        if let Some(date_part) = name
            .strip_prefix(APP_LOG_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
            && let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            removed += 1;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(removed)
}

/// Initialize the logging system with daily rotating logs
///
/// # Arguments
/// * `level` - Log level or EnvFilter directives (e.g. "info", "kiln_server=debug")
/// * `json_format` - Whether to use JSON format (true for production, false for development)
/// * `log_dir` - Optional directory for file logging
/// * `retention_days` - How long rotated app logs are kept
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
    retention_days: i64,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = Vec::new();

    // Console layer
    if json_format {
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        );
    } else {
        layers.push(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        );
    }

    if let Some(log_dir) = log_dir {
        let app_log_dir = log_dir.join("app");
        fs::create_dir_all(&app_log_dir)?;

        // Daily rotating appender for application logs
        let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, APP_LOG_PREFIX);
        let writer = std::sync::Mutex::new(app_log);

        if json_format {
            layers.push(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_thread_ids(true)
                    .with_writer(writer)
                    .boxed(),
            );
        } else {
            layers.push(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(false)
                    .with_writer(writer)
                    .boxed(),
            );
        }

        // Start cleanup task
        tokio::spawn(periodic_cleanup(log_dir.to_path_buf(), retention_days));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

/// Periodic cleanup task - runs every hour to clean old logs
async fn periodic_cleanup(log_dir: PathBuf, retention_days: i64) {
    use tokio::time::{Duration, sleep};

    loop {
        sleep(Duration::from_secs(3600)).await; // Run every hour

        if let Err(e) = cleanup_old_logs(&log_dir, retention_days) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    }
}
