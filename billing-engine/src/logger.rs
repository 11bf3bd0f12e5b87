//! Logging Infrastructure
//!
//! Structured logging for development and production:
//! - Console output, pretty in development, JSON in production
//! - Optional daily-rotating application log files (deleted after 14 days)

use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, prelude::*};

/// Application log retention
const LOG_RETENTION_DAYS: i64 = 14;

/// Clean up application log files older than the retention window
///
/// Call this periodically (e.g. daily) to keep the log directory bounded.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<()> {
    use chrono::{Local, TimeZone};

    let cutoff = Local::now() - chrono::Duration::days(LOG_RETENTION_DAYS);

    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(app_log_dir)? {
        let entry = entry?;
        let path = entry.path();

        // Match app.YYYY-MM-DD files emitted by the daily appender
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(date_part) = name.strip_prefix("app.") else {
            continue;
        };
        if let Ok(naive_date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && let Some(file_day) = Local
                .from_local_datetime(&naive_date.and_hms_opt(0, 0, 0).unwrap())
                .single()
            && file_day < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(())
}

/// Initialize the logging system with optional daily rotating file output
///
/// # Arguments
/// * `level` - default log level (overridable via `RUST_LOG`)
/// * `json_format` - JSON output for production, pretty for development
/// * `log_dir` - optional directory for file logging
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_filter(EnvFilter::new(level));

        if let Some(dir) = log_dir {
            let app_log = new_app_appender(dir)?;
            let app_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_writer(std::sync::Mutex::new(app_log));

            tokio::spawn(periodic_cleanup(PathBuf::from(dir)));
            subscriber.with(console_layer).with(app_layer).init();
        } else {
            subscriber.with(console_layer).init();
        }
    } else {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_filter(EnvFilter::new(level));

        if let Some(dir) = log_dir {
            let app_log = new_app_appender(dir)?;
            let app_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(app_log));

            tokio::spawn(periodic_cleanup(PathBuf::from(dir)));
            subscriber.with(console_layer).with(app_layer).init();
        } else {
            subscriber.with(console_layer).init();
        }
    }

    Ok(())
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Create the daily rotating appender under `<dir>/app`
fn new_app_appender(dir: &str) -> anyhow::Result<RollingFileAppender> {
    let app_log_dir = Path::new(dir).join("app");
    fs::create_dir_all(&app_log_dir)?;
    Ok(RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app"))
}

/// Periodic cleanup task - runs hourly to drop logs past retention
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        sleep(Duration::from_secs(3600)).await;

        if let Err(e) = cleanup_old_logs(&log_dir) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_removes_only_expired_logs() {
        let tmp = tempfile::tempdir().unwrap();
        let app_dir = tmp.path().join("app");
        fs::create_dir_all(&app_dir).unwrap();

        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let fresh = app_dir.join(format!("app.{}", today));
        let expired = app_dir.join("app.2020-01-01");
        let unrelated = app_dir.join("notes.txt");
        for path in [&fresh, &expired, &unrelated] {
            fs::write(path, b"x").unwrap();
        }

        cleanup_old_logs(tmp.path()).unwrap();

        assert!(fresh.exists());
        assert!(!expired.exists());
        assert!(unrelated.exists(), "non-log files are left alone");
    }

    #[test]
    fn test_cleanup_on_missing_directory_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        cleanup_old_logs(&tmp.path().join("nope")).unwrap();
    }
}
