//! Logging Infrastructure
//!
//! Structured logging for development and production:
//! - console output, pretty or JSON
//! - daily rotating application logs (deleted after [`LOG_RETENTION_DAYS`])
//! - permanent audit logs for submitted documents (never deleted)

use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, filter::filter_fn, fmt, prelude::*};

/// File name prefix of application logs (`billing.YYYY-MM-DD`)
pub const APP_LOG_PREFIX: &str = "billing";
/// File name prefix of audit logs (`audit.YYYY-MM-DD`)
pub const AUDIT_LOG_PREFIX: &str = "audit";
/// Application logs older than this are removed
pub const LOG_RETENTION_DAYS: i64 = 14;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Remove application log files older than `keep_days`
///
/// Only `app/billing.YYYY-MM-DD` files are considered; audit logs are kept.
/// Returns the number of files deleted.
pub fn cleanup_old_logs(log_dir: &Path, keep_days: i64) -> anyhow::Result<usize> {
    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(keep_days);

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

        if let Some(date_part) = name
            .strip_prefix(APP_LOG_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
            && let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}

fn console_layer(json_format: bool) -> BoxedLayer {
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    }
}

fn file_layer(appender: RollingFileAppender, json_format: bool, audit: bool) -> BoxedLayer {
    let only = filter_fn(move |meta| (meta.target() == "audit") == audit);
    let writer = std::sync::Mutex::new(appender);

    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
            .with_filter(only)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(only)
            .boxed()
    }
}

/// Initialize the logging system with optional daily rotating files
///
/// `RUST_LOG` takes precedence over `level`.
///
/// # Examples
/// ```no_run
/// # use billing_server::init_logger_with_file;
/// // Development setup (console only)
/// init_logger_with_file("debug", false, None)?;
///
/// // Production setup (console + file)
/// init_logger_with_file("info", true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers = vec![console_layer(json_format)];

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_log_dir = log_dir.join("app");
        let audit_log_dir = log_dir.join("audit");
        fs::create_dir_all(&app_log_dir)?;
        fs::create_dir_all(&audit_log_dir)?;

        let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, APP_LOG_PREFIX);
        let audit_log = RollingFileAppender::new(Rotation::DAILY, audit_log_dir, AUDIT_LOG_PREFIX);
        layers.push(file_layer(app_log, json_format, false));
        layers.push(file_layer(audit_log, json_format, true));

        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(periodic_cleanup(log_dir.to_path_buf()));
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

/// Periodic cleanup task - runs every hour to clean old logs
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        if let Err(e) = cleanup_old_logs(&log_dir, LOG_RETENTION_DAYS) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
        sleep(Duration::from_secs(3600)).await;
    }
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Audit log helper - records submitted billing documents
///
/// Audit entries go to `audit/audit.YYYY-MM-DD` and are never cleaned up.
///
/// # Examples
/// ```no_run
/// billing_server::audit_log!("payload", "INV-0042", "grand_total=1230.00");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($action:expr, $document:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            document = %$document,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($action:expr, $document:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            document = %$document,
            details = %$details,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}
