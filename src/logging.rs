//! Logging initialisation: a console layer plus a daily-rotating file layer
//! at `ITX_LOG_PATH`, retaining 3 days of rotated files.

use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Map the five `ITX_LOG_LEVEL` values onto a `tracing` filter. `warning` is
/// the one name that doesn't match `tracing`'s own vocabulary (`warn`).
fn level_filter(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warning" | "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "critical" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

/// Install the global subscriber. Returns the file appender's worker guard,
/// which must stay alive for the process lifetime or buffered lines are
/// dropped on exit.
pub fn init(level: &str, log_path: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    let directory = log_path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = directory {
        let _ = std::fs::create_dir_all(dir);
    }
    let file_name = log_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "itx.log".to_string());
    let directory = directory.unwrap_or_else(|| Path::new("."));

    let file_appender = tracing_appender::rolling::daily(directory, &file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_filter(level).to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .try_init();

    prune_rotated_logs(directory, &file_name, 3);

    guard
}

/// `tracing-appender` rotates but never deletes; sweep files older than
/// `retain_days` whose name is derived from `file_name` (the daily rotation
/// suffixes the base name with a date).
fn prune_rotated_logs(directory: &Path, file_name: &str, retain_days: u64) {
    let Ok(entries) = std::fs::read_dir(directory) else {
        return;
    };
    let cutoff = std::time::SystemTime::now()
        .checked_sub(std::time::Duration::from_secs(retain_days * 86_400));
    let Some(cutoff) = cutoff else { return };

    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.starts_with(file_name) || name == file_name {
            continue;
        }
        if let Ok(metadata) = entry.metadata() {
            if let Ok(modified) = metadata.modified() {
                if modified < cutoff {
                    let _ = std::fs::remove_file(entry.path());
                }
            }
        }
    }
}
