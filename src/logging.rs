//! Tracing setup for the binary.
//!
//! The terminal belongs to the TUI, so logs only go to a daily rolling file
//! under [`AppDirs::log_dir`]. Filter with `RUST_LOG`, e.g.
//! `RUST_LOG=typecaret::session=debug`.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app_dirs::AppDirs;

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered lines get flushed; `None` means file logging is unavailable.
pub fn init() -> Option<WorkerGuard> {
    let log_dir = AppDirs::log_dir()?;
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: could not create log dir {}: {}", log_dir.display(), e);
        return None;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let appender = tracing_appender::rolling::daily(log_dir, "typecaret.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .ok()?;

    Some(guard)
}
