//! Tracing subscriber setup shared by the front-end binaries.

use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::paths::TolkPaths;

/// Initializes logging for a binary.
///
/// - Console (stderr): `RUST_LOG` if set, otherwise `info` (`debug` when
///   `verbose` is true). Command output goes to stdout and stays clean.
/// - File: `info` and above, rolled daily under `~/.config/tolk/logs/`.
///   Skipped silently if the directory cannot be created.
///
/// Keep the returned guard alive for the lifetime of the process; dropping it
/// flushes and stops the background file writer.
pub fn init_logging(app_name: &str, verbose: bool) -> Option<WorkerGuard> {
    let default_level = if verbose { "debug" } else { "info" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let (file_layer, guard) = match file_writer(app_name) {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(LevelFilter::INFO);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    if tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        // A subscriber is already installed (e.g. by a test harness)
        return None;
    }

    guard
}

fn file_writer(
    app_name: &str,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let logs_dir = TolkPaths::logs_dir().ok()?;
    fs::create_dir_all(&logs_dir).ok()?;

    let appender = tracing_appender::rolling::daily(&logs_dir, format!("{app_name}.log"));
    Some(tracing_appender::non_blocking(appender))
}
