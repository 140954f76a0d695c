//! Simple tracing subscriber setup used by the runner.
//!
//! Logs go to stderr so stdout only carries the leaderboard.

use std::{env, sync::OnceLock};

use tracing_appender::{
    non_blocking,
    non_blocking::NonBlocking,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{fmt, time::ChronoLocal, writer::MakeWriterExt},
};

/// Guard to ensure buffered logs are flushed on shutdown.
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(false)
        .with_level(true);

    let file_writer = env::var("LOG_DIR").ok().map(init_file_writer);

    match file_writer {
        Some(Ok(file_writer)) => {
            let stderr = std::io::stderr.with_max_level(tracing::Level::INFO);
            builder.with_writer(stderr.and(file_writer)).init();
        }
        Some(Err(e)) => {
            builder.with_writer(std::io::stderr).init();
            tracing::warn!("file logging disabled: {}", e);
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    tracing::debug!("logger initialized");
}

fn init_file_writer(dir: String) -> Result<NonBlocking, InitError> {
    let max_files = env::var("LOG_MAX_FILES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());

    let mut file_builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("finals-leaderboard.log");

    if let Some(n) = max_files {
        file_builder = file_builder.max_log_files(n);
    }

    let file_appender = file_builder.build(&dir)?;

    let (file_writer, guard) = non_blocking(file_appender);

    // init runs once, a second guard would only be dropped
    let _ = LOG_GUARD.set(guard);

    Ok(file_writer)
}
