use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "movie-admin.log";

// RUST_LOG overrides these
const TUI_FILTER: &str = "movie_admin=info";
const HEADLESS_FILTER: &str = "movie_admin=warn";

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log into `dir` while the terminal belongs to the UI.
///
/// Keep the guard alive until exit or buffered lines are lost.
pub fn init_file(dir: &Path) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter(TUI_FILTER))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

/// Log to stderr so stdout stays clean for command output.
pub fn init_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(filter(HEADLESS_FILTER))
        .with_writer(std::io::stderr)
        .init();
}
