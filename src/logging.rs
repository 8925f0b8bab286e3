// Logging setup plus the conditional macros used on the interactive paths.
// The macros compile away in release builds.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

const LOG_FILE_NAME: &str = "wordle-levels.log";

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Where the log file goes, e.g. `~/.local/share/wordle-levels/wordle-levels.log`.
#[must_use]
pub fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("wordle-levels").join(LOG_FILE_NAME))
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Send log output to the log file. The terminal belongs to the game, so
/// nothing is written to stdout or stderr.
///
/// `RUST_LOG` overrides the default level. Returns the log file path, or
/// `None` when the platform has no data directory.
///
/// # Errors
/// Fails if the log file can't be created or a logger is already installed.
pub fn init_logging(verbose: bool) -> Result<Option<PathBuf>> {
    let Some(path) = log_file_path() else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory '{}'", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file '{}'", path.display()))?;

    let env = env_logger::Env::default().default_filter_or(default_filter(verbose));
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .context("logger already initialized")?;

    Ok(Some(path))
}
