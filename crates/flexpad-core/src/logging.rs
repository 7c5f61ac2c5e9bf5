//! Process-wide diagnostic log.
//!
//! All crates log through `tracing`. The subscriber installed here appends
//! timestamped lines to a single file (no rotation, no read-back) through a
//! non-blocking writer. The returned guard must stay alive until exit or
//! buffered lines are lost.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "FLEXPAD_LOG";

/// Installs the global file subscriber.
///
/// `default_filter` is used when `FLEXPAD_LOG` is unset.
///
/// # Errors
/// Returns an error if the log directory cannot be created, the file cannot be
/// opened, the filter does not parse, or a subscriber is already installed.
pub fn init(log_file: &Path, default_filter: &str) -> Result<WorkerGuard> {
    let (dir, file_name) = split_log_path(log_file)?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(&dir)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("Invalid log filter '{default_filter}'"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))?;

    Ok(guard)
}

/// Splits a log path into its directory and file name.
///
/// A bare file name resolves against the current directory.
fn split_log_path(log_file: &Path) -> Result<(PathBuf, OsString)> {
    let file_name = log_file
        .file_name()
        .with_context(|| format!("Log path {} has no file name", log_file.display()))?
        .to_os_string();
    let dir = log_file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok((dir, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_absolute_path() {
        let (dir, name) = split_log_path(Path::new("/tmp/logs/flexpad.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/logs"));
        assert_eq!(name, OsString::from("flexpad.log"));
    }

    #[test]
    fn split_bare_file_name_uses_current_dir() {
        let (dir, name) = split_log_path(Path::new("flexpad.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, OsString::from("flexpad.log"));
    }

    #[test]
    fn split_rejects_path_without_file_name() {
        assert!(split_log_path(Path::new("/")).is_err());
    }
}
