//! Subscriber bootstrap for hosts. Library code only emits `tracing` events.

use crate::error::{DumpscopeError, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone)]
pub struct LogOptions {
    /// File prefix, e.g. `cli` gives `cli.log.2026-10-17`
    pub component: String,
    pub dir: PathBuf,
    /// Mirror events to stderr with colours
    pub to_stderr: bool,
    /// Filter used when `RUST_LOG` is unset
    pub default_level: String,
}

impl LogOptions {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            dir: default_log_dir(),
            to_stderr: false,
            default_level: "info".to_string(),
        }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Stderr output at `debug` level, for `--verbose`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.to_stderr = true;
            self.default_level = "debug".to_string();
        }
        self
    }
}

/// `$HOME/.dumpscope/logs`, or `./.dumpscope/logs` without a home directory.
pub fn default_log_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dumpscope")
        .join("logs")
}

/// Installs the global subscriber: a daily rolling file plus optional stderr.
///
/// Keep the returned guard alive until exit or buffered lines are lost. Fails
/// if the directory cannot be created or a subscriber is already installed.
pub fn init_logging(options: &LogOptions) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&options.dir)?;

    let appender = tracing_appender::rolling::daily(&options.dir, &options.component);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.default_level));

    let stderr_layer = options
        .to_stderr
        .then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(stderr_layer)
        .try_init()
        .map_err(|e| DumpscopeError::Internal(format!("logging already initialised: {}", e)))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_switches_to_stderr_and_debug() {
        let options = LogOptions::new("cli").verbose(true);
        assert!(options.to_stderr);
        assert_eq!(options.default_level, "debug");

        let quiet = LogOptions::new("cli").verbose(false);
        assert!(!quiet.to_stderr);
        assert_eq!(quiet.default_level, "info");
    }

    #[test]
    fn default_dir_ends_in_dumpscope_logs() {
        assert!(default_log_dir().ends_with(".dumpscope/logs"));
    }

    #[test]
    fn installs_once_into_the_given_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested/logs");
        let options = LogOptions::new("test").with_dir(&dir);

        let guard = init_logging(&options).unwrap();
        assert!(dir.is_dir());
        tracing::info!("logging initialised for test");

        assert!(matches!(init_logging(&options), Err(DumpscopeError::Internal(_))));
        drop(guard);
    }
}
