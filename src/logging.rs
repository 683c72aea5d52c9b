//! Tracing setup.
//!
//! The client owns the terminal in raw mode, so log lines never go to stdout or
//! stderr. A subscriber is installed only when a log file is configured.

use crate::cmd_args::CommandLineArgs;
use crate::config::{LOG_FILE_ENV_VAR, LOG_LEVEL_ENV_VAR};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber if a log file was requested.
///
/// Returns the path being logged to, if any.
pub fn init(cmd_args: &CommandLineArgs) -> Result<Option<PathBuf>> {
    let Some(path) = log_file_path(cmd_args) else {
        return Ok(None);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file '{}'", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(cmd_args.verbose())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    tracing::info!("Logging to {}", path.display());
    Ok(Some(path))
}

fn log_file_path(cmd_args: &CommandLineArgs) -> Option<PathBuf> {
    cmd_args.log_file().cloned().or_else(|| {
        std::env::var_os(LOG_FILE_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_should_raise_default_level() {
        assert_eq!(default_directive(true), "debug");
        assert_eq!(default_directive(false), "info");
    }

    // Installs the global subscriber, so it is the only test here that calls init
    #[test]
    fn init_should_announce_log_file_once() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().to_string();
        let args = CommandLineArgs::parse_from(["rosterline", "--log-file", path.as_str()]);

        let logged_to = init(&args).unwrap();

        assert_eq!(logged_to.as_deref(), Some(file.path()));
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content.matches("Logging to").count(), 1);
    }

    #[test]
    fn command_line_log_file_should_win() {
        let args = CommandLineArgs::parse_from(["rosterline", "--log-file", "/tmp/a.log"]);
        assert_eq!(log_file_path(&args), Some(PathBuf::from("/tmp/a.log")));
    }
}
