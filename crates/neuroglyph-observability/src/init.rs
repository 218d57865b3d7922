// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization for Neuroglyph
//!
//! Console output always; with the `file-logging` feature, JSON files in a
//! timestamped run folder with retention of the most recent runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{ConsoleFormat, LoggingOptions};

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps file writers alive; logs are flushed when this is dropped
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder of this process, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Build the `EnvFilter` for a base level plus per-crate debug flags
pub fn build_env_filter(debug_flags: &CrateDebugFlags, base_level: &str) -> Result<EnvFilter> {
    let filter = debug_flags.to_filter_string_with_base(base_level);
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter: {}", filter))
}

fn console_layer(format: ConsoleFormat, filter: EnvFilter) -> BoxedLayer {
    match format {
        ConsoleFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .with_filter(filter)
            .boxed(),
        ConsoleFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(filter)
            .boxed(),
    }
}

/// Install the global subscriber
///
/// With `file-logging` enabled this creates:
/// ```text
/// ./logs/
///   └── run_20250101_120000/
///       ├── neuroglyph-development.log
///       ├── neuroglyph-activity.log
///       └── neuroglyph.log (combined)
/// ```
///
/// # Errors
///
/// Fails on an invalid level string, an unwritable log directory, or when a
/// global subscriber is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, options: &LoggingOptions) -> Result<LoggingGuard> {
    let env_filter = build_env_filter(debug_flags, &options.base_level)?;
    #[cfg_attr(not(feature = "file-logging"), allow(unused_mut))]
    let mut layers: Vec<BoxedLayer> = vec![console_layer(options.console_format, env_filter)];

    #[cfg(feature = "file-logging")]
    let guard = {
        let (file_layers, file_guards, run_folder) = file_layers(debug_flags, options)?;
        layers.extend(file_layers);
        LoggingGuard {
            _file_guards: file_guards,
            log_dir: Some(run_folder),
        }
    };
    #[cfg(not(feature = "file-logging"))]
    let guard = LoggingGuard { log_dir: None };

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(guard)
}

/// Initialize console logging at `info` with the given debug flags
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, &LoggingOptions::default())
}

#[cfg(feature = "file-logging")]
fn file_layers(
    debug_flags: &CrateDebugFlags,
    options: &LoggingOptions,
) -> Result<(
    Vec<BoxedLayer>,
    Vec<tracing_appender::non_blocking::WorkerGuard>,
    PathBuf,
)> {
    use tracing_appender::rolling;

    let timestamp = Utc::now().format(RUN_TIMESTAMP_FORMAT);
    let run_folder = options.log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    cleanup_old_logs(&options.log_dir, options.retention_runs)?;

    let mut layers = Vec::new();
    let mut guards = Vec::new();

    // One file per crate, each at debug for its own target
    for crate_name in crate::KNOWN_CRATES {
        let appender = rolling::never(&run_folder, format!("{}.log", crate_name));
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);

        let filter = EnvFilter::try_new(format!("off,{}=debug", crate_name))
            .with_context(|| format!("Invalid file filter for {}", crate_name))?;
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(filter)
                .boxed(),
        );
    }

    // Combined file honours the same filter as the console
    let appender = rolling::never(&run_folder, "neuroglyph.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    guards.push(guard);
    layers.push(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(build_env_filter(debug_flags, &options.base_level)?)
            .boxed(),
    );

    Ok((layers, guards, run_folder))
}

fn parse_run_timestamp(dir_name: &str) -> Option<DateTime<Utc>> {
    let timestamp = dir_name.strip_prefix(RUN_PREFIX)?;
    NaiveDateTime::parse_from_str(timestamp, RUN_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Remove all but the `retention_runs` most recent `run_*` folders
///
/// Folders whose name does not parse as a run timestamp are left alone.
/// Returns the number of folders removed.
pub fn cleanup_old_logs(base_log_dir: &Path, retention_runs: usize) -> Result<usize> {
    if !base_log_dir.exists() {
        return Ok(0);
    }

    let mut runs: Vec<(PathBuf, DateTime<Utc>)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)
        .with_context(|| format!("Failed to read log directory: {}", base_log_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(dt) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_run_timestamp)
        {
            runs.push((path, dt));
        }
    }

    if runs.len() <= retention_runs {
        return Ok(0);
    }

    // Oldest first
    runs.sort_by_key(|(_, dt)| *dt);
    let to_remove = runs.len() - retention_runs;

    let mut removed = 0;
    for (path, _) in runs.iter().take(to_remove) {
        match std::fs::remove_dir_all(path) {
            Ok(()) => removed += 1,
            Err(e) => eprintln!(
                "Warning: Failed to remove old log directory {}: {}",
                path.display(),
                e
            ),
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_run_timestamp() {
        assert!(parse_run_timestamp("run_20250101_120000").is_some());
        assert!(parse_run_timestamp("run_garbage").is_none());
        assert!(parse_run_timestamp("20250101_120000").is_none());
    }

    #[test]
    fn test_cleanup_keeps_most_recent_runs() {
        let dir = tempdir().unwrap();
        for name in [
            "run_20250101_000000",
            "run_20250102_000000",
            "run_20250103_000000",
            "run_20250104_000000",
            "not_a_run",
        ] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }

        let removed = cleanup_old_logs(dir.path(), 2).unwrap();

        assert_eq!(removed, 2);
        assert!(!dir.path().join("run_20250101_000000").exists());
        assert!(!dir.path().join("run_20250102_000000").exists());
        assert!(dir.path().join("run_20250103_000000").exists());
        assert!(dir.path().join("run_20250104_000000").exists());
        assert!(dir.path().join("not_a_run").exists());
    }

    #[test]
    fn test_cleanup_missing_dir_is_noop() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert_eq!(cleanup_old_logs(&missing, 1).unwrap(), 0);
    }

    #[test]
    fn test_build_env_filter_rejects_garbage_level() {
        let flags = CrateDebugFlags::default();
        assert!(build_env_filter(&flags, "info").is_ok());
        assert!(build_env_filter(&flags, "neuroglyph=loudest").is_err());
    }
}
