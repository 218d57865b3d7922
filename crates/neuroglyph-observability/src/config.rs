// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Logging options

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleFormat {
    #[default]
    Text,
    Json,
}

/// Options for [`crate::init_logging`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingOptions {
    /// Level applied to every target without a debug flag
    pub base_level: String,

    pub console_format: ConsoleFormat,

    /// Base directory for run folders (file logging only)
    pub log_dir: PathBuf,

    /// Keep the N most recent run folders (file logging only)
    pub retention_runs: usize,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            base_level: "info".to_string(),
            console_format: ConsoleFormat::Text,
            log_dir: PathBuf::from("./logs"),
            retention_runs: 10,
        }
    }
}
