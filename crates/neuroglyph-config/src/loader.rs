// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, NeuroglyphConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "neuroglyph.toml";

/// Find the Neuroglyph configuration file
///
/// Search order:
/// 1. `NEUROGLYPH_CONFIG_PATH` environment variable
/// 2. Current working directory: `./neuroglyph.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("NEUROGLYPH_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by NEUROGLYPH_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet NEUROGLYPH_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, the file is searched for.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the file is not found or contains invalid TOML.
/// Validation is a separate step (`validate_config`).
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeuroglyphConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: NeuroglyphConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NEUROGLYPH_SEED` -> `system.seed`
/// - `NEUROGLYPH_LOG_LEVEL` -> `system.log_level`
/// - `NEUROGLYPH_TARGET_COUNT` -> `sampler.target_count`
/// - `NEUROGLYPH_MIN_SPACING` -> `sampler.min_spacing_px`
/// - `NEUROGLYPH_CONNECT_THRESHOLD` -> `connectivity.distance_threshold`
/// - `NEUROGLYPH_DECAY_FACTOR` -> `activation.decay_factor`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut NeuroglyphConfig) {
    let vars: HashMap<String, String> = [
        ("NEUROGLYPH_SEED", "seed"),
        ("NEUROGLYPH_LOG_LEVEL", "log_level"),
        ("NEUROGLYPH_TARGET_COUNT", "target_count"),
        ("NEUROGLYPH_MIN_SPACING", "min_spacing"),
        ("NEUROGLYPH_CONNECT_THRESHOLD", "connect_threshold"),
        ("NEUROGLYPH_DECAY_FACTOR", "decay_factor"),
    ]
    .into_iter()
    .filter_map(|(var, key)| env::var(var).ok().map(|value| (key.to_string(), value)))
    .collect();

    apply_overrides(config, &vars);
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - Map of CLI arguments (e.g., `{"seed": "42", "decay_factor": "0.95"}`)
pub fn apply_cli_overrides(config: &mut NeuroglyphConfig, cli_args: &HashMap<String, String>) {
    apply_overrides(config, cli_args);
}

fn apply_overrides(config: &mut NeuroglyphConfig, values: &HashMap<String, String>) {
    if let Some(value) = values.get("seed") {
        if let Ok(seed) = value.parse::<u64>() {
            config.system.seed = Some(seed);
        }
    }
    if let Some(value) = values.get("log_level") {
        config.system.log_level = value.clone();
    }
    if let Some(value) = values.get("target_count") {
        if let Ok(count) = value.parse::<usize>() {
            config.sampler.target_count = count;
        }
    }
    if let Some(value) = values.get("min_spacing") {
        if let Ok(spacing) = value.parse::<f32>() {
            config.sampler.min_spacing_px = spacing;
        }
    }
    if let Some(value) = values.get("connect_threshold") {
        if let Ok(threshold) = value.parse::<f32>() {
            config.connectivity.distance_threshold = threshold;
        }
    }
    if let Some(value) = values.get("decay_factor") {
        if let Ok(decay) = value.parse::<f32>() {
            config.activation.decay_factor = decay;
        }
    }
}
