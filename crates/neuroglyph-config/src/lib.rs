// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Neuroglyph Configuration System
//!
//! Type-safe configuration loader for the neuron field generator with support for:
//! - TOML file parsing
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neuroglyph_config::{load_config, validate_config};
//!
//! let config = load_config(None, None).expect("Failed to load config");
//! validate_config(&config).expect("Invalid config");
//!
//! println!("Target neurons: {}", config.sampler.target_count);
//! println!("Decay factor: {}", config.activation.decay_factor);
//! ```
//!
//! Every numeric knob of the sampler, mesh generator, connectivity builder and
//! simulators lives here, so the algorithm crates never hardcode scene values.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;

pub mod types;
pub mod validation;

pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_config};

pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Re-export for convenience
pub use serde;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_types_compile() {
        let _config = NeuroglyphConfig::default();
    }

    #[test]
    fn test_default_config_roundtrips_through_toml() {
        let config = NeuroglyphConfig::default();
        let text = toml::to_string(&config).expect("serialize");
        let parsed: NeuroglyphConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed.activation.triggers.len(), config.activation.triggers.len());
        assert_eq!(parsed.sampler.target_count, config.sampler.target_count);
    }
}
