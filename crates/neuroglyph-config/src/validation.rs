// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! This module checks that configuration values are within the ranges the
//! sampler, mesh generator and simulators can work with. Every violation is
//! collected before failing so a bad file can be fixed in one pass.

use crate::{ConfigError, ConfigResult, NeuroglyphConfig, TriggerConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    OutOfRange {
        field: String,
        value: f64,
        expected: &'static str,
    },
    MustBeNonZero { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange {
                field,
                value,
                expected,
            } => {
                write!(f, "{} = {} is outside valid range {}", field, value, expected)
            }
            Self::MustBeNonZero { field } => {
                write!(f, "{} must be greater than zero", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks sampler, connectivity, activation, morphology and pulse ranges.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation
pub fn validate_config(config: &NeuroglyphConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_system(config, &mut errors);
    validate_sampler(config, &mut errors);
    validate_connectivity(config, &mut errors);
    validate_activation(config, &mut errors);
    validate_morphology(config, &mut errors);
    validate_pulse(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn check_range(
    errors: &mut Vec<ConfigValidationError>,
    field: &str,
    value: f32,
    valid: bool,
    expected: &'static str,
) {
    if !valid || !value.is_finite() {
        errors.push(ConfigValidationError::OutOfRange {
            field: field.to_string(),
            value: value as f64,
            expected,
        });
    }
}

fn check_non_zero(errors: &mut Vec<ConfigValidationError>, field: &str, value: u64) {
    if value == 0 {
        errors.push(ConfigValidationError::MustBeNonZero {
            field: field.to_string(),
        });
    }
}

fn validate_system(config: &NeuroglyphConfig, errors: &mut Vec<ConfigValidationError>) {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.system.log_level.to_lowercase().as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "system.log_level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.system.log_level,
                valid_levels.join(", ")
            ),
        });
    }
}

fn validate_sampler(config: &NeuroglyphConfig, errors: &mut Vec<ConfigValidationError>) {
    let s = &config.sampler;
    check_non_zero(errors, "sampler.target_count", s.target_count as u64);
    check_range(
        errors,
        "sampler.brightness_threshold",
        s.brightness_threshold,
        (0.0..=255.0).contains(&s.brightness_threshold),
        "[0, 255]",
    );
    check_range(
        errors,
        "sampler.min_spacing_px",
        s.min_spacing_px,
        s.min_spacing_px > 0.0,
        "(0, inf)",
    );
    check_range(
        errors,
        "sampler.warp_amplitude",
        s.warp_amplitude,
        s.warp_amplitude >= 0.0,
        "[0, inf)",
    );
    check_range(errors, "sampler.warp_frequency", s.warp_frequency, true, "finite");
    check_range(errors, "sampler.jitter", s.jitter, s.jitter >= 0.0, "[0, inf)");
    check_range(
        errors,
        "sampler.dome_depth",
        s.dome_depth,
        s.dome_depth >= 0.0,
        "[0, inf)",
    );
    check_range(
        errors,
        "sampler.dome_jitter",
        s.dome_jitter,
        s.dome_jitter >= 0.0,
        "[0, inf)",
    );
}

fn validate_connectivity(config: &NeuroglyphConfig, errors: &mut Vec<ConfigValidationError>) {
    let threshold = config.connectivity.distance_threshold;
    check_range(
        errors,
        "connectivity.distance_threshold",
        threshold,
        threshold > 0.0,
        "(0, inf)",
    );
}

fn validate_activation(config: &NeuroglyphConfig, errors: &mut Vec<ConfigValidationError>) {
    let a = &config.activation;
    check_range(
        errors,
        "activation.decay_factor",
        a.decay_factor,
        a.decay_factor > 0.0 && a.decay_factor <= 1.0,
        "(0, 1]",
    );
    check_range(
        errors,
        "activation.edge_decay",
        a.edge_decay,
        a.edge_decay > 0.0 && a.edge_decay <= 1.0,
        "(0, 1]",
    );
    check_range(
        errors,
        "activation.contagion_threshold",
        a.contagion_threshold,
        (0.0..=1.0).contains(&a.contagion_threshold),
        "[0, 1]",
    );
    check_range(
        errors,
        "activation.stimulus_radius",
        a.stimulus_radius,
        a.stimulus_radius >= 0.0,
        "[0, inf)",
    );

    for (index, trigger) in a.triggers.iter().enumerate() {
        let prefix = format!("activation.triggers[{}]", index);
        check_non_zero(errors, &format!("{}.period", prefix), trigger.period());
        match trigger {
            TriggerConfig::FixedRange {
                start_fraction,
                length,
                ..
            } => {
                check_non_zero(errors, &format!("{}.length", prefix), *length as u64);
                check_range(
                    errors,
                    &format!("{}.start_fraction", prefix),
                    *start_fraction,
                    (0.0..=1.0).contains(start_fraction),
                    "[0, 1]",
                );
            }
            TriggerConfig::StridePulse {
                stride, frequency, ..
            } => {
                check_non_zero(errors, &format!("{}.stride", prefix), *stride as u64);
                check_range(errors, &format!("{}.frequency", prefix), *frequency, true, "finite");
            }
            TriggerConfig::RandomRange { length, .. } => {
                check_non_zero(errors, &format!("{}.length", prefix), *length as u64);
            }
            TriggerConfig::StaggeredCascade {
                length,
                stagger_ticks,
                ..
            } => {
                check_non_zero(errors, &format!("{}.length", prefix), *length as u64);
                if (*length as u64).checked_mul(*stagger_ticks).is_none() {
                    errors.push(ConfigValidationError::InvalidValue {
                        field: format!("{}.stagger_ticks", prefix),
                        reason: format!(
                            "cascade span of {} nodes x {} ticks overflows",
                            length, stagger_ticks
                        ),
                    });
                }
            }
        }
    }
}

fn validate_morphology(config: &NeuroglyphConfig, errors: &mut Vec<ConfigValidationError>) {
    let m = &config.morphology;

    if m.soma_lat_bands < 2 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "morphology.soma_lat_bands".to_string(),
            reason: format!("need at least 2 bands, got {}", m.soma_lat_bands),
        });
    }
    if m.soma_long_bands < 3 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "morphology.soma_long_bands".to_string(),
            reason: format!("need at least 3 bands, got {}", m.soma_long_bands),
        });
    }

    for (field, segments) in [
        ("morphology.dendrite_ring_segments", m.dendrite_ring_segments),
        ("morphology.axon_ring_segments", m.axon_ring_segments),
        ("morphology.terminals.ring_segments", m.terminals.ring_segments),
    ] {
        if segments < 3 {
            errors.push(ConfigValidationError::InvalidValue {
                field: field.to_string(),
                reason: format!("a ring needs at least 3 segments, got {}", segments),
            });
        }
    }

    check_range(
        errors,
        "morphology.soma_radius",
        m.soma_radius,
        m.soma_radius > 0.0,
        "(0, inf)",
    );
    check_range(
        errors,
        "morphology.taper",
        m.taper,
        m.taper > 0.0 && m.taper <= 1.0,
        "(0, 1]",
    );
    check_range(
        errors,
        "morphology.dendrite_min_length",
        m.dendrite_min_length,
        m.dendrite_min_length > 0.0,
        "(0, inf)",
    );
    if m.dendrite_max_length < m.dendrite_min_length {
        errors.push(ConfigValidationError::InvalidValue {
            field: "morphology.dendrite_max_length".to_string(),
            reason: format!(
                "{} is below dendrite_min_length {}",
                m.dendrite_max_length, m.dendrite_min_length
            ),
        });
    }
    if m.dendrite_cone_max_deg < m.dendrite_cone_min_deg {
        errors.push(ConfigValidationError::InvalidValue {
            field: "morphology.dendrite_cone_max_deg".to_string(),
            reason: format!(
                "{} is below dendrite_cone_min_deg {}",
                m.dendrite_cone_max_deg, m.dendrite_cone_min_deg
            ),
        });
    }
    check_range(
        errors,
        "morphology.axon_segment_length",
        m.axon_segment_length,
        m.axon_segment_length > 0.0,
        "(0, inf)",
    );
    check_range(
        errors,
        "morphology.terminals.length",
        m.terminals.length,
        m.terminals.length > 0.0,
        "(0, inf)",
    );

    let axis_len_sq: f32 = m.axon_direction.iter().map(|c| c * c).sum();
    if axis_len_sq <= f32::EPSILON || !axis_len_sq.is_finite() {
        errors.push(ConfigValidationError::InvalidValue {
            field: "morphology.axon_direction".to_string(),
            reason: "must be a non-zero vector".to_string(),
        });
    }
    let terminal_len_sq: f32 = m.terminal_direction.iter().map(|c| c * c).sum();
    if terminal_len_sq <= f32::EPSILON || !terminal_len_sq.is_finite() {
        errors.push(ConfigValidationError::InvalidValue {
            field: "morphology.terminal_direction".to_string(),
            reason: "must be a non-zero vector".to_string(),
        });
    }
}

fn validate_pulse(config: &NeuroglyphConfig, errors: &mut Vec<ConfigValidationError>) {
    let p = &config.pulse;
    check_non_zero(errors, "pulse.delay_frames", p.delay_frames);
    check_non_zero(errors, "pulse.half_width", p.half_width as u64);
    check_range(
        errors,
        "pulse.fade_per_frame",
        p.fade_per_frame,
        p.fade_per_frame >= 0.0,
        "[0, inf)",
    );
}
