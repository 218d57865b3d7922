// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `neuroglyph.toml`.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuroglyphConfig {
    pub system: SystemConfig,
    pub sampler: SamplerConfig,
    pub connectivity: ConnectivityConfig,
    pub activation: ActivationConfig,
    pub morphology: MorphologyConfig,
    pub pulse: PulseConfig,
    pub logging: LoggingConfig,
}

impl NeuroglyphConfig {
    /// Flat 2-D brain-mask scene: tighter connect radius, faster decay.
    pub fn planar_scene() -> Self {
        Self {
            sampler: SamplerConfig {
                mode: SamplingMode::Planar,
                ..SamplerConfig::default()
            },
            connectivity: ConnectivityConfig {
                distance_threshold: 0.13,
                ..ConnectivityConfig::default()
            },
            activation: ActivationConfig {
                decay_factor: 0.95,
                ..ActivationConfig::default()
            },
            ..Self::default()
        }
    }
}

/// System-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: String,
    /// Seed for every random source; `None` draws from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed: None,
        }
    }
}

/// How the sampler lifts mask pixels into space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// 2 floats per point, warped and jittered in the image plane
    Planar,
    /// 3 floats per point on a hemispherical dome over the unit disk
    Dome,
}

/// Mask sampler (neuron placement) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub mode: SamplingMode,
    /// Pixels with mean(R,G,B) strictly above this are candidates (0-255)
    pub brightness_threshold: f32,
    /// Upper bound on accepted points
    pub target_count: usize,
    /// Minimum spacing between accepted points, in pixels
    pub min_spacing_px: f32,
    pub warp_amplitude: f32,
    pub warp_frequency: f32,
    /// Full width of the uniform x/y jitter
    pub jitter: f32,
    /// Dome height multiplier
    pub dome_depth: f32,
    /// Full width of the uniform z jitter in dome mode
    pub dome_jitter: f32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            mode: SamplingMode::Dome,
            brightness_threshold: 80.0,
            target_count: 1100,
            min_spacing_px: 6.0,
            warp_amplitude: 0.015,
            warp_frequency: 10.0,
            jitter: 0.01,
            dome_depth: 0.5,
            dome_jitter: 0.03,
        }
    }
}

/// Strategy used to find neuron pairs within the connect radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityStrategy {
    /// O(n²) pairwise scan
    Exhaustive,
    /// Uniform hash grid with cell side equal to the threshold
    UniformGrid,
}

/// Connectivity (synaptogenesis) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    /// Pairs strictly closer than this are connected
    pub distance_threshold: f32,
    pub strategy: ConnectivityStrategy,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 0.4,
            strategy: ConnectivityStrategy::Exhaustive,
        }
    }
}

/// A periodic activation rule, evaluated when `tick % period == 0`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerConfig {
    /// Force `length` nodes starting at `floor(start_fraction * count)` to 1.0
    FixedRange {
        period: u64,
        start_fraction: f32,
        length: usize,
    },
    /// Overwrite every `stride`-th node with `|sin(tick * frequency)|`
    StridePulse { period: u64, stride: usize, frequency: f32 },
    /// Force `length` nodes from a random start in `[0, count - margin)`
    RandomRange { period: u64, length: usize, margin: usize },
    /// Schedule `length` nodes from a random start, node k landing
    /// `1 + k * stagger_ticks` ticks later
    StaggeredCascade {
        period: u64,
        length: usize,
        margin: usize,
        stagger_ticks: u64,
    },
}

impl TriggerConfig {
    pub fn period(&self) -> u64 {
        match self {
            TriggerConfig::FixedRange { period, .. }
            | TriggerConfig::StridePulse { period, .. }
            | TriggerConfig::RandomRange { period, .. }
            | TriggerConfig::StaggeredCascade { period, .. } => *period,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TriggerConfig::FixedRange { .. } => "fixed_range",
            TriggerConfig::StridePulse { .. } => "stride_pulse",
            TriggerConfig::RandomRange { .. } => "random_range",
            TriggerConfig::StaggeredCascade { .. } => "staggered_cascade",
        }
    }

    /// The five rules of the reference brain scene
    pub fn default_schedule() -> Vec<TriggerConfig> {
        vec![
            TriggerConfig::FixedRange {
                period: 100,
                start_fraction: 0.2,
                length: 12,
            },
            TriggerConfig::FixedRange {
                period: 180,
                start_fraction: 0.7,
                length: 8,
            },
            TriggerConfig::StridePulse {
                period: 60,
                stride: 25,
                frequency: 0.02,
            },
            TriggerConfig::RandomRange {
                period: 200,
                length: 15,
                margin: 20,
            },
            TriggerConfig::StaggeredCascade {
                period: 140,
                length: 40,
                margin: 40,
                stagger_ticks: 1,
            },
        ]
    }
}

/// Activation / contagion simulator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Per-tick multiplicative node decay
    pub decay_factor: f32,
    /// Per-tick multiplicative decay of inactive edges
    pub edge_decay: f32,
    /// Endpoint activity above which an edge forces both endpoints to 1.0
    pub contagion_threshold: f32,
    /// Radius around an external stimulus point
    pub stimulus_radius: f32,
    pub triggers: Vec<TriggerConfig>,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            decay_factor: 0.96,
            edge_decay: 0.9,
            contagion_threshold: 0.8,
            stimulus_radius: 0.1,
            triggers: TriggerConfig::default_schedule(),
        }
    }
}

/// Parameters of one family of recursive branch trees
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BranchTreeConfig {
    pub count: usize,
    pub depth: u32,
    pub length: f32,
    pub radius: f32,
    pub ring_segments: u32,
    /// Maximum perturbation of the root direction, in degrees
    pub root_max_angle_deg: f32,
}

/// Neuron mesh (morphology) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MorphologyConfig {
    pub soma_radius: f32,
    pub soma_lat_bands: u32,
    pub soma_long_bands: u32,

    pub dendrite_count: usize,
    /// Base dendrite depth; each dendrite randomly loses 0 or 1 level
    pub dendrite_depth: u32,
    pub dendrite_min_length: f32,
    pub dendrite_max_length: f32,
    pub dendrite_radius: f32,
    pub dendrite_ring_segments: u32,
    /// Root cone angle is drawn from `[min, max)` degrees per dendrite
    pub dendrite_cone_min_deg: f32,
    pub dendrite_cone_max_deg: f32,

    /// Max perturbation of a child branch relative to its parent
    pub branch_max_angle_deg: f32,
    /// Length and radius multiplier per recursion level
    pub taper: f32,

    pub axon_segments: usize,
    pub axon_segment_length: f32,
    /// Full width of the per-axis lateral deviation of each segment
    pub axon_deviation: f32,
    pub axon_radius: f32,
    pub axon_ring_segments: u32,
    pub axon_direction: [f32; 3],

    pub terminal_direction: [f32; 3],
    pub terminals: BranchTreeConfig,
}

impl Default for MorphologyConfig {
    fn default() -> Self {
        Self {
            soma_radius: 0.08,
            soma_lat_bands: 10,
            soma_long_bands: 10,
            dendrite_count: 8,
            dendrite_depth: 4,
            dendrite_min_length: 0.1,
            dendrite_max_length: 0.2,
            dendrite_radius: 0.02,
            dendrite_ring_segments: 8,
            dendrite_cone_min_deg: 30.0,
            dendrite_cone_max_deg: 120.0,
            branch_max_angle_deg: 40.0,
            taper: 0.7,
            axon_segments: 6,
            axon_segment_length: 0.2,
            axon_deviation: 0.02,
            axon_radius: 0.025,
            axon_ring_segments: 12,
            axon_direction: [0.0, -1.0, 0.0],
            terminal_direction: [0.3, -0.1, 0.3],
            terminals: BranchTreeConfig {
                count: 6,
                depth: 4,
                length: 0.15,
                radius: 0.015,
                ring_segments: 8,
                root_max_angle_deg: 60.0,
            },
        }
    }
}

/// Single-neuron detail view pulse configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PulseConfig {
    /// A new pulse is written every `delay_frames` frames
    pub delay_frames: u64,
    /// Vertices on each side of the pulse centre
    pub half_width: usize,
    /// Vertices the centre advances per pulse
    pub stride: usize,
    /// Linear fade applied to every vertex each frame
    pub fade_per_frame: f32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            delay_frames: 5,
            half_width: 100,
            stride: 50,
            fade_per_frame: 0.03,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Base directory for per-run log folders (file logging only)
    pub log_dir: String,
    /// Number of most recent run folders to keep
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            log_dir: "./logs".to_string(),
            retention_runs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_scene_preset() {
        let config = NeuroglyphConfig::planar_scene();
        assert_eq!(config.sampler.mode, SamplingMode::Planar);
        assert_eq!(config.activation.decay_factor, 0.95);
        assert_eq!(config.connectivity.distance_threshold, 0.13);
    }

    #[test]
    fn test_default_schedule_periods() {
        let periods: Vec<u64> = TriggerConfig::default_schedule()
            .iter()
            .map(TriggerConfig::period)
            .collect();
        assert_eq!(periods, vec![100, 180, 60, 200, 140]);
    }
}
