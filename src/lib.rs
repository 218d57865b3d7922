// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Neuroglyph - procedural neuron fields
//!
//! Neuroglyph places neurons on a brain mask (or loads them from a point
//! list), wires every pair closer than a threshold, and runs a frame-driven
//! activity simulation over the result. A separate generator grows a single
//! branching neuron mesh with a pulse that sweeps along its vertices.
//!
//! Rendering is left to the host: every simulator exposes flat `f32`/`u32`
//! buffers ready for upload.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use neuroglyph::prelude::*;
//!
//! let config = NeuroglyphConfig::planar_scene();
//! let mask = load_mask("brain_mask.png")?;
//! let mut scene = NeuralScene::from_mask(&mask, &config)?;
//!
//! for _ in 0..600 {
//!     scene.tick();
//!     // upload scene.node_activity() / scene.edge_activity()
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crates
//!
//! - **config**: TOML configuration, overrides and validation
//! - **neural**: ids, point clouds, edges, seeded RNG, vector helpers
//! - **development**: mask sampling, neuron morphology, connectivity
//! - **activity**: activation/contagion tick loop and pulse simulator
//! - **observability**: logging initialisation and per-crate debug flags
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use neuroglyph_config as config;
pub use neuroglyph_neural as neural;
pub use neuroglyph_observability as observability;

// Re-export algorithms
pub use neuroglyph_activity as activity;
pub use neuroglyph_development as development;

pub mod scene;

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::config::{load_config, validate_config, NeuroglyphConfig};
    pub use crate::neural::{seeded_rng, Dimensionality, NeuronId, PointCloud, Vec3};

    pub use crate::activity::{ActivationSimulator, PulseSimulator, TickReport};
    pub use crate::development::{
        load_mask, load_point_list, BranchGenerator, ConnectivityBuilder, ConnectivityGraph,
        LuminanceField, MaskSampler,
    };

    pub use crate::scene::{ActivityStats, DetailView, NeuralScene, SceneError};
}

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
