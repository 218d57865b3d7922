// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Neuroglyph Core Types
//!
//! Types shared by the generation and simulation crates:
//! - **Types**: `NeuronId`, `PointCloud`, `Edge`, error types
//! - **Rng**: seeded random sources so every generator is reproducible
//! - **Geometry**: random directions and axis rotations on `glam::Vec3`

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod geometry;
pub mod rng;
pub mod types;

pub use geometry::{orthogonal_unit, perturb, random_unit_vector, rotate_around};
pub use rng::seeded_rng;
pub use types::{
    Bounds, CameraFit, Dimensionality, Edge, NeuralError, NeuralResult, NeuronId, PointCloud,
};

/// Re-export for convenience
pub use glam::Vec3;
