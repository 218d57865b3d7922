// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core type definitions

pub mod cloud;
pub mod edge;
pub mod error;
pub mod ids;

pub use cloud::{Bounds, CameraFit, Dimensionality, PointCloud};
pub use edge::Edge;
pub use error::{NeuralError, NeuralResult};
pub use ids::NeuronId;
