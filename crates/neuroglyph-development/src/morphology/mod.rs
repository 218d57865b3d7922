// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Neuron morphology: mesh buffers and the branch generator

pub mod branching;
pub mod mesh;

pub use branching::{BranchGenerator, MorphologyStats};
pub use mesh::{MeshBuilder, NeuronMesh};
