// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for core neural data

use super::ids::NeuronId;

/// Errors raised while building or indexing core buffers
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NeuralError {
    #[error("Array size mismatch: {len} floats is not a multiple of {components}")]
    ArraySizeMismatch { len: usize, components: usize },

    #[error("Non-finite coordinate at float index {index}")]
    NonFiniteCoordinate { index: usize },

    #[error("Neuron not found: {id} (count {count})")]
    NeuronOutOfRange { id: NeuronId, count: usize },

    #[error("Invalid edge ({a}, {b}): endpoints must satisfy a < b")]
    InvalidEdge { a: u32, b: u32 },
}

/// Result type for core neural operations
pub type NeuralResult<T> = Result<T, NeuralError>;
