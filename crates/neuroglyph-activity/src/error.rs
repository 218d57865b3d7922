// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the activity simulators

/// Errors raised when building or driving a simulator
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("Invalid activity configuration: {0}")]
    InvalidConfig(String),

    #[error("Neuron {id} out of range (node count {count})")]
    NeuronOutOfRange { id: u32, count: usize },

    #[error("Activity for neuron {id} must be finite, got {value}")]
    NonFiniteActivity { id: u32, value: f32 },
}

pub type ActivityResult<T> = Result<T, ActivityError>;
