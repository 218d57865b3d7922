// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Error types for development operations.
*/

use neuroglyph_neural::NeuralError;

/// Result type for development operations
pub type DevResult<T> = Result<T, DevelopmentError>;

/// Errors that can occur while loading assets or generating a neuron field
#[derive(Debug, thiserror::Error)]
pub enum DevelopmentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mask decode failed: {0}")]
    MaskDecode(#[from] image::ImageError),

    #[error("Point list parse failed: {0}")]
    PointList(#[from] serde_json::Error),

    #[error(transparent)]
    Neural(#[from] NeuralError),

    #[error("Invalid mask: {0}")]
    InvalidMask(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
