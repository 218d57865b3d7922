// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Connectivity between sampled neurons

pub mod grid;
pub mod synaptogenesis;

pub use grid::UniformGrid;
pub use synaptogenesis::{ConnectivityBuilder, ConnectivityGraph};
