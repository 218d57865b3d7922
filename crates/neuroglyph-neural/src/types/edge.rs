// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Undirected connections between neurons

use super::error::{NeuralError, NeuralResult};
use super::ids::NeuronId;

/// Undirected edge with `a < b` and its build-time length
///
/// Ordering is by `(a, b)` so sorted edge lists are in creation order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: NeuronId,
    pub b: NeuronId,
    pub distance: f32,
}

impl Edge {
    /// # Errors
    ///
    /// `InvalidEdge` unless `a < b`.
    pub fn new(a: NeuronId, b: NeuronId, distance: f32) -> NeuralResult<Self> {
        if a >= b {
            return Err(NeuralError::InvalidEdge { a: a.0, b: b.0 });
        }
        Ok(Self { a, b, distance })
    }

    #[inline]
    pub fn key(&self) -> (u32, u32) {
        (self.a.0, self.b.0)
    }

    /// The endpoint opposite `id`, if `id` is an endpoint
    pub fn other(&self, id: NeuronId) -> Option<NeuronId> {
        if id == self.a {
            Some(self.b)
        } else if id == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}
