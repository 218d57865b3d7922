// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Synaptogenesis - distance-threshold connectivity.

Every unordered pair of neurons strictly closer than the threshold becomes
an edge. Edges are emitted sorted by `(a, b)` with `a < b`, so the two
strategies below produce identical graphs:

- `Exhaustive`: O(n²) pairwise scan.
- `UniformGrid`: bucket neurons into cells of side = threshold and only
  compare neighbouring cells.
*/

use tracing::info;

use neuroglyph_config::{ConnectivityConfig, ConnectivityStrategy};
use neuroglyph_neural::{Dimensionality, Edge, NeuronId, PointCloud};

use super::grid::UniformGrid;
use crate::types::{DevResult, DevelopmentError};

/// Static edge list plus one activity value per edge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectivityGraph {
    edges: Vec<Edge>,
    edge_activity: Vec<f32>,
}

impl ConnectivityGraph {
    /// Wrap an edge list; edges are sorted by `(a, b)` and deduplicated
    pub fn from_edges(mut edges: Vec<Edge>) -> Self {
        edges.sort_by_key(Edge::key);
        edges.dedup_by_key(|e| e.key());
        let edge_activity = vec![0.0; edges.len()];
        Self {
            edges,
            edge_activity,
        }
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge_activity(&self) -> &[f32] {
        &self.edge_activity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Edge>, Vec<f32>) {
        (self.edges, self.edge_activity)
    }

    /// `[a0, b0, a1, b1, ...]` for indexed line drawing
    pub fn edge_index_buffer(&self) -> Vec<u32> {
        self.edges.iter().flat_map(|e| [e.a.0, e.b.0]).collect()
    }

    /// Two line vertices per edge, in the cloud's own component count
    ///
    /// # Panics
    ///
    /// If an edge references a point outside `cloud`.
    pub fn edge_line_positions(&self, cloud: &PointCloud) -> Vec<f32> {
        let components = cloud.dimensionality().components();
        let coords = cloud.as_slice();
        let mut lines = Vec::with_capacity(self.edges.len() * 2 * components);
        for edge in &self.edges {
            for id in [edge.a, edge.b] {
                let start = id.index() * components;
                lines.extend_from_slice(&coords[start..start + components]);
            }
        }
        lines
    }

    /// Number of edges touching each node
    pub fn degrees(&self, node_count: usize) -> Vec<u32> {
        let mut degrees = vec![0u32; node_count];
        for edge in &self.edges {
            degrees[edge.a.index()] += 1;
            degrees[edge.b.index()] += 1;
        }
        degrees
    }
}

/// Builds a [`ConnectivityGraph`] from a point cloud
#[derive(Debug, Clone, Copy)]
pub struct ConnectivityBuilder {
    threshold: f32,
    strategy: ConnectivityStrategy,
}

impl ConnectivityBuilder {
    /// # Errors
    ///
    /// `InvalidConfig` unless `threshold` is finite and positive.
    pub fn new(threshold: f32, strategy: ConnectivityStrategy) -> DevResult<Self> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(DevelopmentError::InvalidConfig(format!(
                "distance threshold must be finite and positive, got {}",
                threshold
            )));
        }
        Ok(Self {
            threshold,
            strategy,
        })
    }

    pub fn from_config(config: &ConnectivityConfig) -> DevResult<Self> {
        Self::new(config.distance_threshold, config.strategy)
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn strategy(&self) -> ConnectivityStrategy {
        self.strategy
    }

    pub fn build(&self, cloud: &PointCloud) -> ConnectivityGraph {
        let edges = match self.strategy {
            ConnectivityStrategy::Exhaustive => self.exhaustive(cloud),
            ConnectivityStrategy::UniformGrid => self.grid(cloud),
        };
        let graph = ConnectivityGraph::from_edges(edges);

        info!(
            target: "neuroglyph-development",
            "🔗 Connected {} neurons with {} edges (threshold {}, {:?})",
            cloud.len(),
            graph.len(),
            self.threshold,
            self.strategy
        );
        graph
    }

    #[inline]
    fn edge_if_close(&self, cloud: &PointCloud, i: usize, j: usize) -> Option<Edge> {
        let d2 = cloud.distance_squared(i, j);
        if d2 < self.threshold * self.threshold {
            Some(Edge {
                a: NeuronId(i as u32),
                b: NeuronId(j as u32),
                distance: d2.sqrt(),
            })
        } else {
            None
        }
    }

    fn exhaustive(&self, cloud: &PointCloud) -> Vec<Edge> {
        let n = cloud.len();
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if let Some(edge) = self.edge_if_close(cloud, i, j) {
                    edges.push(edge);
                }
            }
        }
        edges
    }

    fn grid(&self, cloud: &PointCloud) -> Vec<Edge> {
        let grid = UniformGrid::build(cloud, self.threshold);
        let planar = cloud.dimensionality() == Dimensionality::Planar;
        let mut edges = Vec::new();

        for i in 0..cloud.len() {
            let cell = grid.cell_of(cloud.point(i));
            for j in grid.neighbours(cell, planar) {
                if j > i {
                    if let Some(edge) = self.edge_if_close(cloud, i, j) {
                        edges.push(edge);
                    }
                }
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuroglyph_neural::Dimensionality;

    fn line_cloud() -> PointCloud {
        PointCloud::from_flat(
            Dimensionality::Planar,
            vec![0.0, 0.0, 0.1, 0.0, 0.2, 0.0, 0.3, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn test_line_of_four() {
        let builder = ConnectivityBuilder::new(0.13, ConnectivityStrategy::Exhaustive).unwrap();
        let graph = builder.build(&line_cloud());

        let keys: Vec<(u32, u32)> = graph.edges().iter().map(Edge::key).collect();
        assert_eq!(keys, vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(graph.edge_activity(), &[0.0, 0.0, 0.0]);
        assert_eq!(graph.edge_index_buffer(), vec![0, 1, 1, 2, 2, 3]);
        assert_eq!(graph.degrees(4), vec![1, 2, 2, 1]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let cloud =
            PointCloud::from_flat(Dimensionality::Planar, vec![0.0, 0.0, 0.5, 0.0]).unwrap();
        let builder = ConnectivityBuilder::new(0.5, ConnectivityStrategy::Exhaustive).unwrap();
        assert!(builder.build(&cloud).is_empty());
    }

    #[test]
    fn test_grid_matches_exhaustive_on_line() {
        let exhaustive = ConnectivityBuilder::new(0.13, ConnectivityStrategy::Exhaustive)
            .unwrap()
            .build(&line_cloud());
        let grid = ConnectivityBuilder::new(0.13, ConnectivityStrategy::UniformGrid)
            .unwrap()
            .build(&line_cloud());
        assert_eq!(exhaustive, grid);
    }

    #[test]
    fn test_edge_line_positions() {
        let cloud = PointCloud::from_flat(
            Dimensionality::Volumetric,
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.1],
        )
        .unwrap();
        let graph = ConnectivityBuilder::new(0.4, ConnectivityStrategy::Exhaustive)
            .unwrap()
            .build(&cloud);
        assert_eq!(
            graph.edge_line_positions(&cloud),
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.1]
        );
        assert!((graph.edges()[0].distance - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_threshold() {
        assert!(ConnectivityBuilder::new(0.0, ConnectivityStrategy::Exhaustive).is_err());
        assert!(ConnectivityBuilder::new(f32::NAN, ConnectivityStrategy::UniformGrid).is_err());
    }

    #[test]
    fn test_empty_and_single_point_clouds() {
        let builder = ConnectivityBuilder::new(1.0, ConnectivityStrategy::UniformGrid).unwrap();
        assert!(builder.build(&PointCloud::new(Dimensionality::Planar)).is_empty());
        let single = PointCloud::from_flat(Dimensionality::Planar, vec![0.0, 0.0]).unwrap();
        assert!(builder.build(&single).is_empty());
    }
}
