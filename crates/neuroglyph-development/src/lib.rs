// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

/*!
# Neuroglyph Development

Procedural generation of a neuron field:
- **Neurogenesis**: spacing-constrained sampling of neuron positions from a mask
- **Morphology**: recursive stochastic dendrite/axon meshes for a single neuron
- **Synaptogenesis**: distance-threshold connectivity between neurons
- **IO**: mask images and JSON point lists

## Pipeline

```text
load_mask ─▶ MaskSampler ─┐
                          ├─▶ PointCloud ─▶ ConnectivityBuilder ─▶ ConnectivityGraph
load_point_list ──────────┘

BranchGenerator ─▶ NeuronMesh (single-neuron detail view)
```

All generators take an explicit `rand::Rng`, so a fixed seed reproduces a field.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod connectivity;
pub mod io;
pub mod morphology;
pub mod neurogenesis;
pub mod types;

pub use connectivity::{ConnectivityBuilder, ConnectivityGraph, UniformGrid};
pub use io::{decode_mask, load_mask, load_point_list, parse_point_list, write_point_list};
pub use morphology::{BranchGenerator, MeshBuilder, MorphologyStats, NeuronMesh};
pub use neurogenesis::{LuminanceField, MaskSampler, SampleOutcome, SampleStats};
pub use types::{DevResult, DevelopmentError};
