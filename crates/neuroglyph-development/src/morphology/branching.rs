// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Stochastic neuron morphology.

A neuron is a soma sphere, a fan of dendrite trees around it, a jittered
axon leaving along the principal direction, and a tuft of terminal trees at
the axon tip. Every tree follows the same rule:

```text
branch(start, dir, depth, length, radius):
    depth == 0            → nothing
    cylinder start → start + dir * length
    1 or 2 children       → branch(end, perturb(dir), depth - 1,
                                   length * taper, radius * taper)
```

Branches are expanded with an explicit work stack and written straight
into the mesh buffers; no tree is retained.
*/

use glam::Vec3;
use rand::Rng;
use tracing::debug;

use neuroglyph_config::{BranchTreeConfig, MorphologyConfig};
use neuroglyph_neural::{perturb, random_unit_vector};

use super::mesh::{MeshBuilder, NeuronMesh};
use crate::types::{DevResult, DevelopmentError};

/// Pending branch on the work stack
#[derive(Debug, Clone, Copy)]
struct BranchTask {
    start: Vec3,
    dir: Vec3,
    depth: u32,
    length: f32,
    radius: f32,
}

/// Counters for one generated neuron
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MorphologyStats {
    pub cylinders: usize,
    pub degenerate_cylinders: usize,
    pub triangles: usize,
}

/// Builds neuron meshes from a [`MorphologyConfig`]
#[derive(Debug, Clone)]
pub struct BranchGenerator {
    config: MorphologyConfig,
}

impl BranchGenerator {
    /// # Errors
    ///
    /// `InvalidConfig` for sphere bands below 2/3, ring segments below 3, or a
    /// taper outside (0, 1].
    pub fn new(config: MorphologyConfig) -> DevResult<Self> {
        if config.soma_lat_bands < 2 || config.soma_long_bands < 3 {
            return Err(DevelopmentError::InvalidConfig(format!(
                "soma needs at least 2x3 bands, got {}x{}",
                config.soma_lat_bands, config.soma_long_bands
            )));
        }
        let rings = [
            config.dendrite_ring_segments,
            config.axon_ring_segments,
            config.terminals.ring_segments,
        ];
        if rings.iter().any(|&segments| segments < 3) {
            return Err(DevelopmentError::InvalidConfig(format!(
                "ring segments must be at least 3, got {:?}",
                rings
            )));
        }
        if !(config.taper > 0.0 && config.taper <= 1.0) {
            return Err(DevelopmentError::InvalidConfig(format!(
                "taper must be in (0, 1], got {}",
                config.taper
            )));
        }
        if config.dendrite_max_length < config.dendrite_min_length
            || config.dendrite_cone_max_deg < config.dendrite_cone_min_deg
        {
            return Err(DevelopmentError::InvalidConfig(
                "dendrite ranges must satisfy min <= max".to_string(),
            ));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &MorphologyConfig {
        &self.config
    }

    /// Generate one neuron centred on `origin`
    pub fn generate<R: Rng + ?Sized>(&self, origin: Vec3, rng: &mut R) -> NeuronMesh {
        self.generate_with_stats(origin, rng).0
    }

    pub fn generate_with_stats<R: Rng + ?Sized>(
        &self,
        origin: Vec3,
        rng: &mut R,
    ) -> (NeuronMesh, MorphologyStats) {
        let cfg = &self.config;
        let mut builder = MeshBuilder::new();
        let mut stats = MorphologyStats::default();

        builder.add_sphere(origin, cfg.soma_radius, cfg.soma_lat_bands, cfg.soma_long_bands);

        // Dendrites
        for _ in 0..cfg.dendrite_count {
            let cone = lerp(cfg.dendrite_cone_min_deg, cfg.dendrite_cone_max_deg, rng.gen());
            let dir = perturb(random_unit_vector(rng), cone, rng);
            // Each dendrite randomly keeps its depth or loses one level
            let depth = (cfg.dendrite_depth as i64 + (rng.gen::<f32>() * 2.0 - 1.0).floor() as i64)
                .max(0) as u32;
            let length = lerp(cfg.dendrite_min_length, cfg.dendrite_max_length, rng.gen());
            let root = BranchTask {
                start: origin,
                dir,
                depth,
                length,
                radius: cfg.dendrite_radius,
            };
            self.grow_tree(root, cfg.dendrite_ring_segments, &mut builder, &mut stats, rng);
        }

        // Axon
        let axon_dir = Vec3::from_array(cfg.axon_direction);
        let mut current = origin;
        for _ in 0..cfg.axon_segments {
            let deviation = Vec3::new(
                (rng.gen::<f32>() - 0.5) * cfg.axon_deviation,
                (rng.gen::<f32>() - 0.5) * cfg.axon_deviation,
                (rng.gen::<f32>() - 0.5) * cfg.axon_deviation,
            );
            let next = current + axon_dir * cfg.axon_segment_length + deviation;
            self.emit_cylinder(
                &mut builder,
                &mut stats,
                current,
                next,
                cfg.axon_radius,
                cfg.axon_ring_segments,
            );
            current = next;
        }

        // Terminals at the axon tip
        let terminals: &BranchTreeConfig = &cfg.terminals;
        let terminal_dir = Vec3::from_array(cfg.terminal_direction);
        for _ in 0..terminals.count {
            let root = BranchTask {
                start: current,
                dir: perturb(terminal_dir, terminals.root_max_angle_deg, rng),
                depth: terminals.depth,
                length: terminals.length,
                radius: terminals.radius,
            };
            self.grow_tree(root, terminals.ring_segments, &mut builder, &mut stats, rng);
        }

        let mesh = builder.finish();
        stats.triangles = mesh.triangle_count();

        debug!(
            target: "neuroglyph-development",
            "Generated neuron mesh: {} triangles, {} cylinders ({} degenerate skipped)",
            stats.triangles,
            stats.cylinders,
            stats.degenerate_cylinders
        );

        (mesh, stats)
    }

    fn grow_tree<R: Rng + ?Sized>(
        &self,
        root: BranchTask,
        segments: u32,
        builder: &mut MeshBuilder,
        stats: &mut MorphologyStats,
        rng: &mut R,
    ) {
        let taper = self.config.taper;
        let mut stack = vec![root];

        while let Some(task) = stack.pop() {
            if task.depth == 0 {
                continue;
            }
            let end = task.start + task.dir * task.length;
            self.emit_cylinder(builder, stats, task.start, end, task.radius, segments);

            let children = rng.gen_range(1..=2);
            let first = stack.len();
            for _ in 0..children {
                stack.push(BranchTask {
                    start: end,
                    dir: perturb(task.dir, self.config.branch_max_angle_deg, rng),
                    depth: task.depth - 1,
                    length: task.length * taper,
                    radius: task.radius * taper,
                });
            }
            // First child on top so trees are emitted depth-first, in order
            stack[first..].reverse();
        }
    }

    fn emit_cylinder(
        &self,
        builder: &mut MeshBuilder,
        stats: &mut MorphologyStats,
        start: Vec3,
        end: Vec3,
        radius: f32,
        segments: u32,
    ) {
        if builder.add_cylinder(start, end, radius, segments) {
            stats.cylinders += 1;
        } else {
            stats.degenerate_cylinders += 1;
        }
    }
}

#[inline]
fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuroglyph_neural::seeded_rng;

    fn bare_config() -> MorphologyConfig {
        let mut config = MorphologyConfig::default();
        config.dendrite_depth = 0;
        config.axon_segments = 0;
        config.terminals.depth = 0;
        config
    }

    #[test]
    fn test_soma_only_triangle_count() {
        let generator = BranchGenerator::new(bare_config()).unwrap();
        let mesh = generator.generate(Vec3::ZERO, &mut seeded_rng(Some(1)));
        assert_eq!(mesh.triangle_count(), 2 * 10 * 10);
    }

    #[test]
    fn test_axon_only_adds_two_triangles_per_ring_segment() {
        let mut config = bare_config();
        config.axon_segments = 6;
        let generator = BranchGenerator::new(config).unwrap();

        let (mesh, stats) = generator.generate_with_stats(Vec3::ZERO, &mut seeded_rng(Some(2)));
        assert_eq!(stats.cylinders, 6);
        assert_eq!(mesh.triangle_count(), 200 + 6 * 2 * 12);
    }

    #[test]
    fn test_tree_cylinder_count_is_bounded_by_depth() {
        let mut config = bare_config();
        config.terminals.count = 1;
        config.terminals.depth = 3;
        let generator = BranchGenerator::new(config).unwrap();

        let (_, stats) = generator.generate_with_stats(Vec3::ZERO, &mut seeded_rng(Some(3)));
        // 1..=2 children per level: between a chain (3) and a full binary tree (7)
        assert!((3..=7).contains(&stats.cylinders), "{} cylinders", stats.cylinders);
    }

    #[test]
    fn test_default_neuron_is_deterministic_per_seed() {
        let generator = BranchGenerator::new(MorphologyConfig::default()).unwrap();
        let a = generator.generate(Vec3::ZERO, &mut seeded_rng(Some(7)));
        let b = generator.generate(Vec3::ZERO, &mut seeded_rng(Some(7)));
        assert_eq!(a, b);
        assert_eq!(a.positions().len(), a.normals().len());
        assert_eq!(a.positions().len() % 9, 0);
    }

    #[test]
    fn test_invalid_taper_rejected() {
        let mut config = MorphologyConfig::default();
        config.taper = 1.5;
        assert!(BranchGenerator::new(config).is_err());
    }
}
