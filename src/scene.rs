// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Scene orchestration.

[`NeuralScene`] runs the field pipeline (sample or load positions, connect,
simulate) and keeps the static edge buffers a renderer uploads once.
[`DetailView`] pairs a single generated neuron mesh with its pulse simulator.
*/

use tracing::{debug, info};

use neuroglyph_activity::{ActivationSimulator, ActivityError, PulseSimulator, TickReport};
use neuroglyph_config::NeuroglyphConfig;
use neuroglyph_development::{
    BranchGenerator, ConnectivityBuilder, DevelopmentError, LuminanceField, MaskSampler,
    MorphologyStats, NeuronMesh, SampleStats,
};
use neuroglyph_neural::{seeded_rng, Bounds, PointCloud, Vec3};

/// Activity above this counts a node or edge as "active" in [`ActivityStats`]
pub const ACTIVE_LEVEL: f32 = 0.5;

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Development(#[from] DevelopmentError),

    #[error(transparent)]
    Activity(#[from] ActivityError),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Summary of the current activity buffers
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActivityStats {
    pub mean_node: f32,
    pub peak_node: f32,
    pub active_nodes: usize,
    pub active_edges: usize,
}

/// A developed neuron field plus its activation simulator
pub struct NeuralScene {
    simulator: ActivationSimulator,
    edge_index: Vec<u32>,
    edge_lines: Vec<f32>,
    sample_stats: Option<SampleStats>,
}

impl NeuralScene {
    /// Sample positions from a mask, then connect and wrap in a simulator
    ///
    /// # Errors
    ///
    /// `SceneError::Activity` when the mask yields no points; a scene needs at
    /// least one neuron.
    pub fn from_mask(field: &LuminanceField, config: &NeuroglyphConfig) -> SceneResult<Self> {
        let sampler = MaskSampler::new(config.sampler.clone())?;
        let mut rng = seeded_rng(config.system.seed);
        let outcome = sampler.sample(field, &mut rng);
        let mut scene = Self::from_points(outcome.points, config)?;
        scene.sample_stats = Some(outcome.stats);
        Ok(scene)
    }

    /// Connect a ready-made cloud (e.g. a loaded point list)
    pub fn from_points(cloud: PointCloud, config: &NeuroglyphConfig) -> SceneResult<Self> {
        let graph = ConnectivityBuilder::from_config(&config.connectivity)?.build(&cloud);
        let edge_index = graph.edge_index_buffer();
        let edge_lines = graph.edge_line_positions(&cloud);

        info!(
            target: "neuroglyph",
            "🧠 Scene built: {} neurons, {} connections",
            cloud.len(),
            graph.len()
        );

        // Separate stream from the sampler's so trigger draws don't repeat
        // the placement sequence.
        let sim_seed = config.system.seed.map(|s| s.wrapping_add(1));
        let simulator =
            ActivationSimulator::new(cloud, graph, config.activation.clone(), sim_seed)?;

        Ok(Self {
            simulator,
            edge_index,
            edge_lines,
            sample_stats: None,
        })
    }

    pub fn tick(&mut self) -> TickReport {
        self.simulator.tick()
    }

    pub fn stimulate_at(&mut self, point: Vec3) {
        self.simulator.stimulate_at(point);
    }

    pub fn positions(&self) -> &PointCloud {
        self.simulator.positions()
    }

    pub fn node_activity(&self) -> &[f32] {
        self.simulator.node_activity()
    }

    pub fn edge_activity(&self) -> &[f32] {
        self.simulator.edge_activity()
    }

    /// `[a0, b0, a1, b1, ...]`
    pub fn edge_index_buffer(&self) -> &[u32] {
        &self.edge_index
    }

    /// Two vertices per edge, laid out like the position buffer
    pub fn edge_line_positions(&self) -> &[f32] {
        &self.edge_lines
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.simulator.positions().bounds()
    }

    /// Sampler counters when the scene came from a mask
    pub fn sample_stats(&self) -> Option<&SampleStats> {
        self.sample_stats.as_ref()
    }

    pub fn simulator(&self) -> &ActivationSimulator {
        &self.simulator
    }

    pub fn simulator_mut(&mut self) -> &mut ActivationSimulator {
        &mut self.simulator
    }

    pub fn activity_stats(&self) -> ActivityStats {
        let nodes = self.simulator.node_activity();
        let edges = self.simulator.edge_activity();
        let sum: f32 = nodes.iter().sum();
        ActivityStats {
            mean_node: sum / nodes.len().max(1) as f32,
            peak_node: nodes.iter().copied().fold(0.0, f32::max),
            active_nodes: nodes.iter().filter(|v| **v > ACTIVE_LEVEL).count(),
            active_edges: edges.iter().filter(|v| **v > ACTIVE_LEVEL).count(),
        }
    }
}

/// A single neuron mesh with a pulse travelling along its vertices
pub struct DetailView {
    mesh: NeuronMesh,
    stats: MorphologyStats,
    pulse: PulseSimulator,
}

impl DetailView {
    pub fn generate(config: &NeuroglyphConfig, origin: Vec3) -> SceneResult<Self> {
        let generator = BranchGenerator::new(config.morphology.clone())?;
        let mut rng = seeded_rng(config.system.seed);
        let (mesh, stats) = generator.generate_with_stats(origin, &mut rng);
        let pulse = PulseSimulator::new(mesh.vertex_count(), config.pulse.clone())?;

        debug!(
            target: "neuroglyph",
            "Detail view: {} vertices, {} cylinders ({} degenerate)",
            mesh.vertex_count(),
            stats.cylinders,
            stats.degenerate_cylinders
        );

        Ok(Self { mesh, stats, pulse })
    }

    /// Advance the pulse one frame
    pub fn step(&mut self) -> bool {
        self.pulse.step()
    }

    pub fn mesh(&self) -> &NeuronMesh {
        &self.mesh
    }

    pub fn morphology_stats(&self) -> MorphologyStats {
        self.stats
    }

    pub fn intensity(&self) -> &[f32] {
        self.pulse.intensity()
    }

    pub fn pulse(&self) -> &PulseSimulator {
        &self.pulse
    }
}
