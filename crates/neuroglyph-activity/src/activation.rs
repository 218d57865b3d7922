// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Activation / contagion simulator.

Each tick runs five phases in a fixed order:

1. **Deferred** - apply cascade activations whose due tick has arrived
2. **Triggers** - periodic rules (`tick % period == 0`) in configured order
3. **Stimuli** - activate nodes near points queued by `stimulate_at`
4. **Decay** - scale every node by `decay_factor`
5. **Contagion** - edges whose endpoint exceeds the threshold force both
   endpoints (and the edge) to 1.0; other edges fade by `edge_decay`

Contagion reads a snapshot of post-decay activity taken before the pass, so
the outcome does not depend on where an edge sits in the list.
*/

use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, trace};

use neuroglyph_config::{ActivationConfig, TriggerConfig};
use neuroglyph_development::ConnectivityGraph;
use neuroglyph_neural::{seeded_rng, Dimensionality, Edge, NeuronId, PointCloud};

use crate::error::{ActivityError, ActivityResult};
use crate::trigger_queue::TriggerQueue;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Names of the triggers that fired, in firing order
    pub triggers_fired: Vec<&'static str>,
    pub deferred_applied: usize,
    pub stimulated: usize,
    /// Edges that met the contagion threshold this tick
    pub contagious_edges: usize,
}

/// Owns node and edge activity for a built neuron field
pub struct ActivationSimulator {
    positions: PointCloud,
    edges: Vec<Edge>,
    node_activity: Vec<f32>,
    edge_activity: Vec<f32>,
    /// Post-decay activity captured before contagion; reused across ticks
    snapshot: Vec<f32>,
    config: ActivationConfig,
    deferred: TriggerQueue,
    pending_stimuli: Vec<Vec3>,
    tick: u64,
    rng: StdRng,
}

impl ActivationSimulator {
    /// Build a simulator over a finished cloud and graph
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for an empty cloud or out-of-range parameters.
    ///
    /// # Panics
    ///
    /// If an edge references a node outside the cloud.
    pub fn new(
        positions: PointCloud,
        graph: ConnectivityGraph,
        config: ActivationConfig,
        seed: Option<u64>,
    ) -> ActivityResult<Self> {
        let count = positions.len();
        if count == 0 {
            return Err(ActivityError::InvalidConfig(
                "activation requires at least one node".to_string(),
            ));
        }
        validate(&config)?;

        let (edges, edge_activity) = graph.into_parts();
        for edge in &edges {
            assert!(
                edge.b.index() < count,
                "edge ({}, {}) references a node outside a cloud of {}",
                edge.a,
                edge.b,
                count
            );
        }

        debug!(
            target: "neuroglyph-activity",
            "Activation simulator ready: {} nodes, {} edges, {} triggers",
            count,
            edges.len(),
            config.triggers.len()
        );

        Ok(Self {
            positions,
            edges,
            node_activity: vec![0.0; count],
            edge_activity,
            snapshot: vec![0.0; count],
            config,
            deferred: TriggerQueue::new(),
            pending_stimuli: Vec::new(),
            tick: 0,
            rng: seeded_rng(seed),
        })
    }

    /// Advance one tick
    pub fn tick(&mut self) -> TickReport {
        self.tick += 1;
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        for due in self.deferred.drain_due(self.tick) {
            self.node_activity[due.neuron.index()] = 1.0;
            report.deferred_applied += 1;
        }

        for index in 0..self.config.triggers.len() {
            let trigger = self.config.triggers[index].clone();
            if self.tick % trigger.period() == 0 {
                self.fire(&trigger);
                trace!(
                    target: "neuroglyph-activity",
                    "tick {}: trigger {} fired",
                    self.tick,
                    trigger.name()
                );
                report.triggers_fired.push(trigger.name());
            }
        }

        let stimuli = std::mem::take(&mut self.pending_stimuli);
        for point in &stimuli {
            report.stimulated += self.apply_stimulus(*point);
        }

        let decay = self.config.decay_factor;
        for value in &mut self.node_activity {
            *value *= decay;
        }

        report.contagious_edges = self.spread_contagion();

        trace!(
            target: "neuroglyph-activity",
            "tick {} complete: {} deferred, {} stimulated, {} contagious edges",
            report.tick,
            report.deferred_applied,
            report.stimulated,
            report.contagious_edges
        );
        report
    }

    /// Queue an external stimulus; applied during the next tick
    pub fn stimulate_at(&mut self, point: Vec3) {
        self.pending_stimuli.push(point);
    }

    /// Overwrite one node's activity, clamped to [0, 1]
    ///
    /// # Errors
    ///
    /// `NeuronOutOfRange` for an unknown id, `NonFiniteActivity` for NaN or
    /// infinite values.
    pub fn set_activity(&mut self, id: NeuronId, value: f32) -> ActivityResult<()> {
        if !value.is_finite() {
            return Err(ActivityError::NonFiniteActivity { id: id.0, value });
        }
        let count = self.node_activity.len();
        let slot = self
            .node_activity
            .get_mut(id.index())
            .ok_or(ActivityError::NeuronOutOfRange { id: id.0, count })?;
        *slot = value.clamp(0.0, 1.0);
        Ok(())
    }

    #[inline]
    pub fn node_activity(&self) -> &[f32] {
        &self.node_activity
    }

    #[inline]
    pub fn edge_activity(&self) -> &[f32] {
        &self.edge_activity
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn positions(&self) -> &PointCloud {
        &self.positions
    }

    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Cascade activations scheduled but not yet applied
    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    pub fn config(&self) -> &ActivationConfig {
        &self.config
    }

    fn fire(&mut self, trigger: &TriggerConfig) {
        let count = self.node_activity.len();
        match *trigger {
            TriggerConfig::FixedRange {
                start_fraction,
                length,
                ..
            } => {
                let start = (start_fraction * count as f32).floor() as usize;
                self.activate_range(start, length);
            }
            TriggerConfig::StridePulse {
                stride, frequency, ..
            } => {
                let value = (self.tick as f32 * frequency).sin().abs();
                for slot in self.node_activity.iter_mut().step_by(stride) {
                    *slot = value;
                }
            }
            TriggerConfig::RandomRange { length, margin, .. } => {
                let start = self.random_start(margin);
                self.activate_range(start, length);
            }
            TriggerConfig::StaggeredCascade {
                length,
                margin,
                stagger_ticks,
                ..
            } => {
                let start = self.random_start(margin);
                let end = start.saturating_add(length).min(count);
                for (k, node) in (start..end).enumerate() {
                    let due = (k as u64)
                        .saturating_mul(stagger_ticks)
                        .saturating_add(self.tick + 1);
                    self.deferred.schedule(due, NeuronId(node as u32));
                }
            }
        }
    }

    /// Uniform start in `[0, count - margin)`, or 0 when the field is too small
    fn random_start(&mut self, margin: usize) -> usize {
        let count = self.node_activity.len();
        if count > margin {
            self.rng.gen_range(0..count - margin)
        } else {
            0
        }
    }

    fn activate_range(&mut self, start: usize, length: usize) {
        let count = self.node_activity.len();
        let end = start.saturating_add(length).min(count);
        if start < end {
            self.node_activity[start..end].fill(1.0);
        }
    }

    fn apply_stimulus(&mut self, mut point: Vec3) -> usize {
        if self.positions.dimensionality() == Dimensionality::Planar {
            point.z = 0.0;
        }
        let radius_sq = self.config.stimulus_radius * self.config.stimulus_radius;
        let mut hit = 0;
        for (index, position) in self.positions.points().enumerate() {
            if position.distance_squared(point) < radius_sq {
                self.node_activity[index] = 1.0;
                hit += 1;
            }
        }
        hit
    }

    fn spread_contagion(&mut self) -> usize {
        self.snapshot.copy_from_slice(&self.node_activity);
        let threshold = self.config.contagion_threshold;
        let fade = self.config.edge_decay;
        let mut contagious = 0;

        for (edge, activity) in self.edges.iter().zip(self.edge_activity.iter_mut()) {
            let (a, b) = (edge.a.index(), edge.b.index());
            if self.snapshot[a] > threshold || self.snapshot[b] > threshold {
                self.node_activity[a] = 1.0;
                self.node_activity[b] = 1.0;
                *activity = 1.0;
                contagious += 1;
            } else {
                *activity *= fade;
            }
        }
        contagious
    }
}

fn validate(config: &ActivationConfig) -> ActivityResult<()> {
    let invalid = |msg: String| Err(ActivityError::InvalidConfig(msg));

    if !(config.decay_factor > 0.0 && config.decay_factor <= 1.0) {
        return invalid(format!(
            "decay_factor must be in (0, 1], got {}",
            config.decay_factor
        ));
    }
    if !(config.edge_decay > 0.0 && config.edge_decay <= 1.0) {
        return invalid(format!(
            "edge_decay must be in (0, 1], got {}",
            config.edge_decay
        ));
    }
    if !(0.0..=1.0).contains(&config.contagion_threshold) {
        return invalid(format!(
            "contagion_threshold must be in [0, 1], got {}",
            config.contagion_threshold
        ));
    }
    if !config.stimulus_radius.is_finite() || config.stimulus_radius < 0.0 {
        return invalid(format!(
            "stimulus_radius must be finite and non-negative, got {}",
            config.stimulus_radius
        ));
    }

    for (index, trigger) in config.triggers.iter().enumerate() {
        if trigger.period() == 0 {
            return invalid(format!("trigger {} ({}) has zero period", index, trigger.name()));
        }
        match *trigger {
            TriggerConfig::FixedRange { start_fraction, .. }
                if !(0.0..=1.0).contains(&start_fraction) =>
            {
                return invalid(format!(
                    "trigger {} start_fraction must be in [0, 1], got {}",
                    index, start_fraction
                ));
            }
            TriggerConfig::StridePulse { stride: 0, .. } => {
                return invalid(format!("trigger {} has zero stride", index));
            }
            TriggerConfig::StaggeredCascade {
                length,
                stagger_ticks,
                ..
            } if (length as u64).checked_mul(stagger_ticks).is_none() => {
                return invalid(format!(
                    "trigger {} cascade span overflows: {} nodes x {} ticks",
                    index, length, stagger_ticks
                ));
            }
            _ => {}
        }
    }
    Ok(())
}
