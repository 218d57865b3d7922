// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

/*!
# Neuroglyph Activity

Frame-driven activity over a developed neuron field:
- [`ActivationSimulator`]: decay, periodic triggers, stimuli and edge contagion
- [`TriggerQueue`]: deferred cascade activations, drained at the start of a tick
- [`PulseSimulator`]: a gaussian pulse sweeping the vertices of a neuron mesh

Single-threaded; the host calls `tick()` / `step()` once per frame.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod activation;
pub mod error;
pub mod pulse;
pub mod trigger_queue;

pub use activation::{ActivationSimulator, TickReport};
pub use error::{ActivityError, ActivityResult};
pub use pulse::PulseSimulator;
pub use trigger_queue::{DeferredActivation, TriggerQueue};
