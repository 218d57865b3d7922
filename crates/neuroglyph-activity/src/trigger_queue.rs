// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Deferred activation queue.

Cascade triggers schedule node activations for later ticks. They are held
here and only applied when the simulator drains the queue at the start of a
tick, so a deferred write never lands in the middle of a decay or contagion
pass.
*/

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use neuroglyph_neural::NeuronId;

/// A node activation due at a given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredActivation {
    pub due_tick: u64,
    pub neuron: NeuronId,
}

/// Min-heap of deferred activations keyed by (due tick, insertion order)
///
/// ARCHITECTURE:
/// - Triggers push (during a tick, after the drain)
/// - Simulator drains everything due at the start of the next tick
#[derive(Debug, Default, Clone)]
pub struct TriggerQueue {
    heap: BinaryHeap<Reverse<(u64, u64, u32)>>,
    next_seq: u64,
}

impl TriggerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `neuron` to be set to full activity at `due_tick`
    pub fn schedule(&mut self, due_tick: u64, neuron: NeuronId) {
        self.heap.push(Reverse((due_tick, self.next_seq, neuron.0)));
        self.next_seq += 1;
    }

    /// Remove and return every activation with `due_tick <= tick`, ordered
    /// by due tick then insertion
    pub fn drain_due(&mut self, tick: u64) -> Vec<DeferredActivation> {
        let mut due = Vec::new();
        while let Some(Reverse((due_tick, _, neuron))) = self.heap.peek().copied() {
            if due_tick > tick {
                break;
            }
            self.heap.pop();
            due.push(DeferredActivation {
                due_tick,
                neuron: NeuronId(neuron),
            });
        }
        due
    }

    /// Earliest pending due tick
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse((due, _, _))| *due)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
