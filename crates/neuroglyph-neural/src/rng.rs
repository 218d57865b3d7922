// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Random sources
//!
//! Every stochastic component takes `&mut impl Rng` so tests can pin a seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// `StdRng` from a fixed seed, or from OS entropy when `seed` is `None`
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
