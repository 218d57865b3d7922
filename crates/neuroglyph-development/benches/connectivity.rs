// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Connectivity and sampling microbenchmarks
//!
//! Notes:
//! - Inputs are generated from a fixed seed; no I/O.
//! - 1100 neurons matches the default scene size.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use neuroglyph_config::{ConnectivityStrategy, SamplerConfig, SamplingMode};
use neuroglyph_development::{ConnectivityBuilder, LuminanceField, MaskSampler};
use neuroglyph_neural::{seeded_rng, Dimensionality, PointCloud};
use rand::Rng;

fn random_cloud(count: usize, seed: u64) -> PointCloud {
    let mut rng = seeded_rng(Some(seed));
    let coords = (0..count * 3).map(|_| rng.gen_range(-1.0f32..1.0)).collect();
    PointCloud::from_flat(Dimensionality::Volumetric, coords).expect("valid cloud")
}

fn bench_connectivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("connectivity");
    group.sample_size(20);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    for &count in &[1_100usize, 5_000] {
        let cloud = random_cloud(count, 42);
        group.throughput(Throughput::Elements(count as u64));

        for (name, strategy) in [
            ("exhaustive", ConnectivityStrategy::Exhaustive),
            ("uniform_grid", ConnectivityStrategy::UniformGrid),
        ] {
            let builder = ConnectivityBuilder::new(0.13, strategy).expect("valid threshold");
            group.bench_with_input(BenchmarkId::new(name, count), &cloud, |b, cloud| {
                b.iter(|| black_box(builder.build(black_box(cloud))));
            });
        }
    }

    group.finish();
}

fn bench_mask_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask_sampling");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(2));

    let field = LuminanceField::solid(512, 512, 255);
    for mode in [SamplingMode::Planar, SamplingMode::Dome] {
        let sampler = MaskSampler::new(SamplerConfig {
            mode,
            ..SamplerConfig::default()
        })
        .expect("valid sampler config");
        group.bench_function(BenchmarkId::new("solid_512", format!("{:?}", mode)), |b| {
            let mut rng = seeded_rng(Some(7));
            b.iter(|| black_box(sampler.sample(black_box(&field), &mut rng)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_connectivity, bench_mask_sampling);
criterion_main!(benches);
