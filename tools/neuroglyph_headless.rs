// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Headless scene runner

Builds a neuron field from a mask image or a JSON point list, runs the
activation simulator for a fixed number of ticks and logs activity
statistics. No rendering.

Usage:
  cargo run --bin neuroglyph-headless -- --mask brain_mask.png --planar --ticks 600
  cargo run --bin neuroglyph-headless -- --points neuron_points.json --stride 4 --debug-neuroglyph-activity
*/

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use neuroglyph::config::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    validate_config, LogFormat, NeuroglyphConfig,
};
use neuroglyph::development::{load_mask, load_point_list, write_point_list, LuminanceField};
use neuroglyph::neural::Vec3;
use neuroglyph::observability::{
    debug_flags_help, init_logging, CrateDebugFlags, ConsoleFormat, LoggingOptions,
};
use neuroglyph::scene::{DetailView, NeuralScene};

/// Side of the solid field used when no mask or point list is given
const FALLBACK_FIELD_SIZE: u32 = 256;

/// Neuroglyph headless runner - build a neuron field and simulate its activity
#[derive(Parser, Debug)]
#[command(name = "neuroglyph-headless", version, long_about = None, after_help = debug_flags_help())]
struct Args {
    /// Configuration file (default: NEUROGLYPH_CONFIG_PATH or ./neuroglyph.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mask image to sample neuron positions from
    #[arg(short, long, conflicts_with = "points")]
    mask: Option<PathBuf>,

    /// JSON point list of [x, y, z] triples
    #[arg(short, long)]
    points: Option<PathBuf>,

    /// Keep every n-th point of the point list
    #[arg(long, default_value_t = 1)]
    stride: usize,

    /// Use the planar scene preset when no config file is found
    #[arg(long, default_value_t = false)]
    planar: bool,

    /// Number of activation ticks to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Log activity statistics every N ticks (0 = only at the end)
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Seed for every random source
    #[arg(long)]
    seed: Option<u64>,

    /// Override the sampler target count
    #[arg(long)]
    target_count: Option<usize>,

    /// Override the connect threshold
    #[arg(long)]
    connect_threshold: Option<f32>,

    /// Write the sampled positions as a JSON point list
    #[arg(long)]
    export_points: Option<PathBuf>,

    /// Also grow a single neuron and run its pulse for N frames
    #[arg(long, default_value_t = 0)]
    detail_frames: u64,
}

impl Args {
    fn overrides(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        if let Some(seed) = self.seed {
            map.insert("seed".to_string(), seed.to_string());
        }
        if let Some(count) = self.target_count {
            map.insert("target_count".to_string(), count.to_string());
        }
        if let Some(threshold) = self.connect_threshold {
            map.insert("connect_threshold".to_string(), threshold.to_string());
        }
        map
    }
}

fn main() -> Result<()> {
    // `--debug-<crate>` flags are open-ended, so split them off before clap
    let (debug_args, clap_args): (Vec<String>, Vec<String>) =
        std::env::args().partition(|arg| arg.starts_with("--debug-"));
    let args = Args::parse_from(clap_args);

    let mut debug_flags = CrateDebugFlags::from_args(debug_args);
    if let Ok(value) = std::env::var("NEUROGLYPH_DEBUG") {
        debug_flags.merge_env_value(&value);
    }

    let config = resolve_config(&args)?;
    validate_config(&config).context("Invalid configuration")?;

    let options = LoggingOptions {
        base_level: config.system.log_level.clone(),
        console_format: match config.logging.format {
            LogFormat::Text => ConsoleFormat::Text,
            LogFormat::Json => ConsoleFormat::Json,
        },
        log_dir: PathBuf::from(&config.logging.log_dir),
        retention_runs: config.logging.retention_runs,
    };
    let _logging = init_logging(&debug_flags, &options).context("Failed to initialise logging")?;

    info!(target: "neuroglyph", "🧬 Neuroglyph headless v{}", neuroglyph::VERSION);

    let mut scene = match build_scene(&args, &config) {
        Ok(scene) => scene,
        Err(e) => {
            error!(target: "neuroglyph", "Failed to build scene: {:#}", e);
            return Err(e);
        }
    };

    if let Some(stats) = scene.sample_stats() {
        info!(
            target: "neuroglyph",
            "Sampler: {} accepted of {} candidates ({} drawn, {} too close, {} off dome)",
            stats.accepted,
            stats.candidates,
            stats.drawn,
            stats.spacing_rejections,
            stats.dome_rejections
        );
    }
    if let Some(bounds) = scene.bounds() {
        let fit = bounds.fit(0.65);
        info!(
            target: "neuroglyph",
            "Bounds {:?}..{:?}, fit zoom {:.3}",
            bounds.min,
            bounds.max,
            fit.zoom
        );
    }

    if let Some(path) = &args.export_points {
        write_point_list(path, scene.positions())
            .with_context(|| format!("Failed to export points to {}", path.display()))?;
        info!(target: "neuroglyph", "Exported {} points to {}", scene.positions().len(), path.display());
    }

    run_ticks(&mut scene, args.ticks, args.report_every);

    if args.detail_frames > 0 {
        run_detail(&config, args.detail_frames)?;
    }

    info!(target: "neuroglyph", "✅ Done");
    Ok(())
}

/// Explicit file, then discovered file, then a preset with overrides applied
fn resolve_config(args: &Args) -> Result<NeuroglyphConfig> {
    let overrides = args.overrides();
    if let Some(path) = &args.config {
        return load_config(Some(path), Some(&overrides))
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }
    if find_config_file().is_ok() {
        return load_config(None, Some(&overrides)).context("Failed to load discovered config");
    }

    let mut config = if args.planar {
        NeuroglyphConfig::planar_scene()
    } else {
        NeuroglyphConfig::default()
    };
    apply_environment_overrides(&mut config);
    apply_cli_overrides(&mut config, &overrides);
    Ok(config)
}

fn build_scene(args: &Args, config: &NeuroglyphConfig) -> Result<NeuralScene> {
    if let Some(path) = &args.points {
        let cloud = load_point_list(path, args.stride)
            .with_context(|| format!("Failed to load point list {}", path.display()))?;
        return NeuralScene::from_points(cloud, config).context("Failed to connect point list");
    }

    let field = match &args.mask {
        Some(path) => load_mask(path)
            .with_context(|| format!("Failed to load mask {}", path.display()))?,
        None => {
            info!(target: "neuroglyph", "No mask given; sampling a solid field");
            LuminanceField::solid(FALLBACK_FIELD_SIZE, FALLBACK_FIELD_SIZE, 255)
        }
    };
    NeuralScene::from_mask(&field, config).context("Failed to sample mask")
}

fn run_ticks(scene: &mut NeuralScene, ticks: u64, report_every: u64) {
    let mut triggers_fired = 0usize;
    let mut peak_active = 0usize;

    for _ in 0..ticks {
        let report = scene.tick();
        triggers_fired += report.triggers_fired.len();
        let stats = scene.activity_stats();
        peak_active = peak_active.max(stats.active_nodes);

        if report_every > 0 && report.tick % report_every == 0 {
            info!(
                target: "neuroglyph",
                "tick {:>5}: mean {:.4}, peak {:.3}, {} active nodes, {} active edges",
                report.tick,
                stats.mean_node,
                stats.peak_node,
                stats.active_nodes,
                stats.active_edges
            );
        }
    }

    let stats = scene.activity_stats();
    info!(
        target: "neuroglyph",
        "🔗 {} ticks: {} trigger firings, peak {} active nodes, final mean {:.4}",
        ticks,
        triggers_fired,
        peak_active,
        stats.mean_node
    );
}

fn run_detail(config: &NeuroglyphConfig, frames: u64) -> Result<()> {
    let mut view =
        DetailView::generate(config, Vec3::ZERO).context("Failed to generate neuron mesh")?;
    let mut pulses = 0u64;
    for _ in 0..frames {
        if view.step() {
            pulses += 1;
        }
    }
    let lit = view.intensity().iter().filter(|v| **v > 0.0).count();
    info!(
        target: "neuroglyph",
        "Detail view: {} vertices, {} triangles, {} pulses, {} vertices lit",
        view.mesh().vertex_count(),
        view.mesh().triangle_count(),
        pulses,
        lit
    );
    Ok(())
}
