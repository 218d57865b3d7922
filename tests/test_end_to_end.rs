// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

/*!
End-to-end scenarios across sampling, connectivity and activity.
*/

use neuroglyph::prelude::*;
use neuroglyph::development::{parse_point_list, write_point_list};
use tempfile::tempdir;

fn quiet_planar_config() -> NeuroglyphConfig {
    let mut config = NeuroglyphConfig::planar_scene();
    config.activation.triggers.clear();
    config
}

#[test]
fn test_contagion_crosses_one_edge_per_tick() {
    // four collinear nodes 0.1 apart; threshold 0.13 links neighbours only
    let cloud = PointCloud::from_flat(
        Dimensionality::Planar,
        vec![0.0, 0.0, 0.1, 0.0, 0.2, 0.0, 0.3, 0.0],
    )
    .unwrap();
    let mut scene = NeuralScene::from_points(cloud, &quiet_planar_config()).unwrap();
    assert_eq!(scene.edge_index_buffer(), &[0, 1, 1, 2, 2, 3]);

    scene
        .simulator_mut()
        .set_activity(NeuronId(0), 1.0)
        .unwrap();
    let report = scene.tick();

    assert_eq!(report.tick, 1);
    assert_eq!(report.contagious_edges, 1);
    assert_eq!(scene.node_activity(), &[1.0, 1.0, 0.0, 0.0]);
    assert_eq!(scene.edge_activity(), &[1.0, 0.0, 0.0]);
}

#[test]
fn test_default_schedule_first_fires_at_tick_60() {
    let field = LuminanceField::solid(96, 96, 255);
    let mut config = NeuroglyphConfig::planar_scene();
    config.system.seed = Some(5);
    config.sampler.target_count = 300;
    let mut scene = NeuralScene::from_mask(&field, &config).unwrap();

    for _ in 0..59 {
        assert!(scene.tick().triggers_fired.is_empty());
    }
    assert!(scene.node_activity().iter().all(|v| *v == 0.0));

    let report = scene.tick();
    assert_eq!(report.triggers_fired, vec!["stride_pulse"]);
    assert!(scene.activity_stats().peak_node > 0.0);
}

#[test]
fn test_stimulus_lights_up_neighbourhood() {
    let field = LuminanceField::solid(64, 64, 255);
    let mut config = quiet_planar_config();
    config.system.seed = Some(9);
    let mut scene = NeuralScene::from_mask(&field, &config).unwrap();

    let target = scene.positions().point(0);
    scene.stimulate_at(Vec3::new(target.x, target.y, 0.0));
    let report = scene.tick();

    assert!(report.stimulated >= 1);
    assert!(scene.node_activity()[0] > 0.9);
}

#[test]
fn test_exported_points_rebuild_same_graph() {
    let field = LuminanceField::solid(64, 64, 255);
    let mut config = NeuroglyphConfig::default();
    config.system.seed = Some(21);
    config.sampler.target_count = 200;
    let scene = NeuralScene::from_mask(&field, &config).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("points.json");
    write_point_list(&path, scene.positions()).unwrap();
    let json = std::fs::read_to_string(&path).unwrap();
    let reloaded = parse_point_list(&json, 1).unwrap();

    let rebuilt = NeuralScene::from_points(reloaded, &config).unwrap();
    assert_eq!(rebuilt.edge_index_buffer(), scene.edge_index_buffer());
}
