// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Uniform spatial hash over a point cloud

use ahash::AHashMap;
use glam::Vec3;

use neuroglyph_neural::PointCloud;

pub type CellKey = (i32, i32, i32);

/// Point indices bucketed by cell; cell side equals the connect threshold so
/// any pair closer than the threshold sits in the same or an adjacent cell.
#[derive(Debug, Clone)]
pub struct UniformGrid {
    cell_size: f32,
    cells: AHashMap<CellKey, Vec<usize>>,
}

impl UniformGrid {
    pub fn build(cloud: &PointCloud, cell_size: f32) -> Self {
        let mut grid = Self {
            cell_size,
            cells: AHashMap::with_capacity(cloud.len()),
        };
        for (index, point) in cloud.points().enumerate() {
            let key = grid.cell_of(point);
            grid.cells.entry(key).or_default().push(index);
        }
        grid
    }

    /// Saturating float-to-int casts keep far-out points in edge cells
    #[inline]
    pub fn cell_of(&self, point: Vec3) -> CellKey {
        (
            (point.x / self.cell_size).floor() as i32,
            (point.y / self.cell_size).floor() as i32,
            (point.z / self.cell_size).floor() as i32,
        )
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Indices in `cell` and its 26 neighbours (8 when `planar`), in
    /// insertion order per cell
    pub fn neighbours(&self, cell: CellKey, planar: bool) -> impl Iterator<Item = usize> + '_ {
        let z_offsets: &'static [i32] = if planar { &[0] } else { &[-1, 0, 1] };
        let (cx, cy, cz) = cell;
        (-1..=1)
            .flat_map(move |dx| (-1..=1).map(move |dy| (dx, dy)))
            .flat_map(move |(dx, dy)| z_offsets.iter().map(move |&dz| (dx, dy, dz)))
            .filter_map(move |(dx, dy, dz)| {
                self.cells.get(&(
                    cx.saturating_add(dx),
                    cy.saturating_add(dy),
                    cz.saturating_add(dz),
                ))
            })
            .flat_map(|bucket| bucket.iter().copied())
    }
}
