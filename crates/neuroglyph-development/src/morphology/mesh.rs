// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Triangle soup buffers and the sphere/cylinder tessellators that fill them

use core::f32::consts::{PI, TAU};

use glam::Vec3;
use neuroglyph_neural::{orthogonal_unit, rotate_around};

/// Flat triangle positions with matching per-vertex normals
///
/// 3 floats per vertex, 3 vertices per triangle, no index buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeuronMesh {
    positions: Vec<f32>,
    normals: Vec<f32>,
}

impl NeuronMesh {
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[inline]
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Hand the buffers to a renderer: `(positions, normals)`
    pub fn into_buffers(self) -> (Vec<f32>, Vec<f32>) {
        (self.positions, self.normals)
    }
}

/// Accumulates triangles; consumed by [`MeshBuilder::finish`]
#[derive(Debug, Default)]
pub struct MeshBuilder {
    positions: Vec<f32>,
    normals: Vec<f32>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn push_vertex(&mut self, position: Vec3, normal: Vec3) {
        self.positions.extend_from_slice(&position.to_array());
        self.normals.extend_from_slice(&normal.to_array());
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 9
    }

    /// UV sphere: `lat_bands * long_bands` cells, two triangles each,
    /// normals pointing radially out of `center`
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, lat_bands: u32, long_bands: u32) {
        let spherical = |theta: f32, phi: f32| {
            Vec3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            )
        };

        for lat in 0..lat_bands {
            let theta1 = lat as f32 * PI / lat_bands as f32;
            let theta2 = (lat + 1) as f32 * PI / lat_bands as f32;

            for lon in 0..long_bands {
                let phi1 = lon as f32 * TAU / long_bands as f32;
                let phi2 = (lon + 1) as f32 * TAU / long_bands as f32;

                let n1 = spherical(theta1, phi1);
                let n2 = spherical(theta1, phi2);
                let n3 = spherical(theta2, phi2);
                let n4 = spherical(theta2, phi1);

                for n in [n1, n2, n3, n1, n3, n4] {
                    self.push_vertex(center + n * radius, n);
                }
            }
        }
    }

    /// Open cylinder from `start` to `end`, `2 * segments` triangles, no caps
    ///
    /// Returns `false` (and emits nothing) when `start == end`, since the
    /// axis is undefined.
    pub fn add_cylinder(&mut self, start: Vec3, end: Vec3, radius: f32, segments: u32) -> bool {
        let Some(axis) = (end - start).try_normalize() else {
            return false;
        };
        let base = orthogonal_unit(axis);
        let step = TAU / segments as f32;

        for i in 0..segments {
            let d1 = rotate_around(base, axis, i as f32 * step);
            let d2 = rotate_around(base, axis, (i + 1) as f32 * step);

            let s1 = start + d1 * radius;
            let s2 = start + d2 * radius;
            let e1 = end + d1 * radius;
            let e2 = end + d2 * radius;

            self.push_vertex(s1, d1);
            self.push_vertex(s2, d2);
            self.push_vertex(e1, d1);
            self.push_vertex(e1, d1);
            self.push_vertex(s2, d2);
            self.push_vertex(e2, d2);
        }
        true
    }

    pub fn finish(self) -> NeuronMesh {
        NeuronMesh {
            positions: self.positions,
            normals: self.normals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertices(buffer: &[f32]) -> impl Iterator<Item = Vec3> + '_ {
        buffer.chunks_exact(3).map(|c| Vec3::new(c[0], c[1], c[2]))
    }

    #[test]
    fn test_sphere_triangle_count_and_radius() {
        let mut builder = MeshBuilder::new();
        let center = Vec3::new(1.0, 2.0, 3.0);
        builder.add_sphere(center, 0.08, 10, 10);
        let mesh = builder.finish();

        assert_eq!(mesh.triangle_count(), 2 * 10 * 10);
        assert_eq!(mesh.positions().len(), mesh.normals().len());
        for (p, n) in vertices(mesh.positions()).zip(vertices(mesh.normals())) {
            assert!(((p - center).length() - 0.08).abs() < 1e-5);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cylinder_ring_lies_on_radius() {
        let mut builder = MeshBuilder::new();
        let start = Vec3::ZERO;
        let end = Vec3::new(0.0, -0.2, 0.0);
        assert!(builder.add_cylinder(start, end, 0.025, 12));
        let mesh = builder.finish();

        assert_eq!(mesh.triangle_count(), 24);
        let axis = (end - start).normalize();
        for (p, n) in vertices(mesh.positions()).zip(vertices(mesh.normals())) {
            // normals are ring directions: unit length, perpendicular to the axis
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.dot(axis).abs() < 1e-5);
            // every vertex sits `radius` away from the axis line
            let along = (p - start).dot(axis);
            let radial = (p - start) - axis * along;
            assert!((radial.length() - 0.025).abs() < 1e-5);
        }
    }

    #[test]
    fn test_degenerate_cylinder_emits_nothing() {
        let mut builder = MeshBuilder::new();
        assert!(!builder.add_cylinder(Vec3::ONE, Vec3::ONE, 0.1, 8));
        assert!(builder.finish().is_empty());
    }
}
