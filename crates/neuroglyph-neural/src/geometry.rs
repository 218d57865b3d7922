// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Direction sampling and axis rotations used by the mesh generator

use core::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

/// Rotate `v` by `angle` radians about the unit vector `axis` (Rodrigues)
#[inline]
pub fn rotate_around(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    v * cos + axis.cross(v) * sin + axis * axis.dot(v) * (1.0 - cos)
}

/// Uniformly distributed direction on the unit sphere
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

/// Rotate `v` by a uniform angle in `[0, max_angle_deg)` about a random axis
///
/// The length of `v` is preserved.
pub fn perturb<R: Rng + ?Sized>(v: Vec3, max_angle_deg: f32, rng: &mut R) -> Vec3 {
    let angle = rng.gen::<f32>() * max_angle_deg * PI / 180.0;
    let axis = random_unit_vector(rng);
    rotate_around(v, axis, angle)
}

/// A unit vector perpendicular to the unit vector `v`
#[inline]
pub fn orthogonal_unit(v: Vec3) -> Vec3 {
    if v.x.abs() < 0.5 {
        Vec3::new(0.0, -v.z, v.y).normalize()
    } else {
        Vec3::new(-v.y, v.x, 0.0).normalize()
    }
}
