// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Point clouds: neuron positions in a flat interleaved buffer
//!
//! Rendering consumers upload `as_slice()` directly, so positions are kept as
//! `[x0, y0, (z0,) x1, y1, ...]` rather than a `Vec<Vec3>`.

use glam::Vec3;

use super::error::{NeuralError, NeuralResult};
use super::ids::NeuronId;

/// Number of floats stored per point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimensionality {
    /// x, y
    Planar,
    /// x, y, z
    Volumetric,
}

impl Dimensionality {
    #[inline]
    pub const fn components(self) -> usize {
        match self {
            Dimensionality::Planar => 2,
            Dimensionality::Volumetric => 3,
        }
    }
}

/// Neuron positions, planar or volumetric
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    dimensionality: Dimensionality,
    coords: Vec<f32>,
}

impl PointCloud {
    pub fn new(dimensionality: Dimensionality) -> Self {
        Self {
            dimensionality,
            coords: Vec::new(),
        }
    }

    pub fn with_capacity(dimensionality: Dimensionality, points: usize) -> Self {
        Self {
            dimensionality,
            coords: Vec::with_capacity(points * dimensionality.components()),
        }
    }

    /// Wrap a host-provided flat buffer
    ///
    /// # Errors
    ///
    /// `ArraySizeMismatch` if the length is not a multiple of the component
    /// count, `NonFiniteCoordinate` on NaN or infinite values.
    pub fn from_flat(dimensionality: Dimensionality, coords: Vec<f32>) -> NeuralResult<Self> {
        let components = dimensionality.components();
        if coords.len() % components != 0 {
            return Err(NeuralError::ArraySizeMismatch {
                len: coords.len(),
                components,
            });
        }
        if let Some(index) = coords.iter().position(|c| !c.is_finite()) {
            return Err(NeuralError::NonFiniteCoordinate { index });
        }
        Ok(Self {
            dimensionality,
            coords,
        })
    }

    /// Append a point; `z` is dropped for planar clouds
    pub fn push(&mut self, point: Vec3) {
        self.coords.push(point.x);
        self.coords.push(point.y);
        if self.dimensionality == Dimensionality::Volumetric {
            self.coords.push(point.z);
        }
    }

    #[inline]
    pub fn dimensionality(&self) -> Dimensionality {
        self.dimensionality
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len() / self.dimensionality.components()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.coords
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.coords
    }

    /// Position of point `index` (z = 0 for planar clouds)
    ///
    /// # Panics
    ///
    /// If `index >= len()`.
    #[inline]
    pub fn point(&self, index: usize) -> Vec3 {
        let c = self.dimensionality.components();
        let p = &self.coords[index * c..index * c + c];
        match self.dimensionality {
            Dimensionality::Planar => Vec3::new(p[0], p[1], 0.0),
            Dimensionality::Volumetric => Vec3::new(p[0], p[1], p[2]),
        }
    }

    /// Checked variant of [`PointCloud::point`]
    pub fn get(&self, id: NeuronId) -> NeuralResult<Vec3> {
        if id.index() < self.len() {
            Ok(self.point(id.index()))
        } else {
            Err(NeuralError::NeuronOutOfRange {
                id,
                count: self.len(),
            })
        }
    }

    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.len()).map(move |i| self.point(i))
    }

    /// Squared Euclidean distance between two stored points
    #[inline]
    pub fn distance_squared(&self, i: usize, j: usize) -> f32 {
        self.point(i).distance_squared(self.point(j))
    }

    /// Axis-aligned bounds, `None` for an empty cloud
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.points();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Bounds { min, max })
    }
}

/// Axis-aligned bounding box of a point cloud
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

/// Camera translate/zoom that frames a cloud in a [-1, 1] viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFit {
    /// Negated centre of the bounds (x, y)
    pub translate: [f32; 2],
    pub zoom: f32,
    /// Height over width of the bounds
    pub aspect: f32,
}

impl Bounds {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// `size.y / size.x`, or 1.0 for a degenerate x extent
    pub fn aspect(&self) -> f32 {
        let size = self.size();
        if size.x > 0.0 {
            size.y / size.x
        } else {
            1.0
        }
    }

    /// Zoom that fits the x/y extent into the [-1, 1] viewport, scaled by `margin`
    ///
    /// Hosts use a margin of 0.65. Degenerate axes are ignored; a single point
    /// gets zoom `margin`.
    pub fn fit(&self, margin: f32) -> CameraFit {
        let size = self.size();
        let zoom_x = if size.x > 0.0 { 2.0 / size.x } else { f32::INFINITY };
        let zoom_y = if size.y > 0.0 { 2.0 / size.y } else { f32::INFINITY };
        let zoom = zoom_x.min(zoom_y);
        let zoom = if zoom.is_finite() { zoom * margin } else { margin };
        let center = self.center();
        CameraFit {
            translate: [-center.x, -center.y],
            zoom,
            aspect: self.aspect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_rejects_ragged_buffer() {
        let err = PointCloud::from_flat(Dimensionality::Volumetric, vec![0.0; 7]).unwrap_err();
        assert_eq!(
            err,
            NeuralError::ArraySizeMismatch {
                len: 7,
                components: 3
            }
        );
    }

    #[test]
    fn test_from_flat_rejects_nan() {
        let err =
            PointCloud::from_flat(Dimensionality::Planar, vec![0.0, 1.0, f32::NAN, 2.0]).unwrap_err();
        assert_eq!(err, NeuralError::NonFiniteCoordinate { index: 2 });
    }

    #[test]
    fn test_planar_push_drops_z() {
        let mut cloud = PointCloud::new(Dimensionality::Planar);
        cloud.push(Vec3::new(0.5, -0.5, 9.0));
        assert_eq!(cloud.as_slice(), &[0.5, -0.5]);
        assert_eq!(cloud.point(0), Vec3::new(0.5, -0.5, 0.0));
        assert_eq!(cloud.len(), 1);
    }

    #[test]
    fn test_get_out_of_range() {
        let cloud = PointCloud::from_flat(Dimensionality::Planar, vec![0.0, 0.0]).unwrap();
        assert!(cloud.get(NeuronId(0)).is_ok());
        assert!(matches!(
            cloud.get(NeuronId(1)),
            Err(NeuralError::NeuronOutOfRange { count: 1, .. })
        ));
    }

    #[test]
    fn test_bounds_and_fit() {
        let cloud = PointCloud::from_flat(
            Dimensionality::Planar,
            vec![-0.5, -0.25, 0.5, 0.25, 0.0, 0.0],
        )
        .unwrap();

        let bounds = cloud.bounds().unwrap();
        assert_eq!(bounds.center(), Vec3::ZERO);
        assert_eq!(bounds.size(), Vec3::new(1.0, 0.5, 0.0));
        assert!((bounds.aspect() - 0.5).abs() < 1e-6);

        let fit = bounds.fit(0.65);
        // min(2/1, 2/0.5) * 0.65
        assert!((fit.zoom - 1.3).abs() < 1e-6);
        assert_eq!(fit.translate, [-0.0, -0.0]);
    }

    #[test]
    fn test_single_point_fit() {
        let cloud = PointCloud::from_flat(Dimensionality::Planar, vec![0.2, 0.4]).unwrap();
        let fit = cloud.bounds().unwrap().fit(0.65);
        assert_eq!(fit.zoom, 0.65);
        assert_eq!(fit.translate, [-0.2, -0.4]);
        assert_eq!(fit.aspect, 1.0);
    }

    #[test]
    fn test_empty_cloud_has_no_bounds() {
        assert!(PointCloud::new(Dimensionality::Volumetric).bounds().is_none());
    }
}
