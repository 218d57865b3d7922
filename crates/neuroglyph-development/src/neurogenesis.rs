// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Neurogenesis - placing neurons from a luminance mask.

Bright pixels of the mask form a candidate pool. Candidates are drawn at
random without replacement and accepted when no accepted pixel lies closer
than the minimum spacing, giving a Poisson-disk-like distribution. Accepted
pixels are normalized to [-1, 1] and then either:

- **planar**: warped by a low-frequency sine field and jittered, or
- **dome**: lifted onto a hemispherical dome over the unit disk.

```text
mask ─▶ candidates (mean RGB > threshold, row-major)
          │ draw random index, swap-remove
          ▼
      spacing check ─▶ normalize ─▶ warp/jitter | dome lift ─▶ PointCloud
```
*/

use ahash::AHashMap;
use glam::Vec3;
use rand::Rng;
use tracing::{debug, info};

use neuroglyph_config::{SamplerConfig, SamplingMode};
use neuroglyph_neural::{Dimensionality, PointCloud};

use crate::types::{DevResult, DevelopmentError};

/// Per-pixel brightness of a mask image
#[derive(Debug, Clone, PartialEq)]
pub struct LuminanceField {
    width: u32,
    height: u32,
    /// mean(R, G, B) per pixel, row-major
    brightness: Vec<f32>,
}

impl LuminanceField {
    /// Build from raw interleaved bytes
    ///
    /// `channels` is 1 (grey), 3 (RGB) or 4 (RGBA); alpha is ignored.
    ///
    /// # Errors
    ///
    /// `InvalidMask` for an unsupported channel count or a buffer whose length
    /// is not `width * height * channels`.
    pub fn from_raw(width: u32, height: u32, channels: u8, bytes: &[u8]) -> DevResult<Self> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(DevelopmentError::InvalidMask(format!(
                "unsupported channel count {}",
                channels
            )));
        }
        let stride = channels as usize;
        let expected = width as usize * height as usize * stride;
        if bytes.len() != expected {
            return Err(DevelopmentError::InvalidMask(format!(
                "{}x{}x{} mask needs {} bytes, got {}",
                width,
                height,
                channels,
                expected,
                bytes.len()
            )));
        }

        let brightness = bytes
            .chunks_exact(stride)
            .map(|px| {
                if stride == 1 {
                    px[0] as f32
                } else {
                    (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0
                }
            })
            .collect();

        Ok(Self {
            width,
            height,
            brightness,
        })
    }

    /// Uniform field; stands in for "no mask" with `value` above the threshold
    pub fn solid(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            brightness: vec![value as f32; width as usize * height as usize],
        }
    }

    pub fn from_image(image: &image::DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let brightness = rgba
            .pixels()
            .map(|p| (p[0] as f32 + p[1] as f32 + p[2] as f32) / 3.0)
            .collect();
        Self {
            width,
            height,
            brightness,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// # Panics
    ///
    /// If `(x, y)` is outside the field.
    #[inline]
    pub fn brightness(&self, x: u32, y: u32) -> f32 {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of range", x, y);
        self.brightness[y as usize * self.width as usize + x as usize]
    }

    /// Pixels strictly brighter than `threshold`, in row-major order
    pub fn candidates(&self, threshold: f32) -> Vec<(u32, u32)> {
        let width = self.width as usize;
        self.brightness
            .iter()
            .enumerate()
            .filter(|(_, b)| **b > threshold)
            .map(|(i, _)| ((i % width) as u32, (i / width) as u32))
            .collect()
    }
}

/// Counters describing one sampling run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleStats {
    pub candidates: usize,
    pub drawn: usize,
    pub spacing_rejections: usize,
    pub dome_rejections: usize,
    pub accepted: usize,
}

/// Result of [`MaskSampler::sample`]
#[derive(Debug, Clone)]
pub struct SampleOutcome {
    pub points: PointCloud,
    /// Accepted pixel coordinates, parallel to `points`
    pub pixels: Vec<(u32, u32)>,
    pub stats: SampleStats,
}

/// Hash grid over accepted pixels so each spacing check touches 3x3 cells
struct SpacingGrid {
    cell: f32,
    min_dist_sq: f32,
    cells: AHashMap<(i64, i64), Vec<(u32, u32)>>,
}

impl SpacingGrid {
    fn new(min_spacing: f32) -> Self {
        Self {
            cell: min_spacing.max(1.0),
            min_dist_sq: min_spacing * min_spacing,
            cells: AHashMap::new(),
        }
    }

    fn key(&self, x: u32, y: u32) -> (i64, i64) {
        (
            (x as f32 / self.cell).floor() as i64,
            (y as f32 / self.cell).floor() as i64,
        )
    }

    /// True when every accepted pixel is at least `min_spacing` away
    fn is_clear(&self, x: u32, y: u32) -> bool {
        let (cx, cy) = self.key(x, y);
        for gx in cx - 1..=cx + 1 {
            for gy in cy - 1..=cy + 1 {
                if let Some(bucket) = self.cells.get(&(gx, gy)) {
                    for &(ax, ay) in bucket {
                        let dx = x as f32 - ax as f32;
                        let dy = y as f32 - ay as f32;
                        if dx * dx + dy * dy < self.min_dist_sq {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    fn insert(&mut self, x: u32, y: u32) {
        let key = self.key(x, y);
        self.cells.entry(key).or_default().push((x, y));
    }
}

/// Spacing-constrained point sampler
#[derive(Debug, Clone)]
pub struct MaskSampler {
    config: SamplerConfig,
}

impl MaskSampler {
    /// # Errors
    ///
    /// `InvalidConfig` for a non-positive spacing or non-finite parameters.
    pub fn new(config: SamplerConfig) -> DevResult<Self> {
        if !(config.min_spacing_px > 0.0 && config.min_spacing_px.is_finite()) {
            return Err(DevelopmentError::InvalidConfig(format!(
                "min_spacing_px must be positive, got {}",
                config.min_spacing_px
            )));
        }
        let finite = [
            config.brightness_threshold,
            config.warp_amplitude,
            config.warp_frequency,
            config.jitter,
            config.dome_depth,
            config.dome_jitter,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(DevelopmentError::InvalidConfig(
                "sampler parameters must be finite".to_string(),
            ));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Dimensionality of the clouds this sampler produces
    pub fn dimensionality(&self) -> Dimensionality {
        match self.config.mode {
            SamplingMode::Planar => Dimensionality::Planar,
            SamplingMode::Dome => Dimensionality::Volumetric,
        }
    }

    /// Sample up to `target_count` points from `field`
    ///
    /// Fewer points than requested is a valid result when the mask runs out
    /// of spaced candidates; an empty or dark mask yields an empty cloud.
    pub fn sample<R: Rng + ?Sized>(&self, field: &LuminanceField, rng: &mut R) -> SampleOutcome {
        let cfg = &self.config;
        let mut pool = field.candidates(cfg.brightness_threshold);
        let target = cfg.target_count;

        let mut stats = SampleStats {
            candidates: pool.len(),
            ..SampleStats::default()
        };
        let mut points = PointCloud::with_capacity(self.dimensionality(), target.min(pool.len()));
        let mut pixels = Vec::with_capacity(target.min(pool.len()));
        let mut spacing = SpacingGrid::new(cfg.min_spacing_px);

        let w = field.width() as f32;
        let h = field.height() as f32;

        while pixels.len() < target && !pool.is_empty() {
            let index = rng.gen_range(0..pool.len());
            let (x, y) = pool.swap_remove(index);
            stats.drawn += 1;

            let nx = (x as f32 / w) * 2.0 - 1.0;
            let ny = -((y as f32 / h) * 2.0 - 1.0);

            let point = match cfg.mode {
                SamplingMode::Planar => {
                    if !spacing.is_clear(x, y) {
                        stats.spacing_rejections += 1;
                        continue;
                    }
                    let wx = nx + cfg.warp_amplitude * (ny * cfg.warp_frequency).sin();
                    let wy = ny + cfg.warp_amplitude * (nx * cfg.warp_frequency).cos();
                    let jx = (rng.gen::<f32>() - 0.5) * cfg.jitter;
                    let jy = (rng.gen::<f32>() - 0.5) * cfg.jitter;
                    Vec3::new(wx + jx, wy + jy, 0.0)
                }
                SamplingMode::Dome => {
                    let r2 = nx * nx + ny * ny;
                    if r2 > 1.0 {
                        stats.dome_rejections += 1;
                        continue;
                    }
                    if !spacing.is_clear(x, y) {
                        stats.spacing_rejections += 1;
                        continue;
                    }
                    let z = (1.0 - r2).sqrt() * cfg.dome_depth
                        + (rng.gen::<f32>() - 0.5) * cfg.dome_jitter;
                    let jx = (rng.gen::<f32>() - 0.5) * cfg.jitter;
                    let jy = (rng.gen::<f32>() - 0.5) * cfg.jitter;
                    Vec3::new(nx + jx, ny + jy, z)
                }
            };

            spacing.insert(x, y);
            pixels.push((x, y));
            points.push(point);
        }

        stats.accepted = pixels.len();

        info!(
            target: "neuroglyph-development",
            "🧬 Sampled {} neurons ({:?}) from {} candidates",
            stats.accepted,
            cfg.mode,
            stats.candidates
        );
        if stats.accepted < target {
            debug!(
                target: "neuroglyph-development",
                "Mask exhausted before target: {}/{} accepted, {} spacing rejections, {} outside dome",
                stats.accepted,
                target,
                stats.spacing_rejections,
                stats.dome_rejections
            );
        }

        SampleOutcome {
            points,
            pixels,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuroglyph_neural::seeded_rng;

    fn planar_config() -> SamplerConfig {
        SamplerConfig {
            mode: SamplingMode::Planar,
            ..SamplerConfig::default()
        }
    }

    #[test]
    fn test_brightness_is_mean_of_rgb() {
        // 2x1 RGBA: (90, 90, 90) and (255, 0, 0)
        let field =
            LuminanceField::from_raw(2, 1, 4, &[90, 90, 90, 255, 255, 0, 0, 255]).unwrap();
        assert_eq!(field.brightness(0, 0), 90.0);
        assert_eq!(field.brightness(1, 0), 85.0);
        assert_eq!(field.candidates(80.0), vec![(0, 0), (1, 0)]);
        assert_eq!(field.candidates(85.0), vec![(0, 0)]);
    }

    #[test]
    fn test_from_raw_rejects_short_buffer() {
        let result = LuminanceField::from_raw(4, 4, 3, &[0; 10]);
        assert!(matches!(result, Err(DevelopmentError::InvalidMask(_))));
        assert!(LuminanceField::from_raw(1, 1, 2, &[0, 0]).is_err());
    }

    #[test]
    fn test_candidates_row_major() {
        let mut bytes = vec![0u8; 3 * 2];
        bytes[1] = 200; // (1, 0)
        bytes[3] = 200; // (0, 1)
        let field = LuminanceField::from_raw(3, 2, 1, &bytes).unwrap();
        assert_eq!(field.candidates(80.0), vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn test_dark_mask_yields_nothing() {
        let sampler = MaskSampler::new(planar_config()).unwrap();
        let field = LuminanceField::solid(32, 32, 10);
        let outcome = sampler.sample(&field, &mut seeded_rng(Some(1)));
        assert!(outcome.points.is_empty());
        assert_eq!(outcome.stats.candidates, 0);
    }

    #[test]
    fn test_target_count_bounds_output() {
        let sampler = MaskSampler::new(SamplerConfig {
            target_count: 5,
            ..planar_config()
        })
        .unwrap();
        let field = LuminanceField::solid(100, 100, 255);
        let outcome = sampler.sample(&field, &mut seeded_rng(Some(2)));
        assert_eq!(outcome.points.len(), 5);
        assert_eq!(outcome.pixels.len(), 5);
        assert_eq!(outcome.points.dimensionality(), Dimensionality::Planar);
    }

    #[test]
    fn test_single_pixel_normalization() {
        // One bright pixel at (0, 0) of a 4x4 mask, no warp or jitter
        let mut bytes = vec![0u8; 16];
        bytes[0] = 255;
        let field = LuminanceField::from_raw(4, 4, 1, &bytes).unwrap();
        let sampler = MaskSampler::new(SamplerConfig {
            warp_amplitude: 0.0,
            jitter: 0.0,
            ..planar_config()
        })
        .unwrap();

        let outcome = sampler.sample(&field, &mut seeded_rng(Some(3)));
        assert_eq!(outcome.points.as_slice(), &[-1.0, 1.0]);
        assert_eq!(outcome.pixels, vec![(0, 0)]);
    }

    #[test]
    fn test_spacing_rejects_neighbours() {
        // Two bright pixels 3 px apart with 6 px spacing: only one survives
        let mut bytes = vec![0u8; 10];
        bytes[2] = 255;
        bytes[5] = 255;
        let field = LuminanceField::from_raw(10, 1, 1, &bytes).unwrap();
        let sampler = MaskSampler::new(planar_config()).unwrap();

        let outcome = sampler.sample(&field, &mut seeded_rng(Some(4)));
        assert_eq!(outcome.stats.accepted, 1);
        assert_eq!(outcome.stats.spacing_rejections, 1);
        assert_eq!(outcome.stats.drawn, 2);
    }

    #[test]
    fn test_dome_rejects_corners_and_lifts_centre() {
        let sampler = MaskSampler::new(SamplerConfig {
            mode: SamplingMode::Dome,
            min_spacing_px: 1.0,
            target_count: usize::MAX,
            jitter: 0.0,
            dome_jitter: 0.0,
            ..SamplerConfig::default()
        })
        .unwrap();
        let field = LuminanceField::solid(8, 8, 255);

        let outcome = sampler.sample(&field, &mut seeded_rng(Some(5)));
        assert!(outcome.stats.dome_rejections > 0);
        assert_eq!(
            outcome.stats.accepted + outcome.stats.dome_rejections,
            outcome.stats.candidates
        );
        for p in outcome.points.points() {
            let r2 = p.x * p.x + p.y * p.y;
            assert!(r2 <= 1.0);
            assert!((p.z - (1.0 - r2).sqrt() * 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_invalid_spacing_rejected() {
        let result = MaskSampler::new(SamplerConfig {
            min_spacing_px: 0.0,
            ..planar_config()
        });
        assert!(matches!(result, Err(DevelopmentError::InvalidConfig(_))));
    }
}
