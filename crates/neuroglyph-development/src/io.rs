// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Asset loaders: mask images and JSON point lists
//!
//! Point lists are JSON arrays of `[x, y, z]` triples, the format written by
//! the offline mesh exporter and by [`write_point_list`].

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use tracing::{debug, info};

use neuroglyph_neural::{Dimensionality, PointCloud};

use crate::neurogenesis::LuminanceField;
use crate::types::{DevResult, DevelopmentError};

/// Decode a mask image file (any format the `image` crate reads)
pub fn load_mask(path: impl AsRef<Path>) -> DevResult<LuminanceField> {
    let path = path.as_ref();
    let image = image::open(path)?;
    let field = LuminanceField::from_image(&image);
    info!(
        target: "neuroglyph-development",
        "Loaded mask {} ({}x{})",
        path.display(),
        field.width(),
        field.height()
    );
    Ok(field)
}

/// Decode an in-memory encoded mask image
pub fn decode_mask(bytes: &[u8]) -> DevResult<LuminanceField> {
    let image = image::load_from_memory(bytes)?;
    Ok(LuminanceField::from_image(&image))
}

/// Parse a JSON point list, keeping every `stride`-th point
///
/// # Errors
///
/// `PointList` for malformed JSON, `InvalidConfig` for a zero stride.
pub fn parse_point_list(json: &str, stride: usize) -> DevResult<PointCloud> {
    if stride == 0 {
        return Err(DevelopmentError::InvalidConfig(
            "point list stride must be at least 1".to_string(),
        ));
    }
    let triples: Vec<[f32; 3]> = serde_json::from_str(json)?;
    let total = triples.len();
    let coords: Vec<f32> = triples.into_iter().step_by(stride).flatten().collect();
    let cloud = PointCloud::from_flat(Dimensionality::Volumetric, coords)?;
    debug!(
        target: "neuroglyph-development",
        "Parsed {} of {} points (stride {})",
        cloud.len(),
        total,
        stride
    );
    Ok(cloud)
}

/// Read and parse a JSON point list file
pub fn load_point_list(path: impl AsRef<Path>, stride: usize) -> DevResult<PointCloud> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let cloud = parse_point_list(&json, stride)?;
    info!(
        target: "neuroglyph-development",
        "Loaded {} points from {}",
        cloud.len(),
        path.display()
    );
    Ok(cloud)
}

/// Write a cloud as a JSON list of `[x, y, z]` triples (z = 0 for planar)
pub fn write_point_list(path: impl AsRef<Path>, cloud: &PointCloud) -> DevResult<()> {
    let triples: Vec<[f32; 3]> = cloud.points().map(|p| p.to_array()).collect();
    let writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(writer, &triples)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_point_list_with_stride() {
        let json = "[[0,0,0],[1,1,1],[2,2,2],[3,3,3],[4,4,4]]";
        let cloud = parse_point_list(json, 2).unwrap();
        assert_eq!(cloud.len(), 3);
        assert_eq!(
            cloud.as_slice(),
            &[0.0, 0.0, 0.0, 2.0, 2.0, 2.0, 4.0, 4.0, 4.0]
        );
    }

    #[test]
    fn test_parse_point_list_errors() {
        assert!(matches!(
            parse_point_list("[[0, 0]]", 1),
            Err(DevelopmentError::PointList(_))
        ));
        assert!(matches!(
            parse_point_list("[]", 0),
            Err(DevelopmentError::InvalidConfig(_))
        ));
        assert!(parse_point_list("[]", 1).unwrap().is_empty());
    }

    #[test]
    fn test_point_list_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("points.json");
        let cloud = PointCloud::from_flat(
            Dimensionality::Planar,
            vec![0.25, -0.5, 0.75, 1.0],
        )
        .unwrap();

        write_point_list(&path, &cloud).unwrap();
        let loaded = load_point_list(&path, 1).unwrap();

        assert_eq!(loaded.dimensionality(), Dimensionality::Volumetric);
        assert_eq!(loaded.as_slice(), &[0.25, -0.5, 0.0, 0.75, 1.0, 0.0]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = load_point_list(dir.path().join("absent.json"), 1);
        assert!(matches!(result, Err(DevelopmentError::Io(_))));
    }

    #[test]
    fn test_decode_mask_png() {
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(1, 1, image::Rgba([200, 200, 200, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let field = decode_mask(&bytes).unwrap();
        assert_eq!((field.width(), field.height()), (3, 2));
        assert_eq!(field.candidates(80.0), vec![(1, 1)]);
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        assert!(matches!(
            decode_mask(b"not an image"),
            Err(DevelopmentError::MaskDecode(_))
        ));
    }
}
