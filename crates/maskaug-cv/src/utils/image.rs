//! Image loading and saving

use crate::Result;
use image::RgbImage;
use maskaug_core::AugmentError;
use std::path::Path;

/// Image utility functions around the `image` crate
pub struct ImageUtils;

impl ImageUtils {
    /// Load any supported raster as 8-bit RGB
    pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| AugmentError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(image.to_rgb8())
    }

    /// Save with the format implied by the file extension
    pub fn save_rgb<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
        let path = path.as_ref();
        image.save(path).map_err(|source| AugmentError::ImageSave {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fail with `ShapeMismatch` unless both images have the same width and height
    pub fn ensure_same_dimensions(reference: &RgbImage, other: &RgbImage) -> Result<()> {
        if reference.dimensions() != other.dimensions() {
            return Err(AugmentError::ShapeMismatch {
                expected: reference.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }
}
