//! Cutout: zero one random square

use image::RgbImage;
use rand::Rng;

use super::config::CutoutParams;
use crate::Result;
use crate::mask::Mask;
use crate::region::Region;
use crate::traits::MaskGenerator;
use maskaug_core::AugmentError;

impl MaskGenerator for CutoutParams {
    fn generate_mask<R: Rng + ?Sized>(&self, width: u32, height: u32, rng: &mut R) -> Result<Mask> {
        let size = self.mask_size;
        if size == 0 {
            return Err(AugmentError::range("mask_size", "must be at least 1"));
        }
        if size >= width || size >= height {
            return Err(AugmentError::range(
                "mask_size",
                format!("{} must be smaller than the image ({}x{})", size, width, height),
            ));
        }

        let region = Region::random_origin(rng, size, size, width, height);
        let mut mask = Mask::ones(width, height);
        mask.zero_region(&region);
        Ok(mask)
    }
}

/// Copy of `image` with a random `mask_size × mask_size` square zeroed on every channel
pub fn cutout<R: Rng + ?Sized>(image: &RgbImage, mask_size: u32, rng: &mut R) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    CutoutParams { mask_size }
        .generate_mask(width, height, rng)?
        .apply(image)
}

/// Copy of `image` with `region` zeroed; the region must lie inside the image
pub fn cutout_at(image: &RgbImage, region: Region) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    if !region.fits_within(width, height) {
        return Err(AugmentError::range(
            "region",
            format!("{:?} does not fit in {}x{}", region, width, height),
        ));
    }

    let mut mask = Mask::ones(width, height);
    mask.zero_region(&region);
    mask.apply(image)
}
