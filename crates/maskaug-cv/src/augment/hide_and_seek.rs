//! Hide-and-seek: zero a random number of random rectangles

use image::RgbImage;
use rand::Rng;

use super::config::HideAndSeekParams;
use crate::Result;
use crate::mask::Mask;
use crate::region::Region;
use crate::traits::MaskGenerator;
use maskaug_core::AugmentError;

impl MaskGenerator for HideAndSeekParams {
    fn generate_mask<R: Rng + ?Sized>(&self, width: u32, height: u32, rng: &mut R) -> Result<Mask> {
        if self.max_hidden_regions == 0 {
            return Err(AugmentError::range("max_hidden_regions", "must be at least 1"));
        }
        if width == 0 || height == 0 {
            return Err(AugmentError::range(
                "image",
                format!("cannot hide regions in an empty {}x{} image", width, height),
            ));
        }

        let mut mask = Mask::ones(width, height);
        let count = rng.gen_range(1..=self.max_hidden_regions);
        for _ in 0..count {
            mask.zero_region(&Region::random_span(rng, width, height));
        }
        Ok(mask)
    }
}

/// Copy of `image` with between 1 and `max_hidden_regions` random rectangles zeroed.
///
/// `num_regions` is accepted for compatibility with existing configs and ignored.
pub fn hide_and_seek<R: Rng + ?Sized>(
    image: &RgbImage,
    num_regions: u32,
    max_hidden_regions: u32,
    rng: &mut R,
) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    HideAndSeekParams {
        num_regions,
        max_hidden_regions,
    }
    .generate_mask(width, height, rng)?
    .apply(image)
}
