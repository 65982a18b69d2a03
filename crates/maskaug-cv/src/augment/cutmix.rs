//! Cutmix: paste a patch of the second image onto the first

use image::RgbImage;
use rand::Rng;

use super::mixup::{blend_labels, check_alpha};
use crate::Result;
use crate::region::Region;
use crate::utils::ImageUtils;
use maskaug_core::AugmentError;

/// Patch size `(cut_w, cut_h)` = `(W·sqrt(1 - alpha), H·sqrt(1 - alpha))`, truncated
pub fn cut_size(width: u32, height: u32, alpha: f64) -> (u32, u32) {
    let scale = (1.0 - alpha).sqrt();
    (
        (width as f64 * scale) as u32,
        (height as f64 * scale) as u32,
    )
}

/// Copy of `image1` with `region` replaced by the same pixels of `image2`
pub fn cutmix_at(image1: &RgbImage, image2: &RgbImage, region: Region) -> Result<RgbImage> {
    ImageUtils::ensure_same_dimensions(image1, image2)?;
    let (width, height) = image1.dimensions();
    if !region.fits_within(width, height) {
        return Err(AugmentError::range(
            "region",
            format!("{:?} does not fit in {}x{}", region, width, height),
        ));
    }

    let mut mixed = image1.clone();
    for y in region.y..region.bottom() {
        for x in region.x..region.right() {
            mixed.put_pixel(x, y, *image2.get_pixel(x, y));
        }
    }
    Ok(mixed)
}

/// Paste a random `cut_size` patch of `image2` onto a copy of `image1`.
///
/// The label is blended with `alpha`, not with the pasted area fraction, and box
/// coordinates are not clipped to the patch. Both are kept for compatibility with
/// existing datasets: the label mix only matches the pixel mix on average.
pub fn cutmix<R: Rng + ?Sized>(
    image1: &RgbImage,
    image2: &RgbImage,
    label1: &[f64],
    label2: &[f64],
    alpha: f64,
    rng: &mut R,
) -> Result<(RgbImage, Vec<f64>)> {
    check_alpha(alpha)?;
    ImageUtils::ensure_same_dimensions(image1, image2)?;

    let (width, height) = image1.dimensions();
    let (cut_w, cut_h) = cut_size(width, height, alpha);
    if cut_w >= width || cut_h >= height {
        return Err(AugmentError::range(
            "alpha",
            format!(
                "{} gives a {}x{} patch that does not fit strictly inside {}x{}",
                alpha, cut_w, cut_h, width, height
            ),
        ));
    }

    let label = blend_labels(label1, label2, alpha)?;
    let region = Region::random_origin(rng, cut_w, cut_h, width, height);
    let mixed = cutmix_at(image1, image2, region)?;

    Ok((mixed, label))
}
