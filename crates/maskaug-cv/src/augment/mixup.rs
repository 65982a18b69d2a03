//! Mixup: convex combination of two images and their labels

use image::{Rgb, RgbImage};

use crate::Result;
use crate::utils::ImageUtils;
use maskaug_core::AugmentError;

pub(crate) fn check_alpha(alpha: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(AugmentError::range(
            "alpha",
            format!("{} is outside [0, 1]", alpha),
        ));
    }
    Ok(())
}

/// `alpha * label1 + (1 - alpha) * label2`, element-wise
pub fn blend_labels(label1: &[f64], label2: &[f64], alpha: f64) -> Result<Vec<f64>> {
    check_alpha(alpha)?;
    if label1.len() != label2.len() {
        return Err(AugmentError::ShapeMismatch {
            expected: (label1.len() as u32, 1),
            actual: (label2.len() as u32, 1),
        });
    }

    Ok(label1
        .iter()
        .zip(label2)
        .map(|(a, b)| alpha * a + (1.0 - alpha) * b)
        .collect())
}

fn blend_channel(a: u8, b: u8, alpha: f64) -> u8 {
    (alpha * a as f64 + (1.0 - alpha) * b as f64)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Blend two same-sized images and their labels with weight `alpha` on the first.
///
/// Pixels are rounded to the nearest integer. Both inputs are left untouched.
pub fn mixup(
    image1: &RgbImage,
    image2: &RgbImage,
    label1: &[f64],
    label2: &[f64],
    alpha: f64,
) -> Result<(RgbImage, Vec<f64>)> {
    check_alpha(alpha)?;
    ImageUtils::ensure_same_dimensions(image1, image2)?;
    let label = blend_labels(label1, label2, alpha)?;

    let (width, height) = image1.dimensions();
    let image = RgbImage::from_fn(width, height, |x, y| {
        let Rgb(a) = *image1.get_pixel(x, y);
        let Rgb(b) = *image2.get_pixel(x, y);
        Rgb([
            blend_channel(a[0], b[0], alpha),
            blend_channel(a[1], b[1], alpha),
            blend_channel(a[2], b[2], alpha),
        ])
    });

    Ok((image, label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32, offset: u8) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                (x as u8).wrapping_mul(7).wrapping_add(offset),
                (y as u8).wrapping_mul(13),
                offset,
            ])
        })
    }

    #[test]
    fn test_identical_inputs_are_a_fixed_point() -> Result<()> {
        let image = gradient(16, 9, 40);
        let label = [10.0, 20.0, 30.0, 40.0, 2.0];

        for alpha in [0.0, 0.1, 0.3, 0.5, 0.77, 1.0] {
            let (mixed, mixed_label) = mixup(&image, &image, &label, &label, alpha)?;
            assert_eq!(mixed, image);
            for (got, want) in mixed_label.iter().zip(label) {
                assert!((got - want).abs() < 1e-4);
            }
        }
        Ok(())
    }

    #[test]
    fn test_endpoints_select_one_input() -> Result<()> {
        let image1 = gradient(8, 8, 0);
        let image2 = gradient(8, 8, 200);
        let label1 = [1.0, 2.0, 3.0, 4.0, 0.0];
        let label2 = [5.0, 6.0, 7.0, 8.0, 1.0];

        let (mixed, label) = mixup(&image1, &image2, &label1, &label2, 0.0)?;
        assert_eq!(mixed, image2);
        assert_eq!(label, label2);

        let (mixed, label) = mixup(&image1, &image2, &label1, &label2, 1.0)?;
        assert_eq!(mixed, image1);
        assert_eq!(label, label1);
        Ok(())
    }

    #[test]
    fn test_half_blend_rounds() -> Result<()> {
        let image1 = RgbImage::from_pixel(2, 2, Rgb([0, 10, 255]));
        let image2 = RgbImage::from_pixel(2, 2, Rgb([255, 11, 255]));
        let (mixed, _) = mixup(&image1, &image2, &[], &[], 0.5)?;
        // 127.5 and 10.5 round away from zero
        assert_eq!(mixed.get_pixel(1, 1).0, [128, 11, 255]);
        Ok(())
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let image1 = RgbImage::new(8, 8);
        let image2 = RgbImage::new(8, 9);
        assert!(matches!(
            mixup(&image1, &image2, &[], &[], 0.5),
            Err(AugmentError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_alpha_out_of_range() {
        let image = RgbImage::new(2, 2);
        assert!(mixup(&image, &image, &[], &[], 1.5).is_err());
        assert!(mixup(&image, &image, &[], &[], -0.1).is_err());
        assert!(mixup(&image, &image, &[], &[], f64::NAN).is_err());
    }

    #[test]
    fn test_blend_labels_length_mismatch() {
        assert!(matches!(
            blend_labels(&[1.0, 2.0], &[1.0], 0.5),
            Err(AugmentError::ShapeMismatch { .. })
        ));
    }
}
