//! Keep/drop masks broadcast across the three color channels

use image::{Rgb, RgbImage};

use crate::Result;
use crate::region::Region;
use maskaug_core::AugmentError;

/// `height × width` grid of 0/1 multipliers, applied identically to every channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<u8>,
}

impl Mask {
    /// Mask that keeps every pixel
    pub fn ones(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![1; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.bits[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, keep: bool) {
        let idx = self.index(x, y);
        self.bits[idx] = keep as u8;
    }

    /// Drop every pixel of `region`; the part outside the mask is ignored
    pub fn zero_region(&mut self, region: &Region) {
        let x_end = region.right().min(self.width);
        let y_end = region.bottom().min(self.height);
        for y in region.y.min(y_end)..y_end {
            let row = self.index(0, y);
            self.bits[row + region.x.min(x_end) as usize..row + x_end as usize].fill(0);
        }
    }

    /// Number of dropped pixels (per channel)
    pub fn zeroed_count(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit == 0).count()
    }

    /// Multiply the mask into a copy of `image`
    pub fn apply(&self, image: &RgbImage) -> Result<RgbImage> {
        if image.dimensions() != self.dimensions() {
            return Err(AugmentError::ShapeMismatch {
                expected: self.dimensions(),
                actual: image.dimensions(),
            });
        }

        let mut output = image.clone();
        for (x, y, pixel) in output.enumerate_pixels_mut() {
            let keep = self.get(x, y);
            let Rgb([r, g, b]) = *pixel;
            *pixel = Rgb([r * keep, g * keep, b * keep]);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_region_clips_to_bounds() {
        let mut mask = Mask::ones(10, 10);
        mask.zero_region(&Region::new(8, 8, 5, 5));
        assert_eq!(mask.zeroed_count(), 4);
        assert_eq!(mask.get(9, 9), 0);
        assert_eq!(mask.get(7, 9), 1);
    }

    #[test]
    fn test_overlapping_regions_accumulate() {
        let mut mask = Mask::ones(6, 4);
        mask.zero_region(&Region::new(0, 0, 3, 2));
        mask.zero_region(&Region::new(2, 1, 3, 2));
        // 6 + 6 - 1 overlapping pixel
        assert_eq!(mask.zeroed_count(), 11);
    }

    #[test]
    fn test_apply_zeroes_all_channels() -> Result<()> {
        let image = RgbImage::from_pixel(4, 3, Rgb([10, 20, 30]));
        let mut mask = Mask::ones(4, 3);
        mask.set(1, 2, false);

        let output = mask.apply(&image)?;
        assert_eq!(output.get_pixel(1, 2), &Rgb([0, 0, 0]));
        assert_eq!(output.get_pixel(0, 0), &Rgb([10, 20, 30]));
        // input untouched
        assert_eq!(image.get_pixel(1, 2), &Rgb([10, 20, 30]));
        Ok(())
    }

    #[test]
    fn test_apply_rejects_other_shape() {
        let image = RgbImage::new(5, 5);
        let mask = Mask::ones(4, 5);
        assert!(matches!(
            mask.apply(&image),
            Err(AugmentError::ShapeMismatch { .. })
        ));
    }
}
