//! Pixel rectangles
//!
//! The unit every mask operation works in: a region is zeroed, copied or pasted as a whole.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixel coordinates, `[x, x + width) × [y, y + height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region from its corners, `x2`/`y2` exclusive
    pub fn from_corners(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1))
    }

    /// Number of pixels covered
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether the region lies fully inside a `width × height` image
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width && self.bottom() <= height
    }

    /// Uniformly placed `width × height` region inside a `bounds_w × bounds_h` image.
    ///
    /// The origin is drawn from `[0, bounds - size)` on each axis, so the region never
    /// touches the last row or column. Callers guarantee `size < bounds`.
    pub fn random_origin<R: Rng + ?Sized>(
        rng: &mut R,
        width: u32,
        height: u32,
        bounds_w: u32,
        bounds_h: u32,
    ) -> Self {
        let x = rng.gen_range(0..bounds_w - width);
        let y = rng.gen_range(0..bounds_h - height);
        Self::new(x, y, width, height)
    }

    /// Random non-empty region with independent corners: `y1 ∈ [0, h)`, `y2 ∈ (y1, h]`,
    /// and the same on the x axis
    pub fn random_span<R: Rng + ?Sized>(rng: &mut R, bounds_w: u32, bounds_h: u32) -> Self {
        let y1 = rng.gen_range(0..bounds_h);
        let y2 = rng.gen_range(y1 + 1..=bounds_h);
        let x1 = rng.gen_range(0..bounds_w);
        let x2 = rng.gen_range(x1 + 1..=bounds_w);
        Self::from_corners(x1, y1, x2, y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_region_geometry() {
        let region = Region::new(10, 20, 30, 40);
        assert_eq!(region.area(), 1200);
        assert_eq!(region.right(), 40);
        assert_eq!(region.bottom(), 60);
        assert!(region.contains(10, 20));
        assert!(region.contains(39, 59));
        assert!(!region.contains(40, 59));
        assert!(region.fits_within(40, 60));
        assert!(!region.fits_within(39, 60));
    }

    #[test]
    fn test_random_origin_stays_inside() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let region = Region::random_origin(&mut rng, 25, 10, 30, 12);
            assert!(region.fits_within(30, 12));
            assert!(region.x < 5 && region.y < 2);
        }
    }

    #[test]
    fn test_random_span_is_never_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..500 {
            let region = Region::random_span(&mut rng, 8, 5);
            assert!(region.width >= 1 && region.height >= 1);
            assert!(region.fits_within(8, 5));
        }
    }
}
