//! Grid mask: drop each cell of an `n × n` grid with probability 0.5

use image::RgbImage;
use rand::Rng;

use super::config::GridMaskParams;
use crate::Result;
use crate::mask::Mask;
use crate::region::Region;
use crate::traits::MaskGenerator;
use maskaug_core::AugmentError;

/// Cells are `floor(width / n) × floor(height / n)`. Pixels in the remainder strip along
/// the right and bottom edges belong to no cell and are always kept.
impl MaskGenerator for GridMaskParams {
    fn generate_mask<R: Rng + ?Sized>(&self, width: u32, height: u32, rng: &mut R) -> Result<Mask> {
        let cells = self.num_grid_cells;
        if cells == 0 {
            return Err(AugmentError::range("num_grid_cells", "must be at least 1"));
        }
        if cells > width || cells > height {
            return Err(AugmentError::range(
                "num_grid_cells",
                format!("{} cells per side do not fit in {}x{}", cells, width, height),
            ));
        }

        let cell_w = width / cells;
        let cell_h = height / cells;

        let mut mask = Mask::ones(width, height);
        for row in 0..cells {
            for col in 0..cells {
                if !rng.gen_bool(0.5) {
                    mask.zero_region(&Region::new(col * cell_w, row * cell_h, cell_w, cell_h));
                }
            }
        }
        Ok(mask)
    }
}

pub fn grid_mask<R: Rng + ?Sized>(
    image: &RgbImage,
    num_grid_cells: u32,
    rng: &mut R,
) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    GridMaskParams { num_grid_cells }
        .generate_mask(width, height, rng)?
        .apply(image)
}
