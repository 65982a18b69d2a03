//! Mask-based image augmentation for object detection datasets
//!
//! Cutout, hide-and-seek, grid mask, mixup and cutmix over 8-bit RGB images, plus the
//! dataset plumbing to run them over a directory of images and label files.

pub mod augment;
pub mod dataset;
pub mod mask;
pub mod pipeline;
pub mod region;
pub mod utils;

// Re-export commonly used types
pub use augment::{AugmentConfig, AugmentationKind, AugmentedSample, Augmenter};
pub use dataset::{DatasetItem, DatasetLoader, DatasetWriter, Sample};
pub use mask::Mask;
pub use pipeline::{BatchReport, BatchRunner, SampleFailure};
pub use region::Region;

pub use maskaug_core::{AugmentError, Result};

/// Core traits for the augmentation system
pub mod traits {
    use super::*;
    use rand::Rng;

    /// Parameter blocks that produce a keep/drop mask for an image of a given size
    pub trait MaskGenerator {
        fn generate_mask<R: Rng + ?Sized>(&self, width: u32, height: u32, rng: &mut R)
        -> Result<Mask>;
    }
}
