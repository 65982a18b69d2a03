//! Mask-based augmentations
//!
//! Every operation borrows its inputs and returns a new buffer, taking the random source
//! as an argument so that a seeded generator reproduces the same output.

pub mod augmenter;
pub mod config;
pub mod cutmix;
pub mod cutout;
pub mod grid_mask;
pub mod hide_and_seek;
pub mod mixup;

pub use augmenter::{AugmentedSample, Augmenter};
pub use config::{
    AugmentConfig, AugmentationKind, CutmixParams, CutoutParams, GridMaskParams,
    HideAndSeekParams, MixupParams,
};
pub use cutmix::{cut_size, cutmix, cutmix_at};
pub use cutout::{cutout, cutout_at};
pub use grid_mask::grid_mask;
pub use hide_and_seek::hide_and_seek;
pub use mixup::{blend_labels, mixup};
