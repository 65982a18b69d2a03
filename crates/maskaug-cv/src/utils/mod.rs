//! Utility modules

pub mod image;
pub mod rng;

pub use image::ImageUtils;
