//! Core data model for mask-based dataset augmentation
//!
//! Shared by the image side (`maskaug-cv`) and the command line driver.

pub mod error;
pub mod labels;
pub mod naming;

pub use error::{AugmentError, Result};
pub use labels::{Annotation, BlendedRow, LabelFile, LabelRow};
