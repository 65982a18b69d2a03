//! Dataset input and output

pub mod loader;
pub mod writer;

pub use loader::{DatasetItem, DatasetLoader, Sample};
pub use writer::{DatasetWriter, WrittenSample};
