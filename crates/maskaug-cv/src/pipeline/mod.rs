//! Batch processing over a dataset directory

pub mod runner;

pub use runner::{BatchReport, BatchRunner, SampleFailure};
