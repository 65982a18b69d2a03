//! Error type shared by every maskaug crate

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while augmenting a single sample
#[derive(Error, Debug)]
pub enum AugmentError {
    /// Two buffers that must share dimensions do not
    #[error("shape mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    ShapeMismatch {
        /// (width, height) of the reference buffer
        expected: (u32, u32),
        /// (width, height) of the offending buffer
        actual: (u32, u32),
    },

    /// A size or blend parameter does not fit the image it is applied to
    #[error("parameter {name} out of range: {reason}")]
    Range { name: &'static str, reason: String },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A label line could not be parsed
    #[error("malformed label in {path} at line {line}: {reason}")]
    MalformedLabel {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Two images in the input directory would write to the same outputs
    #[error("{first} and {second} share the stem '{stem}'")]
    DuplicateStem {
        stem: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl AugmentError {
    pub fn range(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Range {
            name,
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, AugmentError>;
