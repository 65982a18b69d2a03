//! Label files: one `class_id xmin ymin xmax ymax` annotation per line

pub mod annotation;
pub mod file;

pub use annotation::{Annotation, BlendedRow, LABEL_VECTOR_LEN, LabelRow};
pub use file::{LabelFile, write_rows};
