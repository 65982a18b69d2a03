//! Output file naming for augmented samples

use std::path::Path;

/// Extension used for every label file
pub const LABEL_EXTENSION: &str = "txt";

/// `{stem}_augmented_{tag}_{index}.{ext}`
pub fn augmented_file_name(stem: &str, tag: &str, index: usize, ext: &str) -> String {
    format!("{}_augmented_{}_{}.{}", stem, tag, index, ext)
}

/// File stem as a string, empty when the path has none
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Lowercased extension, empty when the path has none
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
