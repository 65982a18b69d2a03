//! Writes augmented images and label files

use std::fs;
use std::path::{Path, PathBuf};

use super::loader::DatasetItem;
use crate::Result;
use crate::augment::{AugmentConfig, AugmentedSample};
use crate::utils::ImageUtils;
use maskaug_core::AugmentError;
use maskaug_core::labels::write_rows;
use maskaug_core::naming::{LABEL_EXTENSION, augmented_file_name};

/// Paths of one written output pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSample {
    pub image_path: PathBuf,
    pub label_path: PathBuf,
}

pub struct DatasetWriter {
    image_dir: PathBuf,
    label_dir: PathBuf,
}

impl DatasetWriter {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(image_dir: P, label_dir: Q) -> Self {
        Self {
            image_dir: image_dir.as_ref().to_path_buf(),
            label_dir: label_dir.as_ref().to_path_buf(),
        }
    }

    pub fn from_config(config: &AugmentConfig) -> Self {
        Self::new(&config.output_image_dir, &config.output_label_dir)
    }

    /// Create both output directories, succeeding if they already exist
    pub fn prepare(&self) -> Result<()> {
        for dir in [&self.image_dir, &self.label_dir] {
            fs::create_dir_all(dir).map_err(|e| AugmentError::io(dir, e))?;
        }
        Ok(())
    }

    /// Write `{stem}_augmented_{tag}_{index}` as an image with the source extension plus
    /// a `.txt` label file
    pub fn write(
        &self,
        item: &DatasetItem,
        tag: &str,
        index: usize,
        augmented: &AugmentedSample,
    ) -> Result<WrittenSample> {
        let stem = item.stem();
        let image_path = self
            .image_dir
            .join(augmented_file_name(&stem, tag, index, &item.extension()));
        let label_path = self
            .label_dir
            .join(augmented_file_name(&stem, tag, index, LABEL_EXTENSION));

        ImageUtils::save_rgb(&augmented.image, &image_path)?;
        write_rows(&label_path, &augmented.rows)?;

        Ok(WrittenSample {
            image_path,
            label_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use maskaug_core::labels::{Annotation, LabelRow};
    use tempfile::TempDir;

    #[test]
    fn test_write_uses_naming_convention() -> Result<()> {
        let root = TempDir::new().unwrap();
        let writer = DatasetWriter::new(root.path().join("img/out"), root.path().join("lbl/out"));
        writer.prepare()?;
        // idempotent
        writer.prepare()?;

        let item = DatasetItem {
            image_path: PathBuf::from("val/images/frame_0007.png"),
            label_path: PathBuf::from("val/labels/frame_0007.txt"),
        };
        let augmented = AugmentedSample {
            image: RgbImage::from_pixel(3, 3, Rgb([9, 9, 9])),
            rows: vec![LabelRow::from(Annotation::new(0, 1.0, 1.0, 2.0, 2.0))],
        };

        let written = writer.write(&item, "gm", 4, &augmented)?;
        assert_eq!(
            written.image_path,
            root.path().join("img/out/frame_0007_augmented_gm_4.png")
        );
        assert_eq!(
            written.label_path,
            root.path().join("lbl/out/frame_0007_augmented_gm_4.txt")
        );
        assert_eq!(
            fs::read_to_string(&written.label_path).unwrap(),
            "0 1.0 1.0 2.0 2.0\n"
        );
        assert_eq!(ImageUtils::load_rgb(&written.image_path)?, augmented.image);
        Ok(())
    }

    #[test]
    fn test_output_keeps_source_extension_case() -> Result<()> {
        let root = TempDir::new().unwrap();
        let writer = DatasetWriter::new(root.path().join("img"), root.path().join("lbl"));
        writer.prepare()?;

        let item = DatasetItem {
            image_path: PathBuf::from("val/images/frame_0003.PNG"),
            label_path: PathBuf::from("val/labels/frame_0003.txt"),
        };
        let augmented = AugmentedSample {
            image: RgbImage::from_pixel(2, 2, Rgb([4, 5, 6])),
            rows: Vec::new(),
        };

        let written = writer.write(&item, "co", 0, &augmented)?;
        assert_eq!(
            written.image_path,
            root.path().join("img/frame_0003_augmented_co_0.PNG")
        );
        assert!(written.image_path.is_file());
        assert_eq!(ImageUtils::load_rgb(&written.image_path)?, augmented.image);
        Ok(())
    }
}
