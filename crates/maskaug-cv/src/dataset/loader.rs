//! Dataset discovery: image files paired with their label files

use image::RgbImage;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::augment::AugmentConfig;
use crate::utils::ImageUtils;
use maskaug_core::labels::{Annotation, LabelFile};
use maskaug_core::naming::{LABEL_EXTENSION, file_extension, file_stem};
use maskaug_core::AugmentError;

/// An image path and the label path it is expected to pair with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetItem {
    pub image_path: PathBuf,
    pub label_path: PathBuf,
}

impl DatasetItem {
    pub fn stem(&self) -> String {
        file_stem(&self.image_path)
    }

    /// Extension as it appears on disk, case preserved
    pub fn extension(&self) -> String {
        self.image_path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Read the image and its annotations
    pub fn load(&self) -> Result<Sample> {
        let image = ImageUtils::load_rgb(&self.image_path)?;
        let labels = LabelFile::load(&self.label_path)?;

        Ok(Sample {
            image,
            annotations: labels.annotations,
        })
    }
}

/// A loaded image with its annotations
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub image: RgbImage,
    pub annotations: Vec<Annotation>,
}

impl Sample {
    pub fn new(image: RgbImage, annotations: Vec<Annotation>) -> Self {
        Self { image, annotations }
    }

    /// All annotations flattened into one `[xmin, ymin, xmax, ymax, class_id, ...]` vector
    pub fn label_vector(&self) -> Vec<f64> {
        self.annotations
            .iter()
            .flat_map(|annotation| annotation.to_vector())
            .collect()
    }
}

/// Finds samples in an image directory
pub struct DatasetLoader {
    image_dir: PathBuf,
    label_dir: PathBuf,
    supported_extensions: Vec<String>,
}

impl DatasetLoader {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(image_dir: P, label_dir: Q) -> Self {
        Self {
            image_dir: image_dir.as_ref().to_path_buf(),
            label_dir: label_dir.as_ref().to_path_buf(),
            supported_extensions: vec!["jpg".to_string()],
        }
    }

    pub fn from_config(config: &AugmentConfig) -> Self {
        Self::new(&config.image_dir, &config.label_dir)
            .with_extensions(config.image_extensions.clone())
    }

    /// Replace the accepted extensions
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.supported_extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    pub fn add_extension(mut self, ext: &str) -> Self {
        self.supported_extensions
            .push(ext.trim_start_matches('.').to_lowercase());
        self
    }

    /// Label file expected for an image: `<label_dir>/<stem>.txt`
    pub fn label_path_for(&self, image_path: &Path) -> PathBuf {
        self.label_dir
            .join(format!("{}.{}", file_stem(image_path), LABEL_EXTENSION))
    }

    /// Matching images sorted by file name. Label files are not checked here; a missing
    /// one fails that sample when it is loaded.
    ///
    /// Two images with the same stem would share a label file and output names, so that
    /// is an error.
    pub fn discover(&self) -> Result<Vec<DatasetItem>> {
        let entries =
            fs::read_dir(&self.image_dir).map_err(|e| AugmentError::io(&self.image_dir, e))?;

        let mut items = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AugmentError::io(&self.image_dir, e))?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = file_extension(&path);
            if self.supported_extensions.contains(&ext) {
                items.push(DatasetItem {
                    label_path: self.label_path_for(&path),
                    image_path: path,
                });
            }
        }

        items.sort_by(|a, b| a.image_path.file_name().cmp(&b.image_path.file_name()));
        check_unique_stems(&items)?;
        Ok(items)
    }
}

fn check_unique_stems(items: &[DatasetItem]) -> Result<()> {
    let mut seen: HashMap<String, &Path> = HashMap::new();
    for item in items {
        if let Some(first) = seen.insert(item.stem(), &item.image_path) {
            return Err(AugmentError::DuplicateStem {
                stem: item.stem(),
                first: first.to_path_buf(),
                second: item.image_path.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_discover_filters_and_sorts() -> Result<()> {
        let images = TempDir::new().unwrap();
        let labels = TempDir::new().unwrap();
        touch(&images.path().join("b.jpg"));
        touch(&images.path().join("a.JPG"));
        touch(&images.path().join("c.png"));
        touch(&images.path().join("notes.txt"));
        fs::create_dir(images.path().join("nested.jpg")).unwrap();

        let items = DatasetLoader::new(images.path(), labels.path()).discover()?;
        let names: Vec<String> = items.iter().map(DatasetItem::stem).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(items[0].label_path, labels.path().join("a.txt"));
        Ok(())
    }

    #[test]
    fn test_extra_extensions() -> Result<()> {
        let images = TempDir::new().unwrap();
        touch(&images.path().join("x.jpg"));
        touch(&images.path().join("y.png"));

        let items = DatasetLoader::new(images.path(), images.path())
            .add_extension(".PNG")
            .discover()?;
        assert_eq!(items.len(), 2);
        Ok(())
    }

    #[test]
    fn test_same_stem_with_two_extensions_is_rejected() {
        let images = TempDir::new().unwrap();
        touch(&images.path().join("a.jpg"));
        touch(&images.path().join("a.png"));
        touch(&images.path().join("b.png"));

        let result = DatasetLoader::new(images.path(), images.path())
            .add_extension("png")
            .discover();
        match result {
            Err(AugmentError::DuplicateStem { stem, first, second }) => {
                assert_eq!(stem, "a");
                assert_eq!(first, images.path().join("a.jpg"));
                assert_eq!(second, images.path().join("a.png"));
            }
            other => panic!("expected DuplicateStem, got {:?}", other),
        }
    }

    #[test]
    fn test_extension_keeps_case() {
        let item = DatasetItem {
            image_path: PathBuf::from("val/images/frame_0001.JPG"),
            label_path: PathBuf::from("val/labels/frame_0001.txt"),
        };
        assert_eq!(item.extension(), "JPG");
    }

    #[test]
    fn test_missing_image_dir() {
        let dir = TempDir::new().unwrap();
        let loader = DatasetLoader::new(dir.path().join("absent"), dir.path());
        assert!(matches!(loader.discover(), Err(AugmentError::Io { .. })));
    }

    #[test]
    fn test_load_sample() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let image_path = dir.path().join("s.png");
        let label_path = dir.path().join("s.txt");
        RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]))
            .save(&image_path)
            .unwrap();
        fs::write(&label_path, "2 0 0 3 3\n").unwrap();

        let sample = DatasetItem {
            image_path,
            label_path,
        }
        .load()?;
        assert_eq!(sample.image.dimensions(), (4, 4));
        assert_eq!(sample.label_vector(), vec![0.0, 0.0, 3.0, 3.0, 2.0]);
        Ok(())
    }

    #[test]
    fn test_load_without_label_file_fails() {
        let dir = TempDir::new().unwrap();
        let image_path = dir.path().join("s.png");
        RgbImage::new(2, 2).save(&image_path).unwrap();

        let item = DatasetItem {
            image_path,
            label_path: dir.path().join("s.txt"),
        };
        assert!(matches!(item.load(), Err(AugmentError::Io { .. })));
    }
}
