use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::annotation::{Annotation, LabelRow};
use crate::error::{AugmentError, Result};

/// Annotations of one image, as read from its label file
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFile {
    pub path: PathBuf,
    pub annotations: Vec<Annotation>,
}

impl LabelFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AugmentError::io(path, e))?;
        let reader = BufReader::new(file);

        let mut annotations = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| AugmentError::io(path, e))?;

            if line.trim().is_empty() {
                continue; // Skip empty lines
            }

            let annotation =
                Annotation::parse(&line).map_err(|reason| AugmentError::MalformedLabel {
                    path: path.to_path_buf(),
                    line: line_num + 1,
                    reason,
                })?;
            annotations.push(annotation);
        }

        Ok(Self {
            path: path.to_path_buf(),
            annotations,
        })
    }

    pub fn rows(&self) -> Vec<LabelRow> {
        self.annotations.iter().copied().map(LabelRow::from).collect()
    }

    /// Write the annotations to `path` in the format `load` reads
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_rows(path, &self.rows())
    }
}

/// Write one row per line, overwriting any existing file
pub fn write_rows<P: AsRef<Path>>(path: P, rows: &[LabelRow]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| AugmentError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    for row in rows {
        writeln!(writer, "{}", row).map_err(|e| AugmentError::io(path, e))?;
    }

    writer.flush().map_err(|e| AugmentError::io(path, e))
}
