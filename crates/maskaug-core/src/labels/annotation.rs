use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of values in a flattened label row: four box coordinates plus the class
pub const LABEL_VECTOR_LEN: usize = 5;

/// One `class_id xmin ymin xmax ymax` line of a label file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub class_id: u32,
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Annotation {
    pub fn new(class_id: u32, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            class_id,
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Parse a single whitespace separated line.
    ///
    /// Returns the reason as a string so the caller can attach path and line number.
    pub fn parse(line: &str) -> Result<Self, String> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() != LABEL_VECTOR_LEN {
            return Err(format!(
                "expected {} fields (class_id xmin ymin xmax ymax), found {}",
                LABEL_VECTOR_LEN,
                parts.len()
            ));
        }

        let class_id = parts[0]
            .parse::<u32>()
            .map_err(|_| format!("invalid class id '{}'", parts[0]))?;

        let mut coords = [0.0f64; 4];
        for (slot, raw) in coords.iter_mut().zip(&parts[1..]) {
            *slot = raw
                .parse::<f64>()
                .map_err(|_| format!("invalid coordinate '{}'", raw))?;
        }

        Ok(Self::new(class_id, coords[0], coords[1], coords[2], coords[3]))
    }

    /// Flatten into `[xmin, ymin, xmax, ymax, class_id]` for linear blending
    pub fn to_vector(&self) -> [f64; LABEL_VECTOR_LEN] {
        [
            self.xmin,
            self.ymin,
            self.xmax,
            self.ymax,
            self.class_id as f64,
        ]
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} {:?} {:?} {:?}",
            self.class_id, self.xmin, self.ymin, self.xmax, self.ymax
        )
    }
}

/// A label row produced by blending two annotations; the class is no longer an integer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendedRow {
    pub class_value: f64,
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BlendedRow {
    /// Inverse of [`Annotation::to_vector`]
    pub fn from_vector(values: [f64; LABEL_VECTOR_LEN]) -> Self {
        Self {
            xmin: values[0],
            ymin: values[1],
            xmax: values[2],
            ymax: values[3],
            class_value: values[4],
        }
    }
}

impl fmt::Display for BlendedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} {:?} {:?} {:?}",
            self.class_value, self.xmin, self.ymin, self.xmax, self.ymax
        )
    }
}

/// A line to be written to an output label file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LabelRow {
    Exact(Annotation),
    Blended(BlendedRow),
}

impl From<Annotation> for LabelRow {
    fn from(annotation: Annotation) -> Self {
        LabelRow::Exact(annotation)
    }
}

impl From<BlendedRow> for LabelRow {
    fn from(row: BlendedRow) -> Self {
        LabelRow::Blended(row)
    }
}

impl fmt::Display for LabelRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelRow::Exact(annotation) => annotation.fmt(f),
            LabelRow::Blended(row) => row.fmt(f),
        }
    }
}
