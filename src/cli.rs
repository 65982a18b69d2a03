//! Command line arguments and how they override the configuration file

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use maskaug_cv::{AugmentConfig, AugmentationKind};

/// Augment an object detection dataset with cutout, hide-and-seek, grid mask, mixup or cutmix.
#[derive(Parser, Debug, Default)]
#[command(name = "maskaug")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// JSON configuration file; flags below override its values.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Augmentation to apply (cutout, hide-and-seek, grid-mask, mixup, cutmix).
    #[arg(short, long, value_name = "KIND")]
    pub kind: Option<AugmentationKind>,

    /// Directory of input images.
    #[arg(long, value_name = "DIR")]
    pub images: Option<PathBuf>,

    /// Directory of input label files.
    #[arg(long, value_name = "DIR")]
    pub labels: Option<PathBuf>,

    /// Directory for augmented images.
    #[arg(long, value_name = "DIR")]
    pub out_images: Option<PathBuf>,

    /// Directory for augmented label files.
    #[arg(long, value_name = "DIR")]
    pub out_labels: Option<PathBuf>,

    /// Augmented copies written per input image.
    #[arg(short = 'n', long, value_name = "INT")]
    pub count: Option<usize>,

    /// Random seed for reproducible output.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Side of the cutout square in pixels.
    #[arg(long, value_name = "INT")]
    pub mask_size: Option<u32>,

    /// Upper bound on hide-and-seek regions per image.
    #[arg(long, value_name = "INT")]
    pub max_hidden_regions: Option<u32>,

    /// Grid mask cells per side.
    #[arg(long, value_name = "INT")]
    pub grid_cells: Option<u32>,

    /// Blend weight for mixup and cutmix (0.0-1.0).
    #[arg(long, value_name = "FLOAT")]
    pub alpha: Option<f64>,

    /// Write the effective configuration to FILE and exit.
    #[arg(long, value_name = "FILE")]
    pub write_config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Configuration file (or defaults) with every given flag applied on top
    pub fn to_config(&self) -> Result<AugmentConfig> {
        let mut config = match &self.config {
            Some(path) => AugmentConfig::from_json_file(path)?,
            None => AugmentConfig::default(),
        };

        if let Some(kind) = self.kind {
            config.kind = kind;
        }
        if let Some(dir) = &self.images {
            config.image_dir = dir.clone();
        }
        if let Some(dir) = &self.labels {
            config.label_dir = dir.clone();
        }
        if let Some(dir) = &self.out_images {
            config.output_image_dir = dir.clone();
        }
        if let Some(dir) = &self.out_labels {
            config.output_label_dir = dir.clone();
        }
        if let Some(count) = self.count {
            config.augmentations_per_image = count;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(mask_size) = self.mask_size {
            config.cutout.mask_size = mask_size;
        }
        if let Some(max) = self.max_hidden_regions {
            config.hide_and_seek.max_hidden_regions = max;
        }
        if let Some(cells) = self.grid_cells {
            config.grid_mask.num_grid_cells = cells;
        }
        // one flag drives both blends
        if let Some(alpha) = self.alpha {
            config.mixup.alpha = alpha;
            config.cutmix.alpha = alpha;
        }

        config.validate()?;
        Ok(config)
    }
}
