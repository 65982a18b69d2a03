//! Augmentation configuration

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The five mask-based augmentations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AugmentationKind {
    Cutout,
    HideAndSeek,
    GridMask,
    Mixup,
    Cutmix,
}

impl AugmentationKind {
    pub const ALL: [AugmentationKind; 5] = [
        AugmentationKind::Cutout,
        AugmentationKind::HideAndSeek,
        AugmentationKind::GridMask,
        AugmentationKind::Mixup,
        AugmentationKind::Cutmix,
    ];

    /// Short tag embedded in output file names
    pub fn tag(&self) -> &'static str {
        match self {
            AugmentationKind::Cutout => "co",
            AugmentationKind::HideAndSeek => "hs",
            AugmentationKind::GridMask => "gm",
            AugmentationKind::Mixup => "mu",
            AugmentationKind::Cutmix => "cm",
        }
    }

    /// Whether a second sample is blended in
    pub fn requires_partner(&self) -> bool {
        matches!(self, AugmentationKind::Mixup | AugmentationKind::Cutmix)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AugmentationKind::Cutout => "cutout",
            AugmentationKind::HideAndSeek => "hide-and-seek",
            AugmentationKind::GridMask => "grid-mask",
            AugmentationKind::Mixup => "mixup",
            AugmentationKind::Cutmix => "cutmix",
        }
    }
}

impl fmt::Display for AugmentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AugmentationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized || kind.tag() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown augmentation '{}' (expected one of cutout, hide-and-seek, grid-mask, mixup, cutmix)",
                    s
                )
            })
    }
}

/// Square cutout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CutoutParams {
    pub mask_size: u32,
}

impl Default for CutoutParams {
    fn default() -> Self {
        Self { mask_size: 150 }
    }
}

/// Hide-and-seek. `num_regions` is carried for config compatibility but never read by the
/// operation; the region count is drawn from `[1, max_hidden_regions]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HideAndSeekParams {
    pub num_regions: u32,
    pub max_hidden_regions: u32,
}

impl Default for HideAndSeekParams {
    fn default() -> Self {
        Self {
            num_regions: 4,
            max_hidden_regions: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridMaskParams {
    pub num_grid_cells: u32,
}

impl Default for GridMaskParams {
    fn default() -> Self {
        Self { num_grid_cells: 4 }
    }
}

/// Blend weight of the first image, in `[0, 1]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MixupParams {
    pub alpha: f64,
}

impl Default for MixupParams {
    fn default() -> Self {
        Self { alpha: 0.5 }
    }
}

/// `alpha` sets the kept fraction: the pasted patch is `sqrt(1 - alpha)` of each side
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CutmixParams {
    pub alpha: f64,
}

impl Default for CutmixParams {
    fn default() -> Self {
        Self { alpha: 0.5 }
    }
}

/// Main augmentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentConfig {
    pub image_dir: PathBuf,
    pub label_dir: PathBuf,
    pub output_image_dir: PathBuf,
    pub output_label_dir: PathBuf,
    /// Accepted image extensions, compared case-insensitively
    pub image_extensions: Vec<String>,
    pub augmentations_per_image: usize,
    pub kind: AugmentationKind,
    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
    pub cutout: CutoutParams,
    pub hide_and_seek: HideAndSeekParams,
    pub grid_mask: GridMaskParams,
    pub mixup: MixupParams,
    pub cutmix: CutmixParams,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            image_dir: "val/images".into(),
            label_dir: "val/labels".into(),
            output_image_dir: "augmented_images".into(),
            output_label_dir: "augmented_labels".into(),
            image_extensions: vec!["jpg".to_string()],
            augmentations_per_image: 10,
            kind: AugmentationKind::Cutout,
            seed: None,
            cutout: CutoutParams::default(),
            hide_and_seek: HideAndSeekParams::default(),
            grid_mask: GridMaskParams::default(),
            mixup: MixupParams::default(),
            cutmix: CutmixParams::default(),
        }
    }
}

impl AugmentConfig {
    pub fn cutout() -> Self {
        Self::default()
    }

    pub fn hide_and_seek() -> Self {
        Self {
            kind: AugmentationKind::HideAndSeek,
            ..Default::default()
        }
    }

    pub fn grid_mask() -> Self {
        Self {
            kind: AugmentationKind::GridMask,
            ..Default::default()
        }
    }

    pub fn mixup() -> Self {
        Self {
            kind: AugmentationKind::Mixup,
            ..Default::default()
        }
    }

    pub fn cutmix() -> Self {
        Self {
            kind: AugmentationKind::Cutmix,
            ..Default::default()
        }
    }

    /// Same configuration with another augmentation selected
    pub fn with_kind(mut self, kind: AugmentationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Reject settings that would make a run do nothing or fail every sample.
    ///
    /// Only image-independent bounds are checked here; a mask that is too large for a
    /// particular image still fails that sample alone.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.augmentations_per_image == 0 {
            anyhow::bail!("augmentations_per_image must be at least 1");
        }
        if self.image_extensions.is_empty() {
            anyhow::bail!("image_extensions must list at least one extension");
        }
        if self.cutout.mask_size == 0 {
            anyhow::bail!("cutout.mask_size must be at least 1");
        }
        if self.hide_and_seek.max_hidden_regions == 0 {
            anyhow::bail!("hide_and_seek.max_hidden_regions must be at least 1");
        }
        if self.grid_mask.num_grid_cells == 0 {
            anyhow::bail!("grid_mask.num_grid_cells must be at least 1");
        }
        for (name, alpha) in [("mixup", self.mixup.alpha), ("cutmix", self.cutmix.alpha)] {
            if !(0.0..=1.0).contains(&alpha) {
                anyhow::bail!("{}.alpha must lie in [0, 1], got {}", name, alpha);
            }
        }
        // alpha = 0 pastes the whole second image, which never fits strictly inside
        if self.kind == AugmentationKind::Cutmix && self.cutmix.alpha == 0.0 {
            anyhow::bail!("cutmix.alpha must be greater than 0");
        }
        Ok(())
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;

        serde_json::from_str(&json).with_context(|| format!("Invalid config file: {:?}", path))
    }

    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, json).with_context(|| format!("Failed to write config to: {:?}", path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("cutout".parse::<AugmentationKind>(), Ok(AugmentationKind::Cutout));
        assert_eq!(
            "hide_and_seek".parse::<AugmentationKind>(),
            Ok(AugmentationKind::HideAndSeek)
        );
        assert_eq!("GM".parse::<AugmentationKind>(), Ok(AugmentationKind::GridMask));
        assert!("mosaic".parse::<AugmentationKind>().is_err());
    }

    #[test]
    fn test_partner_kinds() {
        let partnered: Vec<_> = AugmentationKind::ALL
            .into_iter()
            .filter(AugmentationKind::requires_partner)
            .collect();
        assert_eq!(partnered, vec![AugmentationKind::Mixup, AugmentationKind::Cutmix]);
    }

    #[test]
    fn test_partial_json_uses_defaults() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "kind": "grid-mask", "seed": 42, "grid_mask": { "num_grid_cells": 8 } }"#)?;

        let config = AugmentConfig::from_json_file(&path)?;
        assert_eq!(config.kind, AugmentationKind::GridMask);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.grid_mask.num_grid_cells, 8);
        assert_eq!(config.augmentations_per_image, 10);
        assert_eq!(config.cutout.mask_size, 150);
        Ok(())
    }

    #[test]
    fn test_save_and_reload() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("saved.json");
        let mut config = AugmentConfig::cutmix();
        config.cutmix.alpha = 0.75;
        config.to_json_file(&path)?;

        let reloaded = AugmentConfig::from_json_file(&path)?;
        assert_eq!(reloaded.kind, AugmentationKind::Cutmix);
        assert_eq!(reloaded.cutmix.alpha, 0.75);
        Ok(())
    }

    #[test]
    fn test_validate() {
        assert!(AugmentConfig::default().validate().is_ok());

        let mut config = AugmentConfig::default();
        config.augmentations_per_image = 0;
        assert!(config.validate().is_err());

        let mut config = AugmentConfig::default();
        config.image_extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_operation_parameters() {
        let invalid: [fn(&mut AugmentConfig); 6] = [
            |c| c.cutout.mask_size = 0,
            |c| c.hide_and_seek.max_hidden_regions = 0,
            |c| c.grid_mask.num_grid_cells = 0,
            |c| c.mixup.alpha = 1.5,
            |c| c.cutmix.alpha = f64::NAN,
            |c| {
                c.kind = AugmentationKind::Cutmix;
                c.cutmix.alpha = 0.0;
            },
        ];
        for (i, break_config) in invalid.into_iter().enumerate() {
            let mut config = AugmentConfig::default();
            break_config(&mut config);
            assert!(config.validate().is_err(), "case {}", i);
        }

        // a zero cutmix alpha only matters when cutmix runs
        let mut config = AugmentConfig::mixup();
        config.mixup.alpha = 0.0;
        config.cutmix.alpha = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_parameter_block_uses_defaults() -> anyhow::Result<()> {
        let config: AugmentConfig = serde_json::from_str(
            r#"{ "kind": "hide-and-seek", "hide_and_seek": { "max_hidden_regions": 2 }, "cutmix": {} }"#,
        )?;
        assert_eq!(config.hide_and_seek.max_hidden_regions, 2);
        assert_eq!(config.hide_and_seek.num_regions, 4);
        assert_eq!(config.cutmix.alpha, 0.5);
        config.validate()?;
        Ok(())
    }
}
