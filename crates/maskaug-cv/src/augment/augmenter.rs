//! Applies the configured augmentation to a sample

use image::RgbImage;
use rand::Rng;

use super::config::{AugmentConfig, AugmentationKind};
use super::{cutmix, mixup};
use crate::Result;
use crate::dataset::Sample;
use crate::traits::MaskGenerator;
use maskaug_core::AugmentError;
use maskaug_core::labels::{BlendedRow, LABEL_VECTOR_LEN, LabelRow};

/// Output of one augmentation: the new image and the label rows to write beside it
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedSample {
    pub image: RgbImage,
    pub rows: Vec<LabelRow>,
}

pub struct Augmenter {
    config: AugmentConfig,
}

impl Augmenter {
    pub fn new(config: AugmentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AugmentConfig {
        &self.config
    }

    pub fn kind(&self) -> AugmentationKind {
        self.config.kind
    }

    /// Augment `sample`. Mixup and cutmix need `partner`; the other kinds ignore it.
    pub fn augment<R: Rng + ?Sized>(
        &self,
        sample: &Sample,
        partner: Option<&Sample>,
        rng: &mut R,
    ) -> Result<AugmentedSample> {
        match self.config.kind {
            AugmentationKind::Cutout => self.masked(&self.config.cutout, sample, rng),
            AugmentationKind::HideAndSeek => self.masked(&self.config.hide_and_seek, sample, rng),
            AugmentationKind::GridMask => self.masked(&self.config.grid_mask, sample, rng),
            AugmentationKind::Mixup => {
                let partner = Self::require_partner(partner, AugmentationKind::Mixup)?;
                check_row_counts(sample, partner)?;
                let (image, label) = mixup::mixup(
                    &sample.image,
                    &partner.image,
                    &sample.label_vector(),
                    &partner.label_vector(),
                    self.config.mixup.alpha,
                )?;
                Ok(AugmentedSample {
                    image,
                    rows: blended_rows(&label),
                })
            }
            AugmentationKind::Cutmix => {
                let partner = Self::require_partner(partner, AugmentationKind::Cutmix)?;
                check_row_counts(sample, partner)?;
                let (image, label) = cutmix::cutmix(
                    &sample.image,
                    &partner.image,
                    &sample.label_vector(),
                    &partner.label_vector(),
                    self.config.cutmix.alpha,
                    rng,
                )?;
                Ok(AugmentedSample {
                    image,
                    rows: blended_rows(&label),
                })
            }
        }
    }

    /// Single-image kinds leave the annotations untouched
    fn masked<G: MaskGenerator, R: Rng + ?Sized>(
        &self,
        generator: &G,
        sample: &Sample,
        rng: &mut R,
    ) -> Result<AugmentedSample> {
        let (width, height) = sample.image.dimensions();
        let image = generator.generate_mask(width, height, rng)?.apply(&sample.image)?;

        Ok(AugmentedSample {
            image,
            rows: sample
                .annotations
                .iter()
                .copied()
                .map(LabelRow::from)
                .collect(),
        })
    }

    fn require_partner(partner: Option<&Sample>, kind: AugmentationKind) -> Result<&Sample> {
        partner.ok_or_else(|| {
            AugmentError::range("partner", format!("{} needs a second sample", kind))
        })
    }
}

/// Rows are blended pairwise, so both samples must carry the same number of annotations
fn check_row_counts(sample: &Sample, partner: &Sample) -> Result<()> {
    if sample.annotations.len() != partner.annotations.len() {
        return Err(AugmentError::ShapeMismatch {
            expected: (LABEL_VECTOR_LEN as u32, sample.annotations.len() as u32),
            actual: (LABEL_VECTOR_LEN as u32, partner.annotations.len() as u32),
        });
    }
    Ok(())
}

fn blended_rows(label: &[f64]) -> Vec<LabelRow> {
    label
        .chunks_exact(LABEL_VECTOR_LEN)
        .map(|chunk| {
            let mut values = [0.0; LABEL_VECTOR_LEN];
            values.copy_from_slice(chunk);
            LabelRow::from(BlendedRow::from_vector(values))
        })
        .collect()
}
