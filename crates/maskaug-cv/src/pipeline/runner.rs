//! Runs one augmentation over every sample of a dataset

use rand::Rng;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::Result;
use crate::augment::{AugmentConfig, Augmenter};
use crate::dataset::{DatasetItem, DatasetLoader, DatasetWriter, Sample};
use crate::utils::rng::{master_rng, sample_rng, sample_seeds};
use maskaug_core::AugmentError;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A sample that was abandoned, and why
#[derive(Debug)]
pub struct SampleFailure {
    pub image_path: PathBuf,
    pub error: AugmentError,
}

/// Totals of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Samples attempted
    pub processed: usize,
    /// Image/label pairs written
    pub written: usize,
    pub failures: Vec<SampleFailure>,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn succeeded(&self) -> usize {
        self.processed - self.failed()
    }
}

/// Per-sample result: outputs written before any error, and the error if there was one
struct SampleOutcome {
    written: usize,
    result: Result<()>,
}

pub struct BatchRunner {
    augmenter: Augmenter,
    loader: DatasetLoader,
    writer: DatasetWriter,
}

impl BatchRunner {
    pub fn new(config: AugmentConfig) -> Self {
        Self {
            loader: DatasetLoader::from_config(&config),
            writer: DatasetWriter::from_config(&config),
            augmenter: Augmenter::new(config),
        }
    }

    pub fn config(&self) -> &AugmentConfig {
        self.augmenter.config()
    }

    /// Augment every discovered sample.
    ///
    /// Only setup failures (unreadable input directory, output directories that cannot be
    /// created) are returned as errors. A failing sample is logged, recorded in the report
    /// and skipped.
    pub fn run(&self) -> Result<BatchReport> {
        let start_time = Instant::now();
        let config = self.config();

        let items = self.loader.discover()?;
        self.writer.prepare()?;

        info!(
            "Augmenting {} samples with {} ({} outputs each)",
            items.len(),
            config.kind,
            config.augmentations_per_image
        );

        let seeds = sample_seeds(&mut master_rng(config.seed), items.len());
        let outcomes = self.process_all(&items, &seeds);

        let mut report = BatchReport::default();
        for (item, outcome) in items.iter().zip(outcomes) {
            report.processed += 1;
            report.written += outcome.written;

            if let Err(error) = outcome.result {
                warn!("Skipping {:?}: {}", item.image_path, error);
                report.failures.push(SampleFailure {
                    image_path: item.image_path.clone(),
                    error,
                });
            }
        }

        info!(
            "Processed {} samples: {} outputs written, {} failed ({}ms)",
            report.processed,
            report.written,
            report.failed(),
            start_time.elapsed().as_millis()
        );

        Ok(report)
    }

    #[cfg(not(feature = "parallel"))]
    fn process_all(&self, items: &[DatasetItem], seeds: &[u64]) -> Vec<SampleOutcome> {
        (0..items.len())
            .map(|index| self.process_sample(items, index, seeds[index]))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn process_all(&self, items: &[DatasetItem], seeds: &[u64]) -> Vec<SampleOutcome> {
        (0..items.len())
            .into_par_iter()
            .map(|index| self.process_sample(items, index, seeds[index]))
            .collect()
    }

    fn process_sample(&self, items: &[DatasetItem], index: usize, seed: u64) -> SampleOutcome {
        let mut written = 0;
        let result = self.augment_sample(items, index, seed, &mut written);
        SampleOutcome { written, result }
    }

    fn augment_sample(
        &self,
        items: &[DatasetItem],
        index: usize,
        seed: u64,
        written: &mut usize,
    ) -> Result<()> {
        let mut rng = sample_rng(seed);
        let item = &items[index];
        let sample = item.load()?;
        let kind = self.augmenter.kind();

        let mut partners = PartnerCache::default();

        for aug_index in 0..self.config().augmentations_per_image {
            let partner = if kind.requires_partner() {
                let partner_index = pick_partner(&mut rng, index, items.len());
                if partner_index == index {
                    Some(&sample)
                } else {
                    Some(partners.get(items, partner_index)?)
                }
            } else {
                None
            };

            let augmented = self.augmenter.augment(&sample, partner, &mut rng)?;
            let output = self.writer.write(item, kind.tag(), aug_index, &augmented)?;
            *written += 1;

            debug!("Wrote {:?}", output.image_path);
        }

        Ok(())
    }
}

/// Partners decoded while augmenting one sample, keyed by dataset index
#[derive(Default)]
struct PartnerCache {
    samples: HashMap<usize, Sample>,
}

impl PartnerCache {
    fn get(&mut self, items: &[DatasetItem], index: usize) -> Result<&Sample> {
        match self.samples.entry(index) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => Ok(&*entry.insert(items[index].load()?)),
        }
    }
}

/// Uniform choice among the other samples; a lone sample is paired with itself
fn pick_partner<R: Rng + ?Sized>(rng: &mut R, index: usize, len: usize) -> usize {
    if len <= 1 {
        return index;
    }
    let other = rng.gen_range(0..len - 1);
    if other >= index { other + 1 } else { other }
}
