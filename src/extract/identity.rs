//! Identity feature.

use crate::error::Result;
use crate::extract::traits::{check_training_input, FeatureExtractor};
use crate::sample::{flatten, FeatureVector, Sample};

/// Pass-through extractor.
///
/// Flattens each sample row-major and returns it unchanged. Useful as a
/// baseline, or to push raw pixels through the same interface the real
/// extractors use.
#[derive(Debug, Clone)]
pub struct Identity;

impl Identity {
    /// Create a new identity extractor.
    pub fn new() -> Self {
        Self
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor for Identity {
    fn compute(&mut self, samples: &[Sample], labels: &[usize]) -> Result<Vec<FeatureVector>> {
        check_training_input(samples, labels)?;
        Ok(samples.iter().map(flatten).collect())
    }

    // There is no fitted state, so extraction works before compute too.
    fn extract(&self, sample: &Sample) -> Result<FeatureVector> {
        Ok(flatten(sample))
    }

    fn short_name(&self) -> String {
        "Identity".to_string()
    }
}
