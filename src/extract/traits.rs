//! Feature extraction traits.

use crate::error::{Error, Result};
use crate::sample::{FeatureVector, Sample};

/// Trait for feature extraction algorithms.
///
/// An extractor is fitted on a training set once, then maps samples to
/// fixed-length feature vectors. Fitting and mapping are split so a model
/// can be trained on one gallery and applied to unseen probes.
pub trait FeatureExtractor {
    /// Fit the extractor to a training set and return one feature vector
    /// per sample, in input order.
    ///
    /// A failed fit leaves any previously fitted state untouched.
    fn compute(&mut self, samples: &[Sample], labels: &[usize]) -> Result<Vec<FeatureVector>>;

    /// Map a single sample to its feature vector using the fitted state.
    fn extract(&self, sample: &Sample) -> Result<FeatureVector>;

    /// Short human-readable name for reporting.
    fn short_name(&self) -> String;
}

/// Validate a training set: non-empty, one label per sample.
pub(crate) fn check_training_input(samples: &[Sample], labels: &[usize]) -> Result<()> {
    if samples.is_empty() {
        return Err(Error::EmptyInput);
    }
    if samples.len() != labels.len() {
        return Err(Error::LengthMismatch {
            samples: samples.len(),
            labels: labels.len(),
        });
    }
    Ok(())
}
