//! Sequential composition of feature extractors.

use ndarray::Axis;

use crate::error::Result;
use crate::extract::traits::FeatureExtractor;
use crate::sample::{FeatureVector, Sample};

/// Chain two extractors: the second stage consumes the first stage's output.
///
/// `compute` fits the first stage, turns its features into single-column
/// samples and fits the second stage on those, with the same labels.
/// `extract` pipes one sample through both fitted stages. Both stages stay
/// inspectable afterwards, so callers can fold or reuse the fitted
/// decompositions — [`Fisherfaces`](crate::extract::Fisherfaces) builds on
/// exactly that.
///
/// A failure in the second stage leaves the first stage already refitted;
/// callers that need all-or-nothing semantics should fit on a fresh chain.
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    /// First stage.
    first: A,
    /// Second stage, fitted on the first stage's features.
    second: B,
}

impl<A: FeatureExtractor, B: FeatureExtractor> Chain<A, B> {
    /// Chain `first` into `second`.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// The first stage.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// The second stage.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Take both stages back out.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: FeatureExtractor, B: FeatureExtractor> FeatureExtractor for Chain<A, B> {
    fn compute(&mut self, samples: &[Sample], labels: &[usize]) -> Result<Vec<FeatureVector>> {
        let intermediate = self.first.compute(samples, labels)?;
        let as_samples: Vec<Sample> = intermediate
            .into_iter()
            .map(|feature| feature.insert_axis(Axis(1)))
            .collect();
        self.second.compute(&as_samples, labels)
    }

    fn extract(&self, sample: &Sample) -> Result<FeatureVector> {
        let intermediate = self.first.extract(sample)?;
        self.second.extract(&intermediate.insert_axis(Axis(1)))
    }

    fn short_name(&self) -> String {
        format!(
            "Chain({} -> {})",
            self.first.short_name(),
            self.second.short_name()
        )
    }
}
