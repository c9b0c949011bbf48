//! Fisherfaces.
//!
//! Discriminant analysis made workable for image data (Belhumeur et al.
//! 1997). Raw [`Lda`](crate::extract::Lda) needs the sample dimension to
//! stay below n - c, which pixel data never satisfies: a modest 100 × 100
//! image has 10,000 dimensions against maybe a few hundred training samples.
//! Fisherfaces runs PCA first to shrink the data into a subspace where the
//! within-class scatter is invertible, then discriminates there.
//!
//! # Algorithm
//!
//! 1. PCA down to n - c components, enough to make the discriminant
//!    stage well-posed while discarding only null directions
//! 2. LDA on the PCA coefficients, keeping at most c - 1 discriminants
//! 3. Fold both projections into one matrix: W = W_pca W_lda
//!
//! The folded W maps raw samples straight to discriminant space, so
//! inference pays for a single matrix product rather than two chained
//! stages. Like plain LDA, projection skips mean subtraction; a shared
//! offset shifts every projection equally and separates nothing.
//!
//! # References
//!
//! - Belhumeur, Hespanha, Kriegman (1997). "Eigenfaces vs. Fisherfaces:
//!   Recognition Using Class Specific Linear Projection"

use ndarray::{Array1, Array2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::extract::traits::{check_training_input, FeatureExtractor};
use crate::extract::{Chain, Lda, Pca};
use crate::sample::{self, FeatureVector, Sample};

/// Fitted Fisherfaces state.
#[derive(Debug, Clone)]
struct FisherfacesState {
    /// Folded projection W_pca W_lda as columns, d × k.
    eigenvectors: Array2<f64>,
    /// Discriminant eigenvalue real parts, descending.
    eigenvalues: Vec<f64>,
}

/// Fisherfaces extractor: PCA for rank, LDA for discrimination.
#[derive(Debug, Clone)]
pub struct Fisherfaces {
    /// Requested discriminant count; 0 resolves to c-1 at fit time.
    requested: usize,
    /// Fitted state, absent until `compute` succeeds.
    state: Option<FisherfacesState>,
}

impl Fisherfaces {
    /// Create a Fisherfaces extractor that keeps all c-1 discriminants.
    pub fn new() -> Self {
        Self {
            requested: 0,
            state: None,
        }
    }

    /// Set the number of discriminants to retain. 0 means c-1; anything
    /// larger than c-1 is clamped down to it.
    pub fn with_num_components(mut self, num_components: usize) -> Self {
        self.requested = num_components;
        self
    }

    /// Number of retained discriminants, once fitted.
    pub fn num_components(&self) -> Option<usize> {
        self.state.as_ref().map(|st| st.eigenvalues.len())
    }

    /// Discriminant eigenvalue real parts, descending, once fitted.
    pub fn eigenvalues(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|st| st.eigenvalues.as_slice())
    }

    /// Folded projection as columns of a d × k matrix, once fitted.
    pub fn eigenvectors(&self) -> Option<&Array2<f64>> {
        self.state.as_ref().map(|st| &st.eigenvectors)
    }

    /// Project a flattened sample through the folded map in one step.
    pub fn project(&self, x: &Array1<f64>) -> Result<FeatureVector> {
        let st = self.state.as_ref().ok_or(Error::NotFitted)?;
        if x.len() != st.eigenvectors.nrows() {
            return Err(Error::ShapeMismatch {
                expected: format!("{} values", st.eigenvectors.nrows()),
                actual: format!("{} values", x.len()),
            });
        }
        Ok(Self::project_with(st, x))
    }

    /// Map a feature vector back to sample space: W z. The folded columns
    /// are not orthonormal, so this is the formal companion of
    /// [`project`](Self::project) rather than a least-squares inverse.
    pub fn reconstruct(&self, z: &Array1<f64>) -> Result<Array1<f64>> {
        let st = self.state.as_ref().ok_or(Error::NotFitted)?;
        if z.len() != st.eigenvalues.len() {
            return Err(Error::ShapeMismatch {
                expected: format!("{} components", st.eigenvalues.len()),
                actual: format!("{} components", z.len()),
            });
        }
        Ok(st.eigenvectors.dot(z))
    }

    fn project_with(state: &FisherfacesState, x: &Array1<f64>) -> FeatureVector {
        state.eigenvectors.t().dot(x)
    }
}

impl Default for Fisherfaces {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor for Fisherfaces {
    fn compute(&mut self, samples: &[Sample], labels: &[usize]) -> Result<Vec<FeatureVector>> {
        check_training_input(samples, labels)?;

        let n = samples.len();
        let mut classes = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();
        let c = classes.len();

        // PCA to n-c components leaves the discriminant stage a
        // full-rank within-class scatter.
        let mut stages = Chain::new(
            Pca::new().with_num_components(n - c),
            Lda::new().with_num_components(self.requested),
        );
        stages.compute(samples, labels)?;
        let (pca, lda) = stages.into_parts();

        let w_pca = pca.eigenvectors().ok_or(Error::NotFitted)?;
        let w_lda = lda.eigenvectors().ok_or(Error::NotFitted)?;
        let state = FisherfacesState {
            eigenvectors: w_pca.dot(w_lda),
            eigenvalues: lda.eigenvalues().ok_or(Error::NotFitted)?.to_vec(),
        };

        #[cfg(feature = "parallel")]
        let features: Vec<FeatureVector> = samples
            .par_iter()
            .map(|s| Self::project_with(&state, &sample::flatten(s)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let features: Vec<FeatureVector> = samples
            .iter()
            .map(|s| Self::project_with(&state, &sample::flatten(s)))
            .collect();

        self.state = Some(state);
        Ok(features)
    }

    fn extract(&self, sample: &Sample) -> Result<FeatureVector> {
        self.project(&sample::flatten(sample))
    }

    fn short_name(&self) -> String {
        match self.num_components() {
            Some(k) => format!("Fisher: {k}"),
            None => format!("Fisher: {}", self.requested),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Three classes of 2 x 3 images: class 1 bright on the top row,
    /// class 2 bright on the bottom row, class 0 dim everywhere.
    fn three_class_images() -> (Vec<Sample>, Vec<usize>) {
        let samples = vec![
            array![[0.0, 1.0, 0.2], [1.1, 0.3, 0.9]],
            array![[0.9, 0.1, 1.0], [0.2, 1.1, 0.1]],
            array![[0.2, 0.8, 0.1], [0.9, 0.2, 1.2]],
            array![[1.1, 0.3, 0.8], [0.1, 0.7, 0.4]],
            array![[10.1, 11.0, 10.3], [0.9, 0.1, 1.0]],
            array![[11.0, 10.2, 10.9], [0.1, 1.2, 0.2]],
            array![[10.3, 10.8, 11.1], [1.0, 0.3, 0.8]],
            array![[10.9, 11.2, 10.1], [0.2, 0.9, 0.3]],
            array![[0.1, 0.9, 0.3], [10.8, 11.1, 10.2]],
            array![[1.0, 0.2, 1.1], [10.1, 10.3, 11.0]],
            array![[0.3, 1.1, 0.2], [11.2, 10.9, 10.4]],
            array![[0.8, 0.4, 0.9], [10.3, 10.2, 10.9]],
        ];
        let labels = vec![0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2];
        (samples, labels)
    }

    #[test]
    fn test_fisherfaces_default_keeps_c_minus_one() {
        let (samples, labels) = three_class_images();

        let mut fisher = Fisherfaces::new();
        let features = fisher.compute(&samples, &labels).unwrap();

        assert_eq!(features.len(), 12);
        for feature in &features {
            assert_eq!(feature.len(), 2);
        }
        assert_eq!(fisher.num_components(), Some(2));
        assert_eq!(fisher.eigenvectors().unwrap().dim(), (6, 2));
        assert_eq!(fisher.eigenvalues().unwrap().len(), 2);
    }

    #[test]
    fn test_fisherfaces_oversized_request_clamped() {
        let (samples, labels) = three_class_images();

        let mut fisher = Fisherfaces::new().with_num_components(5);
        fisher.compute(&samples, &labels).unwrap();

        assert_eq!(fisher.num_components(), Some(2));
    }

    #[test]
    fn test_fisherfaces_single_discriminant() {
        let (samples, labels) = three_class_images();

        let mut fisher = Fisherfaces::new().with_num_components(1);
        let features = fisher.compute(&samples, &labels).unwrap();

        assert_eq!(fisher.num_components(), Some(1));
        assert_eq!(features[0].len(), 1);
    }

    #[test]
    fn test_fisherfaces_groups_classes() {
        let (samples, labels) = three_class_images();

        let mut fisher = Fisherfaces::new();
        let features = fisher.compute(&samples, &labels).unwrap();

        let mut means = vec![Array1::<f64>::zeros(2); 3];
        let mut counts = [0usize; 3];
        for (feature, &label) in features.iter().zip(&labels) {
            means[label] += feature;
            counts[label] += 1;
        }
        for (mean, count) in means.iter_mut().zip(counts) {
            *mean /= count as f64;
        }

        // Every training feature sits nearest its own class mean
        for (feature, &label) in features.iter().zip(&labels) {
            let mut best = 0;
            let mut best_dist = f64::INFINITY;
            for (class, mean) in means.iter().enumerate() {
                let dist = (feature - mean).mapv(|v| v * v).sum();
                if dist < best_dist {
                    best_dist = dist;
                    best = class;
                }
            }
            assert_eq!(best, label);
        }
    }

    #[test]
    fn test_fisherfaces_matches_explicit_two_stage() {
        let (samples, labels) = three_class_images();
        let c = 3;

        let mut fisher = Fisherfaces::new();
        fisher.compute(&samples, &labels).unwrap();

        let mut stages = Chain::new(
            Pca::new().with_num_components(samples.len() - c),
            Lda::new(),
        );
        stages.compute(&samples, &labels).unwrap();
        let (pca, lda) = stages.into_parts();
        let w_pca = pca.eigenvectors().unwrap();
        let w_lda = lda.eigenvectors().unwrap();

        for sample in &samples {
            let x = crate::sample::flatten(sample);
            let two_stage = w_lda.t().dot(&w_pca.t().dot(&x));
            let folded = fisher.extract(sample).unwrap();
            for (a, b) in folded.iter().zip(two_stage.iter()) {
                assert!((a - b).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_fisherfaces_extract_matches_compute_features() {
        let (samples, labels) = three_class_images();

        let mut fisher = Fisherfaces::new();
        let features = fisher.compute(&samples, &labels).unwrap();

        for (sample, feature) in samples.iter().zip(&features) {
            let extracted = fisher.extract(sample).unwrap();
            for (a, b) in extracted.iter().zip(feature.iter()) {
                assert!((a - b).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_fisherfaces_reconstruct_shape() {
        let (samples, labels) = three_class_images();

        let mut fisher = Fisherfaces::new();
        let features = fisher.compute(&samples, &labels).unwrap();

        let rebuilt = fisher.reconstruct(&features[0]).unwrap();
        assert_eq!(rebuilt.len(), 6);

        assert!(matches!(
            fisher.reconstruct(&array![1.0, 2.0, 3.0]),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_fisherfaces_before_compute_errors() {
        let fisher = Fisherfaces::new();
        assert_eq!(fisher.extract(&array![[1.0, 2.0]]), Err(Error::NotFitted));
        assert_eq!(fisher.reconstruct(&array![1.0]), Err(Error::NotFitted));
        assert_eq!(fisher.num_components(), None);
        assert!(fisher.eigenvalues().is_none());
        assert!(fisher.eigenvectors().is_none());
    }

    #[test]
    fn test_fisherfaces_singleton_classes_degenerate() {
        // One sample per class leaves nothing for the within-class scatter
        let samples = vec![
            array![[1.0, 2.0, 3.0]],
            array![[4.0, 5.0, 6.0]],
            array![[7.0, 8.0, 10.0]],
        ];
        let labels = vec![0, 1, 2];

        let mut fisher = Fisherfaces::new();
        let result = fisher.compute(&samples, &labels);

        assert!(matches!(result, Err(Error::DegenerateScatter { .. })));
        assert_eq!(fisher.num_components(), None);
    }

    #[test]
    fn test_fisherfaces_validates_training_input() {
        let mut fisher = Fisherfaces::new();

        let empty: Vec<Sample> = vec![];
        assert_eq!(fisher.compute(&empty, &[]), Err(Error::EmptyInput));

        let samples = vec![array![[1.0]], array![[2.0]]];
        assert!(matches!(
            fisher.compute(&samples, &[0]),
            Err(Error::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_fisherfaces_failed_refit_keeps_state() {
        let (samples, labels) = three_class_images();

        let mut fisher = Fisherfaces::new();
        fisher.compute(&samples, &labels).unwrap();

        let ragged = vec![array![[1.0, 2.0]], array![[1.0, 2.0, 3.0]]];
        assert!(fisher.compute(&ragged, &[0, 1]).is_err());

        assert_eq!(fisher.num_components(), Some(2));
        assert!(fisher.extract(&samples[0]).is_ok());
    }

    #[test]
    fn test_fisherfaces_wrong_probe_shape() {
        let (samples, labels) = three_class_images();

        let mut fisher = Fisherfaces::new();
        fisher.compute(&samples, &labels).unwrap();

        assert!(matches!(
            fisher.extract(&array![[1.0, 2.0]]),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_fisherfaces_short_name_tracks_fit() {
        let (samples, labels) = three_class_images();

        let mut fisher = Fisherfaces::new();
        assert_eq!(fisher.short_name(), "Fisher: 0");

        fisher.compute(&samples, &labels).unwrap();
        assert_eq!(fisher.short_name(), "Fisher: 2");
    }
}
