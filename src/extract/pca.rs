//! Principal Component Analysis.
//!
//! Projects high-dimensional samples onto the orthogonal directions of
//! maximal variance. For images this is the classic **eigenfaces**
//! construction: every face is summarized by its coordinates in a small
//! basis of principal images.
//!
//! # The Objective
//!
//! Find the rank-k orthonormal basis W minimizing reconstruction error:
//!
//! ```text
//! min_W Σᵢ ||xᵢ - (μ + W Wᵀ (xᵢ - μ))||²
//! ```
//!
//! Equivalently: keep the k eigenvectors of the sample covariance matrix
//! with the largest eigenvalues.
//!
//! # Algorithm
//!
//! 1. Stack the n flattened samples as columns of a d × n matrix
//! 2. Subtract the column mean μ
//! 3. Take the economy SVD of the centered matrix
//! 4. The left singular vectors are the axes; covariance eigenvalues are σᵢ²/n
//! 5. Keep the k axes with the largest eigenvalues
//!
//! The SVD route never forms the d × d covariance matrix, which for images
//! (d = pixel count) would dwarf the data itself.
//!
//! # Choosing k
//!
//! Centered data from n samples has rank at most n-1, so more than n-1
//! components carry nothing; requesting 0 (or more than n-1) falls back to
//! n-1. [`Pca::energy_percentage`] reports the variance fraction the
//! retained components capture, the usual yardstick for picking k.
//!
//! # References
//!
//! - Turk, Pentland (1991). "Eigenfaces for Recognition"
//! - <http://en.wikipedia.org/wiki/Eigenface>

use ndarray::{Array1, Array2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::extract::traits::{check_training_input, FeatureExtractor};
use crate::sample::{self, FeatureVector, Sample};

/// Fitted PCA state.
#[derive(Debug, Clone)]
struct PcaState {
    /// Mean of the flattened training samples.
    mean: Array1<f64>,
    /// Principal axes as columns, d × k.
    eigenvectors: Array2<f64>,
    /// Covariance eigenvalues of the retained axes, descending.
    eigenvalues: Vec<f64>,
    /// Sum of all covariance eigenvalues before truncation.
    total_energy: f64,
}

/// Principal Component Analysis extractor.
#[derive(Debug, Clone)]
pub struct Pca {
    /// Requested component count; 0 resolves to n-1 at fit time.
    requested: usize,
    /// Fitted state, absent until `compute` succeeds.
    state: Option<PcaState>,
}

impl Pca {
    /// Create a PCA extractor that keeps all n-1 informative components.
    pub fn new() -> Self {
        Self {
            requested: 0,
            state: None,
        }
    }

    /// Set the number of components to retain. 0 means all but one.
    pub fn with_num_components(mut self, num_components: usize) -> Self {
        self.requested = num_components;
        self
    }

    /// Number of retained components, once fitted.
    pub fn num_components(&self) -> Option<usize> {
        self.state.as_ref().map(|st| st.eigenvalues.len())
    }

    /// Covariance eigenvalues of the retained components, descending, once fitted.
    pub fn eigenvalues(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|st| st.eigenvalues.as_slice())
    }

    /// Principal axes as columns of a d × k matrix, once fitted.
    pub fn eigenvectors(&self) -> Option<&Array2<f64>> {
        self.state.as_ref().map(|st| &st.eigenvectors)
    }

    /// Mean of the flattened training samples, once fitted.
    pub fn mean(&self) -> Option<&Array1<f64>> {
        self.state.as_ref().map(|st| &st.mean)
    }

    /// Fraction of the training variance captured by the retained
    /// components, once fitted. 1.0 when nothing was truncated.
    pub fn energy_percentage(&self) -> Option<f64> {
        self.state.as_ref().map(|st| {
            let retained: f64 = st.eigenvalues.iter().sum();
            retained / st.total_energy
        })
    }

    /// Project a flattened sample into the principal subspace.
    pub fn project(&self, x: &Array1<f64>) -> Result<FeatureVector> {
        let st = self.state.as_ref().ok_or(Error::NotFitted)?;
        if x.len() != st.mean.len() {
            return Err(Error::ShapeMismatch {
                expected: format!("{} values", st.mean.len()),
                actual: format!("{} values", x.len()),
            });
        }
        Ok(Self::project_with(st, x))
    }

    /// Map a feature vector back to sample space: W z + μ.
    pub fn reconstruct(&self, z: &Array1<f64>) -> Result<Array1<f64>> {
        let st = self.state.as_ref().ok_or(Error::NotFitted)?;
        if z.len() != st.eigenvalues.len() {
            return Err(Error::ShapeMismatch {
                expected: format!("{} components", st.eigenvalues.len()),
                actual: format!("{} components", z.len()),
            });
        }
        Ok(st.eigenvectors.dot(z) + &st.mean)
    }

    fn project_with(state: &PcaState, x: &Array1<f64>) -> FeatureVector {
        let centered = x - &state.mean;
        state.eigenvectors.t().dot(&centered)
    }
}

impl Default for Pca {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor for Pca {
    fn compute(&mut self, samples: &[Sample], labels: &[usize]) -> Result<Vec<FeatureVector>> {
        check_training_input(samples, labels)?;

        let data = sample::as_column_matrix(samples)?;
        let d = data.nrows();
        let n = data.ncols();

        // Resolve the component count: 0 or anything past the rank bound
        // n-1 falls back to n-1; the economy decomposition yields at most
        // min(d, n) axes.
        let mut k = self.requested;
        if k == 0 || k > n - 1 {
            k = n - 1;
        }
        let k = k.min(d);

        let mean = sample::column_mean(data.as_ref());
        let mut centered = data;
        for j in 0..n {
            for i in 0..d {
                centered[(i, j)] -= mean[i];
            }
        }

        let svd = centered
            .thin_svd()
            .map_err(|e| Error::Other(format!("thin SVD failed: {e:?}")))?;
        let u = svd.U();
        let s = svd.S();

        // Squared singular values over n are the covariance eigenvalues
        let rank = u.ncols();
        let eigenvalues: Vec<f64> = (0..rank).map(|i| s[i] * s[i] / n as f64).collect();
        let total_energy: f64 = eigenvalues.iter().sum();

        let order = sample::argsort_desc(&eigenvalues);
        let mut eigenvectors = Array2::zeros((d, k));
        for (out_col, &src_col) in order.iter().take(k).enumerate() {
            for row in 0..d {
                eigenvectors[[row, out_col]] = u[(row, src_col)];
            }
        }
        let eigenvalues: Vec<f64> = order.iter().take(k).map(|&i| eigenvalues[i]).collect();

        let state = PcaState {
            mean,
            eigenvectors,
            eigenvalues,
            total_energy,
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
            Some(k) => format!("PCA: {k}"),
            None => format!("PCA: {}", self.requested),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn six_dim_samples() -> (Vec<Sample>, Vec<usize>) {
        let samples = vec![
            array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
            array![[2.0, 1.0, 4.0], [3.0, 7.0, 5.0]],
            array![[8.0, 2.0, 1.0], [5.0, 5.0, 9.0]],
            array![[7.0, 4.0, 2.0], [1.0, 6.0, 8.0]],
        ];
        let labels = vec![0, 0, 1, 1];
        (samples, labels)
    }

    #[test]
    fn test_pca_fixed_component_count() {
        let (samples, labels) = six_dim_samples();

        let mut pca = Pca::new().with_num_components(2);
        let features = pca.compute(&samples, &labels).unwrap();

        assert_eq!(features.len(), 4);
        for feature in &features {
            assert_eq!(feature.len(), 2);
        }
        assert_eq!(pca.num_components(), Some(2));
        assert_eq!(pca.eigenvectors().unwrap().dim(), (6, 2));
    }

    #[test]
    fn test_pca_auto_components_is_n_minus_one() {
        let (samples, labels) = six_dim_samples();

        let mut pca = Pca::new();
        pca.compute(&samples, &labels).unwrap();

        assert_eq!(pca.num_components(), Some(3));
    }

    #[test]
    fn test_pca_oversized_request_falls_back() {
        let (samples, labels) = six_dim_samples();

        let mut pca = Pca::new().with_num_components(100);
        pca.compute(&samples, &labels).unwrap();

        assert_eq!(pca.num_components(), Some(3));
    }

    #[test]
    fn test_pca_known_axis() {
        // Points spread along the first coordinate only
        let samples = vec![
            array![[0.0, 0.0]],
            array![[2.0, 0.0]],
            array![[4.0, 0.0]],
            array![[6.0, 0.0]],
        ];
        let labels = vec![0, 0, 1, 1];

        let mut pca = Pca::new().with_num_components(1);
        pca.compute(&samples, &labels).unwrap();

        let axes = pca.eigenvectors().unwrap();
        assert!((axes[[0, 0]].abs() - 1.0).abs() < 1e-10);
        assert!(axes[[1, 0]].abs() < 1e-10);

        // Centered coordinates are [-3, -1, 1, 3]: variance 5
        let eigenvalues = pca.eigenvalues().unwrap();
        assert!((eigenvalues[0] - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_pca_eigenvalues_descending() {
        let (samples, labels) = six_dim_samples();

        let mut pca = Pca::new();
        pca.compute(&samples, &labels).unwrap();

        let eigenvalues = pca.eigenvalues().unwrap();
        for pair in eigenvalues.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn test_pca_reconstruction_improves_with_k() {
        let (samples, labels) = six_dim_samples();

        let mut errors = Vec::new();
        for k in [1, 2, 3] {
            let mut pca = Pca::new().with_num_components(k);
            let features = pca.compute(&samples, &labels).unwrap();

            let mut err = 0.0;
            for (sample, feature) in samples.iter().zip(&features) {
                let rebuilt = pca.reconstruct(feature).unwrap();
                let x = crate::sample::flatten(sample);
                err += (&x - &rebuilt).mapv(|v| v * v).sum();
            }
            errors.push(err);
        }

        assert!(errors[0] >= errors[1] - 1e-9);
        assert!(errors[1] >= errors[2] - 1e-9);
        // Full rank reproduces the training samples
        assert!(errors[2] < 1e-18);
    }

    #[test]
    fn test_pca_energy_percentage_non_decreasing() {
        let (samples, labels) = six_dim_samples();

        let mut previous = 0.0;
        for k in [1, 2, 3] {
            let mut pca = Pca::new().with_num_components(k);
            pca.compute(&samples, &labels).unwrap();

            let energy = pca.energy_percentage().unwrap();
            assert!(energy >= previous - 1e-12);
            assert!(energy <= 1.0 + 1e-12);
            previous = energy;
        }
        // All informative components retained: nothing lost
        assert!((previous - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pca_extract_matches_compute_features() {
        let (samples, labels) = six_dim_samples();

        let mut pca = Pca::new().with_num_components(2);
        let features = pca.compute(&samples, &labels).unwrap();

        for (sample, feature) in samples.iter().zip(&features) {
            let extracted = pca.extract(sample).unwrap();
            for (a, b) in extracted.iter().zip(feature.iter()) {
                assert!((a - b).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_pca_extract_before_compute_errors() {
        let pca = Pca::new();
        assert_eq!(pca.extract(&array![[1.0, 2.0]]), Err(Error::NotFitted));
    }

    #[test]
    fn test_pca_accessors_before_compute() {
        let pca = Pca::new();
        assert_eq!(pca.num_components(), None);
        assert!(pca.eigenvalues().is_none());
        assert!(pca.eigenvectors().is_none());
        assert!(pca.mean().is_none());
        assert!(pca.energy_percentage().is_none());
    }

    #[test]
    fn test_pca_validates_training_input() {
        let mut pca = Pca::new();

        let empty: Vec<Sample> = vec![];
        assert_eq!(pca.compute(&empty, &[]), Err(Error::EmptyInput));

        let samples = vec![array![[1.0]], array![[2.0]]];
        assert!(matches!(
            pca.compute(&samples, &[0]),
            Err(Error::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_pca_failed_refit_keeps_state() {
        let (samples, labels) = six_dim_samples();

        let mut pca = Pca::new().with_num_components(2);
        pca.compute(&samples, &labels).unwrap();

        // Ragged refit fails after validation of the second sample
        let ragged = vec![array![[1.0, 2.0]], array![[1.0, 2.0, 3.0]]];
        assert!(pca.compute(&ragged, &[0, 1]).is_err());

        // The original six-dimensional fit is still in place
        assert_eq!(pca.num_components(), Some(2));
        assert!(pca.extract(&samples[0]).is_ok());
    }

    #[test]
    fn test_pca_wrong_probe_shape() {
        let (samples, labels) = six_dim_samples();

        let mut pca = Pca::new().with_num_components(2);
        pca.compute(&samples, &labels).unwrap();

        assert!(matches!(
            pca.extract(&array![[1.0, 2.0]]),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_pca_short_name_tracks_fit() {
        let (samples, labels) = six_dim_samples();

        let mut pca = Pca::new();
        assert_eq!(pca.short_name(), "PCA: 0");

        pca.compute(&samples, &labels).unwrap();
        assert_eq!(pca.short_name(), "PCA: 3");
    }
}
