//! Linear Discriminant Analysis.
//!
//! Finds the linear directions that best separate labeled classes: maximize
//! between-class scatter relative to within-class scatter (Fisher 1936).
//! Where PCA keeps what varies most, LDA keeps what discriminates best.
//!
//! # The Objective
//!
//! ```text
//! W* = argmax_W  |Wᵀ Sb W| / |Wᵀ Sw W|
//!
//! Sw = Σ_class Σ_{x ∈ class} (x - μ_class)(x - μ_class)ᵀ
//! Sb = Σ_class n_class × (μ_class - μ)(μ_class - μ)ᵀ
//! ```
//!
//! The optimum is given by the leading eigenvectors of `Sw⁻¹ Sb`. At most
//! c-1 eigenvalues are non-zero for c classes, which caps the useful
//! component count at c-1.
//!
//! # Small-Sample-Size Caveat
//!
//! Sw is a sum of n rank-one terms constrained by c class means, so its rank
//! is at most n - c. When the sample dimension exceeds n - c — the usual
//! situation for raw images — Sw is singular and the eigenproblem has no
//! trustworthy solution; such fits fail with
//! [`Error::DegenerateScatter`](crate::Error::DegenerateScatter). The
//! standard remedy is a PCA stage first, which is exactly what
//! [`Fisherfaces`](crate::extract::Fisherfaces) does.
//!
//! # References
//!
//! - Fisher (1936). "The Use of Multiple Measurements in Taxonomic Problems"
//! - Belhumeur, Hespanha, Kriegman (1997). "Eigenfaces vs. Fisherfaces:
//!   Recognition Using Class Specific Linear Projection"

use faer::prelude::*;
use faer::Mat;

use ndarray::{Array1, Array2};

use crate::error::{Error, Result};
use crate::extract::traits::{check_training_input, FeatureExtractor};
use crate::sample::{self, FeatureVector, Sample};

/// Residual bound for accepting the scatter solve, relative to Sb's magnitude.
const SOLVE_RESIDUAL_TOL: f64 = 1e-6;

/// Fitted LDA state.
#[derive(Debug, Clone)]
struct LdaState {
    /// Discriminant directions as columns, d × k.
    eigenvectors: Array2<f64>,
    /// Eigenvalue real parts of the retained directions, descending.
    eigenvalues: Vec<f64>,
}

/// Linear Discriminant Analysis extractor.
#[derive(Debug, Clone)]
pub struct Lda {
    /// Requested component count; 0 resolves to c-1 at fit time.
    requested: usize,
    /// Fitted state, absent until `compute` succeeds.
    state: Option<LdaState>,
}

impl Lda {
    /// Create an LDA extractor that keeps all c-1 discriminants.
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

    /// Eigenvalue real parts of the retained discriminants, descending, once fitted.
    pub fn eigenvalues(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|st| st.eigenvalues.as_slice())
    }

    /// Discriminant directions as columns of a d × k matrix, once fitted.
    pub fn eigenvectors(&self) -> Option<&Array2<f64>> {
        self.state.as_ref().map(|st| &st.eigenvectors)
    }

    /// Project a flattened sample onto the discriminants. No centering is
    /// applied; discriminative information is invariant to a shared offset.
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

    /// Map a feature vector back to sample space: W z.
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

    fn project_with(state: &LdaState, x: &Array1<f64>) -> FeatureVector {
        state.eigenvectors.t().dot(x)
    }
}

impl Default for Lda {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor for Lda {
    fn compute(&mut self, samples: &[Sample], labels: &[usize]) -> Result<Vec<FeatureVector>> {
        check_training_input(samples, labels)?;

        let data = sample::as_column_matrix(samples)?;
        let d = data.nrows();
        let n = data.ncols();

        // The classes are the distinct labels actually present
        let mut classes: Vec<usize> = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();
        let c = classes.len();

        // Sw has rank at most n - c, so the small-sample-size regime is
        // always singular; fail before doing any numeric work.
        if d > n - c {
            return Err(Error::DegenerateScatter {
                dim: d,
                samples: n,
                classes: c,
            });
        }

        // Resolve the component count: at most c-1 discriminants carry
        // between-class information, and at most d directions exist.
        let mut k = self.requested;
        if k == 0 || k > c - 1 {
            k = c - 1;
        }
        let k = k.min(d);

        let mean_total = sample::column_mean(data.as_ref());

        let mut sw = Mat::<f64>::zeros(d, d);
        let mut sb = Mat::<f64>::zeros(d, d);

        for &class in &classes {
            let members: Vec<usize> = (0..labels.len()).filter(|&j| labels[j] == class).collect();
            let count = members.len() as f64;

            let mut mean_class = vec![0.0; d];
            for &j in &members {
                for i in 0..d {
                    mean_class[i] += data[(i, j)];
                }
            }
            for value in &mut mean_class {
                *value /= count;
            }

            for &j in &members {
                let diff: Vec<f64> = (0..d).map(|i| data[(i, j)] - mean_class[i]).collect();
                for a in 0..d {
                    for b in 0..d {
                        sw[(a, b)] += diff[a] * diff[b];
                    }
                }
            }

            let offset: Vec<f64> = (0..d).map(|i| mean_class[i] - mean_total[i]).collect();
            for a in 0..d {
                for b in 0..d {
                    sb[(a, b)] += count * offset[a] * offset[b];
                }
            }
        }

        // Form Sw⁻¹ Sb by solving Sw · M = Sb, then verify the solve: a
        // rank-deficient Sw that slipped past the dimension check shows up
        // as non-finite entries or a large residual.
        let m = sw.full_piv_lu().solve(&sb);

        let product = &sw * &m;
        let mut finite = true;
        let mut sb_max = 0.0f64;
        let mut residual = 0.0f64;
        for a in 0..d {
            for b in 0..d {
                if !m[(a, b)].is_finite() {
                    finite = false;
                }
                sb_max = sb_max.max(sb[(a, b)].abs());
                residual = residual.max((product[(a, b)] - sb[(a, b)]).abs());
            }
        }
        if !finite || residual > SOLVE_RESIDUAL_TOL * (1.0 + sb_max) {
            return Err(Error::DegenerateScatter {
                dim: d,
                samples: n,
                classes: c,
            });
        }

        // M is not symmetric, so eigenpairs may come out complex; order by
        // descending real part and keep the real parts of the leading k.
        let eig = m
            .eigen()
            .map_err(|e| Error::Other(format!("eigendecomposition failed: {e:?}")))?;
        let values = eig.S();
        let vectors = eig.U();

        let mut order: Vec<usize> = (0..d).collect();
        order.sort_by(|&a, &b| {
            values[b]
                .re
                .partial_cmp(&values[a].re)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut eigenvectors = Array2::zeros((d, k));
        let mut eigenvalues = Vec::with_capacity(k);
        for (out_col, &src_col) in order.iter().take(k).enumerate() {
            eigenvalues.push(values[src_col].re);
            for row in 0..d {
                eigenvectors[[row, out_col]] = vectors[(row, src_col)].re;
            }
        }

        let state = LdaState {
            eigenvectors,
            eigenvalues,
        };
        let features = samples
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
        "LDA".to_string()
    }
}
