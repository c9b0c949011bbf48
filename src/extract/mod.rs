//! Feature extractors for turning samples into comparable vectors.
//!
//! Raw images are poor inputs for a classifier: thousands of correlated
//! pixel values, most of them carrying lighting and background rather than
//! identity. An extractor is fitted once on a labeled training set with
//! `compute`, which returns one feature vector per training sample, and is
//! then applied to new samples with `extract`.
//!
//! ## Subspace vs Texture
//!
//! **Subspace extractors** (PCA, LDA, Fisherfaces) learn a linear projection
//! from the training set and describe every sample by its coordinates in
//! that learned basis. They must be fitted before they can extract.
//!
//! **Texture extractors** (spatial histograms over local binary patterns)
//! learn nothing: each sample is described independently by the distribution
//! of local patterns across a grid. Configuration aside, `extract` works
//! without any prior `compute`.
//!
//! ## Choosing an Extractor
//!
//! | Extractor | Supervision | Captures | Caveat |
//! |-----------|-------------|----------|--------|
//! | [`Identity`] | none | raw samples | baseline only |
//! | [`Pca`] | unsupervised | directions of most variance | variance ≠ identity |
//! | [`Lda`] | labels | directions separating classes | needs d ≤ n - c |
//! | [`Fisherfaces`] | labels | LDA made workable for images | — |
//! | [`SpatialHistogram`] | none | local texture per grid cell | discards fine geometry |
//!
//! ## Composition
//!
//! [`Chain`] feeds one extractor's features to another, fitting both in one
//! `compute` pass. [`Fisherfaces`] is the canonical composition — PCA for
//! rank, then LDA for discrimination — folded into a single projection
//! matrix for inference.
//!
//! ## Usage
//!
//! ```rust
//! use visage::extract::{FeatureExtractor, Pca};
//! use ndarray::array;
//!
//! let samples = vec![
//!     array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
//!     array![[2.0, 1.0, 4.0], [3.0, 7.0, 5.0]],
//!     array![[8.0, 2.0, 1.0], [5.0, 5.0, 9.0]],
//!     array![[7.0, 4.0, 2.0], [1.0, 6.0, 8.0]],
//! ];
//! let labels = vec![0, 0, 1, 1];
//!
//! // Fit on the training set, then project new samples
//! let mut pca = Pca::new().with_num_components(2);
//! let features = pca.compute(&samples, &labels).unwrap();
//! assert_eq!(features.len(), 4);
//! assert_eq!(features[0].len(), 2);
//!
//! let probe = array![[2.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
//! assert_eq!(pca.extract(&probe).unwrap().len(), 2);
//! ```

mod chain;
mod fisherfaces;
mod histogram;
mod identity;
mod lda;
mod pca;
mod traits;

pub use chain::Chain;
pub use fisherfaces::Fisherfaces;
pub use histogram::SpatialHistogram;
pub use identity::Identity;
pub use lda::Lda;
pub use pca::Pca;
pub use traits::FeatureExtractor;
