//! # visage
//!
//! Feature extraction for face and texture recognition: subspace projections
//! (PCA, LDA, Fisherfaces) and spatially enhanced local binary pattern
//! histograms, behind one `compute`/`extract` contract.
//!
//! **Default build** is single-threaded. Per-sample batch work parallelizes
//! via the `parallel` feature flag.
//!
//! ```rust
//! use visage::{FeatureExtractor, Fisherfaces};
//! use ndarray::array;
//!
//! // Two samples per class, three classes of tiny 2 x 2 "images"
//! let samples = vec![
//!     array![[0.1, 0.9], [0.2, 1.1]],
//!     array![[0.3, 1.0], [0.1, 0.8]],
//!     array![[5.2, 0.8], [5.1, 1.0]],
//!     array![[4.9, 1.1], [5.3, 0.9]],
//!     array![[0.2, 6.1], [0.3, 5.8]],
//!     array![[0.1, 5.9], [0.2, 6.2]],
//! ];
//! let labels = vec![0, 0, 1, 1, 2, 2];
//!
//! let mut fisher = Fisherfaces::new();
//! let features = fisher.compute(&samples, &labels).unwrap();
//! assert_eq!(features.len(), 6);
//! assert_eq!(fisher.num_components(), Some(2));
//!
//! // New samples project through the folded PCA + LDA map in one step
//! let probe = array![[0.2, 1.0], [0.2, 0.9]];
//! assert_eq!(fisher.extract(&probe).unwrap().len(), 2);
//! ```

/// Error types used across `visage`.
pub mod error;
pub mod extract;
pub mod pattern;
pub mod sample;


pub use error::{Error, Result};
pub use extract::{Chain, FeatureExtractor, Fisherfaces, Identity, Lda, Pca, SpatialHistogram};
pub use pattern::{ExtendedLbp, LabelMap, LocalPattern, OriginalLbp};
pub use sample::{as_column_matrix, FeatureVector, Sample};
