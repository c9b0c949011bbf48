//! Sample representation and matrix plumbing.
//!
//! Extractors consume samples as 2-D arrays: grayscale images, or `d x 1`
//! columns for data that is already flat. Internally each sample is
//! flattened row-major into one column of a `faer` matrix, which is the
//! layout the decompositions run on.

use faer::{Mat, MatRef};
use ndarray::{Array1, Array2};

use crate::error::{Error, Result};

/// A single observation: a grayscale image or an already-flat column.
pub type Sample = Array2<f64>;

/// A fixed-length feature vector produced by an extractor.
pub type FeatureVector = Array1<f64>;

/// Stack samples as columns of a `d x n` matrix.
///
/// Each sample is flattened row-major; sample `j` becomes column `j`.
/// All samples must flatten to the same length.
pub fn as_column_matrix(samples: &[Sample]) -> Result<Mat<f64>> {
    let first = samples.first().ok_or(Error::EmptyInput)?;
    let dim = first.len();

    let mut mat = Mat::<f64>::zeros(dim, samples.len());
    for (j, sample) in samples.iter().enumerate() {
        if sample.len() != dim {
            return Err(Error::ShapeMismatch {
                expected: format!("{dim} values per sample"),
                actual: format!("{} values in sample {j}", sample.len()),
            });
        }
        for (i, value) in sample.iter().enumerate() {
            mat[(i, j)] = *value;
        }
    }
    Ok(mat)
}

/// Flatten a sample row-major into a feature vector.
pub(crate) fn flatten(sample: &Sample) -> FeatureVector {
    Array1::from_iter(sample.iter().copied())
}

/// Mean over the columns of `m`. Requires at least one column.
pub(crate) fn column_mean(m: MatRef<'_, f64>) -> Array1<f64> {
    let n = m.ncols() as f64;
    let mut mean = Array1::zeros(m.nrows());
    for j in 0..m.ncols() {
        for i in 0..m.nrows() {
            mean[i] += m[(i, j)];
        }
    }
    mean / n
}

/// Indices that sort `values` in descending order. Stable for ties.
pub(crate) fn argsort_desc(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[b]
            .partial_cmp(&values[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_column_matrix_flattens_row_major() {
        let samples = vec![array![[1.0, 2.0], [3.0, 4.0]], array![[5.0, 6.0], [7.0, 8.0]]];

        let mat = as_column_matrix(&samples).unwrap();

        assert_eq!(mat.nrows(), 4);
        assert_eq!(mat.ncols(), 2);
        // Row-major: (0,0), (0,1), (1,0), (1,1)
        assert_eq!(mat[(0, 0)], 1.0);
        assert_eq!(mat[(1, 0)], 2.0);
        assert_eq!(mat[(2, 0)], 3.0);
        assert_eq!(mat[(3, 0)], 4.0);
        assert_eq!(mat[(0, 1)], 5.0);
        assert_eq!(mat[(3, 1)], 8.0);
    }

    #[test]
    fn test_column_matrix_empty_error() {
        let samples: Vec<Sample> = vec![];
        assert!(matches!(as_column_matrix(&samples), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_column_matrix_ragged_error() {
        let samples = vec![array![[1.0, 2.0]], array![[1.0, 2.0, 3.0]]];
        assert!(matches!(
            as_column_matrix(&samples),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_column_mean() {
        let samples = vec![array![[1.0], [2.0]], array![[3.0], [6.0]]];
        let mat = as_column_matrix(&samples).unwrap();
        let mean = column_mean(mat.as_ref());
        assert_eq!(mean, array![2.0, 4.0]);
    }

    #[test]
    fn test_argsort_desc_stable_on_ties() {
        let values = [1.0, 3.0, 3.0, 0.5];
        assert_eq!(argsort_desc(&values), vec![1, 2, 0, 3]);
    }
}
