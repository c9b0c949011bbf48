//! Local pattern operator traits.

use ndarray::Array2;

/// 2-D map of local pattern codes, co-indexed with the image pixels the
/// codes were computed at.
pub type LabelMap = Array2<u32>;

/// Trait for local texture operators.
///
/// An operator relabels every interior pixel of a grayscale image with an
/// integer code in `[0, 2^neighbors)` describing its neighborhood. The output
/// map is smaller than the input wherever the neighborhood does not fit
/// inside the image border.
///
/// Operators hold configuration only, so they are `Send + Sync` and can be
/// shared across per-sample worker threads.
pub trait LocalPattern: Send + Sync {
    /// Compute the code map for an image.
    fn apply(&self, image: &Array2<f64>) -> LabelMap;

    /// Number of sampling points, i.e. bits per code.
    fn neighbors(&self) -> u32;
}
