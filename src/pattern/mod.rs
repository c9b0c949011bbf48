//! Local pattern operators for texture description.
//!
//! A local pattern operator turns a grayscale image into a map of small
//! integer codes, one per interior pixel, where each code summarizes the
//! pixel's immediate neighborhood. Downstream descriptors such as
//! [`SpatialHistogram`](crate::extract::SpatialHistogram) never look at raw
//! intensities again; they work on the code map alone.
//!
//! The operators here are Local Binary Patterns:
//!
//! - [`OriginalLbp`] — the fixed 3×3 operator, 8 neighbors, 256 codes.
//! - [`ExtendedLbp`] — circular sampling with configurable radius and
//!   neighbor count, bilinear interpolation for off-grid points.
//!
//! Both shrink the output map by the border the neighborhood needs, so the
//! map carries its own geometry: consumers read cell sizes off the map, not
//! off the input image.
//!
//! ## Usage
//!
//! ```rust
//! use ndarray::Array2;
//! use visage::pattern::{ExtendedLbp, LocalPattern};
//!
//! let image = Array2::from_shape_fn((32, 32), |(i, j)| (i * j) as f64);
//! let operator = ExtendedLbp::new().with_radius(2).with_neighbors(8);
//! let map = operator.apply(&image);
//!
//! assert_eq!(map.dim(), (28, 28));
//! assert!(map.iter().all(|&code| code < 256));
//! ```

mod lbp;
mod traits;

pub use lbp::{ExtendedLbp, OriginalLbp};
pub use traits::{LabelMap, LocalPattern};
