//! Spatially enhanced histograms.
//!
//! A label map from a [`LocalPattern`] operator describes texture pixel by
//! pixel but loses all geometry once histogrammed whole. The spatially
//! enhanced histogram keeps coarse layout: partition the map into a grid,
//! histogram each cell separately, and concatenate the cell histograms in
//! row-major order. Two images then match only when similar textures occur
//! in similar places.
//!
//! Each cell gets one bin per possible code, `2^neighbors` in total, and is
//! normalized to sum to one so cell size drops out of comparisons. Cell size
//! is the floor division of map size by grid size; remainder pixels at the
//! bottom and right edges belong to no cell. Unlike the subspace extractors
//! there is nothing to fit — every sample is processed independently.
//!
//! # References
//!
//! - Ahonen, Hadid, Pietikäinen (2006). "Face Description with Local Binary
//!   Patterns: Application to Face Recognition"

use ndarray::Array1;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::extract::traits::{check_training_input, FeatureExtractor};
use crate::pattern::{ExtendedLbp, LocalPattern};
use crate::sample::{FeatureVector, Sample};

/// Spatial histogram extractor over a local texture operator.
#[derive(Debug, Clone)]
pub struct SpatialHistogram<L> {
    /// Operator producing the per-pixel label map.
    operator: L,
    /// Grid shape as (rows, cols); cells partition the label map.
    grid: (usize, usize),
}

impl<L: LocalPattern> SpatialHistogram<L> {
    /// Create a spatial histogram extractor over an 8 × 8 grid.
    pub fn new(operator: L) -> Self {
        Self {
            operator,
            grid: (8, 8),
        }
    }

    /// Set the grid shape as (rows, cols).
    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.grid = (rows, cols);
        self
    }

    /// The texture operator.
    pub fn operator(&self) -> &L {
        &self.operator
    }

    /// The grid shape as (rows, cols).
    pub fn grid(&self) -> (usize, usize) {
        self.grid
    }

    /// Compute the concatenated per-cell histogram feature for one image.
    ///
    /// Codes outside `[0, 2^neighbors)` are ignored, matching a histogram
    /// over exactly that range; cells left empty by the floor-division
    /// geometry contribute an all-zero segment.
    pub fn spatially_enhanced_histogram(&self, sample: &Sample) -> Result<FeatureVector> {
        let neighbors = self.operator.neighbors();
        if neighbors == 0 {
            return Err(Error::InvalidParameter {
                name: "neighbors",
                message: "operator must sample at least one neighbor per pixel",
            });
        }
        if neighbors >= 32 {
            return Err(Error::InvalidParameter {
                name: "neighbors",
                message: "cells carry 2^neighbors histogram bins; neighbors must stay below 32",
            });
        }
        let (grid_rows, grid_cols) = self.grid;
        if grid_rows == 0 || grid_cols == 0 {
            return Err(Error::InvalidParameter {
                name: "grid",
                message: "grid needs at least one row and one column",
            });
        }

        let map = self.operator.apply(sample);
        let bins = 1usize << neighbors;

        // Floor-division cell size; remainder rows and columns at the
        // bottom and right edges belong to no cell
        let cell_h = map.nrows() / grid_rows;
        let cell_w = map.ncols() / grid_cols;

        let mut out = Array1::zeros(grid_rows * grid_cols * bins);
        for cell_row in 0..grid_rows {
            for cell_col in 0..grid_cols {
                let base = (cell_row * grid_cols + cell_col) * bins;
                let mut in_range = 0usize;
                for i in cell_row * cell_h..(cell_row + 1) * cell_h {
                    for j in cell_col * cell_w..(cell_col + 1) * cell_w {
                        let code = map[[i, j]] as usize;
                        if code < bins {
                            out[base + code] += 1.0;
                            in_range += 1;
                        }
                    }
                }
                // Empty cells keep their all-zero segment
                if in_range > 0 {
                    for bin in 0..bins {
                        out[base + bin] /= in_range as f64;
                    }
                }
            }
        }
        Ok(out)
    }
}

impl Default for SpatialHistogram<ExtendedLbp> {
    fn default() -> Self {
        Self::new(ExtendedLbp::new())
    }
}

impl<L: LocalPattern> FeatureExtractor for SpatialHistogram<L> {
    fn compute(&mut self, samples: &[Sample], labels: &[usize]) -> Result<Vec<FeatureVector>> {
        check_training_input(samples, labels)?;

        #[cfg(feature = "parallel")]
        let features: Result<Vec<FeatureVector>> = samples
            .par_iter()
            .map(|s| self.spatially_enhanced_histogram(s))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let features: Result<Vec<FeatureVector>> = samples
            .iter()
            .map(|s| self.spatially_enhanced_histogram(s))
            .collect();

        features
    }

    fn extract(&self, sample: &Sample) -> Result<FeatureVector> {
        // No fitted state: extraction works before compute too
        self.spatially_enhanced_histogram(sample)
    }

    fn short_name(&self) -> String {
        "LBP Histogram".to_string()
    }
}
