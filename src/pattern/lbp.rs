//! Local Binary Patterns.
//!
//! LBP encodes local texture by thresholding a pixel's neighborhood against
//! the pixel itself: each sampling point contributes one bit, set when the
//! sampled intensity is at least the center intensity. The resulting integer
//! codes are illumination-robust, cheap to compute, and feed directly into
//! histogram-based descriptors.
//!
//! # The Code
//!
//! For a center pixel `c` and sampling points `p_0 .. p_{P-1}`:
//!
//! ```text
//! LBP(c) = Σᵢ 2ⁱ × [ p_i ≥ c ]
//! ```
//!
//! Monotone intensity changes (lighting, contrast) leave every comparison,
//! and therefore every code, unchanged.
//!
//! # Variants
//!
//! | Operator | Neighborhood | Sampling |
//! |----------|--------------|----------|
//! | [`OriginalLbp`] | fixed 3×3 | the 8 adjacent pixels |
//! | [`ExtendedLbp`] | circle of radius r | P points, bilinearly interpolated |
//!
//! The circular variant (Ojala et al., 2002) decouples the spatial scale
//! (radius) from the code resolution (sampling points), which the fixed 3×3
//! operator ties together.
//!
//! # References
//!
//! - Ojala, Pietikäinen, Harwood (1996). "A comparative study of texture
//!   measures with classification based on featured distributions"
//! - Ojala, Pietikäinen, Mäenpää (2002). "Multiresolution gray-scale and
//!   rotation invariant texture classification with local binary patterns"

use ndarray::Array2;

use super::traits::{LabelMap, LocalPattern};

/// The original 3×3 LBP operator.
///
/// Compares the 8 adjacent pixels against the center, clockwise from the
/// top-left corner with the most significant bit first. The output map drops
/// the 1-pixel image border, so an `h × w` image yields an
/// `(h-2) × (w-2)` map of codes in `[0, 256)`.
#[derive(Debug, Clone)]
pub struct OriginalLbp;

impl OriginalLbp {
    /// Create the fixed 3×3 operator.
    pub fn new() -> Self {
        Self
    }
}

impl Default for OriginalLbp {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalPattern for OriginalLbp {
    fn apply(&self, image: &Array2<f64>) -> LabelMap {
        let h = image.nrows().saturating_sub(2);
        let w = image.ncols().saturating_sub(2);
        let mut map = LabelMap::zeros((h, w));

        for row in 0..h {
            for col in 0..w {
                let center = image[[row + 1, col + 1]];
                let mut code = 0u32;
                code |= ((image[[row, col]] >= center) as u32) << 7;
                code |= ((image[[row, col + 1]] >= center) as u32) << 6;
                code |= ((image[[row, col + 2]] >= center) as u32) << 5;
                code |= ((image[[row + 1, col + 2]] >= center) as u32) << 4;
                code |= ((image[[row + 2, col + 2]] >= center) as u32) << 3;
                code |= ((image[[row + 2, col + 1]] >= center) as u32) << 2;
                code |= ((image[[row + 2, col]] >= center) as u32) << 1;
                code |= (image[[row + 1, col]] >= center) as u32;
                map[[row, col]] = code;
            }
        }
        map
    }

    fn neighbors(&self) -> u32 {
        8
    }
}

/// Circular LBP with configurable radius and sampling count.
///
/// Sampling point `i` sits at angle `2πi/P` on a circle of the given radius
/// around the center pixel; off-grid points are bilinearly interpolated from
/// the four enclosing pixels. The output map drops an `r`-pixel border, so an
/// `h × w` image yields an `(h-2r) × (w-2r)` map; images smaller than the
/// neighborhood yield an empty map. Codes are `u32`, so at most 32 sampling
/// points are representable.
#[derive(Debug, Clone)]
pub struct ExtendedLbp {
    /// Circle radius in pixels.
    radius: usize,
    /// Number of sampling points on the circle.
    neighbors: u32,
}

impl ExtendedLbp {
    /// Create a circular operator with radius 1 and 8 sampling points.
    pub fn new() -> Self {
        Self {
            radius: 1,
            neighbors: 8,
        }
    }

    /// Set the circle radius in pixels.
    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    /// Set the number of sampling points on the circle.
    pub fn with_neighbors(mut self, neighbors: u32) -> Self {
        self.neighbors = neighbors;
        self
    }

    /// Sampling point offsets relative to the center, in image coordinates
    /// (row, col). Point `i` sits at angle `2πi/P`, measured so that point 0
    /// is due east and the sequence runs counter-clockwise on screen.
    fn sample_offsets(&self) -> Vec<(f64, f64)> {
        let r = self.radius as f64;
        (0..self.neighbors)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * f64::from(i) / f64::from(self.neighbors);
                (-r * theta.sin(), r * theta.cos())
            })
            .collect()
    }
}

impl Default for ExtendedLbp {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalPattern for ExtendedLbp {
    fn apply(&self, image: &Array2<f64>) -> LabelMap {
        let border = self.radius;
        let h = image.nrows().saturating_sub(2 * border);
        let w = image.ncols().saturating_sub(2 * border);
        let mut map = LabelMap::zeros((h, w));
        let offsets = self.sample_offsets();

        for row in 0..h {
            for col in 0..w {
                let cy = row + border;
                let cx = col + border;
                let center = image[[cy, cx]];
                let mut code = 0u32;

                for (bit, &(dy, dx)) in offsets.iter().enumerate() {
                    let y = cy as f64 + dy;
                    let x = cx as f64 + dx;
                    let y0 = y.floor() as usize;
                    let x0 = x.floor() as usize;
                    let y1 = y.ceil() as usize;
                    let x1 = x.ceil() as usize;
                    let ty = y - y.floor();
                    let tx = x - x.floor();

                    let value = (1.0 - tx) * (1.0 - ty) * image[[y0, x0]]
                        + tx * (1.0 - ty) * image[[y0, x1]]
                        + (1.0 - tx) * ty * image[[y1, x0]]
                        + tx * ty * image[[y1, x1]];

                    if value >= center {
                        code |= 1 << bit;
                    }
                }
                map[[row, col]] = code;
            }
        }
        map
    }

    fn neighbors(&self) -> u32 {
        self.neighbors
    }
}
