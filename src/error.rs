use core::fmt;

/// Result alias for `visage`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by feature extraction primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Sample and label counts disagree.
    LengthMismatch {
        /// Number of samples.
        samples: usize,
        /// Number of labels.
        labels: usize,
    },

    /// Shape mismatch (string description).
    ShapeMismatch {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        actual: String,
    },

    /// Extraction was attempted before the extractor was fitted.
    NotFitted,

    /// The within-class scatter matrix is singular or near-singular, so the
    /// discriminant eigenproblem has no trustworthy solution. Happens whenever
    /// the sample dimension exceeds `n - c` (samples minus classes); reduce
    /// dimensionality first, e.g. with PCA as the Fisherfaces pipeline does.
    DegenerateScatter {
        /// Sample dimension.
        dim: usize,
        /// Number of samples.
        samples: usize,
        /// Number of classes.
        classes: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Generic error with message.
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::LengthMismatch { samples, labels } => {
                write!(f, "got {samples} samples but {labels} labels")
            }
            Error::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected}, actual {actual}")
            }
            Error::NotFitted => write!(f, "extractor has not been fitted; call compute first"),
            Error::DegenerateScatter {
                dim,
                samples,
                classes,
            } => {
                write!(
                    f,
                    "within-class scatter is singular for dimension {dim} with {samples} samples \
                     in {classes} classes (requires dimension <= samples - classes); \
                     project to a lower-dimensional subspace first"
                )
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}
