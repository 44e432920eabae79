//! Error types for the taguchi-robust library.
//!
//! Every fallible operation in the crate happens while an experiment is being
//! constructed (or while a trial is bound to a typed record). Trial generation
//! and analysis never fail: degenerate numeric cases resolve to documented
//! default values instead.

use thiserror::Error;

/// The main error type for the taguchi-robust library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============ Orthogonal Array Errors ============
    /// No standard array is registered under the requested name.
    #[error("orthogonal array {name} is not defined")]
    UnknownArray {
        /// The requested catalogue name.
        name: String,
    },

    /// The orthogonal array has no rows (or no columns).
    #[error("orthogonal array is empty")]
    EmptyArray,

    /// The orthogonal array cannot hold one column per control factor.
    #[error("orthogonal array has {columns} columns but {factors} control factors were declared")]
    TooFewColumns {
        /// Number of columns in the array.
        columns: usize,
        /// Number of declared control factors.
        factors: usize,
    },

    /// A level index in the array does not address a level of its factor.
    #[error(
        "level index {index} at row {row}, column {column} is out of range for factor {factor} \
         (valid range: 1..={levels})"
    )]
    LevelIndexOutOfRange {
        /// 1-based row of the offending entry.
        row: usize,
        /// 1-based column of the offending entry.
        column: usize,
        /// The offending level index.
        index: u32,
        /// Name of the factor assigned to the column.
        factor: String,
        /// Number of levels declared for the factor.
        levels: usize,
    },

    // ============ Dimension Errors ============
    /// Array dimensions are inconsistent.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension description.
        expected: String,
        /// Actual dimension description.
        actual: String,
    },

    // ============ Factor Errors ============
    /// A factor was declared without any levels.
    #[error("factor {factor} has no levels")]
    NoLevels {
        /// Name of the factor.
        factor: String,
    },

    /// Two factors of one experiment share a name.
    #[error("factor {name} is declared more than once")]
    DuplicateFactor {
        /// The repeated name.
        name: String,
    },

    /// A trial carries no value for the requested factor.
    #[error("trial {trial} has no value for factor {name}")]
    UnknownFactor {
        /// Id of the trial that was queried.
        trial: usize,
        /// The requested factor name.
        name: String,
    },

    // ============ Parameter Validation Errors ============
    /// The builder was asked to build without an orthogonal array.
    #[error("no orthogonal array was specified")]
    MissingArray,

    /// Invalid parameters.
    #[error("invalid parameters: {message}")]
    InvalidParams {
        /// Description of what is invalid.
        message: String,
    },
}

/// A specialized `Result` type for taguchi-robust operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Create a new `InvalidParams` error.
    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Create a new `UnknownArray` error.
    #[must_use]
    pub fn unknown_array(name: impl Into<String>) -> Self {
        Self::UnknownArray { name: name.into() }
    }

    /// Whether this error can only be produced while constructing an experiment.
    #[must_use]
    pub fn is_construction_error(&self) -> bool {
        !matches!(self, Self::UnknownFactor { .. } | Self::InvalidParams { .. })
    }
}
