//! Error types.
//!
//! Every error is detected before a search loop starts. Once a run is under
//! way, swap, evaluate and accept/reject are total over a valid [`Tour`] and
//! [`CostMatrix`], so the runners have no error states of their own.
//!
//! [`Tour`]: crate::problem::Tour
//! [`CostMatrix`]: crate::problem::CostMatrix

use std::fmt;

use crate::problem::Cost;

/// Invalid input to a constructor or runner: a bad matrix or a bad parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The matrix has no rows.
    EmptyMatrix,
    /// Row `row` has `len` entries but the matrix has `expected` rows.
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// Fewer than two vertices.
    TooSmall { dimension: usize },
    /// `dimension * dimension` does not fit in `usize`.
    TooLarge { dimension: usize },
    /// An off-diagonal entry is negative.
    NegativeCost { from: usize, to: usize, cost: Cost },
    /// Cooling rate outside the open interval (0, 1).
    InvalidCoolingRate(f64),
    /// Time limit negative or not a number.
    InvalidTimeLimit(f64),
    /// Any other out-of-range parameter.
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyMatrix => write!(f, "cost matrix is empty"),
            ConfigError::NotSquare { row, len, expected } => write!(
                f,
                "cost matrix is not square: row {row} has {len} entries, expected {expected}"
            ),
            ConfigError::TooSmall { dimension } => write!(
                f,
                "cost matrix must have at least 2 vertices, got {dimension}"
            ),
            ConfigError::TooLarge { dimension } => {
                write!(f, "cost matrix dimension {dimension} is too large")
            }
            ConfigError::NegativeCost { from, to, cost } => {
                write!(f, "negative cost {cost} on edge {from} -> {to}")
            }
            ConfigError::InvalidCoolingRate(rate) => {
                write!(f, "cooling rate must be in (0, 1), got {rate}")
            }
            ConfigError::InvalidTimeLimit(secs) => {
                write!(f, "time limit must be a non-negative number of seconds, got {secs}")
            }
            ConfigError::InvalidParameter { name, reason } => write!(f, "{name} {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A vertex sequence that is not a permutation of the matrix's vertex set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    WrongLength { expected: usize, actual: usize },
    OutOfRange { vertex: usize, dimension: usize },
    Duplicate { vertex: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::WrongLength { expected, actual } => write!(
                f,
                "tour has {actual} vertices, expected {expected}"
            ),
            ValidationError::OutOfRange { vertex, dimension } => write!(
                f,
                "vertex {vertex} is out of range for a {dimension}-vertex matrix"
            ),
            ValidationError::Duplicate { vertex } => {
                write!(f, "vertex {vertex} appears more than once")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Failure to read a matrix or tour from text.
#[derive(Debug)]
pub enum ParseError {
    Io(std::io::Error),
    /// TSPLIB header without a `DIMENSION` entry.
    MissingDimension,
    InvalidNumber { line: usize, token: String },
    /// A TSPLIB `EDGE_WEIGHT_FORMAT` or `TYPE` other than the ones supported.
    UnsupportedFormat(String),
    /// Fewer numbers than the declared dimension requires.
    Truncated { expected: usize, found: usize },
    /// A value left over after the declared N×N entries.
    TrailingData { line: usize, token: String },
    Matrix(ConfigError),
    Tour(ValidationError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io(e) => write!(f, "i/o error: {e}"),
            ParseError::MissingDimension => write!(f, "missing DIMENSION entry"),
            ParseError::InvalidNumber { line, token } => {
                write!(f, "line {line}: '{token}' is not a valid integer")
            }
            ParseError::UnsupportedFormat(what) => write!(f, "unsupported format: {what}"),
            ParseError::Truncated { expected, found } => write!(
                f,
                "expected {expected} values, found {found}"
            ),
            ParseError::TrailingData { line, token } => {
                write!(f, "line {line}: unexpected value '{token}' after the matrix")
            }
            ParseError::Matrix(e) => write!(f, "invalid matrix: {e}"),
            ParseError::Tour(e) => write!(f, "invalid tour: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            ParseError::Matrix(e) => Some(e),
            ParseError::Tour(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::Io(e)
    }
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Matrix(e)
    }
}

impl From<ValidationError> for ParseError {
    fn from(e: ValidationError) -> Self {
        ParseError::Tour(e)
    }
}
