//! # Centralized Error Handling
//!
//! Unified error type for every module in the crate, built on `thiserror`.
//! Operations that can fail return [`Result`]; read accessors that have a
//! sensible fallback (out-of-bounds matrix cells, CSV cells) log a warning and
//! substitute a default instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for rudiments operations.
#[derive(Error, Debug)]
pub enum RudimentsError {
    /// Two matrices (or a matrix and a vector) have incompatible shapes.
    #[error("dimension mismatch: {left_rows}x{left_cols} against {right_rows}x{right_cols}")]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    /// The operation needs a square matrix.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// The matrix has a zero determinant and cannot be inverted.
    #[error("matrix is singular (determinant {determinant})")]
    Singular { determinant: f64 },

    /// Division by a zero scalar was requested; the operand is left untouched.
    #[error("attempted to divide by zero")]
    DivideByZero,

    /// An index lies outside the addressed structure.
    #[error("position ({row}, {col}) is out of bounds for {rows}x{cols}")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A constructor or function received a parameter outside its domain.
    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// An integer computation or a bounded container overflowed.
    #[error("overflow: {message}")]
    Overflow { message: String },

    /// A pixmap cell holds no pixel and cannot be encoded.
    #[error("pixmap location ({row}, {col}) holds no pixel")]
    VacantPixel { row: usize, col: usize },

    /// A text input could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A required file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// I/O errors (missing file, permission denied, read/write failures).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or encoding failures from the `image` crate.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Results using RudimentsError
pub type Result<T> = std::result::Result<T, RudimentsError>;

impl RudimentsError {
    /// Create a dimension mismatch error from two shapes.
    pub fn dimension_mismatch(left: (usize, usize), right: (usize, usize)) -> Self {
        Self::DimensionMismatch {
            left_rows: left.0,
            left_cols: left.1,
            right_rows: right.0,
            right_cols: right.1,
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an overflow error
    pub fn overflow(message: impl Into<String>) -> Self {
        Self::Overflow {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
