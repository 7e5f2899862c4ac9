//! Error Types and Handling
//!
//! Error types for lineage construction and layout, with structured error
//! codes for programmatic handling.
//!
//! # Error Categories
//!
//! | Range | Category | Examples |
//! |-------|----------|----------|
//! | 1xxx | Graph | GraphCyclic |
//! | 2xxx | Dispatch | UnsupportedTransformerShape, ShapeMismatch |
//! | 3xxx | Union | BranchIndexMismatch |
//!
//! All errors are reported synchronously at the point of failure and none
//! are retried: lineage construction is deterministic, so retrying with the
//! same input reproduces the same error. There is no partial-success mode —
//! either the full lineage graph is built and validated, or construction
//! fails and no layout is attempted.

use thiserror::Error;

/// Error codes for programmatic error handling.
///
/// Each code belongs to a category indicated by its numeric range. Use
/// [`ErrorCode::category()`] for the human-readable category name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The lineage graph reachable from the root contains a cycle
    GraphCyclic = 1001,

    /// A transformer declares no supported shape contract (strict mode)
    UnsupportedTransformerShape = 2001,
    /// Declared shape parameters disagree with the input feature list
    ShapeMismatch = 2002,

    /// A union branch references a column outside the feature list
    BranchIndexMismatch = 3001,
}

impl ErrorCode {
    /// Get the numeric error code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a brief description of the error category
    pub fn category(&self) -> &'static str {
        match self {
            ErrorCode::GraphCyclic => "Graph",
            ErrorCode::UnsupportedTransformerShape | ErrorCode::ShapeMismatch => "Dispatch",
            ErrorCode::BranchIndexMismatch => "Union",
        }
    }
}

/// Errors produced while building or laying out a lineage graph.
#[derive(Error, Debug)]
pub enum FilamentError {
    /// A cycle was detected during graph validation. Fatal to layout: no
    /// coordinates are produced.
    #[error("lineage graph is cyclic at feature '{0}'")]
    GraphCyclic(String),

    /// A transformer matched none of the known capability contracts and the
    /// opaque fallback was disabled. Only reachable through a strict tracer.
    #[error("transformer '{0}' declares no supported shape contract")]
    UnsupportedTransformerShape(String),

    /// A transformer's declared per-column shape parameters do not match the
    /// length of the feature list it was applied to.
    #[error("shape parameters cover {got} columns but the feature list has {expected}")]
    ShapeMismatch {
        /// Length of the input feature list
        expected: usize,
        /// Length of the declared mask or count list
        got: usize,
    },

    /// A union branch's declared column indices reference columns outside
    /// the bounds of the current feature list.
    #[error("branch '{branch}' references column {index} but the feature list has {len} columns")]
    BranchIndexMismatch {
        /// Name of the offending branch
        branch: String,
        /// First out-of-bounds column index
        index: usize,
        /// Length of the feature list handed to the union
        len: usize,
    },
}

impl FilamentError {
    /// Get the error code for this error
    pub fn error_code(&self) -> ErrorCode {
        match self {
            FilamentError::GraphCyclic(_) => ErrorCode::GraphCyclic,
            FilamentError::UnsupportedTransformerShape(_) => {
                ErrorCode::UnsupportedTransformerShape
            }
            FilamentError::ShapeMismatch { .. } => ErrorCode::ShapeMismatch,
            FilamentError::BranchIndexMismatch { .. } => ErrorCode::BranchIndexMismatch,
        }
    }
}

/// Result type alias using [`FilamentError`].
pub type Result<T> = std::result::Result<T, FilamentError>;
