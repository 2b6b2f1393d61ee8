//! Error types for the Gaussian elimination core.
//!
//! Follows the same pattern as the other math-audio crates: a `thiserror`
//! enum for the library, category helpers, and a crate-wide `Result` alias.

use thiserror::Error;

/// Errors that can occur while building or solving a [`crate::LinearSystem`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GaussError {
    /// The system has no equations.
    #[error("linear system must have at least one equation")]
    EmptySystem,

    /// A matrix row, the right-hand side, or a candidate vector has the wrong length.
    #[error("{what} length mismatch: expected {expected}, got {got}")]
    Shape {
        /// Which operand was malformed (e.g. "row 2", "right-hand side")
        what: String,
        /// Expected length (N)
        expected: usize,
        /// Actual length provided
        got: usize,
    },

    /// An entry is NaN or infinite.
    #[error("non-finite value {value} at {}", position(.row, .col))]
    Domain {
        /// Row of the offending entry
        row: usize,
        /// Column of the offending entry, `None` for the right-hand side
        col: Option<usize>,
        /// The offending value
        value: f64,
    },

    /// A zero pivot was met where it would have been used as a divisor.
    #[error("system is singular: zero pivot in column {column}")]
    SingularSystem {
        /// Column of the zero pivot
        column: usize,
    },
}

fn position(row: &usize, col: &Option<usize>) -> String {
    match col {
        Some(col) => format!("A[{row}][{col}]"),
        None => format!("b[{row}]"),
    }
}

/// A specialized `Result` type for Gaussian elimination operations.
pub type Result<T> = std::result::Result<T, GaussError>;

impl GaussError {
    /// Returns `true` if this is a shape error.
    ///
    /// This includes `EmptySystem` and `Shape` variants.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, GaussError::EmptySystem | GaussError::Shape { .. })
    }

    /// Returns `true` if an input entry was NaN or infinite.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, GaussError::Domain { .. })
    }

    /// Returns `true` if the system has no unique solution.
    pub fn is_singular(&self) -> bool {
        matches!(self, GaussError::SingularSystem { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GaussError::Shape {
            what: "row 1".to_string(),
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "row 1 length mismatch: expected 3, got 2");

        let err = GaussError::SingularSystem { column: 1 };
        assert_eq!(err.to_string(), "system is singular: zero pivot in column 1");
    }

    #[test]
    fn test_domain_error_display() {
        let matrix_err = GaussError::Domain {
            row: 0,
            col: Some(2),
            value: f64::NAN,
        };
        assert_eq!(matrix_err.to_string(), "non-finite value NaN at A[0][2]");

        let rhs_err = GaussError::Domain {
            row: 1,
            col: None,
            value: f64::INFINITY,
        };
        assert_eq!(rhs_err.to_string(), "non-finite value inf at b[1]");
    }

    #[test]
    fn test_categories() {
        let shape = GaussError::EmptySystem;
        let domain = GaussError::Domain {
            row: 0,
            col: None,
            value: f64::NAN,
        };
        let singular = GaussError::SingularSystem { column: 0 };

        assert!(shape.is_shape_error());
        assert!(!shape.is_singular());
        assert!(domain.is_domain_error());
        assert!(!domain.is_shape_error());
        assert!(singular.is_singular());
        assert!(!singular.is_domain_error());
    }
}
