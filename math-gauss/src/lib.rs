//! Dense Gaussian elimination for small linear systems
//!
//! This crate solves a dense N×N system A·x = b by Gaussian elimination with
//! partial pivoting, and reports the determinant of A and the residual
//! b − A·x of a candidate solution.
//!
//! # Features
//!
//! - **Solve**: forward elimination + back substitution, zero pivots reported
//!   as [`GaussError::SingularSystem`]
//! - **Pivoting**: first-nonzero row (default) or max-magnitude row
//! - **Determinant**: pivot product (O(n³)) or cofactor expansion (reference, O(n!))
//! - **Residual**: always measured against the original, untouched A and b
//! - **I/O helpers**: text dataset reader/writer, random dataset generator,
//!   human and JSON reports
//!
//! # Example
//!
//! ```rust
//! use math_audio_gauss::LinearSystem;
//! use ndarray::array;
//!
//! let system = LinearSystem::new(array![[2.0, 1.0], [1.0, 3.0]], array![3.0, 5.0])
//!     .expect("valid system");
//!
//! let x = system.solve().expect("non-singular");
//! assert!((x[0] - 0.8).abs() < 1e-12);
//! assert!((x[1] - 1.4).abs() < 1e-12);
//! assert!((system.determinant() - 5.0).abs() < 1e-12);
//!
//! let r = system.residual(&x).expect("same length");
//! assert!(r.iter().all(|v| v.abs() < 1e-12));
//! ```

pub mod config;
pub mod dataset;
pub mod determinant;
pub mod elimination;
pub mod error;
pub mod report;
pub mod system;

pub use config::SolverConfig;
pub use dataset::{
    Dataset, DatasetError, MAX_DIM, MIN_DIM, generate_dataset, read_dataset,
    read_dataset_interactive, write_dataset,
};
pub use determinant::{CofactorExpansion, DeterminantStrategy, PivotProduct};
pub use elimination::{
    EliminationStep, PivotStrategy, Triangularization, back_substitute, triangularize,
};
pub use error::{GaussError, Result};
pub use report::{OutputFormat, Report, SolutionReport};
pub use system::{LinearSystem, discrepancies};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
