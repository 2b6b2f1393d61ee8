//! Dense linear system A·x = b
//!
//! [`LinearSystem`] keeps the validated original A and b untouched. Every
//! query (`solve`, `determinant`) clones them into a private working copy,
//! so queries can be repeated in any order and `residual` always measures
//! against the pristine data.

use crate::config::SolverConfig;
use crate::determinant::{DeterminantStrategy, PivotProduct};
use crate::elimination::{EliminationStep, back_substitute, triangularize};
use crate::error::{GaussError, Result};
use ndarray::{Array1, Array2};

/// A validated square system of linear equations
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    matrix: Array2<f64>,
    rhs: Array1<f64>,
}

impl LinearSystem {
    /// Build a system from an N×N matrix and a right-hand side of length N.
    ///
    /// # Errors
    ///
    /// - [`GaussError::EmptySystem`] if N = 0
    /// - [`GaussError::Shape`] if the matrix is not square or `rhs` has the wrong length
    /// - [`GaussError::Domain`] if any entry is NaN or infinite
    pub fn new(matrix: Array2<f64>, rhs: Array1<f64>) -> Result<Self> {
        let n = matrix.nrows();
        if n == 0 {
            return Err(GaussError::EmptySystem);
        }
        if matrix.ncols() != n {
            return Err(GaussError::Shape {
                what: "matrix columns".to_string(),
                expected: n,
                got: matrix.ncols(),
            });
        }
        if rhs.len() != n {
            return Err(GaussError::Shape {
                what: "right-hand side".to_string(),
                expected: n,
                got: rhs.len(),
            });
        }

        if let Some(((row, col), &value)) = matrix.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(GaussError::Domain {
                row,
                col: Some(col),
                value,
            });
        }
        if let Some((row, &value)) = rhs.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(GaussError::Domain {
                row,
                col: None,
                value,
            });
        }

        Ok(Self { matrix, rhs })
    }

    /// Build a system from nested rows, copying the data.
    pub fn from_rows(rows: &[Vec<f64>], rhs: &[f64]) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(GaussError::EmptySystem);
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(GaussError::Shape {
                what: format!("row {i}"),
                expected: n,
                got: row.len(),
            });
        }

        let matrix = Array2::from_shape_fn((n, n), |(i, j)| rows[i][j]);
        Self::new(matrix, Array1::from_vec(rhs.to_vec()))
    }

    /// Number of equations (and unknowns)
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// The original coefficient matrix A
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// The original right-hand side b
    pub fn rhs(&self) -> &Array1<f64> {
        &self.rhs
    }

    /// Solve with the default configuration (first-nonzero pivoting).
    pub fn solve(&self) -> Result<Array1<f64>> {
        self.solve_with(&SolverConfig::default())
    }

    /// Solve with explicit options.
    pub fn solve_with(&self, config: &SolverConfig) -> Result<Array1<f64>> {
        self.solve_traced(config, |_| {})
    }

    /// Solve, handing every intermediate triangular matrix to `on_step`.
    ///
    /// The callback only observes; it cannot influence the result.
    ///
    /// # Errors
    ///
    /// [`GaussError::SingularSystem`] if a zero pivot is met (rank(A) < N).
    pub fn solve_traced<F>(&self, config: &SolverConfig, mut on_step: F) -> Result<Array1<f64>>
    where
        F: FnMut(&EliminationStep<'_>),
    {
        let mut matrix = self.matrix.clone();
        let mut rhs = self.rhs.clone();

        let tri = triangularize(&mut matrix, &mut rhs, config.pivoting, |step| {
            if config.trace_steps {
                log::info!("{step}");
            }
            on_step(step);
        })?;
        log::debug!(
            "triangularized {n}x{n} system ({} pivoting, {} row swaps)",
            config.pivoting.name(),
            tri.permutations,
            n = self.dim()
        );

        back_substitute(&matrix, &rhs)
    }

    /// Determinant of A by elimination. Returns 0.0 for a singular matrix.
    pub fn determinant(&self) -> f64 {
        self.determinant_by(&PivotProduct::default())
    }

    /// Determinant of A with an explicit algorithm.
    pub fn determinant_by<S: DeterminantStrategy + ?Sized>(&self, strategy: &S) -> f64 {
        let det = strategy.determinant(&self.matrix);
        log::debug!("determinant ({}) = {det}", strategy.name());
        det
    }

    /// Discrepancy b − A·x of a candidate solution against the original system.
    pub fn residual(&self, candidate: &Array1<f64>) -> Result<Array1<f64>> {
        if candidate.len() != self.dim() {
            return Err(GaussError::Shape {
                what: "candidate solution".to_string(),
                expected: self.dim(),
                got: candidate.len(),
            });
        }
        Ok(discrepancies(&self.matrix, &self.rhs, candidate))
    }
}

/// Compute `rhs - matrix · x`.
///
/// Shapes must agree (N×N, N, N); `LinearSystem::residual` checks them.
pub fn discrepancies(matrix: &Array2<f64>, rhs: &Array1<f64>, x: &Array1<f64>) -> Array1<f64> {
    rhs - &matrix.dot(x)
}
