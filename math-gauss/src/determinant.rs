//! Determinant strategies
//!
//! Two independent algorithms behind [`DeterminantStrategy`]:
//! - [`PivotProduct`]: triangularize a private copy, multiply the diagonal,
//!   apply the permutation sign. O(n³), the production path.
//! - [`CofactorExpansion`]: recursive expansion along the first row.
//!   O(n!), only meant as a reference for small matrices.
//!
//! Neither fails: a singular matrix has determinant 0.0.

use crate::elimination::{PivotStrategy, triangularize};
use ndarray::{Array1, Array2, Axis};

/// Trait for determinant algorithms over a square matrix.
pub trait DeterminantStrategy {
    /// Determinant of `matrix`. The input is never modified.
    fn determinant(&self, matrix: &Array2<f64>) -> f64;

    /// Short name used in logs and reports
    fn name(&self) -> &'static str;
}

/// Determinant from the pivots of Gaussian elimination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PivotProduct {
    /// Pivot selection used while triangularizing
    pub pivoting: PivotStrategy,
}

impl PivotProduct {
    /// Create with the given pivot selection
    pub fn new(pivoting: PivotStrategy) -> Self {
        Self { pivoting }
    }
}

impl DeterminantStrategy for PivotProduct {
    fn determinant(&self, matrix: &Array2<f64>) -> f64 {
        let n = matrix.nrows();
        let mut work = matrix.to_owned();
        let mut rhs = Array1::zeros(n);

        let tri = match triangularize(&mut work, &mut rhs, self.pivoting, |_| {}) {
            Ok(tri) => tri,
            Err(err) if err.is_singular() => return 0.0,
            Err(err) => {
                log::warn!("determinant of malformed matrix: {err}");
                return f64::NAN;
            }
        };

        let diagonal = work.diag();
        if diagonal.iter().any(|&d| d == 0.0) {
            return 0.0;
        }
        tri.sign() * diagonal.product()
    }

    fn name(&self) -> &'static str {
        "pivot-product"
    }
}

/// Determinant by cofactor (Laplace) expansion along the first row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CofactorExpansion;

impl DeterminantStrategy for CofactorExpansion {
    fn determinant(&self, matrix: &Array2<f64>) -> f64 {
        cofactor_det(matrix)
    }

    fn name(&self) -> &'static str {
        "cofactor-expansion"
    }
}

fn cofactor_det(matrix: &Array2<f64>) -> f64 {
    let n = matrix.nrows();
    match n {
        0 => 1.0,
        1 => matrix[[0, 0]],
        2 => matrix[[0, 0]] * matrix[[1, 1]] - matrix[[0, 1]] * matrix[[1, 0]],
        _ => {
            let rows: Vec<usize> = (1..n).collect();
            let below = matrix.select(Axis(0), &rows);

            let mut det = 0.0;
            for col in 0..n {
                let a = matrix[[0, col]];
                if a == 0.0 {
                    continue;
                }
                let cols: Vec<usize> = (0..n).filter(|&j| j != col).collect();
                let minor = below.select(Axis(1), &cols);
                let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                det += sign * a * cofactor_det(&minor);
            }
            det
        }
    }
}
