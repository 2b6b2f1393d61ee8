//! Forward elimination with partial pivoting and back substitution
//!
//! Both routines work in place on a caller-owned working copy; nothing here
//! ever sees the original system. Zero pivots are detected exactly at the
//! division sites, never through a "near zero" tolerance.

use crate::error::{GaussError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the pivot row is chosen for each column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PivotStrategy {
    /// Swap only when the diagonal entry is exactly zero, taking the first
    /// row below with a nonzero entry in that column.
    #[default]
    FirstNonZero,
    /// Always take the row with the largest magnitude entry at or below the
    /// diagonal (first one wins on ties).
    MaxMagnitude,
}

impl PivotStrategy {
    /// Pick the pivot row for `column`.
    ///
    /// Returns `None` when the column is zero at and below the diagonal.
    pub fn select(&self, matrix: &Array2<f64>, column: usize) -> Option<usize> {
        let n = matrix.nrows();
        match self {
            PivotStrategy::FirstNonZero => {
                (column..n).find(|&row| matrix[[row, column]] != 0.0)
            }
            PivotStrategy::MaxMagnitude => {
                let mut max_val = 0.0;
                let mut max_row = None;
                for row in column..n {
                    let val = matrix[[row, column]].abs();
                    if val > max_val {
                        max_val = val;
                        max_row = Some(row);
                    }
                }
                max_row
            }
        }
    }

    /// Short name used in logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            PivotStrategy::FirstNonZero => "first-non-zero",
            PivotStrategy::MaxMagnitude => "max-magnitude",
        }
    }
}

/// Snapshot of the augmented matrix after one pivot column has been eliminated.
#[derive(Debug, Clone, Copy)]
pub struct EliminationStep<'a> {
    /// 1-based step number
    pub step: usize,
    /// Pivot column that was just eliminated
    pub column: usize,
    /// Row swapped into the pivot position, if any
    pub swapped_with: Option<usize>,
    /// Working matrix after the step
    pub matrix: &'a Array2<f64>,
    /// Working right-hand side after the step
    pub rhs: &'a Array1<f64>,
}

impl fmt::Display for EliminationStep<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.matrix.nrows();
        writeln!(f, "step {}:", self.step)?;
        for (row, b) in self.matrix.rows().into_iter().zip(self.rhs.iter()) {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>8.4}")).collect();
            writeln!(f, "[{}] | {b:>8.4}", cells.join(" "))?;
        }
        write!(f, "{}", "-".repeat(10 * n))
    }
}

/// Outcome of [`triangularize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangularization {
    /// Number of row swaps performed (permutation parity for the determinant)
    pub permutations: usize,
    /// First column whose pivot stayed zero, if any
    pub zero_pivot: Option<usize>,
}

impl Triangularization {
    /// Sign contributed by the row swaps: `(-1)^permutations`
    pub fn sign(&self) -> f64 {
        if self.permutations % 2 == 0 { 1.0 } else { -1.0 }
    }
}

/// Reduce `matrix` to upper triangular form, applying the same row
/// operations to `rhs`.
///
/// Pivot columns run from 0 to N-2. `on_step` is called after each column.
/// A column that is entirely zero at and below the diagonal is left untouched
/// and reported through [`Triangularization::zero_pivot`]; the zero diagonal
/// entry is what [`back_substitute`] and the determinant react to.
pub fn triangularize<F>(
    matrix: &mut Array2<f64>,
    rhs: &mut Array1<f64>,
    strategy: PivotStrategy,
    mut on_step: F,
) -> Result<Triangularization>
where
    F: FnMut(&EliminationStep<'_>),
{
    let n = check_augmented(matrix, rhs)?;

    let mut permutations = 0;
    let mut zero_pivot = None;

    for i in 0..n.saturating_sub(1) {
        let mut swapped_with = None;
        match strategy.select(matrix, i) {
            Some(row) if row != i => {
                swap_rows(matrix, rhs, i, row);
                permutations += 1;
                swapped_with = Some(row);
                log::debug!("column {i}: swapped rows {i} and {row}");
            }
            Some(_) => {}
            None => {
                log::debug!("column {i}: no nonzero pivot candidate");
                zero_pivot.get_or_insert(i);
            }
        }

        eliminate_below(matrix, rhs, i)?;

        on_step(&EliminationStep {
            step: i + 1,
            column: i,
            swapped_with,
            matrix: &*matrix,
            rhs: &*rhs,
        });
    }

    Ok(Triangularization {
        permutations,
        zero_pivot,
    })
}

/// Solve an upper triangular system, from the last unknown to the first.
pub fn back_substitute(upper: &Array2<f64>, rhs: &Array1<f64>) -> Result<Array1<f64>> {
    let n = check_augmented(upper, rhs)?;
    let mut x = Array1::zeros(n);

    for i in (0..n).rev() {
        let pivot = upper[[i, i]];
        if pivot == 0.0 {
            return Err(GaussError::SingularSystem { column: i });
        }
        let s: f64 = ((i + 1)..n).map(|j| upper[[i, j]] * x[j]).sum();
        x[i] = (rhs[i] - s) / pivot;
    }

    Ok(x)
}

/// Subtract multiples of pivot row `i` from every row below it.
fn eliminate_below(matrix: &mut Array2<f64>, rhs: &mut Array1<f64>, i: usize) -> Result<()> {
    let n = matrix.nrows();
    let pivot = matrix[[i, i]];

    if pivot == 0.0 {
        // Nothing to eliminate unless something below is nonzero, and then we
        // would have to divide by zero.
        return match ((i + 1)..n).find(|&k| matrix[[k, i]] != 0.0) {
            Some(_) => Err(GaussError::SingularSystem { column: i }),
            None => Ok(()),
        };
    }

    for k in (i + 1)..n {
        let c = matrix[[k, i]] / pivot;
        // Exact zero so later pivot checks are not fooled by rounding noise
        matrix[[k, i]] = 0.0;
        for j in (i + 1)..n {
            let update = c * matrix[[i, j]];
            matrix[[k, j]] -= update;
        }
        let update = c * rhs[i];
        rhs[k] -= update;
    }

    Ok(())
}

fn swap_rows(matrix: &mut Array2<f64>, rhs: &mut Array1<f64>, a: usize, b: usize) {
    for j in 0..matrix.ncols() {
        let tmp = matrix[[a, j]];
        matrix[[a, j]] = matrix[[b, j]];
        matrix[[b, j]] = tmp;
    }
    rhs.swap(a, b);
}

fn check_augmented(matrix: &Array2<f64>, rhs: &Array1<f64>) -> Result<usize> {
    let n = matrix.nrows();
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
    Ok(n)
}
