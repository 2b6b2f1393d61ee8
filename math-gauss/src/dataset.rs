//! Text datasets: reading, writing and random generation
//!
//! Format:
//!
//! ```text
//! N
//! a11 a12 ... a1N
//! ...
//! aN1 aN2 ... aNN
//! b1 b2 ... bN
//! ```
//!
//! Values are whitespace separated; a comma is accepted as decimal separator.

use crate::error::GaussError;
use crate::system::LinearSystem;
use rand::Rng;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Smallest accepted system size
pub const MIN_DIM: usize = 1;
/// Largest accepted system size
pub const MAX_DIM: usize = 20;

/// Errors raised while reading or generating a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Underlying reader or writer failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input ended before all lines were read
    #[error("unexpected end of input while reading {what}")]
    MissingLine {
        /// What was being read
        what: String,
    },

    /// N is not a non-negative integer
    #[error("N must be an integer, got {value:?}")]
    InvalidSize {
        /// The raw text
        value: String,
    },

    /// N is outside the supported range
    #[error("N must be in range [{MIN_DIM}, {MAX_DIM}], got {n}")]
    SizeOutOfRange {
        /// The rejected size
        n: usize,
    },

    /// A token is not a float
    #[error("{value:?} is not a float (line {line})")]
    InvalidFloat {
        /// The raw token
        value: String,
        /// 1-based line number
        line: usize,
    },

    /// A line has the wrong number of values
    #[error("invalid {what}: expected {expected} elements, got {got}")]
    WrongCount {
        /// Which line was malformed
        what: String,
        /// Expected number of values
        expected: usize,
        /// Number of values found
        got: usize,
    },

    /// Two matrix rows are identical
    #[error("A matrix rows must be unique: rows {first} and {second} are equal")]
    DuplicateRows {
        /// Index of the first row
        first: usize,
        /// Index of the repeated row
        second: usize,
    },
}

/// A parsed system in row form, as read from text
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Matrix rows
    pub matrix: Vec<Vec<f64>>,
    /// Right-hand side
    pub rhs: Vec<f64>,
}

impl Dataset {
    /// Number of equations
    pub fn dim(&self) -> usize {
        self.matrix.len()
    }

    /// Validate and copy into a [`LinearSystem`]
    pub fn to_system(&self) -> Result<LinearSystem, GaussError> {
        LinearSystem::from_rows(&self.matrix, &self.rhs)
    }
}

/// Read a dataset silently.
pub fn read_dataset<R: BufRead>(reader: R) -> Result<Dataset, DatasetError> {
    read_with_prompts(reader, None)
}

/// Read a dataset, writing a prompt to `prompt` before each section.
///
/// Meant for terminals where a user types the system in.
pub fn read_dataset_interactive<R: BufRead, W: Write>(
    reader: R,
    prompt: &mut W,
) -> Result<Dataset, DatasetError> {
    read_with_prompts(reader, Some(prompt as &mut dyn Write))
}

fn read_with_prompts<R: BufRead>(
    reader: R,
    mut prompt: Option<&mut dyn Write>,
) -> Result<Dataset, DatasetError> {
    let mut lines = reader.lines();
    let mut line_no = 0;
    let mut next_line = |what: &str| -> Result<(usize, String), DatasetError> {
        line_no += 1;
        match lines.next() {
            Some(line) => Ok((line_no, line?)),
            None => Err(DatasetError::MissingLine {
                what: what.to_string(),
            }),
        }
    };

    if let Some(out) = prompt.as_mut() {
        write!(out, "enter N: ")?;
        out.flush()?;
    }
    let (_, raw_n) = next_line("N")?;
    let n = parse_size(&raw_n)?;

    if let Some(out) = prompt.as_mut() {
        writeln!(out, "enter A matrix ({n}x{n}), whitespace separated on each line:")?;
    }
    let mut matrix = Vec::with_capacity(n);
    for i in 0..n {
        let what = format!("A matrix row {i}");
        let (line, text) = next_line(&what)?;
        let row = parse_values(&text, line)?;
        if row.len() != n {
            return Err(DatasetError::WrongCount {
                what,
                expected: n,
                got: row.len(),
            });
        }
        matrix.push(row);
    }

    if let Some((first, second)) = find_duplicate_rows(&matrix) {
        return Err(DatasetError::DuplicateRows { first, second });
    }

    if let Some(out) = prompt.as_mut() {
        writeln!(out, "enter B vector ({n}x1), whitespace separated in 1 line:")?;
    }
    let (line, text) = next_line("B vector")?;
    let rhs = parse_values(&text, line)?;
    if rhs.len() != n {
        return Err(DatasetError::WrongCount {
            what: "B vector".to_string(),
            expected: n,
            got: rhs.len(),
        });
    }

    Ok(Dataset { matrix, rhs })
}

/// Parse and range-check the system size.
pub fn parse_size(text: &str) -> Result<usize, DatasetError> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(DatasetError::InvalidSize {
            value: text.to_string(),
        });
    }
    let n: usize = text.parse().map_err(|_| DatasetError::InvalidSize {
        value: text.to_string(),
    })?;
    check_size(n)?;
    Ok(n)
}

fn check_size(n: usize) -> Result<(), DatasetError> {
    if (MIN_DIM..=MAX_DIM).contains(&n) {
        Ok(())
    } else {
        Err(DatasetError::SizeOutOfRange { n })
    }
}

fn parse_values(text: &str, line: usize) -> Result<Vec<f64>, DatasetError> {
    text.replace(',', ".")
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| DatasetError::InvalidFloat {
                value: token.to_string(),
                line,
            })
        })
        .collect()
}

fn find_duplicate_rows(matrix: &[Vec<f64>]) -> Option<(usize, usize)> {
    for (second, row) in matrix.iter().enumerate() {
        if let Some(first) = matrix[..second].iter().position(|other| other == row) {
            return Some((first, second));
        }
    }
    None
}

/// Write a dataset in the text format read by [`read_dataset`].
pub fn write_dataset<W: Write>(dataset: &Dataset, mut out: W) -> io::Result<()> {
    writeln!(out, "{}", dataset.dim())?;
    for row in &dataset.matrix {
        writeln!(out, "{}", join(row))?;
    }
    writeln!(out, "{}", join(&dataset.rhs))?;
    out.flush()
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Random N×N dataset with entries uniform in [0, 1000), rounded to 3 decimals.
pub fn generate_dataset<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Dataset, DatasetError> {
    check_size(n)?;
    let mut sample = || (rng.random::<f64>() * 1000.0 * 1000.0).round() / 1000.0;

    let matrix: Vec<Vec<f64>> = (0..n)
        .map(|_| (0..n).map(|_| sample()).collect())
        .collect();
    let rhs: Vec<f64> = (0..n).map(|_| sample()).collect();
    log::debug!("generated random {n}x{n} dataset");

    Ok(Dataset { matrix, rhs })
}
