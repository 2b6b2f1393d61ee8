//! Result reports in human-readable and JSON form

use crate::config::SolverConfig;
use crate::determinant::{CofactorExpansion, DeterminantStrategy, PivotProduct};
use crate::elimination::{EliminationStep, PivotStrategy};
use crate::error::Result;
use crate::system::LinearSystem;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Largest N for which the reference determinant uses cofactor expansion
pub const COFACTOR_REFERENCE_MAX_DIM: usize = 8;

/// Output format of a [`Report`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text for terminals
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown output format: {s} (expected human or json)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Solution, its discrepancies and the determinant of A
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionReport {
    /// Solution vector x
    pub result: Vec<f64>,
    /// x rounded to 4 decimals
    pub rounded_result: Vec<f64>,
    /// b − A·x against the original system
    pub discrepancies: Vec<f64>,
    /// Determinant of A
    pub determinant: f64,
}

impl SolutionReport {
    /// Assemble a report for `result` against `system`
    pub fn new(system: &LinearSystem, result: &Array1<f64>, determinant: f64) -> Result<Self> {
        let discrepancies = system.residual(result)?;
        Ok(Self {
            result: result.to_vec(),
            rounded_result: result.iter().map(|&x| round4(x)).collect(),
            discrepancies: discrepancies.to_vec(),
            determinant,
        })
    }

    fn write_human<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "result: {:?}", self.result)?;
        let rounded: Vec<String> = self.result.iter().map(|x| format!("{x:.4}")).collect();
        writeln!(out, "rounded result: {}", rounded.join(", "))?;
        writeln!(out, "discrepancies: {:?}", self.discrepancies)?;
        writeln!(out, "A's determinant: {}", self.determinant)
    }
}

/// Full output of one solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Solution with the configured pivoting
    pub solution: SolutionReport,
    /// Independent cross-check with max-magnitude pivoting
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reference_solution: Option<SolutionReport>,
}

impl Report {
    /// Solve `system` and compute its reference cross-check.
    pub fn build(system: &LinearSystem, config: &SolverConfig) -> Result<Self> {
        Self::build_traced(system, config, |_| {})
    }

    /// Like [`Report::build`], handing elimination steps to `on_step`.
    pub fn build_traced<F>(system: &LinearSystem, config: &SolverConfig, on_step: F) -> Result<Self>
    where
        F: FnMut(&EliminationStep<'_>),
    {
        let x = system.solve_traced(config, on_step)?;
        let determinant = system.determinant_by(&PivotProduct::new(config.pivoting));
        let solution = SolutionReport::new(system, &x, determinant)?;

        Ok(Self {
            solution,
            reference_solution: reference_solution(system),
        })
    }

    /// Write the report in the requested format
    pub fn write<W: Write>(&self, format: OutputFormat, mut out: W) -> io::Result<()> {
        match format {
            OutputFormat::Human => self.write_human(&mut out)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, self)?;
                writeln!(out)?;
            }
        }
        out.flush()
    }

    fn write_human<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.solution.write_human(out)?;
        if let Some(reference) = &self.reference_solution {
            writeln!(out, "----- reference solution (max-magnitude pivoting) -----")?;
            reference.write_human(out)?;
        }
        Ok(())
    }
}

/// Solve again with max-magnitude pivoting and an independent determinant.
///
/// Returns `None` when that solve fails.
pub fn reference_solution(system: &LinearSystem) -> Option<SolutionReport> {
    let config = SolverConfig::new().pivoting(PivotStrategy::MaxMagnitude);
    let x = match system.solve_with(&config) {
        Ok(x) => x,
        Err(err) => {
            log::warn!("reference solve failed: {err}");
            return None;
        }
    };

    let strategy: Box<dyn DeterminantStrategy> = if system.dim() <= COFACTOR_REFERENCE_MAX_DIM {
        Box::new(CofactorExpansion)
    } else {
        Box::new(PivotProduct::new(PivotStrategy::MaxMagnitude))
    };
    let determinant = system.determinant_by(strategy.as_ref());

    SolutionReport::new(system, &x, determinant).ok()
}

fn round4(x: f64) -> f64 {
    (x * 1e4).round() / 1e4
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn example() -> LinearSystem {
        LinearSystem::new(array![[2.0, 1.0], [1.0, 3.0]], array![3.0, 5.0]).unwrap()
    }

    #[test]
    fn test_build_report() {
        let report = Report::build(&example(), &SolverConfig::default()).unwrap();

        assert_eq!(report.solution.rounded_result, vec![0.8, 1.4]);
        assert_relative_eq!(report.solution.determinant, 5.0, epsilon = 1e-12);
        let reference = report.reference_solution.expect("reference should succeed");
        assert_relative_eq!(reference.determinant, 5.0, epsilon = 1e-12);
        for (a, b) in reference.result.iter().zip(report.solution.result.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_singular_report_fails() {
        let system = LinearSystem::new(array![[1.0, 1.0], [1.0, 1.0]], array![2.0, 2.0]).unwrap();
        let err = Report::build(&system, &SolverConfig::default()).unwrap_err();
        assert!(err.is_singular());
        assert!(reference_solution(&system).is_none());
    }

    #[test]
    fn test_human_output() {
        let report = Report::build(&example(), &SolverConfig::default()).unwrap();
        let mut buf = Vec::new();
        report.write(OutputFormat::Human, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("result: ["));
        assert!(text.contains("rounded result: 0.8000, 1.4000"));
        assert!(text.contains("discrepancies: ["));
        assert!(text.contains("A's determinant: 5"));
        assert!(text.contains("----- reference solution (max-magnitude pivoting) -----"));
    }

    #[test]
    fn test_json_output() {
        let report = Report::build(&example(), &SolverConfig::default()).unwrap();
        let mut buf = Vec::new();
        report.write(OutputFormat::Json, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["solution"]["rounded_result"][0], 0.8);
        assert_eq!(value["solution"]["rounded_result"][1], 1.4);
        assert!(value["solution"]["discrepancies"].is_array());
        assert!(value["reference_solution"]["determinant"].is_number());

        let parsed: Report = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.solution.rounded_result, report.solution.rounded_result);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("HUMAN".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(-2.00004), -2.0);
    }
}
