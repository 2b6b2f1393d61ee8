//! Solver configuration, optionally loaded from JSON

use crate::elimination::PivotStrategy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options for [`crate::LinearSystem::solve_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Pivot row selection
    pub pivoting: PivotStrategy,
    /// Log the augmented matrix after every elimination step
    pub trace_steps: bool,
}

impl SolverConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pivot row selection
    pub fn pivoting(mut self, pivoting: PivotStrategy) -> Self {
        self.pivoting = pivoting;
        self
    }

    /// Enable or disable per-step logging
    pub fn trace_steps(mut self, trace_steps: bool) -> Self {
        self.trace_steps = trace_steps;
        self
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: SolverConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
