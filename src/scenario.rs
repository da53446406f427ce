//! Scenario runner for batch pro-forma evaluations
//!
//! Holds a base set of inputs and evaluates it, or many variations of it,
//! through the snapshot and projection engines. Batches run in parallel.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::inputs::ProFormaInputs;
use crate::presets;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
use crate::snapshot::{calculate_snapshot, Snapshot};

/// Snapshot plus projection for one set of inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProForma {
    pub snapshot: Snapshot,
    pub projection: ProjectionResult,
}

/// Evaluate one set of inputs end to end
pub fn evaluate(inputs: &ProFormaInputs) -> Result<ProForma, ProjectionError> {
    let snapshot = calculate_snapshot(inputs);
    let projection = ProjectionEngine::new(ProjectionConfig::from_inputs(inputs)).project(&snapshot)?;
    Ok(ProForma { snapshot, projection })
}

/// Pre-loaded scenario runner for batch evaluations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(presets::canonical_store());
///
/// let results = runner.sweep(&[0.9, 1.0, 1.1], |inputs, factor| {
///     inputs.operating.rent *= factor;
/// });
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_inputs: ProFormaInputs,
}

impl ScenarioRunner {
    pub fn new(base_inputs: ProFormaInputs) -> Self {
        Self { base_inputs }
    }

    /// Evaluate the base inputs
    pub fn run(&self) -> Result<ProForma, ProjectionError> {
        evaluate(&self.base_inputs)
    }

    /// Evaluate independent input sets in parallel, preserving order
    pub fn run_batch(&self, scenarios: &[ProFormaInputs]) -> Vec<Result<ProForma, ProjectionError>> {
        info!("Running {} scenarios", scenarios.len());
        scenarios.par_iter().map(evaluate).collect()
    }

    /// Evaluate one variation of the base inputs per parameter value
    ///
    /// `apply` receives a fresh copy of the base inputs for each value.
    pub fn sweep<T, F>(&self, values: &[T], apply: F) -> Vec<Result<ProForma, ProjectionError>>
    where
        T: Sync,
        F: Fn(&mut ProFormaInputs, &T) + Sync,
    {
        values
            .par_iter()
            .map(|value| {
                let mut inputs = self.base_inputs.clone();
                apply(&mut inputs, value);
                evaluate(&inputs)
            })
            .collect()
    }

    pub fn inputs(&self) -> &ProFormaInputs {
        &self.base_inputs
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(presets::canonical_store())
    }
}
