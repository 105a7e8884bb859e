//! Scenario runner for batch and sensitivity projections
//!
//! Holds one engine configuration and applies it to many plans. Batches are
//! spread across threads with rayon; results keep the input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::plan::{ContributionPlan, RETURN_PCT_RANGE};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// A plan together with its projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProjection {
    pub plan: ContributionPlan,
    pub weekly_investment: f64,
    pub result: ProjectionResult,
}

/// Pre-configured runner for repeated projections
///
/// # Example
/// ```
/// use wealth_projector::{ContributionPlan, ScenarioRunner};
///
/// let runner = ScenarioRunner::new();
/// let plan = ContributionPlan::new(1000.0, 20.0, 8.0).unwrap();
/// let projection = runner.run(&plan);
/// assert_eq!(projection.weekly_investment, 200.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Runner with the default configuration (1/5/10 years, 10-year curve)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    /// Project a single plan at the default horizons
    pub fn run(&self, plan: &ContributionPlan) -> PlanProjection {
        PlanProjection {
            plan: plan.clone(),
            weekly_investment: plan.weekly_investment(),
            result: self.engine.project(&plan.to_input()),
        }
    }

    /// Project many plans in parallel
    pub fn run_batch(&self, plans: &[ContributionPlan]) -> Vec<PlanProjection> {
        plans.par_iter().map(|plan| self.run(plan)).collect()
    }

    /// Re-run the plan at every whole-percent return the slider allows
    pub fn return_sensitivity(&self, plan: &ContributionPlan) -> Vec<PlanProjection> {
        let lo = *RETURN_PCT_RANGE.start() as u32;
        let hi = *RETURN_PCT_RANGE.end() as u32;

        let variants: Vec<ContributionPlan> = (lo..=hi)
            .map(|pct| ContributionPlan {
                return_pct: pct as f64,
                ..plan.clone()
            })
            .collect();

        self.run_batch(&variants)
    }
}
