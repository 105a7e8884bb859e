//! Projection output structures

use serde::{Deserialize, Serialize};

/// Projected value at one reporting horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonValue {
    pub horizon_years: f64,

    /// Number of weekly contributions (may be fractional)
    pub weeks: f64,

    /// Sum of contributions without growth
    pub contributed: f64,

    pub future_value: f64,

    /// Investment growth (future value minus contributions)
    pub growth: f64,
}

/// A single sample of the continuous projection curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    #[serde(rename = "Years")]
    pub years: f64,
    #[serde(rename = "FutureValue")]
    pub future_value: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub weekly_contribution: f64,
    pub annual_return_rate: f64,
    pub weekly_rate: f64,

    /// One row per requested horizon, in request order
    pub horizons: Vec<HorizonValue>,

    /// Sampled curve for charting; empty when disabled
    pub curve: Vec<CurvePoint>,
}

impl ProjectionResult {
    /// Future value at an exact requested horizon
    pub fn value_at(&self, horizon_years: f64) -> Option<f64> {
        self.horizons
            .iter()
            .find(|h| h.horizon_years == horizon_years)
            .map(|h| h.future_value)
    }

    /// Get summary statistics for the longest horizon
    pub fn summary(&self) -> ProjectionSummary {
        let longest = self
            .horizons
            .iter()
            .max_by(|a, b| a.horizon_years.total_cmp(&b.horizon_years));

        ProjectionSummary {
            horizon_count: self.horizons.len(),
            longest_horizon_years: longest.map(|h| h.horizon_years).unwrap_or(0.0),
            final_value: longest.map(|h| h.future_value).unwrap_or(0.0),
            total_contributed: longest.map(|h| h.contributed).unwrap_or(0.0),
            total_growth: longest.map(|h| h.growth).unwrap_or(0.0),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub horizon_count: usize,
    pub longest_horizon_years: f64,
    pub final_value: f64,
    pub total_contributed: f64,
    pub total_growth: f64,
}
