//! Core projection engine for weekly contribution savings projections

use serde::{Deserialize, Serialize};

use super::results::{CurvePoint, HorizonValue, ProjectionResult};

/// Contribution periods per year
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Horizons reported by default (years)
pub const DEFAULT_HORIZONS: [f64; 3] = [1.0, 5.0, 10.0];

/// Default length of the charting curve (years)
pub const DEFAULT_CURVE_YEARS: f64 = 10.0;

/// Upper bound on samples in one curve, endpoints included
pub const MAX_CURVE_POINTS: usize = 100_000;

/// Convert an annual return rate to the equivalent weekly rate.
///
/// 52 weekly compoundings at the returned rate reproduce the annual growth
/// factor: `(1 + r_week)^52 == 1 + annual_return_rate`.
pub fn weekly_rate(annual_return_rate: f64) -> f64 {
    (1.0 + annual_return_rate).powf(1.0 / WEEKS_PER_YEAR) - 1.0
}

/// Future value of a weekly ordinary annuity.
///
/// # Arguments
/// * `weekly_contribution` - Amount invested at the end of each week
/// * `annual_return_rate` - Expected annual return as a decimal (0.08 for 8%)
/// * `horizon_years` - Length of the projection; fractional years are allowed
///
/// A zero weekly rate falls back to the arithmetic series `contribution * n`.
/// An annual rate of exactly -1 is not guarded.
pub fn future_value(weekly_contribution: f64, annual_return_rate: f64, horizon_years: f64) -> f64 {
    let r = weekly_rate(annual_return_rate);
    let n = horizon_years * WEEKS_PER_YEAR;

    if r == 0.0 {
        return weekly_contribution * n;
    }

    weekly_contribution * ((1.0 + r).powf(n) - 1.0) / r
}

/// Inputs for a single projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Amount invested each week (pay * invest fraction)
    pub weekly_contribution: f64,

    /// Expected annual return as a decimal
    pub annual_return_rate: f64,

    /// Horizons to report, in years
    pub horizons_years: Vec<f64>,
}

impl ProjectionInput {
    /// Create an input reporting the default 1/5/10-year horizons
    pub fn new(weekly_contribution: f64, annual_return_rate: f64) -> Self {
        Self {
            weekly_contribution,
            annual_return_rate,
            horizons_years: DEFAULT_HORIZONS.to_vec(),
        }
    }

    /// Replace the reported horizons
    pub fn with_horizons(mut self, horizons_years: Vec<f64>) -> Self {
        self.horizons_years = horizons_years;
        self
    }
}

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Whether to sample the continuous curve for charting
    pub include_curve: bool,

    /// Length of the sampled curve in years
    pub curve_years: f64,

    /// Curve samples per year (52 gives one point per contribution)
    pub curve_points_per_year: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            include_curve: true,
            curve_years: DEFAULT_CURVE_YEARS,
            curve_points_per_year: 52,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project the input across its horizons, plus the curve if configured
    pub fn project(&self, input: &ProjectionInput) -> ProjectionResult {
        let horizons = input
            .horizons_years
            .iter()
            .map(|&years| self.horizon_value(input, years))
            .collect();

        let curve = if self.config.include_curve {
            self.curve(input)
        } else {
            Vec::new()
        };

        ProjectionResult {
            weekly_contribution: input.weekly_contribution,
            annual_return_rate: input.annual_return_rate,
            weekly_rate: weekly_rate(input.annual_return_rate),
            horizons,
            curve,
        }
    }

    /// Sample the future value over [0, curve_years]
    ///
    /// Starts at t = 0 (value 0) and ends exactly at `curve_years`; every
    /// sample lies inside that range. At most `MAX_CURVE_POINTS` samples are
    /// produced, so an oversized config thins the spacing instead of growing.
    pub fn curve(&self, input: &ProjectionInput) -> Vec<CurvePoint> {
        let per_year = self.config.curve_points_per_year.max(1) as f64;
        // NaN and negative lengths collapse to the t = 0 sample
        let span = self.config.curve_years.max(0.0);
        let max_steps = (MAX_CURVE_POINTS - 2) as f64;
        let steps = (span * per_year).floor().min(max_steps) as usize;

        let point = |years: f64| CurvePoint {
            years,
            future_value: future_value(input.weekly_contribution, input.annual_return_rate, years),
        };

        let mut points: Vec<CurvePoint> = (0..=steps).map(|i| point(i as f64 / per_year)).collect();
        if (steps as f64 / per_year) < span {
            points.push(point(span));
        }
        points
    }

    fn horizon_value(&self, input: &ProjectionInput, horizon_years: f64) -> HorizonValue {
        let weeks = horizon_years * WEEKS_PER_YEAR;
        let value = future_value(input.weekly_contribution, input.annual_return_rate, horizon_years);
        let contributed = input.weekly_contribution * weeks;

        HorizonValue {
            horizon_years,
            weeks,
            contributed,
            future_value: value,
            growth: value - contributed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weekly_rate_reproduces_annual_growth() {
        let r = weekly_rate(0.08);
        assert_relative_eq!(r, 0.0014811, epsilon = 1e-6);
        assert_relative_eq!((1.0 + r).powi(52), 1.08, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_contribution_is_zero() {
        for rate in [0.0, 0.04, 0.08, 0.15, -0.5] {
            for years in [0.5, 1.0, 5.0, 10.0] {
                assert_eq!(future_value(0.0, rate, years), 0.0);
            }
        }
    }

    #[test]
    fn test_zero_rate_is_arithmetic_series() {
        assert_eq!(weekly_rate(0.0), 0.0);
        assert_eq!(future_value(200.0, 0.0, 10.0), 200.0 * 10.0 * 52.0);
        assert_eq!(future_value(150.0, 0.0, 2.5), 150.0 * 2.5 * 52.0);
    }

    #[test]
    fn test_reference_projection() {
        // $200/week at 8% for 10 years
        let r = weekly_rate(0.08);
        let expected = 200.0 * ((1.0 + r).powf(520.0) - 1.0) / r;
        let fv = future_value(200.0, 0.08, 10.0);

        assert_relative_eq!(fv, expected, max_relative = 1e-12);
        assert_relative_eq!(fv, 156_493.50, epsilon = 0.01);
    }

    #[test]
    fn test_strictly_increasing_in_horizon() {
        for rate in [-0.5, 0.0, 0.04, 0.08, 0.15] {
            let mut prior = 0.0;
            for week in 1..=520 {
                let fv = future_value(100.0, rate, week as f64 / 52.0);
                assert!(fv > prior, "rate {} week {}: {} <= {}", rate, week, fv, prior);
                prior = fv;
            }
        }
    }

    #[test]
    fn test_linear_in_contribution() {
        let single = future_value(125.0, 0.07, 5.0);
        let double = future_value(250.0, 0.07, 5.0);
        assert_relative_eq!(double, 2.0 * single, max_relative = 1e-12);

        let negative = future_value(-125.0, 0.07, 5.0);
        assert_relative_eq!(negative, -single, max_relative = 1e-12);
    }

    #[test]
    fn test_total_loss_rate_is_not_guarded() {
        // Weekly rate of -1: every contribution but the last is wiped out
        assert_eq!(weekly_rate(-1.0), -1.0);
        assert_relative_eq!(future_value(100.0, -1.0, 1.0), 100.0);
    }

    #[test]
    fn test_project_default_horizons() {
        let engine = ProjectionEngine::default();
        let input = ProjectionInput::new(200.0, 0.08);
        let result = engine.project(&input);

        assert_eq!(result.horizons.len(), 3);
        assert_eq!(result.horizons[0].horizon_years, 1.0);
        assert_eq!(result.horizons[2].weeks, 520.0);
        assert_relative_eq!(result.horizons[2].contributed, 104_000.0);
        assert!(result.horizons[2].growth > 0.0);
        assert_relative_eq!(
            result.horizons[2].future_value,
            future_value(200.0, 0.08, 10.0)
        );
    }

    #[test]
    fn test_curve_sampling() {
        let engine = ProjectionEngine::default();
        let input = ProjectionInput::new(200.0, 0.08);
        let curve = engine.curve(&input);

        assert_eq!(curve.len(), 521);
        assert_eq!(curve[0].years, 0.0);
        assert_eq!(curve[0].future_value, 0.0);

        let last = curve.last().unwrap();
        assert_relative_eq!(last.years, 10.0);
        assert_relative_eq!(last.future_value, future_value(200.0, 0.08, 10.0), max_relative = 1e-12);
    }

    #[test]
    fn test_curve_can_be_disabled() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            include_curve: false,
            ..Default::default()
        });
        let result = engine.project(&ProjectionInput::new(50.0, 0.05));
        assert!(result.curve.is_empty());
    }

    #[test]
    fn test_degenerate_curve_config() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            include_curve: true,
            curve_years: -3.0,
            curve_points_per_year: 0,
        });
        let curve = engine.curve(&ProjectionInput::new(50.0, 0.05));
        assert_eq!(curve.len(), 1);
        assert_eq!(curve[0].future_value, 0.0);

        let engine = ProjectionEngine::new(ProjectionConfig {
            include_curve: true,
            curve_years: f64::NAN,
            curve_points_per_year: 52,
        });
        assert_eq!(engine.curve(&ProjectionInput::new(50.0, 0.05)).len(), 1);
    }

    #[test]
    fn test_curve_stays_within_length() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            include_curve: true,
            curve_years: 0.01,
            curve_points_per_year: 52,
        });
        let curve = engine.curve(&ProjectionInput::new(200.0, 0.08));

        assert_eq!(curve.len(), 2);
        assert_eq!(curve[0].years, 0.0);
        assert_eq!(curve[1].years, 0.01);

        let engine = ProjectionEngine::new(ProjectionConfig {
            include_curve: true,
            curve_years: 2.55,
            curve_points_per_year: 12,
        });
        let curve = engine.curve(&ProjectionInput::new(200.0, 0.08));
        assert_eq!(curve.len(), 32);
        assert!(curve.iter().all(|p| p.years <= 2.55));
        assert_eq!(curve.last().unwrap().years, 2.55);
    }

    #[test]
    fn test_oversized_curve_is_capped() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            include_curve: true,
            curve_years: 1e15,
            curve_points_per_year: u32::MAX,
        });
        let curve = engine.curve(&ProjectionInput::new(200.0, 0.08));

        assert_eq!(curve.len(), MAX_CURVE_POINTS);
        assert_eq!(curve[0].years, 0.0);
        assert_eq!(curve.last().unwrap().years, 1e15);
    }
}
