//! Contribution plan: the three user inputs feeding a projection

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::projection::{ProjectionInput, MAX_CURVE_POINTS};

/// Allowed share of weekly pay invested (percent)
pub const INVEST_PCT_RANGE: RangeInclusive<f64> = 0.0..=50.0;

/// Allowed expected annual return (percent)
pub const RETURN_PCT_RANGE: RangeInclusive<f64> = 4.0..=15.0;

pub const DEFAULT_WEEKLY_PAY: f64 = 1000.0;
pub const DEFAULT_INVEST_PCT: f64 = 20.0;
pub const DEFAULT_RETURN_PCT: f64 = 8.0;

/// Weekly pay, share invested and expected return for one saver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionPlan {
    /// Weekly pay in dollars
    pub weekly_pay: f64,

    /// Percent of pay invested each week (0-50)
    pub invest_pct: f64,

    /// Expected annual return in percent (4-15)
    pub return_pct: f64,
}

impl ContributionPlan {
    /// Create a validated plan
    pub fn new(weekly_pay: f64, invest_pct: f64, return_pct: f64) -> Result<Self, PlanError> {
        let plan = Self {
            weekly_pay,
            invest_pct,
            return_pct,
        };
        plan.validate()?;
        Ok(plan)
    }

    /// Parse a plan from raw text fields as typed by a user
    pub fn parse(weekly_pay: &str, invest_pct: &str, return_pct: &str) -> Result<Self, PlanError> {
        Self::new(
            parse_number("weekly_pay", weekly_pay)?,
            parse_number("invest_pct", invest_pct)?,
            parse_number("return_pct", return_pct)?,
        )
    }

    /// Check every field is finite and the percentages are within slider bounds
    pub fn validate(&self) -> Result<(), PlanError> {
        check_finite("weekly_pay", self.weekly_pay)?;
        check_range("invest_pct", self.invest_pct, &INVEST_PCT_RANGE)?;
        check_range("return_pct", self.return_pct, &RETURN_PCT_RANGE)?;
        Ok(())
    }

    /// Dollars invested each week
    pub fn weekly_investment(&self) -> f64 {
        self.weekly_pay * self.invest_pct / 100.0
    }

    /// Expected annual return as a decimal
    pub fn annual_return_rate(&self) -> f64 {
        self.return_pct / 100.0
    }

    /// Engine input at the default horizons
    pub fn to_input(&self) -> ProjectionInput {
        ProjectionInput::new(self.weekly_investment(), self.annual_return_rate())
    }

    /// Engine input at caller-chosen horizons; each must be positive and finite
    pub fn to_input_with_horizons(&self, horizons_years: &[f64]) -> Result<ProjectionInput, PlanError> {
        for &years in horizons_years {
            if !years.is_finite() || years <= 0.0 {
                return Err(PlanError::InvalidHorizon(years));
            }
        }
        Ok(self.to_input().with_horizons(horizons_years.to_vec()))
    }
}

impl Default for ContributionPlan {
    fn default() -> Self {
        Self {
            weekly_pay: DEFAULT_WEEKLY_PAY,
            invest_pct: DEFAULT_INVEST_PCT,
            return_pct: DEFAULT_RETURN_PCT,
        }
    }
}

/// Check a requested curve is a non-negative length and fits in `MAX_CURVE_POINTS` samples
pub fn check_curve(curve_years: f64, points_per_year: u32) -> Result<(), PlanError> {
    if !curve_years.is_finite() || curve_years < 0.0 {
        return Err(PlanError::InvalidHorizon(curve_years));
    }

    // Samples from t = 0 plus a possible exact endpoint
    let points = (curve_years * points_per_year.max(1) as f64).floor() + 2.0;
    if points > MAX_CURVE_POINTS as f64 {
        return Err(PlanError::CurveTooLarge {
            points,
            max: MAX_CURVE_POINTS,
        });
    }
    Ok(())
}

/// Parse a user-typed amount, rejecting text that is not a finite number
pub fn parse_number(field: &'static str, raw: &str) -> Result<f64, PlanError> {
    let invalid = || PlanError::InvalidNumber {
        field,
        value: raw.to_string(),
    };

    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}

fn check_finite(field: &'static str, value: f64) -> Result<(), PlanError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PlanError::InvalidNumber {
            field,
            value: value.to_string(),
        })
    }
}

fn check_range(field: &'static str, value: f64, range: &RangeInclusive<f64>) -> Result<(), PlanError> {
    check_finite(field, value)?;
    if range.contains(&value) {
        Ok(())
    } else {
        Err(PlanError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
