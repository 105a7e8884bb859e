//! Contribution plans and batch plan loading

mod data;
pub mod loader;

pub use data::{
    check_curve, parse_number, ContributionPlan, DEFAULT_INVEST_PCT, DEFAULT_RETURN_PCT, DEFAULT_WEEKLY_PAY,
    INVEST_PCT_RANGE, RETURN_PCT_RANGE,
};
pub use loader::{load_plans, load_plans_from_reader, BatchPlan};
