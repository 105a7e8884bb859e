//! Projection engine for weekly-compounded savings projections

mod engine;
mod results;

pub use engine::{
    future_value, weekly_rate, ProjectionConfig, ProjectionEngine, ProjectionInput,
    DEFAULT_CURVE_YEARS, DEFAULT_HORIZONS, MAX_CURVE_POINTS, WEEKS_PER_YEAR,
};
pub use results::{CurvePoint, HorizonValue, ProjectionResult, ProjectionSummary};
