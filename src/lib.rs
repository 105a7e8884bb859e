//! Wealth Projector - savings projections for weekly investments
//!
//! This library provides:
//! - Future value of weekly-compounded periodic contributions
//! - Horizon tables (1/5/10 years by default) and a sampled curve for charting
//! - Validated contribution plans built from weekly pay, invest % and expected return
//! - File-backed user profiles
//! - Parallel batch and return-sensitivity runs

pub mod error;
pub mod plan;
pub mod profile;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{PlanError, StoreError, VALID_NUMBERS_MESSAGE};
pub use plan::ContributionPlan;
pub use profile::{ProfileStore, RiskProfile, UserProfile};
pub use projection::{future_value, weekly_rate, ProjectionEngine, ProjectionInput, ProjectionResult};
pub use scenario::{PlanProjection, ScenarioRunner};
