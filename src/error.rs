//! Error types for plan validation and profile storage

use thiserror::Error;

/// Message shown to end users for any rejected plan input
pub const VALID_NUMBERS_MESSAGE: &str = "Please enter valid numbers";

/// Rejected contribution plan input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("{field} is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("horizon must be a positive number of years, got {0}")]
    InvalidHorizon(f64),

    #[error("curve would need {points} samples, limit is {max}")]
    CurveTooLarge { points: f64, max: usize },
}

impl PlanError {
    /// Generic message for the UI boundary; `Display` carries the detail for logs
    pub const fn user_message(&self) -> &'static str {
        VALID_NUMBERS_MESSAGE
    }
}

/// Profile store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user id must not be empty")]
    EmptyUserId,

    #[error("age must be at least {min}, got {0}", min = crate::profile::MIN_AGE)]
    InvalidAge(u32),

    #[error("profile store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
