//! Saved user profile data

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::plan::{ContributionPlan, DEFAULT_WEEKLY_PAY};

/// Youngest age a profile may record
pub const MIN_AGE: u32 = 18;

pub const DEFAULT_AGE: u32 = 30;

/// Investor risk appetite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RiskProfile {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

impl RiskProfile {
    /// Expected annual return (percent) used when the user gives none
    pub fn suggested_return_pct(&self) -> f64 {
        match self {
            RiskProfile::Conservative => 5.0,
            RiskProfile::Balanced => 8.0,
            RiskProfile::Aggressive => 11.0,
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskProfile::Conservative => "Conservative",
            RiskProfile::Balanced => "Balanced",
            RiskProfile::Aggressive => "Aggressive",
        };
        f.write_str(label)
    }
}

impl FromStr for RiskProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(RiskProfile::Conservative),
            "balanced" => Ok(RiskProfile::Balanced),
            "aggressive" => Ok(RiskProfile::Aggressive),
            other => Err(format!("Unknown risk profile: {}", other)),
        }
    }
}

/// Per-user saved inputs, keyed by email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub weekly_pay: f64,
    pub age: u32,
    pub risk: RiskProfile,
    #[serde(default)]
    pub chat_history: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Profile used when nothing has been saved for this user yet
    pub fn default_for(user_id: &str) -> Self {
        Self {
            user_id: user_id.trim().to_string(),
            weekly_pay: DEFAULT_WEEKLY_PAY,
            age: DEFAULT_AGE,
            risk: RiskProfile::default(),
            chat_history: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Build a plan from the saved pay; return falls back to the risk profile's suggestion
    pub fn plan(&self, invest_pct: f64, return_pct: Option<f64>) -> Result<ContributionPlan, PlanError> {
        let return_pct = return_pct.unwrap_or_else(|| self.risk.suggested_return_pct());
        ContributionPlan::new(self.weekly_pay, invest_pct, return_pct)
    }
}
