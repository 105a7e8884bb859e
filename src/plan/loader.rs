//! Load contribution plans from a batch CSV
//!
//! Expected columns: `PlanId,WeeklyPay,InvestPct,ReturnPct`

use super::ContributionPlan;
use csv::Reader;
use log::debug;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raw CSV row matching the batch file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "PlanId")]
    plan_id: u32,
    #[serde(rename = "WeeklyPay")]
    weekly_pay: String,
    #[serde(rename = "InvestPct")]
    invest_pct: String,
    #[serde(rename = "ReturnPct")]
    return_pct: String,
}

/// A plan tagged with its batch identifier
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPlan {
    pub plan_id: u32,
    pub plan: ContributionPlan,
}

impl CsvRow {
    fn to_batch_plan(&self) -> Result<BatchPlan, Box<dyn Error>> {
        let plan = ContributionPlan::parse(&self.weekly_pay, &self.invest_pct, &self.return_pct)
            .map_err(|e| format!("PlanId {}: {}", self.plan_id, e))?;

        Ok(BatchPlan {
            plan_id: self.plan_id,
            plan,
        })
    }
}

/// Load plans from a CSV file
pub fn load_plans(path: &Path) -> Result<Vec<BatchPlan>, Box<dyn Error>> {
    let file = File::open(path)?;
    let plans = load_plans_from_reader(file)?;
    debug!("Loaded {} plans from {}", plans.len(), path.display());
    Ok(plans)
}

/// Load plans from any reader containing the batch CSV
pub fn load_plans_from_reader<R: Read>(reader: R) -> Result<Vec<BatchPlan>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut plans = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        plans.push(row.to_batch_plan()?);
    }

    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_plans_from_reader() {
        let data = "PlanId,WeeklyPay,InvestPct,ReturnPct\n\
                    1,1000,20,8\n\
                    2, 750.25 ,10,12\n";
        let plans = load_plans_from_reader(data.as_bytes()).unwrap();

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].plan_id, 1);
        assert_eq!(plans[0].plan, ContributionPlan::default());
        assert_eq!(plans[1].plan.weekly_pay, 750.25);
        assert_eq!(plans[1].plan.return_pct, 12.0);
    }

    #[test]
    fn test_invalid_row_names_plan() {
        let data = "PlanId,WeeklyPay,InvestPct,ReturnPct\n\
                    1,1000,20,8\n\
                    7,1000,90,8\n";
        let err = load_plans_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().starts_with("PlanId 7:"), "got {}", err);
    }

    #[test]
    fn test_missing_column_is_error() {
        let data = "PlanId,WeeklyPay,InvestPct\n1,1000,20\n";
        assert!(load_plans_from_reader(data.as_bytes()).is_err());
    }
}
