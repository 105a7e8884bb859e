//! Run projections for every plan in a batch CSV
//!
//! Input columns: PlanId,WeeklyPay,InvestPct,ReturnPct
//! Output: one row per plan with the 1/5/10-year projected values

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use wealth_projector::plan::load_plans;
use wealth_projector::projection::ProjectionConfig;
use wealth_projector::{ContributionPlan, PlanProjection, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(name = "run_batch", about = "Project every plan in a batch CSV")]
struct Args {
    /// Batch CSV of plans
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "batch_projection_output.csv")]
    output: PathBuf,
}

/// One output row per plan
#[derive(Debug, Serialize)]
struct OutputRow {
    #[serde(rename = "PlanId")]
    plan_id: u32,
    #[serde(rename = "WeeklyPay")]
    weekly_pay: f64,
    #[serde(rename = "WeeklyInvestment")]
    weekly_investment: f64,
    #[serde(rename = "ReturnPct")]
    return_pct: f64,
    #[serde(rename = "Year1")]
    year_1: f64,
    #[serde(rename = "Year5")]
    year_5: f64,
    #[serde(rename = "Year10")]
    year_10: f64,
}

impl OutputRow {
    fn new(plan_id: u32, projection: &PlanProjection) -> Self {
        let at = |years: f64| projection.result.value_at(years).unwrap_or(0.0);
        Self {
            plan_id,
            weekly_pay: projection.plan.weekly_pay,
            weekly_investment: projection.weekly_investment,
            return_pct: projection.plan.return_pct,
            year_1: at(1.0),
            year_5: at(5.0),
            year_10: at(10.0),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let batch = load_plans(&args.input)
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("loading plans from {}", args.input.display()))?;
    println!("Loaded {} plans in {:?}", batch.len(), start.elapsed());

    let runner = ScenarioRunner::with_config(ProjectionConfig {
        include_curve: false,
        ..Default::default()
    });
    let plans: Vec<ContributionPlan> = batch.iter().map(|b| b.plan.clone()).collect();

    let proj_start = Instant::now();
    let results = runner.run_batch(&plans);
    info!("Projected {} plans in {:?}", results.len(), proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for (entry, projection) in batch.iter().zip(&results) {
        writer.serialize(OutputRow::new(entry.plan_id, projection))?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());

    let total_10y: f64 = results
        .iter()
        .filter_map(|p| p.result.value_at(10.0))
        .sum();
    println!("\nBatch Summary:");
    println!("  Plans:              {}", results.len());
    println!("  Total 10-year value: ${:.2}", total_10y);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
