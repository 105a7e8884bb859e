//! Wealth Projector CLI
//!
//! Command-line interface for savings projections and saved profiles

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use wealth_projector::plan::{check_curve, parse_number, DEFAULT_INVEST_PCT};
use wealth_projector::profile::DEFAULT_STORE_PATH;
use wealth_projector::projection::{ProjectionConfig, DEFAULT_CURVE_YEARS};
use wealth_projector::{
    ContributionPlan, PlanError, PlanProjection, ProfileStore, ProjectionEngine, ProjectionResult,
    RiskProfile, ScenarioRunner, UserProfile,
};

/// Project savings from a weekly investment
#[derive(Debug, Parser)]
#[command(name = "wealth_projector", version, about = "Project savings from weekly investments")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Projected wealth at each horizon, optionally writing the curve to CSV
    Project(ProjectArgs),
    /// Projected wealth across every whole-percent expected return
    Sensitivity(PlanArgs),
    /// Manage saved profiles
    Profile(ProfileArgs),
}

// Plan inputs are taken as text so bad numbers get the generic message
#[derive(Debug, Args)]
struct PlanArgs {
    /// Weekly pay in dollars
    #[arg(long, default_value = "1000")]
    pay: String,

    /// Percent of pay invested (0-50)
    #[arg(long, default_value = "20")]
    invest_pct: String,

    /// Expected annual return in percent (4-15)
    #[arg(long, default_value = "8")]
    return_pct: String,
}

impl PlanArgs {
    fn to_plan(&self) -> Result<ContributionPlan, PlanError> {
        ContributionPlan::parse(&self.pay, &self.invest_pct, &self.return_pct)
    }
}

#[derive(Debug, Args)]
struct ProjectArgs {
    #[command(flatten)]
    plan: PlanArgs,

    /// Horizon in years; repeat for several (default 1, 5, 10)
    #[arg(long = "horizon")]
    horizons: Vec<String>,

    /// Write the sampled curve to this CSV file
    #[arg(long)]
    curve_csv: Option<PathBuf>,

    /// Length of the sampled curve in years
    #[arg(long, default_value_t = DEFAULT_CURVE_YEARS)]
    curve_years: f64,

    /// Print the projection as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Args)]
struct ProfileArgs {
    /// Profile store file
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    #[command(subcommand)]
    action: ProfileAction,
}

#[derive(Debug, Subcommand)]
enum ProfileAction {
    /// Print a saved profile (or the defaults for a new user)
    Show { user: String },
    /// Create or update a profile
    Save {
        user: String,
        #[arg(long)]
        pay: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        risk: Option<RiskProfile>,
    },
    /// Append a message to the profile's chat history
    Note { user: String, message: String },
    /// Project from the saved pay; return defaults to the risk profile's suggestion
    Project {
        user: String,
        #[arg(long, default_value_t = DEFAULT_INVEST_PCT.to_string())]
        invest_pct: String,
        #[arg(long)]
        return_pct: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(plan_err) = err.downcast_ref::<PlanError>() {
                warn!("Rejected input: {}", plan_err);
                eprintln!("{}", plan_err.user_message());
                return ExitCode::from(2);
            }
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Project(args) => project(&args),
        Command::Sensitivity(args) => sensitivity(&args),
        Command::Profile(args) => profile(args),
    }
}

fn project(args: &ProjectArgs) -> Result<()> {
    let plan = args.plan.to_plan()?;

    let horizons = args
        .horizons
        .iter()
        .map(|raw| parse_number("horizon", raw))
        .collect::<Result<Vec<_>, _>>()?;
    let input = if horizons.is_empty() {
        plan.to_input()
    } else {
        plan.to_input_with_horizons(&horizons)?
    };

    let config = ProjectionConfig {
        include_curve: args.curve_csv.is_some() || args.json,
        curve_years: args.curve_years,
        ..Default::default()
    };
    check_curve(config.curve_years, config.curve_points_per_year)?;

    let engine = ProjectionEngine::new(config);
    let result = engine.project(&input);

    if let Some(path) = &args.curve_csv {
        write_curve_csv(path, &result)?;
        info!("Wrote {} curve points to {}", result.curve.len(), path.display());
    }

    let projection = PlanProjection {
        weekly_investment: plan.weekly_investment(),
        plan,
        result,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
    } else {
        print_projection(&projection);
        if let Some(path) = &args.curve_csv {
            println!("\nCurve written to: {}", path.display());
        }
    }
    Ok(())
}

fn sensitivity(args: &PlanArgs) -> Result<()> {
    let plan = args.to_plan()?;
    let runner = ScenarioRunner::with_config(ProjectionConfig {
        include_curve: false,
        ..Default::default()
    });
    let results = runner.return_sensitivity(&plan);

    println!("Weekly Investment: {}", money(plan.weekly_investment()));
    println!();
    println!("{:>7} {:>16} {:>16} {:>16}", "Return", "1 Year", "5 Years", "10 Years");
    println!("{}", "-".repeat(58));
    for projection in &results {
        let at = |years: f64| projection.result.value_at(years).map(money).unwrap_or_default();
        println!(
            "{:>6}% {:>16} {:>16} {:>16}",
            projection.plan.return_pct,
            at(1.0),
            at(5.0),
            at(10.0),
        );
    }
    Ok(())
}

fn profile(args: ProfileArgs) -> Result<()> {
    let mut store = ProfileStore::open(&args.store)
        .with_context(|| format!("opening profile store {}", args.store.display()))?;

    match args.action {
        ProfileAction::Show { user } => {
            match store.get(&user) {
                Some(profile) => print_profile(profile),
                None => {
                    println!("No saved profile for {}; defaults:", user.trim());
                    print_profile(&store.load_or_default(&user)?);
                }
            }
        }
        ProfileAction::Save { user, pay, age, risk } => {
            let mut profile = store.load_or_default(&user)?;
            if let Some(raw) = pay {
                profile.weekly_pay = parse_number("weekly_pay", &raw)?;
            }
            if let Some(age) = age {
                profile.age = age;
            }
            if let Some(risk) = risk {
                profile.risk = risk;
            }
            print_profile(store.upsert(profile)?);
        }
        ProfileAction::Note { user, message } => {
            let profile = store.append_chat(&user, &message)?;
            println!("{} messages saved for {}", profile.chat_history.len(), profile.user_id);
        }
        ProfileAction::Project {
            user,
            invest_pct,
            return_pct,
        } => {
            let profile = store.load_or_default(&user)?;
            let invest_pct = parse_number("invest_pct", &invest_pct)?;
            let return_pct = return_pct
                .map(|raw| parse_number("return_pct", &raw))
                .transpose()?;
            let plan = profile.plan(invest_pct, return_pct)?;

            println!("Projection for {} ({} risk)\n", profile.user_id, profile.risk);
            let runner = ScenarioRunner::with_config(ProjectionConfig {
                include_curve: false,
                ..Default::default()
            });
            print_projection(&runner.run(&plan));
        }
    }
    Ok(())
}

fn print_projection(projection: &PlanProjection) {
    let result = &projection.result;

    println!("Weekly Investment: {}", money(projection.weekly_investment));
    println!(
        "Expected Return:   {:.2}% (weekly {:.6}%)",
        result.annual_return_rate * 100.0,
        result.weekly_rate * 100.0
    );
    println!();
    println!("{:>8} {:>18} {:>18} {:>18}", "Years", "Contributed", "Projected Value", "Growth");
    println!("{}", "-".repeat(65));
    for row in &result.horizons {
        println!(
            "{:>8} {:>18} {:>18} {:>18}",
            row.horizon_years,
            money(row.contributed),
            money(row.future_value),
            money(row.growth),
        );
    }
}

fn print_profile(profile: &UserProfile) {
    println!("User:        {}", profile.user_id);
    println!("Weekly Pay:  {}", money(profile.weekly_pay));
    println!("Age:         {}", profile.age);
    println!("Risk:        {}", profile.risk);
    println!("Messages:    {}", profile.chat_history.len());
    println!("Updated:     {}", profile.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
}

fn write_curve_csv(path: &Path, result: &ProjectionResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for point in &result.curve {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}

/// Dollar amount with thousands separators and cents
fn money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", sign, grouped, cents)
}
