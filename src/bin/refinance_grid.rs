//! Write the full refinance grid for a request to CSV
//!
//! Usage: cargo run --bin refinance_grid -- request.json -o refinance_grid.csv

use anyhow::{Context, Result};
use clap::Parser;
use loan_optimizer::assumptions::ApprovalTier;
use loan_optimizer::loans::load_request;
use loan_optimizer::strategy::RefinanceScenarioGenerator;
use loan_optimizer::{EngineConfig, LoanPortfolioSummary};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "refinance_grid")]
#[command(about = "Price every refinance rate/term combination for a request", long_about = None)]
struct Cli {
    /// Optimization request JSON
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output CSV file
    #[arg(short, long, default_value = "refinance_grid.csv")]
    output: PathBuf,

    /// Directory of assumption CSVs (built-in assumptions when omitted)
    #[arg(short, long, value_name = "DIR")]
    assumptions: Option<PathBuf>,
}

#[derive(Serialize)]
struct GridRow {
    rate: f64,
    term_years: u32,
    monthly_payment: f64,
    total_paid: f64,
    total_interest: f64,
    debt_to_income_ratio: f64,
    is_affordable: bool,
    approval_tier: ApprovalTier,
    approval_odds: u32,
    recommended: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let config = match &cli.assumptions {
        Some(dir) => EngineConfig::from_csv_path(dir)
            .with_context(|| format!("loading assumptions from {}", dir.display()))?,
        None => {
            let config = EngineConfig::default_assumptions();
            config.validate()?;
            config
        }
    };

    let request = load_request(&cli.input).with_context(|| format!("reading request {}", cli.input.display()))?;
    request.user_profile.validate()?;
    let accounts = request.loan_data.ingest()?;
    let summary = LoanPortfolioSummary::from_accounts(&accounts, &request.loan_data.extracted_data);
    let salary = config.starting_salary(&request.user_profile, request.loan_data.employment.annual_salary);

    let analysis = RefinanceScenarioGenerator::new(&config).generate(
        summary.total_balance,
        salary,
        request.user_profile.career_stage,
    )?;

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    for scenario in &analysis.available_scenarios {
        writer.serialize(GridRow {
            rate: scenario.rate,
            term_years: scenario.term_years,
            monthly_payment: scenario.monthly_payment,
            total_paid: scenario.total_paid,
            total_interest: scenario.total_interest,
            debt_to_income_ratio: scenario.debt_to_income_ratio,
            is_affordable: scenario.is_affordable,
            approval_tier: scenario.approval_tier,
            approval_odds: scenario.approval_odds,
            recommended: scenario == &analysis.recommended_scenario,
        })?;
    }
    writer.flush()?;

    println!(
        "Balance ${:.2} at salary ${:.0}: {} scenarios, recommended {:.2}% for {} years",
        summary.total_balance,
        salary,
        analysis.available_scenarios.len(),
        analysis.recommended_scenario.rate,
        analysis.recommended_scenario.term_years,
    );
    println!("Written to {} in {:?}", cli.output.display(), start.elapsed());

    Ok(())
}
