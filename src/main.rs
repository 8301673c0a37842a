//! Loan Optimizer CLI
//!
//! Runs the optimization engine on a request JSON and prints the recommendation

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use loan_optimizer::loans::{load_loans, load_request};
use loan_optimizer::{OptimizationEngine, OptimizationRequest, OptimizationResult, RepaymentScenario};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "loan_optimizer")]
#[command(version = "0.1.0")]
#[command(about = "Compare PSLF against private refinancing for a student-loan portfolio", long_about = None)]
struct Cli {
    /// Optimization request JSON (a JSON array with --batch)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Replace the request's loans with a CSV loan list
    #[arg(long, value_name = "LOANS_CSV")]
    loans: Option<PathBuf>,

    /// Directory of assumption CSVs (built-in assumptions when omitted)
    #[arg(short, long, value_name = "DIR")]
    assumptions: Option<PathBuf>,

    /// Evaluation date, YYYY-MM-DD (defaults to today)
    #[arg(long, value_name = "DATE")]
    as_of: Option<NaiveDate>,

    /// Write the full result JSON here instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Input holds an array of requests evaluated in parallel
    #[arg(long)]
    batch: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let engine = match &cli.assumptions {
        Some(dir) => OptimizationEngine::from_csv_path(dir)
            .with_context(|| format!("loading assumptions from {}", dir.display()))?,
        None => OptimizationEngine::with_default_assumptions()?,
    };
    let as_of = cli.as_of.unwrap_or_else(|| chrono::Local::now().date_naive());

    let json = if cli.batch {
        let requests = read_batch(&cli.input)?;
        let results = engine.run_batch(&requests, as_of);

        let mut ok = Vec::with_capacity(results.len());
        for (i, result) in results.into_iter().enumerate() {
            match result {
                Ok(result) => {
                    print_summary(&format!("Request {}", i + 1), &result);
                    ok.push(result);
                }
                Err(e) => eprintln!("Request {} failed: {}", i + 1, e),
            }
        }
        serde_json::to_string_pretty(&ok)?
    } else {
        let mut request = load_request(&cli.input)
            .with_context(|| format!("reading request {}", cli.input.display()))?;
        if let Some(loans) = &cli.loans {
            let loan_list = load_loans(loans).with_context(|| format!("reading loans {}", loans.display()))?;
            request.loan_data.federal_loans = loan_list.federal_loans;
            request.loan_data.private_loans = loan_list.private_loans;
        }

        let result = engine.optimize(&request, as_of)?;
        print_summary(&cli.input.display().to_string(), &result);
        serde_json::to_string_pretty(&result)?
    };

    match &cli.output {
        Some(path) => {
            let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            writeln!(file, "{}", json)?;
            println!("\nFull results written to: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn read_batch(path: &Path) -> Result<Vec<OptimizationRequest>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let requests: Vec<OptimizationRequest> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing request array {}", path.display()))?;
    Ok(requests)
}

fn print_summary(label: &str, result: &OptimizationResult) {
    let summary = &result.loan_summary;
    let recommendation = &result.recommendation;

    eprintln!("{}", label);
    eprintln!("{}", "=".repeat(label.len()));
    eprintln!("  Total Balance:      ${:.2}", summary.total_balance);
    eprintln!(
        "  Federal / Private:  ${:.2} @ {:.2}% / ${:.2} @ {:.2}%",
        summary.total_federal_balance,
        summary.weighted_federal_rate,
        summary.total_private_balance,
        summary.weighted_private_rate,
    );
    eprintln!("  Standard Payment:   ${:.2}/month", summary.standard_plan_payment);
    eprintln!();
    eprintln!(
        "  Recommendation:     {} ({:?} confidence)",
        recommendation.recommended_strategy, recommendation.confidence
    );
    eprintln!("  Reason:             {}", recommendation.reason);
    if let Some(note) = &recommendation.note {
        eprintln!("  Note:               {}", note);
    }

    match &recommendation.primary_option {
        RepaymentScenario::Pslf(pslf) => {
            eprintln!("  Monthly Payment:    ${:.2}", pslf.monthly_payment);
            eprintln!("  Total Paid:         ${:.2} over {:.1} years", pslf.total_paid, pslf.years_remaining);
            eprintln!("  Forgiven:           ${:.2}", pslf.forgiven_amount);
            eprintln!("  Tax on Forgiveness: ${:.2}", pslf.tax_on_forgiveness);
        }
        RepaymentScenario::Refinance(refi) => {
            eprintln!("  Offer:              {:.2}% for {} years", refi.rate, refi.term_years);
            eprintln!("  Monthly Payment:    ${:.2}", refi.monthly_payment);
            eprintln!("  Total Paid:         ${:.2}", refi.total_paid);
            eprintln!(
                "  Debt-to-Income:     {:.1}%{}",
                refi.debt_to_income_ratio * 100.0,
                if refi.is_affordable { "" } else { " (above affordability limit)" }
            );
        }
    }

    eprintln!("  Potential Savings:  ${:.0}", result.savings.potential_savings);
    eprintln!();
    eprintln!("Next Steps:");
    for step in &result.implementation_steps {
        eprintln!("  {}. {} ({})", step.order, step.title, step.timeline);
    }
    eprintln!();
}
