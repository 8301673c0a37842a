//! Year-by-year schedule of the recommended strategy, with milestones

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::amortization;
use super::idr;
use super::state::ScheduleState;
use crate::assumptions::{IdrParameters, SalaryGrowth};
use crate::strategy::{PslfScenario, RefinanceScenario, RepaymentScenario, StrategyKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyProjectionRow {
    /// Projection year, 1-indexed
    pub year: u32,
    pub calendar_year: i32,
    pub salary: f64,
    pub monthly_payment: f64,
    pub annual_payment: f64,
    /// PSLF only: qualifying payments still owed at year end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments_remaining: Option<u32>,
    /// Refinance only: whole years left on the term at year end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_term_years: Option<u32>,
    /// Refinance only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_balance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub year: u32,
    pub calendar_year: i32,
    pub event: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedProjections {
    pub strategy: StrategyKind,
    pub yearly_breakdown: Vec<YearlyProjectionRow>,
    pub milestones: Vec<Milestone>,
}

pub struct ProjectionGenerator<'a> {
    idr: &'a IdrParameters,
}

impl<'a> ProjectionGenerator<'a> {
    pub fn new(idr: &'a IdrParameters) -> Self {
        Self { idr }
    }

    /// Expand the chosen scenario into yearly rows and milestones. Calendar
    /// years are offsets from `as_of`.
    pub fn generate(
        &self,
        chosen: &RepaymentScenario,
        starting_salary: f64,
        growth: &SalaryGrowth,
        as_of: NaiveDate,
    ) -> DetailedProjections {
        let base_year = as_of.year();

        let (yearly_breakdown, milestones) = match chosen {
            RepaymentScenario::Pslf(s) => (
                self.pslf_rows(s, starting_salary, growth, base_year),
                pslf_milestones(s, base_year),
            ),
            RepaymentScenario::Refinance(s) => (
                refinance_rows(s, starting_salary, growth, base_year),
                refinance_milestones(s, base_year),
            ),
        };

        log::debug!(
            "Projected {} over {} years with {} milestones",
            chosen.kind(),
            yearly_breakdown.len(),
            milestones.len()
        );

        DetailedProjections {
            strategy: chosen.kind(),
            yearly_breakdown,
            milestones,
        }
    }

    fn pslf_rows(
        &self,
        scenario: &PslfScenario,
        starting_salary: f64,
        growth: &SalaryGrowth,
        base_year: i32,
    ) -> Vec<YearlyProjectionRow> {
        idr::yearly_payments(starting_salary, growth, scenario.payments_remaining, self.idr)
            .into_iter()
            .map(|y| YearlyProjectionRow {
                year: y.year,
                calendar_year: base_year + y.year as i32,
                salary: y.salary,
                monthly_payment: y.monthly_payment,
                annual_payment: y.annual_payment,
                payments_remaining: Some(y.payments_remaining),
                remaining_term_years: None,
                remaining_balance: None,
            })
            .collect()
    }
}

fn refinance_rows(
    scenario: &RefinanceScenario,
    starting_salary: f64,
    growth: &SalaryGrowth,
    base_year: i32,
) -> Vec<YearlyProjectionRow> {
    let principal = scenario.total_paid - scenario.total_interest;
    let mut state = ScheduleState::new(starting_salary, growth.clone());
    let mut balance = principal;
    let mut rows = Vec::with_capacity(scenario.term_years as usize);

    for _ in 0..scenario.term_years {
        balance = amortization::roll_balance(balance, scenario.rate, scenario.monthly_payment, 12);
        rows.push(YearlyProjectionRow {
            year: state.year,
            calendar_year: base_year + state.year as i32,
            salary: state.salary,
            monthly_payment: scenario.monthly_payment,
            annual_payment: scenario.monthly_payment * 12.0,
            payments_remaining: None,
            remaining_term_years: Some(scenario.term_years - state.year),
            remaining_balance: Some(balance),
        });
        state.advance_year();
    }

    rows
}

fn milestone(year: u32, base_year: i32, event: &str, description: String) -> Milestone {
    Milestone {
        year,
        calendar_year: base_year + year as i32,
        event: event.to_string(),
        description,
    }
}

fn pslf_milestones(scenario: &PslfScenario, base_year: i32) -> Vec<Milestone> {
    let final_year = scenario.years_remaining.ceil() as u32;
    let application = milestone(
        final_year,
        base_year,
        "Apply for Forgiveness",
        format!("Submit the PSLF application after payment {}", scenario.payments_made + scenario.payments_remaining),
    );

    if final_year == 0 {
        return vec![application];
    }

    let midpoint = (scenario.years_remaining / 2.0).ceil().max(1.0) as u32;
    vec![
        milestone(
            1,
            base_year,
            "Submit Employment Certification",
            "File the first annual employment certification".to_string(),
        ),
        milestone(
            midpoint,
            base_year,
            "Mid-Point Review",
            "Confirm qualifying payment count with the servicer".to_string(),
        ),
        application,
    ]
}

fn refinance_milestones(scenario: &RefinanceScenario, base_year: i32) -> Vec<Milestone> {
    let term = scenario.term_years;
    let midpoint = term.div_ceil(2).max(1);

    vec![
        milestone(
            1,
            base_year,
            "First Year Review",
            "Check for autopay and loyalty rate discounts".to_string(),
        ),
        milestone(
            midpoint,
            base_year,
            "Consider Refinancing Again",
            "Re-quote if market rates have dropped".to_string(),
        ),
        milestone(
            term,
            base_year,
            "Loan Paid Off",
            format!("Final payment on the {}-year loan at {:.2}%", term, scenario.rate),
        ),
    ]
}
