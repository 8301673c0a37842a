//! Income-driven repayment simulation toward forgiveness

use serde::{Deserialize, Serialize};

use super::amortization;
use super::state::ScheduleState;
use crate::assumptions::{IdrParameters, SalaryGrowth};

/// Monthly IDR payment: a share of income above a multiple of the poverty
/// guideline, spread over twelve months
pub fn idr_monthly_payment(salary: f64, params: &IdrParameters) -> f64 {
    let discretionary = (salary - params.poverty_multiplier * params.poverty_guideline).max(0.0);
    params.discretionary_share * discretionary / 12.0
}

/// One simulated year of IDR payments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdrYear {
    pub year: u32,
    pub salary: f64,
    pub monthly_payment: f64,
    /// Payments made this year; the last year may be partial
    pub months_paid: u32,
    pub annual_payment: f64,
    /// Qualifying payments still owed after this year
    pub payments_remaining: u32,
}

/// Result of simulating the remaining qualifying payments
#[derive(Debug, Clone, PartialEq)]
pub struct IdrSimulation {
    pub years: Vec<IdrYear>,
    pub total_paid: f64,
    /// Salary in the last simulated year (starting salary if none)
    pub final_salary: f64,
    pub average_monthly_payment: f64,
    /// Balance left after rolling the average payment over the whole period
    pub ending_balance: f64,
}

/// Yearly IDR payments over `payments_remaining` months with salary growth
pub fn yearly_payments(
    starting_salary: f64,
    growth: &SalaryGrowth,
    payments_remaining: u32,
    params: &IdrParameters,
) -> Vec<IdrYear> {
    let mut state = ScheduleState::new(starting_salary, growth.clone());
    let mut remaining = payments_remaining;
    let mut years = Vec::new();

    while remaining > 0 {
        let months_paid = remaining.min(12);
        remaining -= months_paid;

        let monthly_payment = idr_monthly_payment(state.salary, params);
        years.push(IdrYear {
            year: state.year,
            salary: state.salary,
            monthly_payment,
            months_paid,
            annual_payment: monthly_payment * months_paid as f64,
            payments_remaining: remaining,
        });

        state.advance_year();
    }

    years
}

/// Simulate IDR payments and the federal balance they leave behind.
///
/// The balance is rolled monthly at `annual_rate_pct` against the average
/// monthly payment of the period. Pure function of its arguments.
pub fn simulate(
    balance: f64,
    annual_rate_pct: f64,
    starting_salary: f64,
    growth: &SalaryGrowth,
    payments_remaining: u32,
    params: &IdrParameters,
) -> IdrSimulation {
    let years = yearly_payments(starting_salary, growth, payments_remaining, params);

    let total_paid: f64 = years.iter().map(|y| y.annual_payment).sum();
    let final_salary = years.last().map(|y| y.salary).unwrap_or(starting_salary);
    let average_monthly_payment = if payments_remaining > 0 {
        total_paid / payments_remaining as f64
    } else {
        0.0
    };
    let ending_balance =
        amortization::roll_balance(balance, annual_rate_pct, average_monthly_payment, payments_remaining);

    IdrSimulation {
        years,
        total_paid,
        final_salary,
        average_monthly_payment,
        ending_balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_idr_payment_formula() {
        let params = IdrParameters::default();
        // (65,000 - 1.5 * 13,590) * 10% / 12
        assert_abs_diff_eq!(idr_monthly_payment(65_000.0, &params), 371.79, epsilon = 0.01);
        assert_eq!(idr_monthly_payment(15_000.0, &params), 0.0);
    }

    #[test]
    fn test_partial_final_year() {
        let params = IdrParameters::default();
        let years = yearly_payments(65_000.0, &SalaryGrowth::flat(0.0), 30, &params);
        assert_eq!(years.len(), 3);
        assert_eq!(years[0].months_paid, 12);
        assert_eq!(years[2].months_paid, 6);
        assert_eq!(years[2].payments_remaining, 0);
        assert_eq!(years[0].payments_remaining, 18);
    }

    #[test]
    fn test_zero_payments_remaining() {
        let params = IdrParameters::default();
        let sim = simulate(100_000.0, 6.8, 65_000.0, &SalaryGrowth::flat(0.05), 0, &params);
        assert!(sim.years.is_empty());
        assert_eq!(sim.total_paid, 0.0);
        assert_eq!(sim.average_monthly_payment, 0.0);
        assert_eq!(sim.final_salary, 65_000.0);
        assert_eq!(sim.ending_balance, 100_000.0);
    }

    #[test]
    fn test_growth_raises_payments() {
        let params = IdrParameters::default();
        let flat = simulate(200_000.0, 6.0, 65_000.0, &SalaryGrowth::flat(0.0), 120, &params);
        let growing = simulate(200_000.0, 6.0, 65_000.0, &SalaryGrowth::flat(0.05), 120, &params);
        assert!(growing.total_paid > flat.total_paid);
        assert!(growing.ending_balance < flat.ending_balance);
        assert!(growing.final_salary > 65_000.0);
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let params = IdrParameters::default();
        let growth = SalaryGrowth::new(vec![0.03, 0.03, 2.5, 0.05]);
        let a = simulate(285_000.0, 6.8, 65_000.0, &growth, 97, &params);
        let b = simulate(285_000.0, 6.8, 65_000.0, &growth, 97, &params);
        assert_eq!(a, b);
    }
}
