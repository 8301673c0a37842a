//! Private refinance market assumptions: the rate/term grid, affordability
//! limit, and lender approval tiers

use serde::{Deserialize, Serialize};

/// Lender eligibility tier based on salary and debt load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalTier {
    Excellent,
    Good,
    Fair,
    Challenging,
}

/// One row of the approval table: minimum salary and maximum balance/salary
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalRule {
    pub tier: ApprovalTier,
    pub min_salary: f64,
    pub max_balance_to_salary: f64,
    pub odds_pct: u32,
}

/// Fixed refinance grid and underwriting assumptions
#[derive(Debug, Clone, PartialEq)]
pub struct RefinanceGrid {
    /// Annual rates in percent
    pub rates: Vec<f64>,
    /// Terms in years
    pub terms_years: Vec<u32>,
    /// Maximum monthly payment / monthly income considered affordable
    pub max_debt_to_income: f64,
    /// Ordered best to worst; first matching rule wins
    pub approval_rules: Vec<ApprovalRule>,
    /// Odds when no rule matches
    pub fallback_odds_pct: u32,
}

impl Default for RefinanceGrid {
    fn default() -> Self {
        Self {
            rates: vec![3.5, 4.0, 4.5, 5.0, 5.5, 6.0],
            terms_years: vec![5, 7, 10, 15, 20],
            max_debt_to_income: 0.15,
            approval_rules: vec![
                ApprovalRule {
                    tier: ApprovalTier::Excellent,
                    min_salary: 200_000.0,
                    max_balance_to_salary: 3.0,
                    odds_pct: 95,
                },
                ApprovalRule {
                    tier: ApprovalTier::Good,
                    min_salary: 150_000.0,
                    max_balance_to_salary: 4.0,
                    odds_pct: 85,
                },
                ApprovalRule {
                    tier: ApprovalTier::Fair,
                    min_salary: 100_000.0,
                    max_balance_to_salary: 5.0,
                    odds_pct: 70,
                },
            ],
            fallback_odds_pct: 40,
        }
    }
}

impl RefinanceGrid {
    /// Classify a borrower. Zero salary is always challenging.
    pub fn assess(&self, salary: f64, balance: f64) -> (ApprovalTier, u32) {
        if salary <= 0.0 {
            return (ApprovalTier::Challenging, self.fallback_odds_pct);
        }

        let balance_to_salary = balance / salary;
        self.approval_rules
            .iter()
            .find(|rule| salary >= rule.min_salary && balance_to_salary <= rule.max_balance_to_salary)
            .map(|rule| (rule.tier, rule.odds_pct))
            .unwrap_or((ApprovalTier::Challenging, self.fallback_odds_pct))
    }

    /// Every (rate, term) pair in grid order
    pub fn combinations(&self) -> Vec<(f64, u32)> {
        self.rates
            .iter()
            .flat_map(|&rate| self.terms_years.iter().map(move |&term| (rate, term)))
            .collect()
    }

    pub fn best_rate(&self) -> f64 {
        self.rates.iter().copied().fold(f64::INFINITY, f64::min)
    }
}
