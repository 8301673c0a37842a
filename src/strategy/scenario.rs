//! Repayment scenarios: the PSLF path and private refinance offers

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::assumptions::ApprovalTier;

/// Strategy tag carried by every scenario and recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    #[serde(rename = "PSLF")]
    Pslf,
    #[serde(rename = "Refinancing")]
    Refinance,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Pslf => write!(f, "PSLF"),
            StrategyKind::Refinance => write!(f, "Refinancing"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Income-driven repayment followed by forgiveness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PslfScenario {
    pub payments_made: u32,
    pub payments_remaining: u32,
    pub years_remaining: f64,
    /// IDR payment at the starting salary
    pub monthly_payment: f64,
    pub average_monthly_payment: f64,
    pub total_paid: f64,
    pub forgiven_amount: f64,
    pub tax_on_forgiveness: f64,
    pub net_cost: f64,
    pub starting_salary: f64,
    pub final_salary: f64,
    pub completion_age: f64,
    pub payment_plan: String,
    pub confidence: Confidence,
    pub requirements: Vec<String>,
}

/// One private refinance offer from the rate/term grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinanceScenario {
    /// Annual rate in percent
    pub rate: f64,
    pub term_years: u32,
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub debt_to_income_ratio: f64,
    pub is_affordable: bool,
    pub approval_tier: ApprovalTier,
    pub approval_odds: u32,
    pub completion_age: u32,
    pub confidence: Confidence,
}

/// A computed repayment path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy")]
pub enum RepaymentScenario {
    #[serde(rename = "PSLF")]
    Pslf(PslfScenario),
    #[serde(rename = "Refinancing")]
    Refinance(RefinanceScenario),
}

impl RepaymentScenario {
    pub fn kind(&self) -> StrategyKind {
        match self {
            RepaymentScenario::Pslf(_) => StrategyKind::Pslf,
            RepaymentScenario::Refinance(_) => StrategyKind::Refinance,
        }
    }

    pub fn monthly_payment(&self) -> f64 {
        match self {
            RepaymentScenario::Pslf(s) => s.monthly_payment,
            RepaymentScenario::Refinance(s) => s.monthly_payment,
        }
    }

    pub fn total_paid(&self) -> f64 {
        match self {
            RepaymentScenario::Pslf(s) => s.total_paid,
            RepaymentScenario::Refinance(s) => s.total_paid,
        }
    }

    /// Everything the borrower pays, including tax on forgiveness
    pub fn net_cost(&self) -> f64 {
        match self {
            RepaymentScenario::Pslf(s) => s.net_cost,
            RepaymentScenario::Refinance(s) => s.total_paid,
        }
    }

    pub fn duration_years(&self) -> f64 {
        match self {
            RepaymentScenario::Pslf(s) => s.years_remaining,
            RepaymentScenario::Refinance(s) => s.term_years as f64,
        }
    }

    pub fn confidence(&self) -> Confidence {
        match self {
            RepaymentScenario::Pslf(s) => s.confidence,
            RepaymentScenario::Refinance(s) => s.confidence,
        }
    }
}
