//! Private refinance grid search

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::scenario::{Confidence, RefinanceScenario};
use crate::assumptions::{ApprovalTier, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::loans::CareerStage;
use crate::projection::amortization;

/// Every grid scenario plus the selected offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinancingAnalysis {
    /// Sorted ascending by total paid
    pub available_scenarios: Vec<RefinanceScenario>,
    pub recommended_scenario: RefinanceScenario,
    pub best_rate: f64,
    pub approval_tier: ApprovalTier,
    pub estimated_approval_odds: u32,
}

/// Enumerates the fixed rate/term grid against the combined balance
pub struct RefinanceScenarioGenerator<'a> {
    config: &'a EngineConfig,
}

impl<'a> RefinanceScenarioGenerator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Price one (rate, term) offer
    pub fn scenario(&self, balance: f64, salary: f64, rate: f64, term_years: u32, stage: CareerStage) -> RefinanceScenario {
        let grid = &self.config.refinance;
        let months = term_years * 12;

        let monthly_payment = amortization::monthly_payment(balance, rate, months);
        let total_paid = monthly_payment * months as f64;

        // Zero income has no meaningful ratio; report 0 and never call it affordable
        let (debt_to_income_ratio, is_affordable) = if salary > 0.0 {
            let ratio = monthly_payment / (salary / 12.0);
            (ratio, ratio <= grid.max_debt_to_income)
        } else {
            (0.0, false)
        };

        let (approval_tier, approval_odds) = grid.assess(salary, balance);
        let confidence = match approval_tier {
            ApprovalTier::Excellent | ApprovalTier::Good => Confidence::High,
            ApprovalTier::Fair => Confidence::Medium,
            ApprovalTier::Challenging => Confidence::Low,
        };

        RefinanceScenario {
            rate,
            term_years,
            monthly_payment,
            total_paid,
            total_interest: total_paid - balance,
            debt_to_income_ratio,
            is_affordable,
            approval_tier,
            approval_odds,
            completion_age: stage.estimated_age() + term_years,
            confidence,
        }
    }

    /// Price the whole grid and pick the cheapest affordable offer, falling
    /// back to the cheapest offer overall
    pub fn generate(&self, balance: f64, salary: f64, stage: CareerStage) -> EngineResult<RefinancingAnalysis> {
        let grid = &self.config.refinance;

        let mut scenarios: Vec<RefinanceScenario> = grid
            .combinations()
            .into_par_iter()
            .map(|(rate, term)| self.scenario(balance, salary, rate, term, stage))
            .collect();

        // Stable sort keeps grid order among equal totals
        scenarios.sort_by(|a, b| a.total_paid.total_cmp(&b.total_paid));

        let recommended_scenario = match scenarios.iter().find(|s| s.is_affordable) {
            Some(affordable) => affordable.clone(),
            None => {
                let cheapest = scenarios
                    .first()
                    .cloned()
                    .ok_or_else(|| EngineError::configuration("refinance grid is empty"))?;
                log::warn!(
                    "No refinance scenario within {:.0}% debt-to-income; using cheapest ({:.1}% / {} years)",
                    grid.max_debt_to_income * 100.0,
                    cheapest.rate,
                    cheapest.term_years,
                );
                cheapest
            }
        };

        let (approval_tier, estimated_approval_odds) = grid.assess(salary, balance);

        log::debug!(
            "Refinance: {} scenarios, recommended {:.1}% / {} years at ${:.2}/month",
            scenarios.len(),
            recommended_scenario.rate,
            recommended_scenario.term_years,
            recommended_scenario.monthly_payment,
        );

        Ok(RefinancingAnalysis {
            available_scenarios: scenarios,
            recommended_scenario,
            best_rate: grid.best_rate(),
            approval_tier,
            estimated_approval_odds,
        })
    }
}
