//! Savings of the recommendation against its alternative and a standard plan

use serde::{Deserialize, Serialize};

use crate::assumptions::StandardBaseline;
use crate::projection::amortization;
use crate::strategy::Recommendation;

/// Whole-currency savings, never negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsResult {
    pub potential_savings: f64,
    pub vs_standard_plan: f64,
    pub vs_alternative: f64,
    pub standard_baseline_cost: f64,
    /// False when there was no alternative strategy to compare against
    pub comparison_based: bool,
}

pub struct SavingsCalculator<'a> {
    baseline: &'a StandardBaseline,
}

impl<'a> SavingsCalculator<'a> {
    pub fn new(baseline: &'a StandardBaseline) -> Self {
        Self { baseline }
    }

    /// Standard-plan proxy: the chosen net cost amortized over the baseline
    /// term at the average federal rate
    pub fn standard_baseline_cost(&self, chosen_cost: f64) -> f64 {
        amortization::total_paid(chosen_cost, self.baseline.annual_rate_pct, self.baseline.months)
    }

    pub fn calculate(&self, recommendation: &Recommendation) -> SavingsResult {
        let chosen_cost = recommendation.primary_option.net_cost();
        let alternative_cost = recommendation.alternative_option.as_ref().map(|a| a.net_cost());
        let standard_cost = self.standard_baseline_cost(chosen_cost);

        let vs_standard = standard_cost - chosen_cost;
        let vs_alternative = alternative_cost.map(|cost| cost - chosen_cost);
        let potential = vs_alternative.map_or(vs_standard, |alt| alt.max(vs_standard));

        SavingsResult {
            potential_savings: clamp_round(potential),
            vs_standard_plan: clamp_round(vs_standard),
            vs_alternative: clamp_round(vs_alternative.unwrap_or(0.0)),
            standard_baseline_cost: clamp_round(standard_cost),
            comparison_based: alternative_cost.is_some(),
        }
    }
}

fn clamp_round(amount: f64) -> f64 {
    amount.round().max(0.0)
}
