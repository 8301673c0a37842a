//! Strategy recommendation: PSLF versus refinancing
//!
//! The comparison is an ordered decision table. The first rule whose
//! predicate holds decides the outcome, so precedence is the row order:
//!
//! | # | rule               | condition                          | outcome            |
//! |---|--------------------|------------------------------------|--------------------|
//! | 1 | pslf-advantage     | pslf < 0.8 × refinance             | PSLF, high         |
//! | 2 | refinance-advantage| refinance < 0.9 × pslf             | Refinancing, high  |
//! | 3 | near-tie           | otherwise                          | PSLF, medium, note |
//!
//! Near ties default to PSLF as a product policy and carry a caveat note.
//! Borrowers without a PSLF analysis never reach the table.

use serde::{Deserialize, Serialize};

use super::refinance::RefinancingAnalysis;
use super::scenario::{Confidence, PslfScenario, RepaymentScenario, StrategyKind};
use crate::analysis::format_currency;
use crate::assumptions::DecisionThresholds;

/// The chosen scenario, its runner-up and the reasoning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommended_strategy: StrategyKind,
    pub reason: String,
    pub confidence: Confidence,
    pub primary_option: RepaymentScenario,
    pub alternative_option: Option<RepaymentScenario>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Net costs being compared
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostComparison {
    pub pslf_net_cost: f64,
    pub refinance_net_cost: f64,
}

/// One row of the decision table
pub struct DecisionRule {
    pub name: &'static str,
    pub applies: fn(&CostComparison, &DecisionThresholds) -> bool,
    pub strategy: StrategyKind,
    pub confidence: Confidence,
    /// Builds the reason from the formatted cost difference
    pub reason: fn(&str) -> String,
    pub note: Option<&'static str>,
}

pub const NEAR_TIE_NOTE: &str =
    "The cost difference is small. Consider your personal preference for certainty versus forgiveness risk.";

fn pslf_advantage(c: &CostComparison, t: &DecisionThresholds) -> bool {
    c.pslf_net_cost < t.pslf_advantage * c.refinance_net_cost
}

fn refinance_advantage(c: &CostComparison, t: &DecisionThresholds) -> bool {
    c.refinance_net_cost < t.refinance_advantage * c.pslf_net_cost
}

fn always(_: &CostComparison, _: &DecisionThresholds) -> bool {
    true
}

fn pslf_saves(difference: &str) -> String {
    format!("PSLF saves {} over refinancing", difference)
}

fn refinance_saves(difference: &str) -> String {
    format!("Refinancing saves {} and provides certainty", difference)
}

fn marginal(difference: &str) -> String {
    format!("Marginal difference of {}; PSLF provides more forgiveness upside", difference)
}

pub static DECISION_TABLE: [DecisionRule; 3] = [
    DecisionRule {
        name: "pslf-advantage",
        applies: pslf_advantage,
        strategy: StrategyKind::Pslf,
        confidence: Confidence::High,
        reason: pslf_saves,
        note: None,
    },
    DecisionRule {
        name: "refinance-advantage",
        applies: refinance_advantage,
        strategy: StrategyKind::Refinance,
        confidence: Confidence::High,
        reason: refinance_saves,
        note: None,
    },
    DecisionRule {
        name: "near-tie",
        applies: always,
        strategy: StrategyKind::Pslf,
        confidence: Confidence::Medium,
        reason: marginal,
        note: Some(NEAR_TIE_NOTE),
    },
];

/// First matching rule of the decision table
pub fn decide(costs: &CostComparison, thresholds: &DecisionThresholds) -> &'static DecisionRule {
    DECISION_TABLE
        .iter()
        .find(|rule| (rule.applies)(costs, thresholds))
        .unwrap_or(&DECISION_TABLE[DECISION_TABLE.len() - 1])
}

pub struct StrategyRecommender<'a> {
    thresholds: &'a DecisionThresholds,
}

impl<'a> StrategyRecommender<'a> {
    pub fn new(thresholds: &'a DecisionThresholds) -> Self {
        Self { thresholds }
    }

    pub fn recommend(&self, pslf: Option<&PslfScenario>, refinancing: &RefinancingAnalysis) -> Recommendation {
        let refinance = RepaymentScenario::Refinance(refinancing.recommended_scenario.clone());

        let Some(pslf) = pslf else {
            return Recommendation {
                recommended_strategy: StrategyKind::Refinance,
                reason: "Not eligible for PSLF; refinancing offers better terms".to_string(),
                confidence: Confidence::High,
                primary_option: refinance,
                alternative_option: None,
                note: None,
            };
        };

        let costs = CostComparison {
            pslf_net_cost: pslf.net_cost,
            refinance_net_cost: refinancing.recommended_scenario.total_paid,
        };
        let difference = format_currency((costs.pslf_net_cost - costs.refinance_net_cost).abs());
        let rule = decide(&costs, self.thresholds);
        let pslf = RepaymentScenario::Pslf(pslf.clone());

        let reason = (rule.reason)(&difference);
        let (primary_option, alternative_option) = match rule.strategy {
            StrategyKind::Pslf => (pslf, refinance),
            StrategyKind::Refinance => (refinance, pslf),
        };

        log::info!(
            "Recommending {} ({:?} confidence, rule {}): PSLF net ${:.0} vs refinance ${:.0}",
            rule.strategy,
            rule.confidence,
            rule.name,
            costs.pslf_net_cost,
            costs.refinance_net_cost,
        );

        Recommendation {
            recommended_strategy: rule.strategy,
            reason,
            confidence: rule.confidence,
            primary_option,
            alternative_option: Some(alternative_option),
            note: rule.note.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::ApprovalTier;
    use crate::strategy::scenario::RefinanceScenario;

    fn costs(pslf: f64, refinance: f64) -> CostComparison {
        CostComparison {
            pslf_net_cost: pslf,
            refinance_net_cost: refinance,
        }
    }

    fn pslf_scenario(net_cost: f64) -> PslfScenario {
        PslfScenario {
            payments_made: 0,
            payments_remaining: 120,
            years_remaining: 10.0,
            monthly_payment: 387.0,
            average_monthly_payment: 387.0,
            total_paid: net_cost,
            forgiven_amount: 100_000.0,
            tax_on_forgiveness: 0.0,
            net_cost,
            starting_salary: 65_000.0,
            final_salary: 65_000.0,
            completion_age: 38.0,
            payment_plan: "REPAYE".to_string(),
            confidence: Confidence::Medium,
            requirements: Vec::new(),
        }
    }

    fn refinancing(total_paid: f64) -> RefinancingAnalysis {
        let scenario = RefinanceScenario {
            rate: 4.0,
            term_years: 10,
            monthly_payment: total_paid / 120.0,
            total_paid,
            total_interest: 10_000.0,
            debt_to_income_ratio: 0.1,
            is_affordable: true,
            approval_tier: ApprovalTier::Good,
            approval_odds: 85,
            completion_age: 42,
            confidence: Confidence::High,
        };
        RefinancingAnalysis {
            available_scenarios: vec![scenario.clone()],
            recommended_scenario: scenario,
            best_rate: 4.0,
            approval_tier: ApprovalTier::Good,
            estimated_approval_odds: 85,
        }
    }

    #[test]
    fn test_decision_table_rows() {
        let t = DecisionThresholds::default();
        assert_eq!(decide(&costs(70_000.0, 100_000.0), &t).name, "pslf-advantage");
        assert_eq!(decide(&costs(100_000.0, 85_000.0), &t).name, "refinance-advantage");
        assert_eq!(decide(&costs(100_000.0, 95_000.0), &t).name, "near-tie");
        assert_eq!(decide(&costs(85_000.0, 100_000.0), &t).name, "near-tie");
        // boundaries are strict
        assert_eq!(decide(&costs(80_000.0, 100_000.0), &t).name, "near-tie");
        assert_eq!(decide(&costs(100_000.0, 90_000.0), &t).name, "near-tie");
    }

    #[test]
    fn test_rule_order_is_precedence() {
        let names: Vec<_> = DECISION_TABLE.iter().map(|r| r.name).collect();
        assert_eq!(names, ["pslf-advantage", "refinance-advantage", "near-tie"]);
        // table has a catch-all last row
        let t = DecisionThresholds::default();
        assert!((DECISION_TABLE[2].applies)(&costs(f64::NAN, f64::NAN), &t));
    }

    #[test]
    fn test_no_pslf_recommends_refinance() {
        let t = DecisionThresholds::default();
        let analysis = refinancing(300_000.0);
        let rec = StrategyRecommender::new(&t).recommend(None, &analysis);

        assert_eq!(rec.recommended_strategy, StrategyKind::Refinance);
        assert_eq!(rec.confidence, Confidence::High);
        assert!(rec.reason.contains("Not eligible for PSLF"));
        assert_eq!(
            rec.primary_option,
            RepaymentScenario::Refinance(analysis.recommended_scenario.clone())
        );
        assert!(rec.alternative_option.is_none());
    }

    #[test]
    fn test_near_tie_prefers_pslf_with_caveat() {
        let t = DecisionThresholds::default();
        let pslf = pslf_scenario(102_000.0);
        let analysis = refinancing(100_000.0);
        let rec = StrategyRecommender::new(&t).recommend(Some(&pslf), &analysis);

        assert_eq!(rec.recommended_strategy, StrategyKind::Pslf);
        assert_eq!(rec.confidence, Confidence::Medium);
        assert!(rec.note.as_deref().is_some_and(|n| !n.is_empty()));
        assert_eq!(rec.primary_option, RepaymentScenario::Pslf(pslf));
        assert_eq!(
            rec.alternative_option,
            Some(RepaymentScenario::Refinance(analysis.recommended_scenario))
        );
    }

    #[test]
    fn test_clear_winners() {
        let t = DecisionThresholds::default();
        let recommender = StrategyRecommender::new(&t);

        let rec = recommender.recommend(Some(&pslf_scenario(50_000.0)), &refinancing(300_000.0));
        assert_eq!(rec.recommended_strategy, StrategyKind::Pslf);
        assert_eq!(rec.confidence, Confidence::High);
        assert_eq!(rec.reason, "PSLF saves $250,000 over refinancing");
        assert!(rec.note.is_none());

        let rec = recommender.recommend(Some(&pslf_scenario(400_000.0)), &refinancing(300_000.0));
        assert_eq!(rec.recommended_strategy, StrategyKind::Refinance);
        assert_eq!(rec.confidence, Confidence::High);
        assert_eq!(rec.primary_option.kind(), StrategyKind::Refinance);
        assert_eq!(rec.alternative_option.map(|a| a.kind()), Some(StrategyKind::Pslf));
    }
}
