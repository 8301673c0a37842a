//! Public Service Loan Forgiveness eligibility and projection

use serde::{Deserialize, Serialize};

use super::scenario::{Confidence, PslfScenario};
use crate::analysis::TaxEstimator;
use crate::assumptions::EngineConfig;
use crate::loans::{BorrowerProfile, Employment, LoanPortfolioSummary};
use crate::projection::idr;

/// The three conditions that must all hold for PSLF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PslfEligibility {
    pub qualifying_employer: bool,
    pub direct_loans: bool,
    pub goals_align: bool,
}

impl PslfEligibility {
    pub fn evaluate(
        employment: &Employment,
        summary: &LoanPortfolioSummary,
        profile: &BorrowerProfile,
    ) -> Self {
        Self {
            qualifying_employer: employment.has_qualifying_employer(),
            direct_loans: summary.has_direct_loans(),
            goals_align: profile.career_goals.aligns_with_public_service(),
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.qualifying_employer && self.direct_loans && self.goals_align
    }
}

const PSLF_REQUIREMENTS: [&str; 5] = [
    "Work full-time for qualifying employer (government, 501c3 nonprofit, etc.)",
    "Make 120 qualifying payments under income-driven repayment plan",
    "Only Direct Loans are eligible (consolidate FFEL loans if needed)",
    "Submit Employment Certification Form annually",
    "Submit PSLF application after 120th payment",
];

/// Simulates the IDR path to forgiveness on the federal balance
pub struct PslfProjector<'a> {
    config: &'a EngineConfig,
}

impl<'a> PslfProjector<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Project the scenario when eligible, `None` otherwise
    pub fn analyze(
        &self,
        summary: &LoanPortfolioSummary,
        employment: &Employment,
        profile: &BorrowerProfile,
        starting_salary: f64,
    ) -> Option<PslfScenario> {
        let eligibility = PslfEligibility::evaluate(employment, summary, profile);
        if !eligibility.is_eligible() {
            log::debug!("PSLF not applicable: {:?}", eligibility);
            return None;
        }
        Some(self.project(summary, profile, starting_salary))
    }

    /// Run the projection without checking eligibility
    pub fn project(
        &self,
        summary: &LoanPortfolioSummary,
        profile: &BorrowerProfile,
        starting_salary: f64,
    ) -> PslfScenario {
        let params = &self.config.idr;
        let payments_made = summary.pslf_payments_made;
        let payments_remaining = params.required_payments.saturating_sub(payments_made);
        let years_remaining = payments_remaining as f64 / 12.0;

        let growth = self.config.growth_for(profile.career_stage);
        let simulation = idr::simulate(
            summary.total_federal_balance,
            summary.weighted_federal_rate,
            starting_salary,
            &growth,
            payments_remaining,
            params,
        );

        let forgiven_amount = simulation.ending_balance;
        let tax_on_forgiveness =
            TaxEstimator::new(&self.config.tax).forgiveness_tax(forgiven_amount, simulation.final_salary);

        let confidence = if forgiven_amount <= 0.0 {
            Confidence::Low
        } else if payments_made >= params.required_payments.div_ceil(2) {
            Confidence::High
        } else {
            Confidence::Medium
        };

        let scenario = PslfScenario {
            payments_made,
            payments_remaining,
            years_remaining,
            monthly_payment: idr::idr_monthly_payment(starting_salary, params),
            average_monthly_payment: simulation.average_monthly_payment,
            total_paid: simulation.total_paid,
            forgiven_amount,
            tax_on_forgiveness,
            net_cost: simulation.total_paid + tax_on_forgiveness,
            starting_salary,
            final_salary: simulation.final_salary,
            completion_age: profile.career_stage.estimated_age() as f64 + years_remaining,
            payment_plan: params.plan_name.clone(),
            confidence,
            requirements: PSLF_REQUIREMENTS.iter().map(|r| r.to_string()).collect(),
        };

        log::debug!(
            "PSLF: {} payments remaining, total paid ${:.2}, forgiven ${:.2}, net cost ${:.2}",
            scenario.payments_remaining,
            scenario.total_paid,
            scenario.forgiven_amount,
            scenario.net_cost,
        );

        scenario
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::SalaryGrowth;
    use crate::loans::{
        CareerGoals, CareerStage, EmployerType, ExtractedData, LoanAccount, LoanKind, LoanRecord,
    };
    use approx::assert_abs_diff_eq;

    fn summary(balance: f64, rate: f64, loan_type: &str, payments_made: u32) -> LoanPortfolioSummary {
        let record = LoanRecord {
            balance,
            interest_rate: rate,
            loan_type: Some(loan_type.to_string()),
            disbursement_date: None,
            servicer: None,
        };
        let account = LoanAccount::ingest(&record, LoanKind::Federal, "test").unwrap();
        let extracted = ExtractedData {
            pslf_payment_count: Some(payments_made),
            ..Default::default()
        };
        LoanPortfolioSummary::from_accounts(&[account], &extracted)
    }

    fn profile(goals: CareerGoals) -> BorrowerProfile {
        BorrowerProfile {
            specialty: "internal-medicine".to_string(),
            career_stage: CareerStage::ResidentFellow,
            career_goals: goals,
            state: None,
        }
    }

    fn employment(employer_type: EmployerType) -> Employment {
        Employment {
            employer_type: Some(employer_type),
            pslf_eligible: false,
            annual_salary: Some(65_000.0),
        }
    }

    fn flat_config() -> EngineConfig {
        let mut config = EngineConfig::default_assumptions();
        for stage in CareerStage::ALL {
            config.salary_growth.insert(stage, SalaryGrowth::flat(0.0));
        }
        config
    }

    #[test]
    fn test_eligibility_matrix() {
        let direct = summary(285_000.0, 6.8, "Direct Unsubsidized", 0);
        let ffel = summary(285_000.0, 6.8, "FFEL Stafford", 0);

        let eligible = PslfEligibility::evaluate(
            &employment(EmployerType::Academic),
            &direct,
            &profile(CareerGoals::AcademicMedicine),
        );
        assert!(eligible.is_eligible());

        for goals in [CareerGoals::PublicService, CareerGoals::AcademicMedicine, CareerGoals::Government] {
            let private = PslfEligibility::evaluate(&employment(EmployerType::Private), &direct, &profile(goals));
            assert!(!private.is_eligible());
        }

        let no_direct = PslfEligibility::evaluate(
            &employment(EmployerType::Government),
            &ffel,
            &profile(CareerGoals::Government),
        );
        assert!(!no_direct.is_eligible());

        let goals_mismatch = PslfEligibility::evaluate(
            &employment(EmployerType::NonProfit501c3),
            &direct,
            &profile(CareerGoals::PrivatePractice),
        );
        assert!(!goals_mismatch.is_eligible());
    }

    #[test]
    fn test_ineligible_returns_none() {
        let config = EngineConfig::default_assumptions();
        let projector = PslfProjector::new(&config);
        let result = projector.analyze(
            &summary(285_000.0, 6.8, "Direct Unsubsidized", 0),
            &employment(EmployerType::Private),
            &profile(CareerGoals::PublicService),
            65_000.0,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_flat_salary_projection() {
        let config = flat_config();
        let projector = PslfProjector::new(&config);
        let scenario = projector.project(&summary(285_000.0, 0.0, "Direct", 0), &profile(CareerGoals::PublicService), 65_000.0);

        let monthly = (65_000.0 - 1.5 * 13_590.0) * 0.10 / 12.0;
        assert_eq!(scenario.payments_remaining, 120);
        assert_abs_diff_eq!(scenario.years_remaining, 10.0);
        assert_abs_diff_eq!(scenario.monthly_payment, monthly, epsilon = 1e-9);
        assert_abs_diff_eq!(scenario.total_paid, monthly * 120.0, epsilon = 1e-6);
        assert_abs_diff_eq!(scenario.forgiven_amount, 285_000.0 - monthly * 120.0, epsilon = 1e-6);
        assert_abs_diff_eq!(
            scenario.tax_on_forgiveness,
            scenario.forgiven_amount * 0.27,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            scenario.net_cost,
            scenario.total_paid + scenario.tax_on_forgiveness,
            epsilon = 1e-9
        );
        assert_eq!(scenario.requirements.len(), 5);
        assert_abs_diff_eq!(scenario.completion_age, 38.0);
    }

    #[test]
    fn test_completed_payments_boundary() {
        let config = EngineConfig::default_assumptions();
        let projector = PslfProjector::new(&config);

        for made in [120, 150] {
            let scenario = projector.project(
                &summary(100_000.0, 6.8, "Direct", made),
                &profile(CareerGoals::PublicService),
                65_000.0,
            );
            assert_eq!(scenario.payments_remaining, 0);
            assert_eq!(scenario.years_remaining, 0.0);
            assert_eq!(scenario.total_paid, 0.0);
            assert_eq!(scenario.average_monthly_payment, 0.0);
            assert_eq!(scenario.forgiven_amount, 100_000.0);
            assert!(scenario.net_cost.is_finite());
        }
    }

    #[test]
    fn test_huge_payment_count_saturates() {
        let config = EngineConfig::default_assumptions();
        let projector = PslfProjector::new(&config);

        for made in [u32::MAX / 2 + 1, u32::MAX] {
            let scenario = projector.project(
                &summary(100_000.0, 6.8, "Direct", made),
                &profile(CareerGoals::PublicService),
                65_000.0,
            );
            assert_eq!(scenario.payments_made, made);
            assert_eq!(scenario.payments_remaining, 0);
            assert_eq!(scenario.confidence, Confidence::High);
        }
    }

    #[test]
    fn test_halfway_confidence_threshold() {
        let config = flat_config();
        let projector = PslfProjector::new(&config);
        let project = |made| {
            projector
                .project(&summary(285_000.0, 6.8, "Direct", made), &profile(CareerGoals::PublicService), 65_000.0)
                .confidence
        };
        assert_eq!(project(59), Confidence::Medium);
        assert_eq!(project(60), Confidence::High);
    }

    #[test]
    fn test_prior_payments_not_counted_in_cost() {
        let config = flat_config();
        let projector = PslfProjector::new(&config);
        let fresh = projector.project(&summary(285_000.0, 0.0, "Direct", 0), &profile(CareerGoals::PublicService), 65_000.0);
        let midway = projector.project(&summary(285_000.0, 0.0, "Direct", 60), &profile(CareerGoals::PublicService), 65_000.0);

        // only the remaining 60 payments are future cost
        assert_abs_diff_eq!(midway.total_paid, fresh.monthly_payment * 60.0, epsilon = 1e-6);
        assert_abs_diff_eq!(midway.total_paid * 2.0, fresh.total_paid, epsilon = 1e-6);
    }

    #[test]
    fn test_fully_repaid_before_forgiveness() {
        let config = flat_config();
        let projector = PslfProjector::new(&config);
        let scenario = projector.project(
            &summary(10_000.0, 5.0, "Direct", 0),
            &profile(CareerGoals::PublicService),
            300_000.0,
        );
        assert_eq!(scenario.forgiven_amount, 0.0);
        assert_eq!(scenario.tax_on_forgiveness, 0.0);
        assert_eq!(scenario.confidence, Confidence::Low);
    }

    #[test]
    fn test_growth_uses_final_year_salary_for_tax() {
        let config = EngineConfig::default_assumptions();
        let projector = PslfProjector::new(&config);
        let scenario = projector.project(
            &summary(285_000.0, 6.8, "Direct", 0),
            &profile(CareerGoals::PublicService),
            65_000.0,
        );
        // resident schedule jumps to attending pay well above the top bracket threshold
        assert!(scenario.final_salary > 200_000.0);
        let rate = scenario.tax_on_forgiveness / scenario.forgiven_amount;
        assert!(rate >= 0.32 + 0.05 - 1e-12);
    }
}
