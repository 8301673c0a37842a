//! Optimization engine
//!
//! Runs one request through the full pipeline:
//! ingest → summary → (PSLF ∥ refinance grid) → recommendation → savings,
//! projections, tax and plan. Stateless between calls; the evaluation date is
//! always supplied by the caller.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::{
    ImplementationPlanner, ImplementationStep, SavingsCalculator, SavingsResult, TaxEstimator, TaxImplications,
};
use crate::assumptions::EngineConfig;
use crate::error::EngineResult;
use crate::loans::{LoanPortfolioSummary, OptimizationRequest};
use crate::projection::{DetailedProjections, ProjectionGenerator};
use crate::strategy::{
    PslfProjector, PslfScenario, Recommendation, RefinanceScenarioGenerator, RefinancingAnalysis, StrategyRecommender,
};

/// Everything computed for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub loan_summary: LoanPortfolioSummary,
    pub pslf_analysis: Option<PslfScenario>,
    pub refinancing_analysis: RefinancingAnalysis,
    pub recommendation: Recommendation,
    pub savings: SavingsResult,
    pub detailed_projections: DetailedProjections,
    pub tax_implications: TaxImplications,
    pub implementation_steps: Vec<ImplementationStep>,
}

/// Pre-validated engine; cheap to share across threads
#[derive(Debug, Clone)]
pub struct OptimizationEngine {
    config: EngineConfig,
}

impl OptimizationEngine {
    /// Validate the configuration once, before any request is served
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Engine with the built-in assumptions
    pub fn with_default_assumptions() -> EngineResult<Self> {
        Self::new(EngineConfig::default_assumptions())
    }

    /// Engine with assumptions loaded from a CSV directory
    pub fn from_csv_path(path: &Path) -> EngineResult<Self> {
        Ok(Self {
            config: EngineConfig::from_csv_path(path)?,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Optimize a single request as of the given date
    pub fn optimize(&self, request: &OptimizationRequest, as_of: NaiveDate) -> EngineResult<OptimizationResult> {
        let profile = &request.user_profile;
        let loan_data = &request.loan_data;

        profile.validate()?;
        let accounts = loan_data.ingest()?;
        let loan_summary = LoanPortfolioSummary::from_accounts(&accounts, &loan_data.extracted_data);

        let starting_salary = self
            .config
            .starting_salary(profile, loan_data.employment.annual_salary);
        let growth = self.config.growth_for(profile.career_stage);

        log::debug!(
            "Portfolio ${:.2} ({} federal, {} private), starting salary ${:.0}",
            loan_summary.total_balance,
            loan_summary.federal_loan_count,
            loan_summary.private_loan_count,
            starting_salary,
        );

        let pslf_projector = PslfProjector::new(&self.config);
        let refinance_generator = RefinanceScenarioGenerator::new(&self.config);

        // Independent branches; results do not depend on scheduling
        let (pslf_analysis, refinancing_analysis) = rayon::join(
            || pslf_projector.analyze(&loan_summary, &loan_data.employment, profile, starting_salary),
            || refinance_generator.generate(loan_summary.total_balance, starting_salary, profile.career_stage),
        );
        let refinancing_analysis = refinancing_analysis?;

        let recommendation =
            StrategyRecommender::new(&self.config.decision).recommend(pslf_analysis.as_ref(), &refinancing_analysis);

        let savings = SavingsCalculator::new(&self.config.standard_baseline).calculate(&recommendation);
        let detailed_projections = ProjectionGenerator::new(&self.config.idr).generate(
            &recommendation.primary_option,
            starting_salary,
            &growth,
            as_of,
        );
        let tax_implications = TaxEstimator::new(&self.config.tax).implications(&recommendation, as_of);
        let implementation_steps = ImplementationPlanner::plan(recommendation.recommended_strategy);

        log::info!(
            "Recommended {}: {} (potential savings ${:.0})",
            recommendation.recommended_strategy,
            recommendation.reason,
            savings.potential_savings,
        );

        Ok(OptimizationResult {
            loan_summary,
            pslf_analysis,
            refinancing_analysis,
            recommendation,
            savings,
            detailed_projections,
            tax_implications,
            implementation_steps,
        })
    }

    /// Optimize many requests in parallel; results keep input order
    pub fn run_batch(
        &self,
        requests: &[OptimizationRequest],
        as_of: NaiveDate,
    ) -> Vec<EngineResult<OptimizationResult>> {
        requests
            .par_iter()
            .map(|request| self.optimize(request, as_of))
            .collect()
    }
}
