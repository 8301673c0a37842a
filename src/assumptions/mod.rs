//! Engine assumptions: income-driven repayment parameters, salary tables,
//! refinance grid, tax tables and decision thresholds

mod salary;
mod refinance;
mod tax;
pub mod loader;

pub use salary::{SalaryTable, SalaryGrowth, default_growth_schedules};
pub use refinance::{RefinanceGrid, ApprovalTier, ApprovalRule};
pub use tax::{TaxTable, TaxBracket, InterestDeduction};
pub use loader::LoadedAssumptions;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::loans::{BorrowerProfile, CareerStage};

/// Income-driven repayment and PSLF program parameters
#[derive(Debug, Clone, PartialEq)]
pub struct IdrParameters {
    /// Annual federal poverty guideline for a household of one
    pub poverty_guideline: f64,
    /// Discretionary income starts above this multiple of the guideline
    pub poverty_multiplier: f64,
    /// Share of discretionary income paid per year
    pub discretionary_share: f64,
    /// Qualifying payments required before forgiveness
    pub required_payments: u32,
    pub plan_name: String,
}

impl Default for IdrParameters {
    fn default() -> Self {
        Self {
            poverty_guideline: 13_590.0,
            poverty_multiplier: 1.5,
            discretionary_share: 0.10,
            required_payments: 120,
            plan_name: "REPAYE".to_string(),
        }
    }
}

/// Cost ratios used by the recommendation decision table
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionThresholds {
    /// PSLF wins outright when its net cost is below this share of refinancing
    pub pslf_advantage: f64,
    /// Refinancing wins outright when its cost is below this share of PSLF
    pub refinance_advantage: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            pslf_advantage: 0.8,
            refinance_advantage: 0.9,
        }
    }
}

/// Standard-plan proxy used as the savings baseline
#[derive(Debug, Clone, PartialEq)]
pub struct StandardBaseline {
    /// Average federal rate in percent
    pub annual_rate_pct: f64,
    pub months: u32,
}

impl Default for StandardBaseline {
    fn default() -> Self {
        Self {
            annual_rate_pct: 5.5,
            months: 120,
        }
    }
}

/// Immutable configuration shared by every component of a run
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub idr: IdrParameters,
    pub salary_table: SalaryTable,
    pub salary_growth: BTreeMap<CareerStage, SalaryGrowth>,
    pub refinance: RefinanceGrid,
    pub tax: TaxTable,
    pub decision: DecisionThresholds,
    pub standard_baseline: StandardBaseline,
}

impl EngineConfig {
    /// Built-in assumptions
    pub fn default_assumptions() -> Self {
        Self {
            idr: IdrParameters::default(),
            salary_table: SalaryTable::default_compensation(),
            salary_growth: default_growth_schedules(),
            refinance: RefinanceGrid::default(),
            tax: TaxTable::default(),
            decision: DecisionThresholds::default(),
            standard_baseline: StandardBaseline::default(),
        }
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> EngineResult<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from CSV files in a specific directory, overlaying the
    /// built-in defaults, and validate the result
    pub fn from_csv_path(path: &Path) -> EngineResult<Self> {
        let loaded = LoadedAssumptions::load_from(path)?;
        let mut config = Self::default_assumptions();

        config.apply_parameters(&loaded.parameters)?;
        config.salary_table = loaded.salary_table;
        config.salary_growth = loaded.salary_growth;
        config.tax = TaxTable::new(loaded.tax_brackets, config.tax.state_rate);

        config.validate()?;
        log::info!("Loaded engine assumptions from {}", path.display());
        Ok(config)
    }

    fn apply_parameters(&mut self, parameters: &HashMap<String, f64>) -> EngineResult<()> {
        for (name, &value) in parameters {
            match name.as_str() {
                "poverty_guideline" => self.idr.poverty_guideline = value,
                "poverty_multiplier" => self.idr.poverty_multiplier = value,
                "idr_share" => self.idr.discretionary_share = value,
                "pslf_required_payments" => self.idr.required_payments = as_count(name, value)?,
                "state_tax_rate" => self.tax.state_rate = value,
                "max_debt_to_income" => self.refinance.max_debt_to_income = value,
                "pslf_advantage_threshold" => self.decision.pslf_advantage = value,
                "refinance_advantage_threshold" => self.decision.refinance_advantage = value,
                "standard_baseline_rate" => self.standard_baseline.annual_rate_pct = value,
                "standard_baseline_months" => self.standard_baseline.months = as_count(name, value)?,
                other => {
                    return Err(EngineError::configuration(format!(
                        "parameters.csv: unknown parameter '{}'",
                        other
                    )));
                }
            }
        }
        Ok(())
    }

    /// Fail fast on incomplete or nonsensical tables
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.idr.poverty_guideline > 0.0) {
            return Err(EngineError::configuration("poverty guideline must be positive"));
        }
        if !(self.idr.discretionary_share > 0.0 && self.idr.discretionary_share <= 1.0) {
            return Err(EngineError::configuration("IDR share must be in (0, 1]"));
        }
        if self.idr.required_payments == 0 {
            return Err(EngineError::configuration("PSLF payment requirement must be positive"));
        }

        self.salary_table.validate()?;
        for stage in CareerStage::ALL {
            let growth = match self.salary_growth.get(&stage) {
                Some(growth) if !growth.is_empty() => growth,
                _ => {
                    return Err(EngineError::configuration(format!(
                        "missing salary growth schedule for {}",
                        stage.as_str()
                    )));
                }
            };
            if growth.rates().iter().any(|r| !(r.is_finite() && *r > -1.0)) {
                return Err(EngineError::configuration(format!(
                    "salary growth rates for {} must be finite and above -100%",
                    stage.as_str()
                )));
            }
        }

        if self.refinance.rates.is_empty() {
            return Err(EngineError::configuration("refinance rate set is empty"));
        }
        if self.refinance.rates.iter().any(|r| !(r.is_finite() && *r >= 0.0)) {
            return Err(EngineError::configuration("refinance rates must be finite and non-negative"));
        }
        if self.refinance.terms_years.is_empty() || self.refinance.terms_years.contains(&0) {
            return Err(EngineError::configuration(
                "refinance term set must be non-empty with positive terms",
            ));
        }
        if self.tax.brackets().is_empty() {
            return Err(EngineError::configuration("tax bracket table is empty"));
        }

        let thresholds = [self.decision.pslf_advantage, self.decision.refinance_advantage];
        if thresholds.iter().any(|t| !(*t > 0.0 && *t <= 1.0)) {
            return Err(EngineError::configuration("decision thresholds must be in (0, 1]"));
        }
        if self.standard_baseline.months == 0 {
            return Err(EngineError::configuration("standard baseline term must be positive"));
        }

        Ok(())
    }

    /// Starting salary: the reported salary when positive, else the table
    pub fn starting_salary(&self, profile: &BorrowerProfile, reported: Option<f64>) -> f64 {
        match reported {
            Some(salary) if salary > 0.0 => salary,
            _ => self
                .salary_table
                .get(profile.career_stage, profile.specialty_category())
                .unwrap_or(0.0),
        }
    }

    /// Growth schedule for a stage; no growth if the stage is missing
    pub fn growth_for(&self, stage: CareerStage) -> SalaryGrowth {
        self.salary_growth
            .get(&stage)
            .cloned()
            .unwrap_or_else(|| SalaryGrowth::flat(0.0))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::default_assumptions()
    }
}

fn as_count(name: &str, value: f64) -> EngineResult<u32> {
    if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
        return Err(EngineError::configuration(format!(
            "parameters.csv: '{}' must be a whole number, got {}",
            name, value
        )));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loans::{CareerGoals, SpecialtyCategory};

    fn profile(stage: CareerStage, specialty: &str) -> BorrowerProfile {
        BorrowerProfile {
            specialty: specialty.to_string(),
            career_stage: stage,
            career_goals: CareerGoals::NotSure,
            state: None,
        }
    }

    #[test]
    fn test_default_assumptions_validate() {
        assert!(EngineConfig::default_assumptions().validate().is_ok());
    }

    #[test]
    fn test_csv_matches_defaults() {
        let from_csv = EngineConfig::from_csv().unwrap();
        assert_eq!(from_csv, EngineConfig::default_assumptions());
    }

    #[test]
    fn test_empty_rate_set_is_fatal() {
        let mut config = EngineConfig::default_assumptions();
        config.refinance.rates.clear();
        assert!(matches!(config.validate(), Err(EngineError::Configuration { .. })));
    }

    #[test]
    fn test_out_of_range_growth_is_fatal() {
        for rate in [-2.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut config = EngineConfig::default_assumptions();
            config
                .salary_growth
                .insert(CareerStage::ExperiencedPhysician, SalaryGrowth::new(vec![0.03, rate]));
            assert!(
                matches!(config.validate(), Err(EngineError::Configuration { .. })),
                "growth rate {rate} accepted"
            );
        }
    }

    #[test]
    fn test_out_of_range_refinance_rate_is_fatal() {
        for rate in [-1.0, f64::NAN, f64::INFINITY] {
            let mut config = EngineConfig::default_assumptions();
            config.refinance.rates.push(rate);
            assert!(
                matches!(config.validate(), Err(EngineError::Configuration { .. })),
                "refinance rate {rate} accepted"
            );
        }

        let mut config = EngineConfig::default_assumptions();
        config.refinance.rates.push(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_growth_schedule_is_fatal() {
        let mut config = EngineConfig::default_assumptions();
        config.salary_growth.remove(&CareerStage::NewAttending);
        assert!(matches!(config.validate(), Err(EngineError::Configuration { .. })));
    }

    #[test]
    fn test_bad_thresholds_are_fatal() {
        let mut config = EngineConfig::default_assumptions();
        config.decision.pslf_advantage = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let mut config = EngineConfig::default_assumptions();
        let parameters = HashMap::from([("interest_subsidy".to_string(), 0.5)]);
        assert!(config.apply_parameters(&parameters).is_err());
    }

    #[test]
    fn test_starting_salary_resolution() {
        let config = EngineConfig::default_assumptions();
        let surgeon = profile(CareerStage::NewAttending, "surgery");
        assert_eq!(config.starting_salary(&surgeon, None), 450_000.0);
        assert_eq!(config.starting_salary(&surgeon, Some(0.0)), 450_000.0);
        assert_eq!(config.starting_salary(&surgeon, Some(300_000.0)), 300_000.0);

        let fellow = profile(CareerStage::ResidentFellow, "anything");
        assert_eq!(config.starting_salary(&fellow, None), 60_000.0);
        assert_eq!(
            config.salary_table.get(CareerStage::ResidentFellow, SpecialtyCategory::PrimaryCare),
            Some(60_000.0)
        );
    }
}
