//! Tax exposure on forgiveness and the interest deduction fact

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::format_currency;
use crate::assumptions::TaxTable;
use crate::strategy::{Recommendation, RepaymentScenario};

/// Tax due in the year a balance is forgiven
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxImplication {
    pub year: i32,
    pub taxable_forgiveness: f64,
    pub estimated_tax: f64,
    pub marginal_rate: f64,
    pub state_rate: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxPlanningTip {
    pub strategy: String,
    pub description: String,
    pub suggested_action: String,
}

/// Informational only; not used in the optimization math
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionFact {
    pub benefit: String,
    pub max_benefit: f64,
    pub description: String,
    pub income_limit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxImplications {
    pub future_years: Vec<TaxImplication>,
    pub strategies: Vec<TaxPlanningTip>,
    pub interest_deduction: DeductionFact,
}

pub struct TaxEstimator<'a> {
    table: &'a TaxTable,
}

impl<'a> TaxEstimator<'a> {
    pub fn new(table: &'a TaxTable) -> Self {
        Self { table }
    }

    /// Federal marginal rate plus the flat state estimate
    pub fn combined_rate(&self, salary: f64) -> f64 {
        self.table.marginal_rate(salary) + self.table.state_rate
    }

    pub fn forgiveness_tax(&self, forgiven_amount: f64, salary: f64) -> f64 {
        forgiven_amount.max(0.0) * self.combined_rate(salary)
    }

    pub fn interest_deduction(&self) -> DeductionFact {
        let deduction = &self.table.interest_deduction;
        DeductionFact {
            benefit: "Student Loan Interest Deduction".to_string(),
            max_benefit: deduction.max_deduction,
            description: format!(
                "Deduct up to {} in student loan interest paid",
                format_currency(deduction.max_deduction)
            ),
            income_limit: format!(
                "Phases out between {}-{} (single) or {}-{} (married)",
                format_currency(deduction.single_phase_out.0),
                format_currency(deduction.single_phase_out.1),
                format_currency(deduction.married_phase_out.0),
                format_currency(deduction.married_phase_out.1),
            ),
        }
    }

    /// Tax exposure of the recommended strategy, dated from `as_of`
    pub fn implications(&self, recommendation: &Recommendation, as_of: NaiveDate) -> TaxImplications {
        let mut future_years = Vec::new();
        let mut strategies = Vec::new();

        if let RepaymentScenario::Pslf(pslf) = &recommendation.primary_option {
            let years = pslf.years_remaining.ceil() as i32;
            future_years.push(TaxImplication {
                year: as_of.year() + years,
                taxable_forgiveness: pslf.forgiven_amount,
                estimated_tax: pslf.tax_on_forgiveness,
                marginal_rate: self.table.marginal_rate(pslf.final_salary),
                state_rate: self.table.state_rate,
                description: "Estimated federal and state tax due on the forgiven amount".to_string(),
            });

            if pslf.tax_on_forgiveness > 0.0 {
                let annual = if pslf.years_remaining > 0.0 {
                    pslf.tax_on_forgiveness / pslf.years_remaining
                } else {
                    pslf.tax_on_forgiveness
                };
                strategies.push(TaxPlanningTip {
                    strategy: "Tax Planning for Forgiveness".to_string(),
                    description: "Set aside funds annually to pay tax on the forgiven amount".to_string(),
                    suggested_action: format!("Save {} annually", format_currency(annual)),
                });
            }
        }

        TaxImplications {
            future_years,
            strategies,
            interest_deduction: self.interest_deduction(),
        }
    }
}
