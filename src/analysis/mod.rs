//! Downstream analysis of a recommendation: savings, tax exposure and the
//! implementation plan

mod savings;
mod tax;
mod plan;

pub use savings::{SavingsCalculator, SavingsResult};
pub use tax::{TaxEstimator, TaxImplications, TaxImplication, TaxPlanningTip, DeductionFact};
pub use plan::{ImplementationPlanner, ImplementationStep, Priority};

/// Whole-dollar amount with thousands separators, e.g. `$343,200`
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
