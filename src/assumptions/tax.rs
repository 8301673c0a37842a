//! Tax assumptions for forgiveness and the student loan interest deduction

use serde::{Deserialize, Serialize};

/// Federal marginal bracket: applies when salary is at least `min_salary`
#[derive(Debug, Clone, PartialEq)]
pub struct TaxBracket {
    pub min_salary: f64,
    pub rate: f64,
}

/// Static facts about the federal student loan interest deduction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestDeduction {
    pub max_deduction: f64,
    pub single_phase_out: (f64, f64),
    pub married_phase_out: (f64, f64),
}

impl Default for InterestDeduction {
    fn default() -> Self {
        Self {
            max_deduction: 2_500.0,
            single_phase_out: (70_000.0, 85_000.0),
            married_phase_out: (140_000.0, 170_000.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaxTable {
    /// Sorted by descending `min_salary`
    brackets: Vec<TaxBracket>,
    /// Flat state income tax estimate added to the federal marginal rate
    pub state_rate: f64,
    pub interest_deduction: InterestDeduction,
}

impl Default for TaxTable {
    fn default() -> Self {
        Self::new(
            vec![
                TaxBracket { min_salary: 400_000.0, rate: 0.35 },
                TaxBracket { min_salary: 200_000.0, rate: 0.32 },
                TaxBracket { min_salary: 100_000.0, rate: 0.24 },
                TaxBracket { min_salary: 0.0, rate: 0.22 },
            ],
            0.05,
        )
    }
}

impl TaxTable {
    pub fn new(mut brackets: Vec<TaxBracket>, state_rate: f64) -> Self {
        brackets.sort_by(|a, b| b.min_salary.total_cmp(&a.min_salary));
        Self {
            brackets,
            state_rate,
            interest_deduction: InterestDeduction::default(),
        }
    }

    /// Federal marginal rate for a salary; the lowest bracket catches the rest
    pub fn marginal_rate(&self, salary: f64) -> f64 {
        self.brackets
            .iter()
            .find(|bracket| salary >= bracket.min_salary)
            .or_else(|| self.brackets.last())
            .map(|bracket| bracket.rate)
            .unwrap_or(0.0)
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marginal_rate_lookup() {
        let table = TaxTable::default();
        assert_eq!(table.marginal_rate(450_000.0), 0.35);
        assert_eq!(table.marginal_rate(400_000.0), 0.35);
        assert_eq!(table.marginal_rate(250_000.0), 0.32);
        assert_eq!(table.marginal_rate(100_000.0), 0.24);
        assert_eq!(table.marginal_rate(65_000.0), 0.22);
        assert_eq!(table.marginal_rate(0.0), 0.22);
    }

    #[test]
    fn test_brackets_sorted_on_construction() {
        let table = TaxTable::new(
            vec![
                TaxBracket { min_salary: 0.0, rate: 0.10 },
                TaxBracket { min_salary: 50_000.0, rate: 0.20 },
            ],
            0.0,
        );
        assert_eq!(table.marginal_rate(60_000.0), 0.20);
        assert_eq!(table.marginal_rate(10_000.0), 0.10);
    }
}
