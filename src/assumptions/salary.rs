//! Salary assumptions: starting salary by career stage and specialty, and
//! salary growth schedules by career stage

use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};
use crate::loans::{CareerStage, SpecialtyCategory};

/// Annual salary by (career stage, specialty category)
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryTable {
    salaries: BTreeMap<CareerStage, BTreeMap<SpecialtyCategory, f64>>,
}

impl SalaryTable {
    /// Physician compensation estimates used when no salary is supplied
    pub fn default_compensation() -> Self {
        let mut table = Self::empty();

        for category in SpecialtyCategory::ALL {
            table.insert(CareerStage::MedicalStudent, category, 0.0);
            table.insert(CareerStage::ResidentFellow, category, 60_000.0);
        }

        let attending = [
            (SpecialtyCategory::PrimaryCare, 250_000.0, 280_000.0),
            (SpecialtyCategory::Surgery, 450_000.0, 550_000.0),
            (SpecialtyCategory::HospitalBased, 380_000.0, 450_000.0),
            (SpecialtyCategory::SpecialtyMedicine, 420_000.0, 500_000.0),
            (SpecialtyCategory::Anesthesiology, 380_000.0, 450_000.0),
            (SpecialtyCategory::EmergencyMedicine, 350_000.0, 400_000.0),
            (SpecialtyCategory::InternalMedicine, 250_000.0, 280_000.0),
            (SpecialtyCategory::FamilyMedicine, 240_000.0, 270_000.0),
        ];
        for (category, new_attending, experienced) in attending {
            table.insert(CareerStage::NewAttending, category, new_attending);
            table.insert(CareerStage::ExperiencedPhysician, category, experienced);
        }

        table
    }

    pub fn empty() -> Self {
        Self {
            salaries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, stage: CareerStage, category: SpecialtyCategory, salary: f64) {
        self.salaries.entry(stage).or_default().insert(category, salary);
    }

    pub fn get(&self, stage: CareerStage, category: SpecialtyCategory) -> Option<f64> {
        self.salaries.get(&stage).and_then(|row| row.get(&category)).copied()
    }

    /// Every stage must have every category, all non-negative
    pub fn validate(&self) -> EngineResult<()> {
        for stage in CareerStage::ALL {
            for category in SpecialtyCategory::ALL {
                match self.get(stage, category) {
                    None => {
                        return Err(EngineError::configuration(format!(
                            "salary table missing {} / {}",
                            stage.as_str(),
                            category.as_str()
                        )));
                    }
                    Some(salary) if !salary.is_finite() || salary < 0.0 => {
                        return Err(EngineError::configuration(format!(
                            "salary table has invalid salary {} for {} / {}",
                            salary,
                            stage.as_str(),
                            category.as_str()
                        )));
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}

/// Annual salary growth rates by simulated year (0-indexed).
/// The last rate repeats for every later year.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryGrowth {
    rates: Vec<f64>,
}

impl SalaryGrowth {
    pub fn new(rates: Vec<f64>) -> Self {
        Self { rates }
    }

    pub fn flat(rate: f64) -> Self {
        Self { rates: vec![rate] }
    }

    /// Growth applied after simulated year `year_index`
    pub fn rate_for_year(&self, year_index: u32) -> f64 {
        let idx = (year_index as usize).min(self.rates.len().saturating_sub(1));
        self.rates.get(idx).copied().unwrap_or(0.0)
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Default growth schedules: modest raises in training, a one-time jump at
/// the residency to attending transition, modest growth afterwards
pub fn default_growth_schedules() -> BTreeMap<CareerStage, SalaryGrowth> {
    BTreeMap::from([
        (CareerStage::MedicalStudent, SalaryGrowth::flat(0.03)),
        (
            CareerStage::ResidentFellow,
            SalaryGrowth::new(vec![0.03, 0.03, 0.03, 2.50, 0.05]),
        ),
        (CareerStage::NewAttending, SalaryGrowth::flat(0.05)),
        (CareerStage::ExperiencedPhysician, SalaryGrowth::flat(0.03)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_complete() {
        let table = SalaryTable::default_compensation();
        assert!(table.validate().is_ok());
        assert_eq!(
            table.get(CareerStage::NewAttending, SpecialtyCategory::Surgery),
            Some(450_000.0)
        );
        assert_eq!(
            table.get(CareerStage::ResidentFellow, SpecialtyCategory::Anesthesiology),
            Some(60_000.0)
        );
    }

    #[test]
    fn test_incomplete_table_rejected() {
        let mut table = SalaryTable::empty();
        table.insert(CareerStage::NewAttending, SpecialtyCategory::Surgery, 450_000.0);
        assert!(matches!(
            table.validate(),
            Err(EngineError::Configuration { .. })
        ));
    }

    #[test]
    fn test_growth_last_rate_repeats() {
        let growth = SalaryGrowth::new(vec![0.03, 0.50, 0.05]);
        assert_eq!(growth.rate_for_year(0), 0.03);
        assert_eq!(growth.rate_for_year(1), 0.50);
        assert_eq!(growth.rate_for_year(2), 0.05);
        assert_eq!(growth.rate_for_year(30), 0.05);
    }
}
