//! CSV-based assumption loader
//!
//! Loads the externally maintained tables from data/assumptions/

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use super::salary::{SalaryGrowth, SalaryTable};
use super::tax::TaxBracket;
use crate::error::{EngineError, EngineResult};
use crate::loans::{CareerStage, SpecialtyCategory};

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

fn open(path: &Path, file_name: &str) -> EngineResult<csv::Reader<File>> {
    let file = File::open(path.join(file_name)).map_err(|e| {
        EngineError::configuration(format!("cannot open {}: {}", path.join(file_name).display(), e))
    })?;
    Ok(csv::Reader::from_reader(file))
}

fn parse_stage(value: &str, file_name: &str) -> EngineResult<CareerStage> {
    CareerStage::parse(value).ok_or_else(|| {
        EngineError::configuration(format!("{}: unknown career stage '{}'", file_name, value))
    })
}

#[derive(Debug, Deserialize)]
struct ParameterRow {
    name: String,
    value: f64,
}

/// Load scalar parameters from parameters.csv
/// Returns HashMap<parameter_name, value>
pub fn load_parameters(path: &Path) -> EngineResult<HashMap<String, f64>> {
    let mut reader = open(path, "parameters.csv")?;
    let mut parameters = HashMap::new();

    for row in reader.deserialize() {
        let row: ParameterRow = row?;
        parameters.insert(row.name.trim().to_string(), row.value);
    }

    Ok(parameters)
}

#[derive(Debug, Deserialize)]
struct SalaryRow {
    stage: String,
    category: String,
    salary: f64,
}

/// Load starting salaries from salary_table.csv
pub fn load_salary_table(path: &Path) -> EngineResult<SalaryTable> {
    let mut reader = open(path, "salary_table.csv")?;
    let mut table = SalaryTable::empty();

    for row in reader.deserialize() {
        let row: SalaryRow = row?;
        let stage = parse_stage(&row.stage, "salary_table.csv")?;
        let category = SpecialtyCategory::parse(&row.category).ok_or_else(|| {
            EngineError::configuration(format!(
                "salary_table.csv: unknown specialty category '{}'",
                row.category
            ))
        })?;
        table.insert(stage, category, row.salary);
    }

    Ok(table)
}

#[derive(Debug, Deserialize)]
struct GrowthRow {
    stage: String,
    year: u32,
    rate: f64,
}

/// Load growth schedules from salary_growth.csv
/// Years are 1-indexed in the file and must be contiguous per stage
pub fn load_salary_growth(path: &Path) -> EngineResult<BTreeMap<CareerStage, SalaryGrowth>> {
    let mut reader = open(path, "salary_growth.csv")?;
    let mut by_stage: BTreeMap<CareerStage, BTreeMap<u32, f64>> = BTreeMap::new();

    for row in reader.deserialize() {
        let row: GrowthRow = row?;
        let stage = parse_stage(&row.stage, "salary_growth.csv")?;
        by_stage.entry(stage).or_default().insert(row.year, row.rate);
    }

    let mut schedules = BTreeMap::new();
    for (stage, years) in by_stage {
        let contiguous = years.keys().copied().eq(1..=years.len() as u32);
        if !contiguous {
            return Err(EngineError::configuration(format!(
                "salary_growth.csv: years for {} must run 1..=N without gaps",
                stage.as_str()
            )));
        }
        schedules.insert(stage, SalaryGrowth::new(years.into_values().collect()));
    }

    Ok(schedules)
}

#[derive(Debug, Deserialize)]
struct BracketRow {
    min_salary: f64,
    rate: f64,
}

/// Load federal marginal brackets from tax_brackets.csv
pub fn load_tax_brackets(path: &Path) -> EngineResult<Vec<TaxBracket>> {
    let mut reader = open(path, "tax_brackets.csv")?;
    let mut brackets = Vec::new();

    for row in reader.deserialize() {
        let row: BracketRow = row?;
        brackets.push(TaxBracket {
            min_salary: row.min_salary,
            rate: row.rate,
        });
    }

    Ok(brackets)
}

/// All tables loaded from an assumptions directory
pub struct LoadedAssumptions {
    pub parameters: HashMap<String, f64>,
    pub salary_table: SalaryTable,
    pub salary_growth: BTreeMap<CareerStage, SalaryGrowth>,
    pub tax_brackets: Vec<TaxBracket>,
}

impl LoadedAssumptions {
    /// Load all assumptions from the default path
    pub fn load_default() -> EngineResult<Self> {
        Self::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load all assumptions from a specific path
    pub fn load_from(path: &Path) -> EngineResult<Self> {
        Ok(Self {
            parameters: load_parameters(path)?,
            salary_table: load_salary_table(path)?,
            salary_growth: load_salary_growth(path)?,
            tax_brackets: load_tax_brackets(path)?,
        })
    }
}
