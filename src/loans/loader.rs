//! Load optimization requests from JSON and loan lists from CSV

use csv::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::data::{LoanData, LoanRecord, OptimizationRequest};
use crate::error::{EngineError, EngineResult};

/// Raw CSV row of a manually entered loan list
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    kind: String,
    balance: f64,
    interest_rate: f64,
    #[serde(default)]
    loan_type: Option<String>,
    #[serde(default)]
    disbursement_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    servicer: Option<String>,
}

impl CsvRow {
    fn into_record(self) -> (String, LoanRecord) {
        let record = LoanRecord {
            balance: self.balance,
            interest_rate: self.interest_rate,
            loan_type: self.loan_type.filter(|s| !s.is_empty()),
            disbursement_date: self.disbursement_date,
            servicer: self.servicer.filter(|s| !s.is_empty()),
        };
        (self.kind, record)
    }
}

/// Read an `OptimizationRequest` JSON document
pub fn load_request(path: &Path) -> EngineResult<OptimizationRequest> {
    let file = File::open(path)?;
    load_request_from_reader(file)
}

pub fn load_request_from_reader<R: Read>(reader: R) -> EngineResult<OptimizationRequest> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a loan list (columns: kind,balance,interest_rate,loan_type,
/// disbursement_date,servicer) into the federal/private split of `LoanData`
pub fn load_loans(path: &Path) -> EngineResult<LoanData> {
    let file = File::open(path)?;
    load_loans_from_reader(file)
}

pub fn load_loans_from_reader<R: Read>(reader: R) -> EngineResult<LoanData> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut data = LoanData::default();

    for (line, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let (kind, record) = result?.into_record();
        match kind.trim().to_ascii_lowercase().as_str() {
            "federal" => data.federal_loans.push(record),
            "private" => data.private_loans.push(record),
            other => {
                return Err(EngineError::validation(
                    format!("loans.csv row {}", line + 1),
                    format!("unknown loan kind '{}'", other),
                ));
            }
        }
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_loans_csv() {
        let csv = "\
kind,balance,interest_rate,loan_type,disbursement_date,servicer
federal,150000,6.8,Direct Unsubsidized,2019-08-15,MOHELA
federal,45000,5.3,Direct Subsidized,,
private,30000,7.2,,,SoFi
";
        let data = load_loans_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(data.federal_loans.len(), 2);
        assert_eq!(data.private_loans.len(), 1);
        assert_eq!(
            data.federal_loans[0].disbursement_date,
            chrono::NaiveDate::from_ymd_opt(2019, 8, 15)
        );
        assert_eq!(data.federal_loans[1].servicer, None);
        assert_eq!(data.private_loans[0].loan_type, None);
        assert_eq!(data.private_loans[0].servicer.as_deref(), Some("SoFi"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let csv = "kind,balance,interest_rate,loan_type,disbursement_date,servicer\nstate,1000,4.0,,,\n";
        assert!(matches!(
            load_loans_from_reader(csv.as_bytes()),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_load_request_json() {
        let json = r#"{
            "loanData": {
                "federalLoans": [{"balance": 200000, "interestRate": 6.5, "loanType": "Direct Grad PLUS"}],
                "employment": {"employerType": "academic", "annualSalary": 70000}
            },
            "userProfile": {"specialty": "surgery", "careerStage": "resident-fellow", "careerGoals": "academic-medicine"}
        }"#;
        let request = load_request_from_reader(json.as_bytes()).unwrap();
        assert_eq!(request.loan_data.employment.annual_salary, Some(70_000.0));
    }
}
