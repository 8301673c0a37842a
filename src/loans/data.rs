//! Loan records and the optimization request shape

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::profile::{BorrowerProfile, Employment};
use crate::error::{EngineError, EngineResult};

/// Federal or private origin of a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanKind {
    Federal,
    Private,
}

/// A loan as it arrives from document analysis or manual entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    pub balance: f64,
    /// Annual interest rate in percent (6.8 = 6.8%)
    pub interest_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disbursement_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servicer: Option<String>,
}

/// A validated loan. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanAccount {
    balance: f64,
    interest_rate: f64,
    kind: LoanKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    loan_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disbursement_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    servicer: Option<String>,
}

impl LoanAccount {
    /// Validate a record and tag it with its kind
    pub fn ingest(record: &LoanRecord, kind: LoanKind, field: &str) -> EngineResult<Self> {
        if !record.balance.is_finite() || record.balance < 0.0 {
            return Err(EngineError::validation(
                format!("{}.balance", field),
                format!("must be a non-negative amount, got {}", record.balance),
            ));
        }
        if !record.interest_rate.is_finite() || !(0.0..=100.0).contains(&record.interest_rate) {
            return Err(EngineError::validation(
                format!("{}.interestRate", field),
                format!("must be a percentage in [0, 100], got {}", record.interest_rate),
            ));
        }

        Ok(Self {
            balance: record.balance,
            interest_rate: record.interest_rate,
            kind,
            loan_type: record.loan_type.clone(),
            disbursement_date: record.disbursement_date,
            servicer: record.servicer.clone(),
        })
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn kind(&self) -> LoanKind {
        self.kind
    }

    pub fn loan_type(&self) -> Option<&str> {
        self.loan_type.as_deref()
    }

    /// Direct Loans are the only federal loans that count toward PSLF
    pub fn is_direct_federal(&self) -> bool {
        self.kind == LoanKind::Federal
            && self.loan_type.as_deref().is_some_and(|t| t.contains("Direct"))
    }
}

/// Plan metadata already extracted from loan statements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_payment_plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pslf_payment_count: Option<u32>,
}

/// Loan data block of the request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanData {
    #[serde(default)]
    pub federal_loans: Vec<LoanRecord>,
    #[serde(default)]
    pub private_loans: Vec<LoanRecord>,
    #[serde(default)]
    pub extracted_data: ExtractedData,
    #[serde(default)]
    pub employment: Employment,
}

impl LoanData {
    /// Validate every record and return the tagged accounts, federal first
    pub fn ingest(&self) -> EngineResult<Vec<LoanAccount>> {
        if let Some(payment) = self.extracted_data.monthly_payment {
            if !payment.is_finite() || payment < 0.0 {
                return Err(EngineError::validation(
                    "loanData.extractedData.monthlyPayment",
                    format!("must be a non-negative amount, got {}", payment),
                ));
            }
        }
        self.employment.validate()?;

        let federal = self.federal_loans.iter().enumerate().map(|(i, record)| {
            LoanAccount::ingest(record, LoanKind::Federal, &format!("loanData.federalLoans[{}]", i))
        });
        let private = self.private_loans.iter().enumerate().map(|(i, record)| {
            LoanAccount::ingest(record, LoanKind::Private, &format!("loanData.privateLoans[{}]", i))
        });

        federal.chain(private).collect()
    }
}

/// Full input to one optimization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRequest {
    pub loan_data: LoanData,
    pub user_profile: BorrowerProfile,
}
