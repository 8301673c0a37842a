//! Loan data structures, borrower profile and portfolio summary

mod data;
mod profile;
mod summary;
pub mod loader;

pub use data::{LoanKind, LoanRecord, LoanAccount, ExtractedData, LoanData, OptimizationRequest};
pub use profile::{BorrowerProfile, CareerStage, CareerGoals, EmployerType, Employment, SpecialtyCategory};
pub use summary::{LoanPortfolioSummary, STANDARD_PLAN_MONTHS};
pub use loader::{load_request, load_loans};
