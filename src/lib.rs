//! Loan Optimizer - repayment strategy engine for early-career physicians
//!
//! This library provides:
//! - Loan ingestion, validation and portfolio summaries
//! - PSLF projection under income-driven repayment with salary growth
//! - Private refinance grid search with affordability and approval scoring
//! - A table-driven recommendation with savings, tax and yearly projections
//! - Parallel batch evaluation

pub mod error;
pub mod loans;
pub mod assumptions;
pub mod projection;
pub mod strategy;
pub mod analysis;
pub mod engine;

// Re-export commonly used types
pub use error::{EngineError, EngineResult};
pub use loans::{BorrowerProfile, LoanData, LoanPortfolioSummary, OptimizationRequest};
pub use assumptions::EngineConfig;
pub use strategy::{Recommendation, RepaymentScenario, StrategyKind};
pub use engine::{OptimizationEngine, OptimizationResult};
