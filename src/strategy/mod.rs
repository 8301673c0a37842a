//! Repayment strategies: PSLF projection, refinance grid search, and the
//! recommendation between them

mod scenario;
mod pslf;
mod refinance;
mod recommend;

pub use scenario::{RepaymentScenario, PslfScenario, RefinanceScenario, StrategyKind, Confidence};
pub use pslf::{PslfProjector, PslfEligibility};
pub use refinance::{RefinanceScenarioGenerator, RefinancingAnalysis};
pub use recommend::{
    StrategyRecommender, Recommendation, CostComparison, DecisionRule, DECISION_TABLE, NEAR_TIE_NOTE, decide,
};
