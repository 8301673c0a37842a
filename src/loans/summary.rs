//! Portfolio totals and balance-weighted rates

use serde::{Deserialize, Serialize};

use super::data::{ExtractedData, LoanAccount, LoanKind};
use crate::projection::amortization;

/// Federal standard repayment term in months
pub const STANDARD_PLAN_MONTHS: u32 = 120;

/// Aggregated view of a borrower's loans. Derived on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPortfolioSummary {
    pub total_balance: f64,
    pub total_federal_balance: f64,
    pub total_private_balance: f64,
    /// Balance-weighted federal rate in percent, 0 with no federal balance
    pub weighted_federal_rate: f64,
    /// Balance-weighted private rate in percent, 0 with no private balance
    pub weighted_private_rate: f64,
    pub federal_loan_count: usize,
    pub private_loan_count: usize,
    pub direct_loan_count: usize,
    pub current_monthly_payment: f64,
    pub current_payment_plan: String,
    pub pslf_payments_made: u32,
    /// Standard 10-year payment on the federal balance at the weighted federal rate
    pub standard_plan_payment: f64,
}

#[derive(Default)]
struct KindTotals {
    balance: f64,
    weighted: f64,
    count: usize,
}

impl KindTotals {
    fn add(&mut self, loan: &LoanAccount) {
        self.balance += loan.balance();
        self.weighted += loan.balance() * loan.interest_rate();
        self.count += 1;
    }

    fn weighted_rate(&self) -> f64 {
        if self.balance > 0.0 {
            self.weighted / self.balance
        } else {
            0.0
        }
    }
}

impl LoanPortfolioSummary {
    /// Build the summary from ingested accounts and extracted plan metadata
    pub fn from_accounts(accounts: &[LoanAccount], extracted: &ExtractedData) -> Self {
        let mut federal = KindTotals::default();
        let mut private = KindTotals::default();

        for loan in accounts {
            match loan.kind() {
                LoanKind::Federal => federal.add(loan),
                LoanKind::Private => private.add(loan),
            }
        }

        let weighted_federal_rate = federal.weighted_rate();
        let standard_plan_payment = if federal.balance > 0.0 {
            amortization::monthly_payment(federal.balance, weighted_federal_rate, STANDARD_PLAN_MONTHS)
        } else {
            0.0
        };

        let summary = Self {
            total_balance: federal.balance + private.balance,
            total_federal_balance: federal.balance,
            total_private_balance: private.balance,
            weighted_federal_rate,
            weighted_private_rate: private.weighted_rate(),
            federal_loan_count: federal.count,
            private_loan_count: private.count,
            direct_loan_count: accounts.iter().filter(|l| l.is_direct_federal()).count(),
            current_monthly_payment: extracted.monthly_payment.unwrap_or(0.0),
            current_payment_plan: extracted
                .current_payment_plan
                .clone()
                .filter(|plan| !plan.trim().is_empty())
                .unwrap_or_else(|| "Standard".to_string()),
            pslf_payments_made: extracted.pslf_payment_count.unwrap_or(0),
            standard_plan_payment,
        };

        log::debug!(
            "Portfolio: total ${:.2} (federal ${:.2} @ {:.3}%, private ${:.2} @ {:.3}%)",
            summary.total_balance,
            summary.total_federal_balance,
            summary.weighted_federal_rate,
            summary.total_private_balance,
            summary.weighted_private_rate,
        );

        summary
    }

    pub fn has_direct_loans(&self) -> bool {
        self.direct_loan_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loans::data::LoanRecord;
    use approx::assert_abs_diff_eq;

    fn account(balance: f64, rate: f64, kind: LoanKind, loan_type: &str) -> LoanAccount {
        let record = LoanRecord {
            balance,
            interest_rate: rate,
            loan_type: Some(loan_type.to_string()),
            disbursement_date: None,
            servicer: None,
        };
        LoanAccount::ingest(&record, kind, "test").unwrap()
    }

    #[test]
    fn test_weighted_rates() {
        let accounts = vec![
            account(100_000.0, 6.0, LoanKind::Federal, "Direct Unsubsidized"),
            account(50_000.0, 7.5, LoanKind::Federal, "FFEL Stafford"),
            account(40_000.0, 5.0, LoanKind::Private, "Private"),
        ];
        let summary = LoanPortfolioSummary::from_accounts(&accounts, &ExtractedData::default());

        assert_abs_diff_eq!(summary.total_balance, 190_000.0);
        assert_abs_diff_eq!(summary.total_federal_balance, 150_000.0);
        assert_abs_diff_eq!(summary.weighted_federal_rate, 6.5, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.weighted_private_rate, 5.0, epsilon = 1e-12);
        assert_eq!(summary.federal_loan_count, 2);
        assert_eq!(summary.private_loan_count, 1);
        assert_eq!(summary.direct_loan_count, 1);
    }

    #[test]
    fn test_empty_kinds_have_zero_rate() {
        let summary = LoanPortfolioSummary::from_accounts(&[], &ExtractedData::default());
        assert_eq!(summary.total_balance, 0.0);
        assert_eq!(summary.weighted_federal_rate, 0.0);
        assert_eq!(summary.weighted_private_rate, 0.0);
        assert_eq!(summary.standard_plan_payment, 0.0);

        // loans present but all paid down
        let accounts = vec![account(0.0, 6.8, LoanKind::Federal, "Direct")];
        let summary = LoanPortfolioSummary::from_accounts(&accounts, &ExtractedData::default());
        assert_eq!(summary.weighted_federal_rate, 0.0);
    }

    #[test]
    fn test_metadata_defaults() {
        let summary = LoanPortfolioSummary::from_accounts(&[], &ExtractedData::default());
        assert_eq!(summary.current_payment_plan, "Standard");
        assert_eq!(summary.current_monthly_payment, 0.0);
        assert_eq!(summary.pslf_payments_made, 0);

        let extracted = ExtractedData {
            current_payment_plan: Some("SAVE".to_string()),
            monthly_payment: Some(412.0),
            pslf_payment_count: Some(36),
        };
        let summary = LoanPortfolioSummary::from_accounts(&[], &extracted);
        assert_eq!(summary.current_payment_plan, "SAVE");
        assert_eq!(summary.current_monthly_payment, 412.0);
        assert_eq!(summary.pslf_payments_made, 36);
    }

    #[test]
    fn test_standard_plan_payment() {
        let accounts = vec![account(285_000.0, 6.8, LoanKind::Federal, "Direct Unsubsidized")];
        let summary = LoanPortfolioSummary::from_accounts(&accounts, &ExtractedData::default());
        assert_abs_diff_eq!(summary.standard_plan_payment, 3_279.79, epsilon = 0.01);
    }
}
