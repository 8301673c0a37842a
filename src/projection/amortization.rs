//! Amortization primitives
//!
//! Rates are annual percentages (6.8 = 6.8%), compounded monthly.

/// Level monthly payment that retires `principal` over `months` payments
/// using the closed-form annuity formula.
///
/// A zero rate degenerates to straight-line repayment. Zero months means the
/// whole principal is due at once.
pub fn monthly_payment(principal: f64, annual_rate_pct: f64, months: u32) -> f64 {
    if months == 0 {
        return principal;
    }

    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return principal / months as f64;
    }

    let growth = (1.0 + monthly_rate).powi(months as i32);
    principal * (monthly_rate * growth) / (growth - 1.0)
}

/// Roll a balance forward month by month: accrue interest, subtract the
/// payment, floor at zero.
pub fn roll_balance(balance: f64, annual_rate_pct: f64, payment: f64, months: u32) -> f64 {
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    let mut balance = balance;

    for _ in 0..months {
        balance = balance + balance * monthly_rate - payment;
        if balance <= 0.0 {
            return 0.0;
        }
    }

    balance
}

/// Total paid over a level-payment term
pub fn total_paid(principal: f64, annual_rate_pct: f64, months: u32) -> f64 {
    monthly_payment(principal, annual_rate_pct, months) * months as f64
}
