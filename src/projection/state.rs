//! Salary state tracked year by year during a projection

use crate::assumptions::SalaryGrowth;

/// Borrower state at a point in a yearly projection
#[derive(Debug, Clone)]
pub struct ScheduleState {
    /// Current projection year (1-indexed)
    pub year: u32,

    /// Salary earned during the current year
    pub salary: f64,

    growth: SalaryGrowth,
}

impl ScheduleState {
    /// Initialize at year 1 with the starting salary
    pub fn new(starting_salary: f64, growth: SalaryGrowth) -> Self {
        Self {
            year: 1,
            salary: starting_salary,
            growth,
        }
    }

    /// Apply this year's growth and move to the next year
    pub fn advance_year(&mut self) {
        self.salary *= 1.0 + self.growth.rate_for_year(self.year - 1);
        self.year += 1;
    }
}
