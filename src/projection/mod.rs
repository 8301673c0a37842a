//! Payment math and year-by-year repayment projections

pub mod amortization;
pub mod idr;
mod state;
mod schedule;

pub use state::ScheduleState;
pub use idr::{IdrSimulation, IdrYear};
pub use schedule::{DetailedProjections, Milestone, ProjectionGenerator, YearlyProjectionRow};
