//! Ordered action plan for the recommended strategy

use serde::{Deserialize, Serialize};

use crate::strategy::StrategyKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationStep {
    pub order: u32,
    pub title: String,
    pub description: String,
    /// Relative to the start of implementation, never a calendar date
    pub timeline: String,
    pub priority: Priority,
    pub resources: Vec<String>,
}

struct StepTemplate {
    title: &'static str,
    description: &'static str,
    timeline: &'static str,
    priority: Priority,
    resources: &'static [&'static str],
}

const PSLF_STEPS: [StepTemplate; 4] = [
    StepTemplate {
        title: "Verify Employment Eligibility",
        description: "Confirm your employer qualifies for PSLF",
        timeline: "Within 1 week",
        priority: Priority::Critical,
        resources: &["PSLF Help Tool on StudentAid.gov"],
    },
    StepTemplate {
        title: "Consolidate Non-Direct Loans",
        description: "Consolidate any FFEL loans into Direct Loans",
        timeline: "2-4 weeks",
        priority: Priority::Critical,
        resources: &["Direct Consolidation Application"],
    },
    StepTemplate {
        title: "Switch to Income-Driven Repayment",
        description: "Enroll in an income-driven repayment plan",
        timeline: "2-3 weeks",
        priority: Priority::Critical,
        resources: &["Income-Driven Repayment Request form"],
    },
    StepTemplate {
        title: "Submit Employment Certification",
        description: "File annual certification to track qualifying payments",
        timeline: "1-2 weeks",
        priority: Priority::Critical,
        resources: &["PSLF Employment Certification Form"],
    },
];

const REFINANCE_STEPS: [StepTemplate; 4] = [
    StepTemplate {
        title: "Compare Refinancing Offers",
        description: "Get quotes from 3-5 lenders for best rates",
        timeline: "1-2 weeks",
        priority: Priority::Critical,
        resources: &["Credible", "SoFi", "CommonBond", "Earnest"],
    },
    StepTemplate {
        title: "Gather Required Documents",
        description: "Collect proof of income, employment, and loan details",
        timeline: "3-5 days",
        priority: Priority::Critical,
        resources: &["Pay stubs", "Tax returns", "Current loan statements"],
    },
    StepTemplate {
        title: "Submit Applications",
        description: "Apply with top 2-3 lenders simultaneously",
        timeline: "1 week",
        priority: Priority::Critical,
        resources: &["Online applications"],
    },
    StepTemplate {
        title: "Review and Accept Best Offer",
        description: "Compare final terms and select optimal loan",
        timeline: "3-5 days",
        priority: Priority::Critical,
        resources: &["Loan comparison spreadsheet"],
    },
];

pub struct ImplementationPlanner;

impl ImplementationPlanner {
    pub fn plan(strategy: StrategyKind) -> Vec<ImplementationStep> {
        let templates: &[StepTemplate] = match strategy {
            StrategyKind::Pslf => &PSLF_STEPS,
            StrategyKind::Refinance => &REFINANCE_STEPS,
        };

        templates
            .iter()
            .zip(1..)
            .map(|(t, order)| ImplementationStep {
                order,
                title: t.title.to_string(),
                description: t.description.to_string(),
                timeline: t.timeline.to_string(),
                priority: t.priority,
                resources: t.resources.iter().map(|r| r.to_string()).collect(),
            })
            .collect()
    }
}
