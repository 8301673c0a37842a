//! Borrower profile: career stage, goals, specialty and employment

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Where the borrower is in their medical career
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CareerStage {
    MedicalStudent,
    ResidentFellow,
    NewAttending,
    ExperiencedPhysician,
}

impl CareerStage {
    pub const ALL: [CareerStage; 4] = [
        CareerStage::MedicalStudent,
        CareerStage::ResidentFellow,
        CareerStage::NewAttending,
        CareerStage::ExperiencedPhysician,
    ];

    /// Identifier used in the assumption CSV files
    pub fn as_str(&self) -> &'static str {
        match self {
            CareerStage::MedicalStudent => "medical-student",
            CareerStage::ResidentFellow => "resident-fellow",
            CareerStage::NewAttending => "new-attending",
            CareerStage::ExperiencedPhysician => "experienced-physician",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.as_str() == value.trim())
    }

    /// Rough age estimate used for completion-age reporting
    pub fn estimated_age(&self) -> u32 {
        match self {
            CareerStage::MedicalStudent => 25,
            CareerStage::ResidentFellow => 28,
            CareerStage::NewAttending => 32,
            CareerStage::ExperiencedPhysician => 40,
        }
    }
}

/// Intended career direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CareerGoals {
    HospitalEmployee,
    PrivatePractice,
    #[serde(alias = "academic")]
    AcademicMedicine,
    PublicService,
    Government,
    NotSure,
}

impl CareerGoals {
    /// Goals compatible with a decade of qualifying employment
    pub fn aligns_with_public_service(&self) -> bool {
        matches!(
            self,
            CareerGoals::PublicService | CareerGoals::AcademicMedicine | CareerGoals::Government
        )
    }
}

/// Employer classification reported by document analysis or manual entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployerType {
    #[serde(rename = "501c3_nonprofit", alias = "nonprofit")]
    NonProfit501c3,
    Government,
    Academic,
    Private,
    #[serde(other)]
    Other,
}

impl EmployerType {
    pub fn qualifies_for_pslf(&self) -> bool {
        matches!(
            self,
            EmployerType::NonProfit501c3 | EmployerType::Government | EmployerType::Academic
        )
    }
}

/// Specialty grouping used to key the salary table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialtyCategory {
    PrimaryCare,
    Surgery,
    HospitalBased,
    SpecialtyMedicine,
    Anesthesiology,
    EmergencyMedicine,
    InternalMedicine,
    FamilyMedicine,
}

impl SpecialtyCategory {
    pub const ALL: [SpecialtyCategory; 8] = [
        SpecialtyCategory::PrimaryCare,
        SpecialtyCategory::Surgery,
        SpecialtyCategory::HospitalBased,
        SpecialtyCategory::SpecialtyMedicine,
        SpecialtyCategory::Anesthesiology,
        SpecialtyCategory::EmergencyMedicine,
        SpecialtyCategory::InternalMedicine,
        SpecialtyCategory::FamilyMedicine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialtyCategory::PrimaryCare => "primary-care",
            SpecialtyCategory::Surgery => "surgery",
            SpecialtyCategory::HospitalBased => "hospital-based",
            SpecialtyCategory::SpecialtyMedicine => "specialty-medicine",
            SpecialtyCategory::Anesthesiology => "anesthesiology",
            SpecialtyCategory::EmergencyMedicine => "emergency-medicine",
            SpecialtyCategory::InternalMedicine => "internal-medicine",
            SpecialtyCategory::FamilyMedicine => "family-medicine",
        }
    }

    /// Match a free-form specialty name, case and separator insensitive
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        Self::ALL.into_iter().find(|category| category.as_str() == normalized)
    }
}

/// Career profile supplied by the wizard or manual entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowerProfile {
    pub specialty: String,
    pub career_stage: CareerStage,
    pub career_goals: CareerGoals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl BorrowerProfile {
    pub fn validate(&self) -> EngineResult<()> {
        if self.specialty.trim().is_empty() {
            return Err(EngineError::validation(
                "userProfile.specialty",
                "required field is empty",
            ));
        }
        Ok(())
    }

    /// Specialty category for salary lookup, falling back to primary care
    pub fn specialty_category(&self) -> SpecialtyCategory {
        SpecialtyCategory::parse(&self.specialty).unwrap_or_else(|| {
            log::warn!(
                "Unknown specialty '{}', using primary-care salary assumptions",
                self.specialty
            );
            SpecialtyCategory::PrimaryCare
        })
    }
}

/// Employment details attached to the loan data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_type: Option<EmployerType>,
    #[serde(default)]
    pub pslf_eligible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_salary: Option<f64>,
}

impl Employment {
    /// The employer type decides when present; the extracted eligibility
    /// flag only fills in when the type is unknown.
    pub fn has_qualifying_employer(&self) -> bool {
        match self.employer_type {
            Some(employer_type) => employer_type.qualifies_for_pslf(),
            None => self.pslf_eligible,
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if let Some(salary) = self.annual_salary {
            if !salary.is_finite() || salary < 0.0 {
                return Err(EngineError::validation(
                    "loanData.employment.annualSalary",
                    format!("must be a non-negative amount, got {}", salary),
                ));
            }
        }
        Ok(())
    }
}
