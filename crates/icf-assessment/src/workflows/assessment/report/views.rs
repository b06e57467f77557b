use super::super::domain::AssessmentRecord;
use super::super::scoring::{DisabilityCategory, EnvironmentalContext};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row groups in the order exporters lay them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportSection {
    PatientInfo,
    BodyFunctions,
    ActivityParticipation,
    EnvironmentalFactors,
    AssessmentResults,
}

impl ExportSection {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::PatientInfo,
            Self::BodyFunctions,
            Self::ActivityParticipation,
            Self::EnvironmentalFactors,
            Self::AssessmentResults,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PatientInfo => "Patient Info",
            Self::BodyFunctions => "Body Functions",
            Self::ActivityParticipation => "Activity/Participation",
            Self::EnvironmentalFactors => "Environmental Factors",
            Self::AssessmentResults => "Assessment Results",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub section: String,
    pub field: String,
    pub value: String,
}

impl ExportRow {
    pub(crate) fn new(section: ExportSection, field: &str, value: impl Into<String>) -> Self {
        Self {
            section: section.label().to_string(),
            field: field.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub disability_category: DisabilityCategory,
    pub disability_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disability_percentage: Option<f64>,
    pub environmental_context: EnvironmentalContext,
    pub environmental_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environmental_mean: Option<f64>,
    pub rows: Vec<ExportRow>,
}

impl AssessmentSummary {
    pub fn rows_in(&self, section: ExportSection) -> Vec<&ExportRow> {
        self.rows
            .iter()
            .filter(|row| row.section == section.label())
            .collect()
    }
}

/// Snapshot archived when the wizard reaches its terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedAssessment {
    pub record: AssessmentRecord,
    pub summary: AssessmentSummary,
    pub completed_at: DateTime<Utc>,
}
