use super::domain::{
    AssessmentRecord, EnvironmentalFactorsRecord, FunctionalCapacityRecord, PersonalInfo,
};
use super::report::{summarize, AssessmentSummary, CompletedAssessment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PersonalInfo,
    FunctionalCapacity,
    EnvironmentalFactors,
    Summary,
}

impl WizardStep {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::PersonalInfo,
            Self::FunctionalCapacity,
            Self::EnvironmentalFactors,
            Self::Summary,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Information",
            Self::FunctionalCapacity => "Functional Capacity",
            Self::EnvironmentalFactors => "Environmental Factors",
            Self::Summary => "Summary",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::PersonalInfo => 0,
            Self::FunctionalCapacity => 1,
            Self::EnvironmentalFactors => 2,
            Self::Summary => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ordered().get(index).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "step", rename_all = "snake_case")]
pub enum WizardPhase {
    InProgress(WizardStep),
    Completed,
}

impl Default for WizardPhase {
    fn default() -> Self {
        Self::InProgress(WizardStep::PersonalInfo)
    }
}

/// Data handed over by the intake form for a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", content = "data", rename_all = "snake_case")]
pub enum StepSubmission {
    PersonalInfo(PersonalInfo),
    FunctionalCapacity(FunctionalCapacityRecord),
    EnvironmentalFactors(EnvironmentalFactorsRecord),
}

impl StepSubmission {
    pub const fn step(&self) -> WizardStep {
        match self {
            Self::PersonalInfo(_) => WizardStep::PersonalInfo,
            Self::FunctionalCapacity(_) => WizardStep::FunctionalCapacity,
            Self::EnvironmentalFactors(_) => WizardStep::EnvironmentalFactors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("step {received} submitted while the wizard expects step {expected}")]
    InvalidStepIndex { expected: usize, received: usize },
    #[error("already at the first step")]
    AtFirstStep,
    #[error("already at the last step")]
    AtLastStep,
    #[error("{} has not been filled in yet", .0.label())]
    StepIncomplete(WizardStep),
    #[error("assessment has already been completed")]
    AssessmentCompleted,
}

/// Linear four-step questionnaire over a single [`AssessmentRecord`].
///
/// The record is owned by the wizard; callers get read access through
/// [`AssessmentWizard::record`] and mutate it only by submitting the step that
/// is currently active. Navigating backwards never clears later steps.
#[derive(Debug, Clone, Default)]
pub struct AssessmentWizard {
    record: AssessmentRecord,
    phase: WizardPhase,
}

impl AssessmentWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn current_step(&self) -> Option<WizardStep> {
        match self.phase {
            WizardPhase::InProgress(step) => Some(step),
            WizardPhase::Completed => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.phase == WizardPhase::Completed
    }

    pub fn record(&self) -> &AssessmentRecord {
        &self.record
    }

    pub fn step_labels() -> [&'static str; 4] {
        WizardStep::ordered().map(WizardStep::label)
    }

    /// Merge one step's data and advance. The form layer has already checked
    /// presence and ranges; nothing is re-validated here.
    pub fn submit_step(
        &mut self,
        step_index: usize,
        submission: StepSubmission,
    ) -> Result<WizardStep, WizardError> {
        let current = self.check_sequence(step_index, submission.step())?;

        match submission {
            StepSubmission::PersonalInfo(info) => self.record.personal_info = Some(info),
            StepSubmission::FunctionalCapacity(record) => self.record.functional_capacity = record,
            StepSubmission::EnvironmentalFactors(record) => {
                self.record.environmental_factors = record
            }
        }

        let next = current.next().ok_or(WizardError::AtLastStep)?;
        self.phase = WizardPhase::InProgress(next);
        debug!(from = current.label(), to = next.label(), "assessment step submitted");
        Ok(next)
    }

    /// Confirm that `step` at `step_index` is the one the wizard expects next,
    /// without touching the record.
    pub fn check_sequence(
        &self,
        step_index: usize,
        step: WizardStep,
    ) -> Result<WizardStep, WizardError> {
        let current = self.active_step()?;

        if step_index != current.index() || step != current {
            let error = WizardError::InvalidStepIndex {
                expected: current.index(),
                received: step_index,
            };
            warn!(%error, submitted = ?step, "rejected out-of-sequence step");
            return Err(error);
        }

        Ok(current)
    }

    pub fn go_previous(&mut self) -> Result<WizardStep, WizardError> {
        let current = self.active_step()?;
        let previous = current.previous().ok_or(WizardError::AtFirstStep)?;
        self.phase = WizardPhase::InProgress(previous);
        debug!(from = current.label(), to = previous.label(), "assessment step revisited");
        Ok(previous)
    }

    /// Move forward over a step that already holds data, e.g. after going
    /// back to review it without changes.
    pub fn go_next(&mut self) -> Result<WizardStep, WizardError> {
        let current = self.active_step()?;
        let next = current.next().ok_or(WizardError::AtLastStep)?;
        if !self.has_data(current) {
            return Err(WizardError::StepIncomplete(current));
        }
        self.phase = WizardPhase::InProgress(next);
        debug!(from = current.label(), to = next.label(), "assessment step skipped forward");
        Ok(next)
    }

    /// Scores and export rows for review. Available once the summary step is
    /// reached, and still available after completion.
    pub fn summary(&self) -> Result<AssessmentSummary, WizardError> {
        match self.phase {
            WizardPhase::InProgress(WizardStep::Summary) | WizardPhase::Completed => {
                Ok(summarize(&self.record))
            }
            WizardPhase::InProgress(step) => Err(WizardError::InvalidStepIndex {
                expected: step.index(),
                received: WizardStep::Summary.index(),
            }),
        }
    }

    pub fn complete(&mut self) -> Result<CompletedAssessment, WizardError> {
        self.complete_at(Utc::now())
    }

    pub fn complete_at(
        &mut self,
        completed_at: DateTime<Utc>,
    ) -> Result<CompletedAssessment, WizardError> {
        let current = self.active_step()?;
        if current != WizardStep::Summary {
            let error = WizardError::InvalidStepIndex {
                expected: current.index(),
                received: WizardStep::Summary.index(),
            };
            warn!(%error, "completion requested before the summary step");
            return Err(error);
        }

        self.phase = WizardPhase::Completed;
        let summary = summarize(&self.record);
        info!(
            disability = %summary.disability_label,
            environment = %summary.environmental_label,
            "assessment completed"
        );

        Ok(CompletedAssessment {
            record: self.record.clone(),
            summary,
            completed_at,
        })
    }

    fn active_step(&self) -> Result<WizardStep, WizardError> {
        self.current_step().ok_or(WizardError::AssessmentCompleted)
    }

    fn has_data(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::PersonalInfo => self.record.personal_info.is_some(),
            WizardStep::FunctionalCapacity => !self.record.functional_capacity.is_empty(),
            WizardStep::EnvironmentalFactors => !self.record.environmental_factors.is_empty(),
            WizardStep::Summary => true,
        }
    }
}
