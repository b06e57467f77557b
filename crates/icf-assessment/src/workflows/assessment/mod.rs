//! ICF disability assessment: a four-step questionnaire over personal
//! details, functional capacity and environmental factors, with summary
//! scoring and tabular export.

pub mod codec;
pub mod domain;
pub mod export;
pub mod report;
pub mod router;
pub mod scoring;
pub mod store;
mod wizard;

pub use codec::{label_for, label_for_token};
pub use domain::{
    AssessmentRecord, EnvironmentalDomain, EnvironmentalFactorsRecord, FunctionalCapacityRecord,
    FunctionalDomain, FunctionalSection, Gender, PersonalInfo, PersonalInfoError, RatingCode,
    RatingScale,
};
pub use export::{
    export_completed, exporter_for, read_csv_rows, AssessmentExporter, CsvExporter, ExportError,
    ExportFormat, JsonExporter,
};
pub use report::{
    project, summarize, AssessmentSummary, CompletedAssessment, ExportRow, ExportSection,
    NOT_PROVIDED,
};
pub use router::assessment_router;
pub use scoring::{
    classify_disability_percentage, classify_environmental_mean, disability_category,
    disability_percentage, environmental_context, environmental_mean, DisabilityCategory,
    EnvironmentalContext,
};
pub use store::{
    clear_completed, load_completed, save_completed, FileStore, KeyValueStore, MemoryStore,
    StoreError, COMPLETED_ASSESSMENT_KEY,
};
pub use wizard::{AssessmentWizard, StepSubmission, WizardError, WizardPhase, WizardStep};
