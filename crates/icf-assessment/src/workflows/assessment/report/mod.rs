mod projection;
mod summary;
pub mod views;

pub use projection::{project, NOT_PROVIDED};
pub use summary::summarize;
pub use views::{AssessmentSummary, CompletedAssessment, ExportRow, ExportSection};
