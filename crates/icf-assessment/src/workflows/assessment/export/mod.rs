//! Encoders that turn the projected rows into downloadable files.
//!
//! Spreadsheet and PDF layouts live outside this crate; they consume the same
//! [`ExportRow`] sequence through [`AssessmentExporter`].

mod delimited;
mod json;

pub use delimited::{read_csv_rows, CsvExporter};
pub use json::JsonExporter;

use super::report::{project, ExportRow};
use super::store::{load_completed, KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub const fn extension(self) -> &'static str {
        self.label()
    }

    pub fn content_type(self) -> mime::Mime {
        match self {
            Self::Csv => mime::TEXT_CSV_UTF_8,
            Self::Json => mime::APPLICATION_JSON,
        }
    }

    pub fn file_name(self) -> String {
        format!("icf-assessment.{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A file encoder for the projected assessment table.
pub trait AssessmentExporter: Send + Sync {
    fn format(&self) -> ExportFormat;
    fn export(&self, rows: &[ExportRow]) -> Result<Vec<u8>, ExportError>;
}

pub fn exporter_for(format: ExportFormat) -> Box<dyn AssessmentExporter> {
    match format {
        ExportFormat::Csv => Box::new(CsvExporter),
        ExportFormat::Json => Box::new(JsonExporter::default()),
    }
}

/// Encode the archived assessment. Missing data is reported as
/// [`ExportError::NoDataAvailable`] so callers can show a notice instead of
/// failing hard.
pub fn export_completed<S>(
    store: &S,
    exporter: &dyn AssessmentExporter,
) -> Result<Vec<u8>, ExportError>
where
    S: KeyValueStore + ?Sized,
{
    let completed = load_completed(store)?.ok_or(ExportError::NoDataAvailable)?;
    let rows = project(&completed.record);
    info!(
        format = %exporter.format(),
        rows = rows.len(),
        completed_at = %completed.completed_at,
        "exporting archived assessment"
    );
    exporter.export(&rows)
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no assessment data available")]
    NoDataAvailable,
    #[error("unsupported export format '{0}' (expected csv or json)")]
    UnsupportedFormat(String),
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::domain::{
        AssessmentRecord, EnvironmentalFactorsRecord, FunctionalCapacityRecord,
    };
    use crate::workflows::assessment::report::summarize;
    use crate::workflows::assessment::report::CompletedAssessment;
    use crate::workflows::assessment::store::{save_completed, MemoryStore};
    use chrono::{TimeZone, Utc};

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!("CSV".parse::<ExportFormat>().ok(), Some(ExportFormat::Csv));
        assert_eq!(" json ".parse::<ExportFormat>().ok(), Some(ExportFormat::Json));
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(format)) if format == "pdf"
        ));
    }

    #[test]
    fn content_types_match_format() {
        assert_eq!(ExportFormat::Csv.content_type().subtype(), mime::CSV);
        assert_eq!(ExportFormat::Json.content_type(), mime::APPLICATION_JSON);
        assert_eq!(ExportFormat::Json.file_name(), "icf-assessment.json");
    }

    #[test]
    fn export_without_archive_reports_no_data() {
        let store = MemoryStore::default();
        let result = export_completed(&store, exporter_for(ExportFormat::Csv).as_ref());
        assert!(matches!(result, Err(ExportError::NoDataAvailable)));
    }

    #[test]
    fn export_reads_the_archived_record() {
        let store = MemoryStore::default();
        let record = AssessmentRecord {
            personal_info: None,
            functional_capacity: FunctionalCapacityRecord::uniform("0"),
            environmental_factors: EnvironmentalFactorsRecord::uniform("4"),
        };
        let completed = CompletedAssessment {
            summary: summarize(&record),
            record,
            completed_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap(),
        };
        save_completed(&store, &completed).expect("archive saved");

        let bytes = export_completed(&store, &CsvExporter).expect("csv export");
        let rows = read_csv_rows(bytes.as_slice()).expect("csv parses");
        assert_eq!(rows.len(), 26);
        assert_eq!(rows[24].value, "No disability (0-4%)");
        assert_eq!(rows[25].value, "Highly supportive environment");
    }
}
