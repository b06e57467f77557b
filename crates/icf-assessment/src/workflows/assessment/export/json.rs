use super::super::report::ExportRow;
use super::{AssessmentExporter, ExportError, ExportFormat};

#[derive(Debug, Clone, Copy)]
pub struct JsonExporter {
    pub pretty: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl AssessmentExporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn export(&self, rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(rows)?
        } else {
            serde_json::to_vec(rows)?
        };
        Ok(bytes)
    }
}
