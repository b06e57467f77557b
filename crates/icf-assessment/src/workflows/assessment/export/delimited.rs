use super::super::report::ExportRow;
use super::{AssessmentExporter, ExportError, ExportFormat};
use std::io::Read;

const HEADER: [&str; 3] = ["Section", "Field", "Value"];

/// Three-column CSV: `Section,Field,Value`, one record per projected row.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl AssessmentExporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn export(&self, rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(HEADER)?;
        for row in rows {
            writer.write_record([&row.section, &row.field, &row.value])?;
        }

        writer
            .into_inner()
            .map_err(|err| ExportError::Io(err.into_error()))
    }
}

/// Parse a CSV produced by [`CsvExporter`] back into rows.
pub fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<ExportRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    csv_reader
        .records()
        .map(|record| {
            let record = record?;
            Ok(ExportRow {
                section: record.get(0).unwrap_or_default().to_string(),
                field: record.get(1).unwrap_or_default().to_string(),
                value: record.get(2).unwrap_or_default().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::report::ExportSection;

    #[test]
    fn writes_header_and_quotes_embedded_commas() {
        let rows = vec![ExportRow::new(
            ExportSection::PatientInfo,
            "Medical History",
            "asthma, hypertension",
        )];

        let bytes = CsvExporter.export(&rows).expect("csv export");
        let text = String::from_utf8(bytes).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Section,Field,Value"));
        assert_eq!(
            lines.next(),
            Some("Patient Info,Medical History,\"asthma, hypertension\"")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn exported_rows_read_back_unchanged() {
        let rows = vec![
            ExportRow::new(ExportSection::EnvironmentalFactors, "Attitudes", "+2 (Facilitator)"),
            ExportRow::new(ExportSection::AssessmentResults, "Environmental Context", "Neutral environment"),
        ];

        let bytes = CsvExporter.export(&rows).expect("csv export");
        let parsed = read_csv_rows(bytes.as_slice()).expect("csv parses");
        assert_eq!(parsed, rows);
    }
}
