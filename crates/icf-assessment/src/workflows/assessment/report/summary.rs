use super::super::domain::AssessmentRecord;
use super::super::scoring::{
    disability_category, disability_percentage, environmental_context, environmental_mean,
};
use super::projection::project;
use super::views::AssessmentSummary;

pub fn summarize(record: &AssessmentRecord) -> AssessmentSummary {
    let disability = disability_category(&record.functional_capacity);
    let environment = environmental_context(&record.environmental_factors);

    AssessmentSummary {
        disability_category: disability,
        disability_label: disability.label().to_string(),
        disability_percentage: disability_percentage(&record.functional_capacity),
        environmental_context: environment,
        environmental_label: environment.label().to_string(),
        environmental_mean: environmental_mean(&record.environmental_factors),
        rows: project(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::domain::{
        EnvironmentalFactorsRecord, FunctionalCapacityRecord,
    };
    use crate::workflows::assessment::report::ExportSection;
    use crate::workflows::assessment::scoring::{DisabilityCategory, EnvironmentalContext};

    #[test]
    fn summary_agrees_with_result_rows() {
        let record = AssessmentRecord {
            personal_info: None,
            functional_capacity: FunctionalCapacityRecord::uniform("3"),
            environmental_factors: EnvironmentalFactorsRecord::uniform("-1"),
        };

        let summary = summarize(&record);
        assert_eq!(summary.disability_category, DisabilityCategory::Severe);
        assert_eq!(summary.disability_percentage, Some(75.0));
        assert_eq!(
            summary.environmental_context,
            EnvironmentalContext::MildlyChallenging
        );

        let results = summary.rows_in(ExportSection::AssessmentResults);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].value, summary.disability_label);
        assert_eq!(results[1].value, summary.environmental_label);
    }

    #[test]
    fn empty_record_summarizes_as_not_available() {
        let summary = summarize(&AssessmentRecord::default());
        assert_eq!(summary.disability_label, "Not available");
        assert_eq!(summary.environmental_label, "Not available");
        assert!(summary.disability_percentage.is_none());
        assert_eq!(summary.rows.len(), 26);
    }
}
