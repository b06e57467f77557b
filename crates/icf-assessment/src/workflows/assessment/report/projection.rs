use super::super::codec::label_for;
use super::super::domain::{
    non_blank, AssessmentRecord, EnvironmentalDomain, FunctionalDomain, FunctionalSection,
    RatingCode, RatingScale,
};
use super::super::scoring::{disability_category, environmental_context};
use super::views::{ExportRow, ExportSection};

/// Placeholder for any field the assessor left empty.
pub const NOT_PROVIDED: &str = "Not provided";

/// Flatten a record into the fixed 26-row table shared by every exporter:
/// 5 patient rows, 6 body-function rows, 8 activity/participation rows,
/// 5 environmental rows and 2 result rows, always in that order.
pub fn project(record: &AssessmentRecord) -> Vec<ExportRow> {
    let mut rows = Vec::with_capacity(26);

    let info = record.personal_info.as_ref();
    let section = ExportSection::PatientInfo;
    rows.push(ExportRow::new(
        section,
        "Name",
        info.map(|info| info.full_name())
            .unwrap_or_else(|| NOT_PROVIDED.to_string()),
    ));
    rows.push(ExportRow::new(
        section,
        "Age",
        info.map(|info| info.age.to_string())
            .unwrap_or_else(|| NOT_PROVIDED.to_string()),
    ));
    rows.push(ExportRow::new(
        section,
        "Gender",
        info.map(|info| info.gender.label()).unwrap_or(NOT_PROVIDED),
    ));
    rows.push(ExportRow::new(
        section,
        "Contact",
        info.and_then(|info| non_blank(info.contact_phone.as_deref()))
            .unwrap_or(NOT_PROVIDED),
    ));
    rows.push(ExportRow::new(
        section,
        "Medical History",
        info.and_then(|info| non_blank(info.medical_history.as_deref()))
            .unwrap_or(NOT_PROVIDED),
    ));

    let functional = &record.functional_capacity;
    for (functional_section, export_section) in [
        (FunctionalSection::BodyFunctions, ExportSection::BodyFunctions),
        (
            FunctionalSection::ActivityParticipation,
            ExportSection::ActivityParticipation,
        ),
    ] {
        for domain in FunctionalDomain::in_section(functional_section) {
            rows.push(ExportRow::new(
                export_section,
                domain.label(),
                rating_label(functional.rating(domain), RatingScale::Impairment),
            ));
        }
    }

    let environmental = &record.environmental_factors;
    for domain in EnvironmentalDomain::ordered() {
        rows.push(ExportRow::new(
            ExportSection::EnvironmentalFactors,
            domain.label(),
            rating_label(environmental.rating(domain), RatingScale::Environmental),
        ));
    }

    rows.push(ExportRow::new(
        ExportSection::AssessmentResults,
        "Overall Disability Level",
        disability_category(functional).label(),
    ));
    rows.push(ExportRow::new(
        ExportSection::AssessmentResults,
        "Environmental Context",
        environmental_context(environmental).label(),
    ));

    rows
}

fn rating_label(code: Option<&RatingCode>, scale: RatingScale) -> String {
    code.map(|code| label_for(code, scale))
        .unwrap_or_else(|| NOT_PROVIDED.to_string())
}
