use crate::infra::{read_record, resolve_store_path};
use clap::Args;
use icf_assessment::error::AppError;
use icf_assessment::workflows::assessment::{
    export_completed, exporter_for, save_completed, summarize, AssessmentSummary,
    AssessmentWizard, EnvironmentalDomain, EnvironmentalFactorsRecord, ExportError, ExportFormat,
    ExportSection, FileStore, FunctionalCapacityRecord, FunctionalDomain, Gender, KeyValueStore,
    PersonalInfo, StepSubmission,
};
use std::io::Write;
use std::path::PathBuf;

pub(crate) const NO_DATA_NOTICE: &str = "No assessment data available";

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Store file used to archive the completed assessment (defaults to APP_DRAFT_STORE)
    #[arg(long)]
    pub(crate) store: Option<PathBuf>,
    /// Format printed at the end of the walkthrough
    #[arg(long, default_value = "csv")]
    pub(crate) format: ExportFormat,
}

#[derive(Args, Debug)]
pub(crate) struct SummaryArgs {
    /// JSON file holding an assessment record
    #[arg(long)]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Store file holding the archived assessment (defaults to APP_DRAFT_STORE)
    #[arg(long)]
    pub(crate) store: Option<PathBuf>,
    /// Output encoding: csv or json
    #[arg(long, default_value = "csv")]
    pub(crate) format: ExportFormat,
    /// Write the export here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { store, format } = args;
    let store = FileStore::new(resolve_store_path(store)?);

    println!("ICF assessment demo");
    let mut wizard = AssessmentWizard::new();
    for (index, submission) in sample_submissions().into_iter().enumerate() {
        let label = submission.step().label();
        let next = wizard.submit_step(index, submission)?;
        println!("- {label} submitted, now on {}", next.label());
    }

    let completed = wizard.complete()?;
    render_summary(&completed.summary);

    save_completed(&store, &completed)?;
    println!(
        "\nArchived assessment to {} at {}",
        store.path().display(),
        completed.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let bytes = export_completed(&store, exporter_for(format).as_ref())?;
    println!("\n{} export ({})", format.label().to_uppercase(), format.file_name());
    std::io::stdout().write_all(&bytes)?;
    println!();
    Ok(())
}

pub(crate) fn run_summary(args: SummaryArgs) -> Result<(), AppError> {
    let record = read_record(&args.input)?;
    render_summary(&summarize(&record));
    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs {
        store,
        format,
        output,
    } = args;
    let store = FileStore::new(resolve_store_path(store)?);

    let Some(bytes) = export_bytes(&store, format)? else {
        println!("{NO_DATA_NOTICE}");
        return Ok(());
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &bytes)?;
            println!("Wrote {} export to {}", format.label(), path.display());
        }
        None => std::io::stdout().write_all(&bytes)?,
    }
    Ok(())
}

/// Encoded archive, or `None` when nothing has been completed yet.
pub(crate) fn export_bytes(
    store: &dyn KeyValueStore,
    format: ExportFormat,
) -> Result<Option<Vec<u8>>, AppError> {
    match export_completed(store, exporter_for(format).as_ref()) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(ExportError::NoDataAvailable) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn sample_submissions() -> Vec<StepSubmission> {
    let mut patient = PersonalInfo::new("Maria", "Lopez", 58, Gender::Female);
    patient.contact_phone = Some("555-0142".to_string());
    patient.medical_history = Some("Left hemiparesis after stroke (2023)".to_string());

    let functional = FunctionalCapacityRecord::uniform("1")
        .with_rating(FunctionalDomain::MovementFunctions, "3")
        .with_rating(FunctionalDomain::Mobility, "3")
        .with_rating(FunctionalDomain::SelfCare, "2")
        .with_rating(FunctionalDomain::VoiceSpeechFunctions, "9");

    let environmental = EnvironmentalFactorsRecord::uniform("2")
        .with_rating(EnvironmentalDomain::NaturalEnvironment, "-1")
        .with_rating(EnvironmentalDomain::Attitudes, "8");

    vec![
        StepSubmission::PersonalInfo(patient),
        StepSubmission::FunctionalCapacity(functional),
        StepSubmission::EnvironmentalFactors(environmental),
    ]
}

fn render_summary(summary: &AssessmentSummary) {
    println!("\nAssessment summary");
    match summary.disability_percentage {
        Some(percentage) => println!(
            "- Overall disability: {} ({percentage:.1}%)",
            summary.disability_label
        ),
        None => println!("- Overall disability: {}", summary.disability_label),
    }
    match summary.environmental_mean {
        Some(mean) => println!(
            "- Environmental context: {} (mean {mean:+.2})",
            summary.environmental_label
        ),
        None => println!("- Environmental context: {}", summary.environmental_label),
    }

    for section in ExportSection::ordered() {
        println!("{}:", section.label());
        for row in summary.rows_in(section) {
            println!("  - {}: {}", row.field, row.value);
        }
    }
}
