use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::AssessmentRecord;
use super::export::{exporter_for, ExportError, ExportFormat};
use super::report::{project, summarize, AssessmentSummary};
use super::wizard::{AssessmentWizard, StepSubmission, WizardStep};
use crate::error::AppError;

/// Stateless endpoints: every request carries the data it operates on and
/// nothing is kept between calls.
pub fn assessment_router() -> Router {
    Router::new()
        .route("/api/v1/assessment/steps", post(steps_handler))
        .route("/api/v1/assessment/summary", post(summary_handler))
        .route("/api/v1/assessment/export", post(export_handler))
}

#[derive(Debug, Serialize)]
pub(crate) struct StepsResponse {
    pub(crate) current_step: Option<WizardStep>,
    pub(crate) current_step_label: Option<&'static str>,
    pub(crate) record: AssessmentRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) summary: Option<AssessmentSummary>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportQuery {
    #[serde(default)]
    pub(crate) format: Option<String>,
}

/// Replay step submissions through a fresh wizard, in order. Sequence is
/// checked before the personal details are validated.
pub(crate) async fn steps_handler(
    Json(steps): Json<Vec<StepSubmission>>,
) -> Result<Json<StepsResponse>, AppError> {
    let mut wizard = AssessmentWizard::new();

    for (index, submission) in steps.into_iter().enumerate() {
        wizard.check_sequence(index, submission.step())?;
        if let StepSubmission::PersonalInfo(info) = &submission {
            info.validate()?;
        }
        wizard.submit_step(index, submission)?;
    }

    let current_step = wizard.current_step();
    Ok(Json(StepsResponse {
        current_step,
        current_step_label: current_step.map(WizardStep::label),
        record: wizard.record().clone(),
        summary: wizard.summary().ok(),
    }))
}

pub(crate) async fn summary_handler(
    Json(record): Json<AssessmentRecord>,
) -> Result<Json<AssessmentSummary>, AppError> {
    if let Some(info) = record.personal_info.as_ref() {
        info.validate()?;
    }

    Ok(Json(summarize(&record)))
}

pub(crate) async fn export_handler(
    Query(query): Query<ExportQuery>,
    Json(record): Json<AssessmentRecord>,
) -> Result<Response, AppError> {
    let format = match query.format.as_deref() {
        Some(raw) => raw.parse::<ExportFormat>()?,
        None => ExportFormat::Csv,
    };

    if record.is_empty() {
        return Err(ExportError::NoDataAvailable.into());
    }

    let rows = project(&record);
    let bytes = exporter_for(format).export(&rows).map_err(|error| {
        warn!(%error, %format, "assessment export failed");
        AppError::from(error)
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        bytes,
    )
        .into_response())
}
