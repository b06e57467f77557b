use icf_assessment::config::AppConfig;
use icf_assessment::error::AppError;
use icf_assessment::workflows::assessment::AssessmentRecord;
use metrics_exporter_prometheus::PrometheusHandle;
use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// An explicit `--store` wins over `APP_DRAFT_STORE`.
pub(crate) fn resolve_store_path(explicit: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(AppConfig::load()?.storage.draft_store),
    }
}

pub(crate) fn read_record(path: &Path) -> Result<AssessmentRecord, AppError> {
    let contents = std::fs::read_to_string(path)?;
    parse_record(&contents).map_err(|err| {
        IoError::new(
            ErrorKind::InvalidData,
            format!("{} is not a valid assessment record: {err}", path.display()),
        )
        .into()
    })
}

pub(crate) fn parse_record(raw: &str) -> Result<AssessmentRecord, serde_json::Error> {
    serde_json::from_str(raw)
}
