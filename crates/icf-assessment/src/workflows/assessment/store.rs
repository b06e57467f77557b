use super::report::CompletedAssessment;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Key under which the most recently completed assessment is archived.
pub const COMPLETED_ASSESSMENT_KEY: &str = "icf_assessment.completed";

/// String key-value storage for drafts and the completed assessment.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored assessment is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub fn save_completed<S>(store: &S, completed: &CompletedAssessment) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let payload = serde_json::to_string(completed)?;
    store.set(COMPLETED_ASSESSMENT_KEY, payload)?;
    info!(completed_at = %completed.completed_at, "archived completed assessment");
    Ok(())
}

pub fn load_completed<S>(store: &S) -> Result<Option<CompletedAssessment>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    match store.get(COMPLETED_ASSESSMENT_KEY)? {
        Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
        None => {
            debug!("no completed assessment archived");
            Ok(None)
        }
    }
}

pub fn clear_completed<S>(store: &S) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    store.remove(COMPLETED_ASSESSMENT_KEY)
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    fn entries(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store mutex poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries()?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Key-value store persisted as a single JSON object on disk. Every call
/// re-reads the file so separate CLI invocations see each other's writes.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        let staging = self.staging_path();
        fs::write(&staging, contents)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }

    /// Sibling file the next snapshot is written to before it replaces the
    /// store, so an interrupted write never truncates existing entries.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::domain::{
        AssessmentRecord, EnvironmentalFactorsRecord, FunctionalCapacityRecord, Gender,
        PersonalInfo,
    };
    use crate::workflows::assessment::report::summarize;
    use chrono::{TimeZone, Utc};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn completed() -> CompletedAssessment {
        let record = AssessmentRecord {
            personal_info: Some(PersonalInfo::new("Ada", "Lovelace", 36, Gender::Female)),
            functional_capacity: FunctionalCapacityRecord::uniform("2"),
            environmental_factors: EnvironmentalFactorsRecord::uniform("9"),
        };
        CompletedAssessment {
            summary: summarize(&record),
            record,
            completed_at: Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    fn scratch_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock after epoch")
            .as_nanos();
        std::env::temp_dir()
            .join(format!("icf-assessment-{}-{nanos}", std::process::id()))
            .join(name)
    }

    #[test]
    fn memory_store_round_trips_completed_assessment() {
        let store = MemoryStore::default();
        assert!(load_completed(&store).expect("load").is_none());

        let archived = completed();
        save_completed(&store, &archived).expect("save");
        assert_eq!(load_completed(&store).expect("load"), Some(archived));

        clear_completed(&store).expect("clear");
        assert!(load_completed(&store).expect("load").is_none());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let path = scratch_path("store.json");
        let archived = completed();

        save_completed(&FileStore::new(&path), &archived).expect("save");
        let reopened = FileStore::new(&path);
        assert_eq!(load_completed(&reopened).expect("load"), Some(archived));

        reopened.set("draft", "{}".to_string()).expect("second key");
        assert_eq!(reopened.get("draft").expect("get"), Some("{}".to_string()));
        assert!(reopened.get(COMPLETED_ASSESSMENT_KEY).expect("get").is_some());

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn rewrites_replace_the_file_without_leaving_staging_behind() {
        let path = scratch_path("store.json");
        let store = FileStore::new(&path);
        store.set("first", "1".to_string()).expect("first write");

        let staging = store.staging_path();
        fs::write(&staging, "{ interrupted").expect("stale staging file");

        store.set("second", "2".to_string()).expect("second write");
        assert!(!staging.exists());
        assert_eq!(store.get("first").expect("get"), Some("1".to_string()));
        assert_eq!(store.get("second").expect("get"), Some("2".to_string()));
        assert_eq!(staging.file_name().and_then(|name| name.to_str()), Some("store.json.tmp"));

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let store = FileStore::new(scratch_path("absent.json"));
        assert!(load_completed(&store).expect("load").is_none());
        store.remove(COMPLETED_ASSESSMENT_KEY).expect("remove is a no-op");
    }

    #[test]
    fn corrupt_archive_is_a_serialization_error() {
        let store = MemoryStore::default();
        store
            .set(COMPLETED_ASSESSMENT_KEY, "not json".to_string())
            .expect("set");
        assert!(matches!(
            load_completed(&store),
            Err(StoreError::Serialization(_))
        ));
    }
}
