use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::warn;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::errors::AppError;

/// Whole-collection persistence for employee records. Entries are kept as
/// raw JSON so that stored data the current schema does not describe
/// survives a rewrite.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Current collection; empty when nothing is stored yet or the stored
    /// contents are not a JSON array.
    async fn load(&self) -> Result<Vec<Value>, AppError>;

    /// Replaces the stored collection.
    async fn save(&self, records: &[Value]) -> Result<(), AppError>;

    /// Stored contents as-is, or `None` when nothing has been written.
    async fn snapshot(&self) -> Result<Option<Value>, AppError>;
}

/// A single pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    async fn read(&self) -> Result<Option<Vec<u8>>, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl EmployeeStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Value>, AppError> {
        let Some(bytes) = self.read().await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(records)) => Ok(records),
            Ok(_) => {
                warn!("Ignoring employee file {}: not a JSON array", self.path.display());
                Ok(Vec::new())
            }
            Err(err) => {
                warn!("Ignoring unreadable employee file {}: {}", self.path.display(), err);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, records: &[Value]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, to_pretty_json(&records)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn snapshot(&self) -> Result<Option<Value>, AppError> {
        let Some(bytes) = self.read().await? else {
            return Ok(None);
        };

        Ok(Some(serde_json::from_slice(&bytes).unwrap_or(Value::Null)))
    }
}

/// Four-space indentation, the layout existing data files already use.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(buf)
}

#[cfg(test)]
pub(crate) fn temp_data_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("employee-store-{}", uuid::Uuid::new_v4()))
        .join("employees.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::{sample_fields, EmployeeSubmission};

    fn sample_record(name: &str) -> Value {
        let mut fields = sample_fields();
        fields.insert("name".to_string(), name.to_string());
        let record = EmployeeSubmission::from_fields(&fields).into_record().unwrap();
        serde_json::to_value(record).unwrap()
    }

    async fn seed(store: &JsonFileStore, contents: &[u8]) {
        tokio::fs::create_dir_all(store.path().parent().unwrap()).await.unwrap();
        tokio::fs::write(store.path(), contents).await.unwrap();
    }

    #[tokio::test]
    async fn load_of_missing_file_is_empty() {
        let store = JsonFileStore::new(temp_data_file());

        assert!(store.load().await.unwrap().is_empty());
        assert!(store.snapshot().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_creates_parent_and_round_trips() {
        let store = JsonFileStore::new(temp_data_file());
        let records = vec![sample_record("First"), sample_record("Second")];

        store.save(&records).await.unwrap();

        assert_eq!(store.load().await.unwrap(), records);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn saved_file_is_pretty_printed_array() {
        let store = JsonFileStore::new(temp_data_file());
        store.save(&[sample_record("Only")]).await.unwrap();

        let text = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(text.starts_with("[\n    {\n        \"name\": \"Only\",\n        \"gender\": \"female\","));
    }

    #[tokio::test]
    async fn entries_outside_the_record_shape_are_loaded() {
        let store = JsonFileStore::new(temp_data_file());
        seed(&store, br#"[{"name":"Legacy","gender":"Male"},{"name":"Hand edited","extra":1}]"#).await;

        let records = store.load().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["gender"], "Male");
        assert_eq!(records[1]["extra"], 1);
    }

    #[tokio::test]
    async fn non_array_json_loads_empty() {
        let store = JsonFileStore::new(temp_data_file());
        seed(&store, br#"{"name":"Not a list"}"#).await;

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty_but_snapshots_null() {
        let store = JsonFileStore::new(temp_data_file());
        seed(&store, b"{ not json").await;

        assert!(store.load().await.unwrap().is_empty());
        assert_eq!(store.snapshot().await.unwrap(), Some(Value::Null));
    }

    #[tokio::test]
    async fn snapshot_returns_contents_verbatim() {
        let store = JsonFileStore::new(temp_data_file());
        seed(&store, br#"[{"name":"Hand edited","extra":1,"dob":"04-07-1990"}]"#).await;

        let snapshot = store.snapshot().await.unwrap().unwrap();
        assert_eq!(snapshot, serde_json::json!([{ "name": "Hand edited", "extra": 1, "dob": "04-07-1990" }]));

        let keys: Vec<&str> = snapshot[0].as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "extra", "dob"]);
    }
}
