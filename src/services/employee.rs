use std::sync::Arc;

use log::{info, warn};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::models::employee::{EmployeeRecord, EmployeeSubmission};
use crate::storage::EmployeeStore;

pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
    // Serializes load-append-save so concurrent submissions cannot drop each other.
    write_lock: Mutex<()>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        EmployeeService {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Validates and normalizes a submission, then appends it to the stored collection.
    pub async fn register(&self, submission: EmployeeSubmission) -> Result<EmployeeRecord, AppError> {
        let record = submission.into_record().map_err(|err| {
            if let AppError::Validation(errors) = &err {
                warn!("Rejected employee submission, invalid fields: {:?}", errors.keys().collect::<Vec<_>>());
            }
            err
        })?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.store.load().await?;
        records.push(serde_json::to_value(&record)?);
        self.store.save(&records).await?;

        info!("Stored employee record ({} total)", records.len());
        Ok(record)
    }

    pub async fn list(&self) -> Result<Value, AppError> {
        self.store
            .snapshot()
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))
    }
}
