use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, MutexGuard};

use super::InterviewRepository;
use crate::error::{AppError, AppResult};
use crate::models::InterviewRecord;

/// In-process repository. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: Mutex<Vec<InterviewRecord>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored so far, in insertion order.
    pub fn records(&self) -> Vec<InterviewRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A push either happened or it didn't, so a panic elsewhere while the
    // lock was held never leaves the list half-written.
    fn lock(&self) -> MutexGuard<'_, Vec<InterviewRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Memory store lock was poisoned; recovering stored records");
            poisoned.into_inner()
        })
    }
}

impl InterviewRepository for MemoryRepository {
    fn name(&self) -> &str {
        "memory"
    }

    fn insert<'a>(
        &'a self,
        record: &'a InterviewRecord,
    ) -> Pin<Box<dyn Future<Output = AppResult<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut records = self.lock();

            if records.iter().any(|existing| existing.id == record.id) {
                return Err(AppError::persistence(format!(
                    "duplicate key: record {} already exists",
                    record.id
                )));
            }

            records.push(record.clone());
            Ok(())
        })
    }

    fn ping(&self) -> Pin<Box<dyn Future<Output = AppResult<()>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }
}
