//! Document-store collaborators for interview records.

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PostgresRepository;

use std::future::Future;
use std::pin::Pin;

use crate::error::AppResult;
use crate::models::InterviewRecord;

/// A durable home for interview records.
///
/// Implementations only ever append; records are never updated or removed.
pub trait InterviewRepository: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &str;

    /// Persist one record. A failure means the record was not saved.
    fn insert<'a>(
        &'a self,
        record: &'a InterviewRecord,
    ) -> Pin<Box<dyn Future<Output = AppResult<()>> + Send + 'a>>;

    /// Cheap reachability check for health reporting.
    fn ping(&self) -> Pin<Box<dyn Future<Output = AppResult<()>> + Send + '_>>;
}
