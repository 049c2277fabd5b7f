use std::future::Future;
use std::pin::Pin;

use deadpool_postgres::{Config as PoolConfig, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio::sync::OnceCell;
use tokio_postgres::NoTls;
use tracing::{debug, error, info};

use super::InterviewRepository;
use crate::error::{AppError, AppResult};
use crate::models::{InterviewField, InterviewRecord};

/// Interview documents live in a single table; the Q/A list is kept as one
/// JSONB document so its order and shape round-trip untouched.
pub struct PostgresRepository {
    pool: Pool,
    // Set once the table is known to exist; stays empty after a failed attempt.
    schema_ready: OnceCell<()>,
}

impl PostgresRepository {
    /// Builds the connection pool. No connection is opened until first use.
    pub fn connect(database_url: &str) -> AppResult<Self> {
        let mut cfg = PoolConfig::new();
        cfg.url = Some(database_url.to_string());
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| AppError::config(format!("Pool creation failed: {}", e)))?;

        Ok(Self {
            pool,
            schema_ready: OnceCell::new(),
        })
    }

    /// Creates the `interviews` table if missing. The CHECK constraint mirrors
    /// [`InterviewField`] so rows written by other clients obey the same set.
    ///
    /// Runs at most once successfully; every insert calls it, so a database
    /// that was down at startup gets its table on the first write after it
    /// comes back.
    pub async fn ensure_schema(&self) -> AppResult<()> {
        self.schema_ready
            .get_or_try_init(|| async {
                let client = self.pool.get().await?;
                client.batch_execute(&create_table_sql()).await?;
                info!("Interview storage schema ready");
                Ok::<(), AppError>(())
            })
            .await?;
        Ok(())
    }

    pub fn schema_ready(&self) -> bool {
        self.schema_ready.initialized()
    }
}

fn create_table_sql() -> String {
    let allowed = InterviewField::ALL
        .iter()
        .map(|field| format!("'{}'", field.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"
        CREATE TABLE IF NOT EXISTS interviews (
            id UUID PRIMARY KEY,
            interview_field TEXT NOT NULL CHECK (interview_field IN ({allowed})),
            qa_pairs JSONB NOT NULL,
            "timestamp" TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#
    )
}

impl InterviewRepository for PostgresRepository {
    fn name(&self) -> &str {
        "postgres"
    }

    fn insert<'a>(
        &'a self,
        record: &'a InterviewRecord,
    ) -> Pin<Box<dyn Future<Output = AppResult<()>> + Send + 'a>> {
        Box::pin(async move {
            self.ensure_schema().await?;

            let client = self.pool.get().await.map_err(|e| {
                error!("Failed to acquire storage connection: {}", e);
                AppError::from(e)
            })?;

            let qa_pairs = serde_json::to_value(&record.qa_pairs)
                .map_err(|e| AppError::persistence(format!("Failed to encode qaPairs: {}", e)))?;

            client
                .execute(
                    r#"
                    INSERT INTO interviews (id, interview_field, qa_pairs, "timestamp")
                    VALUES ($1, $2, $3, $4)
                    "#,
                    &[
                        &record.id,
                        &record.interview_field.as_str(),
                        &qa_pairs,
                        &record.timestamp,
                    ],
                )
                .await
                .map_err(|e| {
                    error!(record_id = %record.id, "Failed to insert interview: {}", e);
                    AppError::from(e)
                })?;

            debug!(record_id = %record.id, "Interview row inserted");
            Ok(())
        })
    }

    fn ping(&self) -> Pin<Box<dyn Future<Output = AppResult<()>> + Send + '_>> {
        Box::pin(async move {
            let client = self.pool.get().await?;
            client.simple_query("SELECT 1").await?;
            Ok(())
        })
    }
}
