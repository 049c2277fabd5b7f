use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{InterviewField, InterviewRecord, QaPair, SaveInterviewRequest};
use crate::storage::InterviewRepository;

/// Validates save requests and hands finished records to a repository.
#[derive(Clone)]
pub struct InterviewRecordStore {
    repository: Arc<dyn InterviewRepository>,
}

impl InterviewRecordStore {
    pub fn new(repository: Arc<dyn InterviewRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn InterviewRepository> {
        &self.repository
    }

    /// Persist one interview. Missing or malformed required fields fail with
    /// `ValidationError` before anything is written; schema violations and
    /// storage failures surface as `PersistenceError`.
    pub async fn save(&self, request: SaveInterviewRequest) -> AppResult<InterviewRecord> {
        let (raw_field, raw_pairs) = match (request.interview_field, request.qa_pairs) {
            (Some(field), Some(pairs @ Value::Array(_))) if is_truthy(&field) => (field, pairs),
            _ => {
                debug!("Save request missing interviewField or qaPairs");
                return Err(AppError::validation("interviewField, qaPairs"));
            }
        };

        let interview_field = field_text(&raw_field)
            .parse::<InterviewField>()
            .map_err(|e| AppError::persistence(e.to_string()))?;

        let qa_pairs: Vec<QaPair> = serde_json::from_value(raw_pairs).map_err(|e| {
            AppError::persistence(format!(
                "Interview validation failed: qaPairs: Cast to embedded failed: {}",
                e
            ))
        })?;

        let record = InterviewRecord::new(interview_field, qa_pairs);
        self.repository.insert(&record).await?;

        info!(
            record_id = %record.id,
            interview_field = %record.interview_field,
            qa_pairs = record.qa_pairs.len(),
            backend = self.repository.name(),
            "Interview saved"
        );

        Ok(record)
    }
}

// Presence check with the same notion of "empty" a JavaScript client uses.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
