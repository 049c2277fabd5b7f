use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Category an interview record is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterviewField {
    #[serde(rename = "SDE")]
    Sde,
    Business,
    Manager,
    #[serde(rename = "HR")]
    Hr,
}

impl InterviewField {
    pub const ALL: [InterviewField; 4] = [
        InterviewField::Sde,
        InterviewField::Business,
        InterviewField::Manager,
        InterviewField::Hr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewField::Sde => "SDE",
            InterviewField::Business => "Business",
            InterviewField::Manager => "Manager",
            InterviewField::Hr => "HR",
        }
    }
}

impl fmt::Display for InterviewField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInterviewField(pub String);

impl fmt::Display for UnknownInterviewField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Interview validation failed: interviewField: `{}` is not a valid enum value for path `interviewField`.",
            self.0
        )
    }
}

impl std::error::Error for UnknownInterviewField {}

impl FromStr for InterviewField {
    type Err = UnknownInterviewField;

    /// Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InterviewField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownInterviewField(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaPair {
    #[serde(default)]
    pub hr_question: String,
    #[serde(default)]
    pub candidate_answer: String,
}

impl QaPair {
    pub fn new(hr_question: impl Into<String>, candidate_answer: impl Into<String>) -> Self {
        Self {
            hr_question: hr_question.into(),
            candidate_answer: candidate_answer.into(),
        }
    }
}

/// A persisted interview session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    pub id: Uuid,
    pub interview_field: InterviewField,
    pub qa_pairs: Vec<QaPair>,
    pub timestamp: DateTime<Utc>,
}

impl InterviewRecord {
    pub fn new(interview_field: InterviewField, qa_pairs: Vec<QaPair>) -> Self {
        Self {
            id: Uuid::new_v4(),
            interview_field,
            qa_pairs,
            timestamp: Utc::now(),
        }
    }
}
