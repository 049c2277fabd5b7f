use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub questions: Vec<String>,
}

impl UploadResponse {
    pub fn new(questions: Vec<String>) -> Self {
        Self {
            success: true,
            questions,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: bool,
}
