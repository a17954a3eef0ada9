use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::domain::{Difficulty, Mcq};
use crate::models::dto::request::SourceKind;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuizResponse {
    pub generation_id: Uuid,
    pub source_type: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_label: Option<String>,
    pub difficulty: Difficulty,
    pub num_questions: usize,
    pub questions: Vec<Mcq>,
    pub created_at: DateTime<Utc>,
}

impl GenerateQuizResponse {
    pub fn new(
        source_type: SourceKind,
        source_label: Option<String>,
        difficulty: Difficulty,
        questions: Vec<Mcq>,
    ) -> Self {
        Self {
            generation_id: Uuid::new_v4(),
            source_type,
            source_label,
            difficulty,
            num_questions: questions.len(),
            questions,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
