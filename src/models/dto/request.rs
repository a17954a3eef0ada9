use serde::Deserialize;
use validator::Validate;

use crate::config::{DEFAULT_QUESTIONS, MAX_QUESTIONS, MIN_CONTENT_CHARS, MIN_QUESTIONS};
use crate::models::domain::{Difficulty, QuizRequestParams};

/// Where the content came from. Extraction happens upstream; this is only carried through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Pdf,
    Url,
    #[default]
    Text,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(
        min = MIN_CONTENT_CHARS,
        message = "Content too short; please provide more text."
    ))]
    pub content: String,

    #[serde(default)]
    pub source_type: SourceKind,

    #[serde(default)]
    pub source_label: Option<String>,

    #[serde(default = "default_difficulty")]
    pub difficulty: String,

    #[serde(default = "default_num_questions")]
    #[validate(range(min = MIN_QUESTIONS, max = MAX_QUESTIONS))]
    pub num_questions: u32,
}

fn default_difficulty() -> String {
    Difficulty::default().as_str().to_string()
}

fn default_num_questions() -> u32 {
    DEFAULT_QUESTIONS
}

impl GenerateQuizRequest {
    pub fn normalised_difficulty(&self) -> Difficulty {
        Difficulty::parse_lenient(&self.difficulty)
    }

    /// Whitespace-only padding must not satisfy the length rule.
    pub fn has_enough_content(&self) -> bool {
        self.content.trim().chars().count() as u64 >= MIN_CONTENT_CHARS
    }

    pub fn to_params(&self) -> QuizRequestParams {
        QuizRequestParams::new(
            self.content.clone(),
            self.num_questions as usize,
            self.normalised_difficulty(),
        )
    }
}
