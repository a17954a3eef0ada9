use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The JSON shape models are asked to emit. Only used to render the prompt
/// example and schema; parsing goes through the lenient pipeline instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct QuizPayload {
    pub questions: Vec<PayloadQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct PayloadQuestion {
    /// The question stem.
    pub question: String,
    /// Exactly four answer options.
    pub options: Vec<String>,
    /// One of "A", "B", "C", "D".
    pub correct_answer: String,
}

impl QuizPayload {
    pub fn example() -> Self {
        Self {
            questions: vec![PayloadQuestion {
                question: "Question text?".to_string(),
                options: ["Option A", "Option B", "Option C", "Option D"]
                    .iter()
                    .map(|o| o.to_string())
                    .collect(),
                correct_answer: "A".to_string(),
            }],
        }
    }
}
