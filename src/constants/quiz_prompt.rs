use crate::models::{domain::Difficulty, dto::QuizPayload};

pub const EASY_INSTRUCTIONS: &str =
    "Ask factual, direct questions whose answers appear explicitly in the text.";
pub const MEDIUM_INSTRUCTIONS: &str =
    "Ask conceptual questions that require understanding and light reasoning.";
pub const HARD_INSTRUCTIONS: &str =
    "Ask analytical, multi-step questions with tricky but fair distractors.";

pub const GENERATION_RULES: &str = "Rules:
- Do NOT use any knowledge outside the provided text.
- Each question must have exactly 4 options.
- Options must be realistic and non-trivial.
- Exactly one option is correct per question.
- Make sure the correct option is unambiguously supported by the text.";

pub const REPAIR_RULES: &str = "Rules:
- Keep the questions, options and answers that are present; do not invent new facts.
- Every question must have exactly 4 options.
- correct_answer must be one of \"A\", \"B\", \"C\", \"D\".
- Return ONLY the JSON object. No prose, no markdown fences, no comments.";

pub fn difficulty_instructions(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => EASY_INSTRUCTIONS,
        Difficulty::Medium => MEDIUM_INSTRUCTIONS,
        Difficulty::Hard => HARD_INSTRUCTIONS,
    }
}

/// Prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn output_shape_example() -> String {
    serde_json::to_string_pretty(&QuizPayload::example()).unwrap_or_default()
}

fn output_schema() -> String {
    serde_json::to_string_pretty(&schemars::schema_for!(QuizPayload)).unwrap_or_default()
}

pub fn build_generation_prompt(
    content: &str,
    num_questions: usize,
    difficulty: Difficulty,
    content_budget: usize,
) -> String {
    format!(
        "You are an MCQ quiz generator.

You will be given some source text. Based ONLY on that text, generate exactly {num_questions} multiple-choice questions.

Difficulty: {level} - {instructions}

{rules}

Return ONLY valid JSON, nothing else. The JSON must have this exact shape:
{shape}

Source text:
\"\"\"{source}\"\"\"",
        level = difficulty.as_str().to_uppercase(),
        instructions = difficulty_instructions(difficulty),
        rules = GENERATION_RULES,
        shape = output_shape_example(),
        source = truncate_chars(content, content_budget),
    )
}

pub fn build_repair_prompt(raw_output: &str, max_questions: usize, raw_budget: usize) -> String {
    format!(
        "Convert the following into strict JSON of this exact shape, with at most {max_questions} questions:
{shape}

The JSON must validate against this schema:
{schema}

{rules}

Text to convert:
\"\"\"{raw}\"\"\"",
        shape = output_shape_example(),
        schema = output_schema(),
        rules = REPAIR_RULES,
        raw = truncate_chars(raw_output, raw_budget),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn generation_prompt_embeds_count_difficulty_and_truncated_source() {
        let content = format!("{}{}", "a".repeat(10), "b".repeat(10));
        let prompt = build_generation_prompt(&content, 7, Difficulty::Hard, 10);

        assert!(prompt.contains("generate exactly 7 multiple-choice questions"));
        assert!(prompt.contains("HARD"));
        assert!(prompt.contains(HARD_INSTRUCTIONS));
        assert!(prompt.contains("\"correct_answer\": \"A\""));
        assert!(prompt.contains(&"a".repeat(10)));
        assert!(!prompt.contains(&"b".repeat(10)));
    }

    #[test]
    fn repair_prompt_caps_prior_output() {
        let raw = format!("{}{}", "x".repeat(30), "TAIL");
        let prompt = build_repair_prompt(&raw, 3, 30);

        assert!(prompt.contains("at most 3 questions"));
        assert!(prompt.contains(&"x".repeat(30)));
        assert!(!prompt.contains("TAIL"));
        assert!(prompt.contains("\"questions\""));
    }
}
