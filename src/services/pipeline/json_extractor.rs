use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::normalizer::{RawQuestion, QUESTION_ALIASES};
use super::relaxed_json::parse_relaxed;

static FENCED_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[\w+-]*\s*(\{.*?\})\s*```").expect("FENCED_OBJECT is a valid regex pattern")
});

const QUESTION_LIST_KEYS: [&str; 3] = ["questions", "items", "mcqs"];

/// Structured object recovered from raw model output, before any validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateBlob {
    root: Map<String, Value>,
}

impl CandidateBlob {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(root) => Some(Self { root }),
            Value::Array(items) => {
                let mut root = Map::new();
                root.insert("questions".to_string(), Value::Array(items));
                Some(Self { root })
            }
            _ => None,
        }
    }

    /// Question records in the blob. A mapping that is itself a single question
    /// counts as a batch of one.
    pub fn raw_questions(&self) -> Vec<RawQuestion> {
        let list = QUESTION_LIST_KEYS
            .iter()
            .find_map(|key| self.root.get(*key).and_then(Value::as_array));

        match list {
            Some(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(RawQuestion::new(map.clone())),
                    other => {
                        log::debug!("skipping non-object question entry: {}", other);
                        None
                    }
                })
                .collect(),
            None if QUESTION_ALIASES.iter().any(|k| self.root.contains_key(*k)) => {
                vec![RawQuestion::new(self.root.clone())]
            }
            None => Vec::new(),
        }
    }
}

/// Rewrites typographic quotes to ASCII so strict parsing has a chance.
pub fn straighten_quotes(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => '\'',
            other => other,
        })
        .collect()
}

/// Locates a question blob in noisy model output. Candidates are tried in order:
/// fenced `{...}` blocks, the first `{` to the last `}`, then the first `[` to the
/// last `]`. Each is parsed strictly as given, then strictly and permissively
/// after straightening typographic quotes. Blobs without question records are
/// skipped.
pub fn extract(raw: &str) -> Option<CandidateBlob> {
    candidates(raw).into_iter().find_map(|candidate| {
        let value = serde_json::from_str::<Value>(candidate).ok().or_else(|| {
            let straightened = straighten_quotes(candidate);
            serde_json::from_str::<Value>(&straightened)
                .ok()
                .or_else(|| parse_relaxed(&straightened))
        })?;
        CandidateBlob::from_value(value).filter(|blob| !blob.raw_questions().is_empty())
    })
}

fn candidates(text: &str) -> Vec<&str> {
    let mut found: Vec<&str> = FENCED_OBJECT
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    if let Some(span) = span_between(text, '{', '}') {
        found.push(span);
    }
    if let Some(span) = span_between(text, '[', ']') {
        found.push(span);
    }
    found
}

fn span_between(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRICT: &str = r#"{"questions":[{"question":"Q1?","options":["a","b","c","d"],"correct_answer":"B"}]}"#;

    fn question_count(raw: &str) -> usize {
        extract(raw).map(|b| b.raw_questions().len()).unwrap_or(0)
    }

    #[test]
    fn extracts_strict_json() {
        assert_eq!(question_count(STRICT), 1);
    }

    #[test]
    fn fenced_block_matches_unfenced_result() {
        let fenced = format!("Sure! Here's the quiz: ```json\n{}\n```", STRICT);
        assert_eq!(extract(&fenced), extract(STRICT));
    }

    #[test]
    fn prefers_fenced_block_over_surrounding_braces() {
        let raw = format!(
            "Notes {{not json}} then\n```\n{}\n```\nand {{ more }}",
            STRICT
        );
        assert_eq!(question_count(&raw), 1);
    }

    #[test]
    fn handles_leading_prose_without_fence() {
        let raw = format!("Here you go:\n{}\nHope this helps!", STRICT);
        assert_eq!(question_count(&raw), 1);
    }

    #[test]
    fn wraps_bare_arrays() {
        let raw = r#"Output: [{"question":"Q?","options":["a","b","c","d"],"answer":"A"}]"#;
        assert_eq!(question_count(raw), 1);
    }

    #[test]
    fn survives_smart_quotes() {
        let raw = "{\u{201C}questions\u{201D}:[{\u{201C}question\u{201D}:\u{201C}Who\u{2019}s first?\u{201D},\u{201C}options\u{201D}:[\u{201C}a\u{201D},\u{201C}b\u{201D},\u{201C}c\u{201D},\u{201C}d\u{201D}],\u{201C}correct_answer\u{201D}:\u{201C}A\u{201D}}]}";
        assert_eq!(question_count(raw), 1);
    }

    #[test]
    fn keeps_typographic_quotes_inside_valid_strings() {
        let raw = "{\"questions\":[{\"question\":\"What does \u{201C}photosynthesis\u{201D} mean?\",\"options\":[\"a\",\"b\",\"c\",\"d\"],\"correct_answer\":\"A\"}]}";
        assert!(serde_json::from_str::<Value>(raw).is_ok());

        let questions = extract(raw).expect("blob").raw_questions();
        assert_eq!(questions.len(), 1);
        let mcq = crate::services::pipeline::normalizer::normalize_question(&questions[0]).unwrap();
        assert_eq!(mcq.question(), "What does \u{201C}photosynthesis\u{201D} mean?");
    }

    #[test]
    fn skips_spans_without_question_records() {
        assert!(extract("According to the passage [1], what is X?").is_none());
        assert!(extract(r#"{"error": "rate limited"}"#).is_none());
    }

    #[test]
    fn falls_back_to_relaxed_syntax() {
        let raw = "{'questions': [{'question': 'Q?', 'options': ['a','b','c','d',], 'correct_answer': 'C',},]}";
        assert_eq!(question_count(raw), 1);
    }

    #[test]
    fn single_question_object_is_a_batch_of_one() {
        let raw = r#"{"stem":"Q?","choices":["a","b","c","d"],"answer":"2"}"#;
        assert_eq!(question_count(raw), 1);
    }

    #[test]
    fn absent_when_no_structure() {
        assert!(extract("I cannot help with that.").is_none());
        assert!(extract("} backwards {").is_none());
        assert!(extract("").is_none());
    }
}
