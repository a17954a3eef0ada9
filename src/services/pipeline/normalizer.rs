use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::domain::{AnswerLetter, Mcq, OPTION_COUNT};

pub const QUESTION_ALIASES: [&str; 4] = ["question", "stem", "prompt", "query"];
const OPTION_ALIASES: [&str; 2] = ["options", "choices"];
const ANSWER_ALIASES: [&str; 4] = ["correct_answer", "answer", "correct", "correct_option"];
const OPTION_TEXT_KEYS: [&str; 3] = ["text", "value", "option"];

const LETTER_KEYS: [&str; 4] = ["A", "B", "C", "D"];
const LOWER_LETTER_KEYS: [&str; 4] = ["a", "b", "c", "d"];
const DIGIT_KEYS: [&str; 4] = ["1", "2", "3", "4"];

static LETTER_ANSWER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:option\s+)?\(?([a-d])\s*[\).:]?$")
        .expect("LETTER_ANSWER is a valid regex pattern")
});

/// Loosely-typed question record straight out of a candidate blob. Nothing in
/// it is trusted until [`normalize_question`] accepts it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuestion {
    fields: Map<String, Value>,
}

impl RawQuestion {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    fn first_of(&self, aliases: &[&str]) -> Option<&Value> {
        aliases.iter().find_map(|key| self.fields.get(*key))
    }

    fn question_text(&self) -> Option<String> {
        QUESTION_ALIASES.iter().find_map(|key| {
            self.fields
                .get(*key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("question text missing or empty")]
    MissingQuestion,
    #[error("expected 4 usable options, found {0}")]
    WrongOptionCount(usize),
}

/// Coerces the accepted option shapes into at most four non-empty strings:
/// a list of strings, a list of `{text|value|option}` records, a map keyed
/// `A`-`D`, `a`-`d` or `1`-`4`, or failing those any map's values in order.
pub fn normalize_options(raw: &Value) -> Vec<String> {
    let mut options: Vec<String> = match raw {
        Value::Array(items) => items.iter().filter_map(option_text).collect(),
        Value::Object(map) => options_from_map(map),
        _ => Vec::new(),
    };
    options.truncate(OPTION_COUNT);
    options
}

fn options_from_map(map: &Map<String, Value>) -> Vec<String> {
    for keys in [LETTER_KEYS, LOWER_LETTER_KEYS, DIGIT_KEYS] {
        if keys.iter().all(|k| map.contains_key(*k)) {
            return keys
                .iter()
                .filter_map(|k| map.get(*k).and_then(option_text))
                .collect();
        }
    }
    map.values().filter_map(option_text).collect()
}

fn option_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(map) => {
            return OPTION_TEXT_KEYS
                .iter()
                .find_map(|key| map.get(*key))
                .and_then(option_text)
        }
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

pub fn normalize_question(raw: &RawQuestion) -> Result<Mcq, Rejection> {
    let question = raw.question_text().ok_or(Rejection::MissingQuestion)?;

    let options = raw
        .first_of(&OPTION_ALIASES)
        .map(normalize_options)
        .unwrap_or_default();
    if options.len() != OPTION_COUNT {
        return Err(Rejection::WrongOptionCount(options.len()));
    }

    let answer = resolve_answer(raw.first_of(&ANSWER_ALIASES), &options);
    Mcq::new(question, options, answer).ok_or(Rejection::MissingQuestion)
}

/// Normalizes every record, silently dropping the ones that fail.
pub fn normalize_batch(raws: &[RawQuestion]) -> Vec<Mcq> {
    raws.iter()
        .enumerate()
        .filter_map(|(idx, raw)| match normalize_question(raw) {
            Ok(mcq) => Some(mcq),
            Err(reason) => {
                log::debug!("dropping question {}: {}", idx, reason);
                None
            }
        })
        .collect()
}

/// Letter, then one-based digit, then option text. Anything unmatched
/// defaults to `A`; that is a best-effort guess, not a verified answer.
fn resolve_answer(raw: Option<&Value>, options: &[String]) -> AnswerLetter {
    let text = match raw {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    if let Some(letter) = LETTER_ANSWER
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .and_then(AnswerLetter::from_char)
    {
        return letter;
    }

    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(letter) = AnswerLetter::from_digit(c) {
            return letter;
        }
    }

    let by_text = options
        .iter()
        .position(|o| *o == text)
        .or_else(|| options.iter().position(|o| o.eq_ignore_ascii_case(&text)));
    match by_text.and_then(AnswerLetter::from_index) {
        Some(letter) => letter,
        None => {
            log::warn!(
                "correct answer {:?} matches no option; defaulting to A",
                text
            );
            AnswerLetter::A
        }
    }
}
