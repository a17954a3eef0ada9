use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::{AnswerLetter, Mcq, OPTION_COUNT};

static QUESTION_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:q(?:uestion)?\s*)?\d+\s*[\).:\-]\s*(.*)$")
        .expect("QUESTION_START is a valid regex pattern")
});

static OPTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?([A-Da-d])\s*[\).:\-]\s*(.+)$").expect("OPTION_LINE is a valid regex pattern")
});

static ANSWER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:the\s+)?(?:correct\s+answer|correct\s+option|answer|correct|ans)(?:\s+is)?\s*[:\-=]?\s*(?:option\s+)?\(?([A-D1-4])\b",
    )
    .expect("ANSWER_LINE is a valid regex pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    QuestionStart(&'a str),
    Answer(AnswerLetter),
    Option(AnswerLetter, &'a str),
    Other(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if let Some(caps) = ANSWER_LINE.captures(line) {
        let letter = caps[1].chars().next().and_then(|c| {
            AnswerLetter::from_char(c).or_else(|| AnswerLetter::from_digit(c))
        });
        if let Some(letter) = letter {
            return Line::Answer(letter);
        }
    }
    if let Some(caps) = QUESTION_START.captures(line) {
        return Line::QuestionStart(caps.get(1).map_or("", |m| m.as_str().trim()));
    }
    if let Some(caps) = OPTION_LINE.captures(line) {
        if let Some(letter) = caps[1].chars().next().and_then(AnswerLetter::from_char) {
            return Line::Option(letter, caps.get(2).map_or("", |m| m.as_str().trim()));
        }
    }
    Line::Other(line)
}

#[derive(Default)]
struct PendingQuestion {
    stem: String,
    options: [Option<String>; OPTION_COUNT],
    answer: Option<AnswerLetter>,
}

impl PendingQuestion {
    fn starting_with(stem: &str) -> Self {
        Self {
            stem: stem.to_string(),
            ..Self::default()
        }
    }

    fn has_options(&self) -> bool {
        self.options.iter().any(Option::is_some)
    }

    fn into_mcq(self) -> Option<Mcq> {
        if self.stem.trim().is_empty() {
            return None;
        }
        let options: Option<Vec<String>> = self.options.into_iter().collect();
        Mcq::new(self.stem, options?, self.answer.unwrap_or(AnswerLetter::A))
    }
}

/// Reconstructs questions from numbered-list text such as
///
/// ```text
/// 1. What is X?
/// A) foo
/// B) bar
/// C) baz
/// D) qux
/// Answer: C
/// ```
///
/// A question is emitted once its stem and all four options are present and
/// the next question starts (or input ends). Incomplete questions are dropped.
pub fn parse_plaintext(raw: &str, expected: usize) -> Vec<Mcq> {
    let mut questions = Vec::new();
    let mut current: Option<PendingQuestion> = None;

    let lines = raw
        .lines()
        .map(|l| l.replace("**", ""))
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());

    for line in lines {
        match classify(&line) {
            Line::QuestionStart(stem) => {
                if let Some(mcq) = current.take().and_then(PendingQuestion::into_mcq) {
                    questions.push(mcq);
                }
                current = Some(PendingQuestion::starting_with(stem));
            }
            Line::Option(letter, text) => {
                if let Some(pending) = current.as_mut() {
                    pending.options[letter.index()] = Some(text.to_string());
                }
            }
            Line::Answer(letter) => {
                if let Some(pending) = current.as_mut() {
                    pending.answer = Some(letter);
                }
            }
            Line::Other(text) => {
                // Stems may wrap onto following lines until the options begin.
                if let Some(pending) = current.as_mut().filter(|p| !p.has_options()) {
                    if !pending.stem.is_empty() {
                        pending.stem.push(' ');
                    }
                    pending.stem.push_str(text);
                }
            }
        }
    }

    if let Some(mcq) = current.and_then(PendingQuestion::into_mcq) {
        questions.push(mcq);
    }

    questions.truncate(expected);
    questions
}
