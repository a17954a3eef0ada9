use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const OPTION_COUNT: usize = 4;

/// Letter designating the correct option; `A` is index 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    pub const ALL: [AnswerLetter; OPTION_COUNT] =
        [AnswerLetter::A, AnswerLetter::B, AnswerLetter::C, AnswerLetter::D];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            AnswerLetter::A => 0,
            AnswerLetter::B => 1,
            AnswerLetter::C => 2,
            AnswerLetter::D => 3,
        }
    }

    /// Case-insensitive `A`-`D`.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(AnswerLetter::A),
            'B' => Some(AnswerLetter::B),
            'C' => Some(AnswerLetter::C),
            'D' => Some(AnswerLetter::D),
            _ => None,
        }
    }

    /// `1`-`4`, one-based.
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10)
            .filter(|d| (1..=4).contains(d))
            .and_then(|d| Self::from_index(d as usize - 1))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnswerLetter::A => "A",
            AnswerLetter::B => "B",
            AnswerLetter::C => "C",
            AnswerLetter::D => "D",
        }
    }
}

impl std::fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized four-option multiple-choice question.
///
/// Fields are private so every instance goes through [`Mcq::new`], which
/// enforces the non-empty stem and exactly four non-empty options.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Mcq {
    question: String,
    options: [String; OPTION_COUNT],
    correct_answer: AnswerLetter,
}

impl Mcq {
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer: AnswerLetter,
    ) -> Option<Self> {
        let question = question.into().trim().to_string();
        if question.is_empty() || options.iter().any(|o| o.trim().is_empty()) {
            return None;
        }
        let options: [String; OPTION_COUNT] = options.try_into().ok()?;
        Some(Self {
            question,
            options,
            correct_answer,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    pub fn correct_answer(&self) -> AnswerLetter {
        self.correct_answer
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer.index()]
    }

    /// The quiz-taker view of this question, with the answer withheld.
    pub fn to_public(&self, index: usize) -> PublicQuestion {
        PublicQuestion {
            index,
            question: self.question.clone(),
            options: self.options.to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PublicQuestion {
    pub index: usize,
    pub question: String,
    pub options: Vec<String>,
}

pub fn public_questions(questions: &[Mcq]) -> Vec<PublicQuestion> {
    questions
        .iter()
        .enumerate()
        .map(|(idx, q)| q.to_public(idx))
        .collect()
}
