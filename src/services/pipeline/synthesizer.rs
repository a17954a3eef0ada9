//! Model-free fallback: builds questions straight from source sentences.
//!
//! Each slot takes one "fact" sentence as the correct statement, draws
//! distractors from other facts, fills any gap with mutated copies of the
//! correct statement, then rotates the options so the correct letter moves
//! around the quiz. Output depends only on the inputs.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::PipelineError;
use crate::models::domain::{AnswerLetter, Difficulty, Mcq, OPTION_COUNT};

const MIN_FACT_WORDS: usize = 8;
const MIN_FACT_CHARS: usize = 50;
const MAX_FACT_CHARS: usize = 220;
const MIN_FACTS: usize = 2;
const TOPIC_WORDS: usize = 3;

/// `ROTATIONS[slot % 4][position]` is the index of the assembled option shown at
/// `position`; assembled index 0 is always the correct statement.
const ROTATIONS: [[usize; OPTION_COUNT]; 4] = [
    [1, 2, 0, 3],
    [0, 3, 1, 2],
    [3, 1, 2, 0],
    [2, 0, 3, 1],
];

static SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+(?:[.!?]+|$)").expect("SENTENCE is a valid regex pattern"));

static CAPITALIZED_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][A-Za-z0-9'\-]+\b").expect("CAPITALIZED_WORD is a valid regex pattern")
});

/// Auxiliary verbs that take a plain negation and their simple tense counterpart.
const AUXILIARIES: [(&str, &str, &str); 8] = [
    (" is ", " is not ", " was "),
    (" are ", " are not ", " were "),
    (" was ", " was not ", " is "),
    (" were ", " were not ", " are "),
    (" has ", " has not ", " had "),
    (" have ", " have not ", " had "),
    (" can ", " cannot ", " could "),
    (" will ", " will not ", " would "),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Negation,
    TenseShift,
    Contradiction,
    Overstatement,
    Qualifier,
}

impl Mutation {
    /// Preferred order per difficulty; later entries only matter when earlier
    /// ones cannot change the sentence or collide with an existing option.
    fn order(difficulty: Difficulty) -> [Mutation; 5] {
        use Mutation::*;
        match difficulty {
            Difficulty::Easy => [Negation, Overstatement, Contradiction, TenseShift, Qualifier],
            Difficulty::Medium => [TenseShift, Negation, Overstatement, Contradiction, Qualifier],
            Difficulty::Hard => [Contradiction, TenseShift, Overstatement, Negation, Qualifier],
        }
    }

    fn apply(self, statement: &str) -> Option<String> {
        let body = strip_terminal(statement);
        match self {
            Mutation::Negation => AUXILIARIES
                .iter()
                .find(|(aux, _, _)| body.contains(aux))
                .map(|(aux, negated, _)| format!("{}.", body.replacen(aux, negated, 1)))
                .or_else(|| Some(format!("It is not the case that {}.", lowercase_first(body)))),
            Mutation::TenseShift => AUXILIARIES
                .iter()
                .find(|(aux, _, _)| body.contains(aux))
                .map(|(aux, _, shifted)| format!("{}.", body.replacen(aux, shifted, 1))),
            Mutation::Contradiction => Some(format!(
                "{}, although the text indicates the opposite relationship.",
                body
            )),
            Mutation::Overstatement => {
                Some(format!("{} in every case, without any exception.", body))
            }
            Mutation::Qualifier => Some(format!("{}, which the text never mentions.", body)),
        }
    }
}

/// Whitespace-normalizes `content` and keeps sentences long enough to be
/// substantive and short enough to read as a question option.
pub fn extract_facts(content: &str) -> Vec<String> {
    let normalized = content.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut facts: Vec<String> = Vec::new();

    for m in SENTENCE.find_iter(&normalized) {
        let sentence = m.as_str().trim();
        let chars = sentence.chars().count();
        if sentence.split_whitespace().count() < MIN_FACT_WORDS
            || !(MIN_FACT_CHARS..=MAX_FACT_CHARS).contains(&chars)
        {
            continue;
        }
        if !facts.iter().any(|f| f == sentence) {
            facts.push(sentence.to_string());
        }
    }
    facts
}

pub fn synthesize(
    content: &str,
    expected: usize,
    difficulty: Difficulty,
) -> Result<Vec<Mcq>, PipelineError> {
    let facts = extract_facts(content);
    if facts.len() < MIN_FACTS {
        return Err(PipelineError::SynthesisInsufficientSource {
            usable: facts.len(),
        });
    }

    let questions: Vec<Mcq> = (0..expected)
        .filter_map(|slot| build_question(&facts, slot, difficulty))
        .collect();
    log::info!(
        "synthesized {} of {} questions from {} source facts",
        questions.len(),
        expected,
        facts.len()
    );
    Ok(questions)
}

fn build_question(facts: &[String], slot: usize, difficulty: Difficulty) -> Option<Mcq> {
    let n = facts.len();
    let correct = &facts[slot % n];
    let stem = stem_for(&topic_of(correct), difficulty);

    let mut assembled: Vec<String> = vec![correct.clone()];
    for offset in 1..n {
        if assembled.len() == 3 {
            break;
        }
        let candidate = &facts[(slot + offset) % n];
        if !assembled.contains(candidate) {
            assembled.push(candidate.clone());
        }
    }

    // Too few alternate facts: pad with mutations, then always add one more.
    while assembled.len() < OPTION_COUNT {
        let mutated = Mutation::order(difficulty)
            .into_iter()
            .filter_map(|m| m.apply(correct))
            .find(|m| !assembled.contains(m))?;
        assembled.push(mutated);
    }

    let rotation = ROTATIONS[slot % ROTATIONS.len()];
    let options: Vec<String> = rotation.iter().map(|&i| assembled[i].clone()).collect();
    let correct_position = rotation.iter().position(|&i| i == 0)?;

    Mcq::new(stem, options, AnswerLetter::from_index(correct_position)?)
}

/// First few capitalized words of the sentence, e.g. "Marie Curie Nobel".
fn topic_of(sentence: &str) -> String {
    let words: Vec<&str> = CAPITALIZED_WORD
        .find_iter(sentence)
        .take(TOPIC_WORDS)
        .map(|m| m.as_str())
        .collect();
    if words.is_empty() {
        "this topic".to_string()
    } else {
        words.join(" ")
    }
}

fn stem_for(topic: &str, difficulty: Difficulty) -> String {
    match difficulty {
        Difficulty::Easy => format!(
            "Which statement about {} is correct according to the text?",
            topic
        ),
        Difficulty::Medium => format!(
            "Based on the text, which statement about {} is accurate?",
            topic
        ),
        Difficulty::Hard => format!(
            "Which statement is best supported by the text when evaluating claims about {}?",
            topic
        ),
    }
}

fn strip_terminal(sentence: &str) -> &str {
    sentence.trim_end_matches(['.', '!', '?']).trim_end()
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
