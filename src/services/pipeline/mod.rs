//! Turns raw model output into exactly the requested number of MCQs.
//!
//! Tiers run in order and each reports a [`TierOutcome`]:
//! 1. direct extraction + normalization (plaintext parsing as last resort),
//! 2. one repair request through the model gateway, parsed the same way,
//! 3. model-free synthesis from the source text to fill what is still missing.

pub mod json_extractor;
pub mod normalizer;
pub mod plaintext_parser;
pub mod relaxed_json;
pub mod repair;
pub mod synthesizer;

use std::collections::HashSet;
use std::sync::Arc;

use crate::constants::quiz_prompt::build_generation_prompt;
use crate::errors::PipelineError;
use crate::models::domain::{Mcq, QuizRequestParams};
use crate::services::model_gateway::{GenerationRequest, ModelGateway};

use self::normalizer::normalize_batch;
use self::plaintext_parser::parse_plaintext;

const TOKENS_PER_QUESTION: u32 = 180;
const MIN_MAX_TOKENS: u32 = 512;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Source-text characters embedded in the generation prompt.
    pub prompt_content_chars: usize,
    /// Characters of prior output embedded in the repair prompt.
    pub repair_raw_chars: usize,
    pub generation_temperature: f32,
    pub repair_temperature: f32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            prompt_content_chars: 6000,
            repair_raw_chars: 4000,
            generation_temperature: 0.3,
            repair_temperature: 0.1,
        }
    }
}

impl PipelineSettings {
    pub fn max_tokens_for(&self, num_questions: usize) -> u32 {
        (num_questions as u32)
            .saturating_mul(TOKENS_PER_QUESTION)
            .max(MIN_MAX_TOKENS)
    }
}

/// Result of one tier.
#[derive(Debug, Clone, PartialEq)]
pub enum TierOutcome {
    Complete(Vec<Mcq>),
    Partial(Vec<Mcq>),
    Failed(PipelineError),
}

impl TierOutcome {
    fn from_questions(mut questions: Vec<Mcq>, expected: usize) -> Self {
        questions.truncate(expected);
        if questions.len() == expected {
            TierOutcome::Complete(questions)
        } else {
            TierOutcome::Partial(questions)
        }
    }
}

/// Extract + normalize, falling back to the plaintext parser when no JSON-like
/// structure yields a usable question.
pub fn parse_tier(raw: &str, expected: usize) -> TierOutcome {
    let failure = match json_extractor::extract(raw) {
        Some(blob) => {
            let questions = normalize_batch(&blob.raw_questions());
            if !questions.is_empty() {
                return TierOutcome::from_questions(questions, expected);
            }
            PipelineError::SchemaInvalid
        }
        None => PipelineError::ExtractionEmpty,
    };

    let questions = parse_plaintext(raw, expected);
    if questions.is_empty() {
        return TierOutcome::Failed(failure);
    }
    TierOutcome::from_questions(questions, expected)
}

/// Questions accepted so far. A tier's questions are checked against the stems
/// of earlier tiers only, so one tier may repeat a generic stem.
struct Accepted {
    expected: usize,
    questions: Vec<Mcq>,
    stems: HashSet<String>,
}

impl Accepted {
    fn new(expected: usize) -> Self {
        Self {
            expected,
            questions: Vec::with_capacity(expected),
            stems: HashSet::new(),
        }
    }

    fn remaining(&self) -> usize {
        self.expected.saturating_sub(self.questions.len())
    }

    fn absorb_model_questions(&mut self, questions: Vec<Mcq>) {
        let fresh: Vec<Mcq> = questions
            .into_iter()
            .filter(|mcq| !self.stems.contains(&mcq.question().to_lowercase()))
            .collect();
        self.stems
            .extend(fresh.iter().map(|mcq| mcq.question().to_lowercase()));
        self.questions.extend(fresh);
    }
}

pub struct QuizPipeline {
    gateway: Arc<dyn ModelGateway>,
    settings: PipelineSettings,
}

impl QuizPipeline {
    pub fn new(gateway: Arc<dyn ModelGateway>, settings: PipelineSettings) -> Self {
        Self { gateway, settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn gateway(&self) -> &dyn ModelGateway {
        self.gateway.as_ref()
    }

    /// The first-pass generation call for `params`.
    pub fn generation_request(&self, params: &QuizRequestParams) -> GenerationRequest {
        GenerationRequest {
            prompt: build_generation_prompt(
                &params.content,
                params.num_questions,
                params.difficulty,
                self.settings.prompt_content_chars,
            ),
            temperature: self.settings.generation_temperature,
            max_tokens: self.settings.max_tokens_for(params.num_questions),
        }
    }

    /// Runs every tier needed to reach `params.num_questions`. Returns fewer
    /// only when synthesis cannot cover the gap, and fails only when no tier
    /// produced a single question.
    pub async fn generate(
        &self,
        raw: Option<&str>,
        params: &QuizRequestParams,
    ) -> Result<Vec<Mcq>, PipelineError> {
        let expected = params.num_questions;
        let mut accepted = Accepted::new(expected);
        let mut last_error = PipelineError::ExtractionEmpty;
        let raw = raw.map(str::trim).filter(|r| !r.is_empty());

        if let Some(raw) = raw {
            self.record("direct", parse_tier(raw, expected), &mut accepted, &mut last_error);
        } else {
            log::info!("no model output to parse; skipping direct and repair tiers");
        }

        if accepted.remaining() > 0 {
            if let Some(raw) = raw {
                let repaired =
                    repair::repair(self.gateway(), &self.settings, raw, expected).await;
                let outcome = match repaired {
                    Ok(repaired) => parse_tier(&repaired, expected),
                    Err(err) => TierOutcome::Failed(err),
                };
                self.record("repair", outcome, &mut accepted, &mut last_error);
            }
        }

        if accepted.remaining() > 0 {
            let synthesized =
                synthesizer::synthesize(&params.content, accepted.remaining(), params.difficulty);
            match synthesized {
                Ok(synthesized) => accepted.questions.extend(synthesized),
                Err(err) => {
                    log::warn!("synthesis tier failed: {}", err);
                    last_error = err;
                }
            }
        }

        if accepted.questions.is_empty() {
            return Err(last_error);
        }

        let mut questions = accepted.questions;
        questions.truncate(expected);
        log::info!("pipeline produced {} of {} questions", questions.len(), expected);
        Ok(questions)
    }

    fn record(
        &self,
        tier: &str,
        outcome: TierOutcome,
        accepted: &mut Accepted,
        last_error: &mut PipelineError,
    ) {
        match outcome {
            TierOutcome::Complete(questions) => {
                log::info!("{} tier complete with {} questions", tier, questions.len());
                accepted.absorb_model_questions(questions);
            }
            TierOutcome::Partial(questions) => {
                log::info!("{} tier partial with {} questions", tier, questions.len());
                accepted.absorb_model_questions(questions);
            }
            TierOutcome::Failed(err) => {
                log::warn!("{} tier failed: {}", tier, err);
                *last_error = err;
            }
        }
    }
}
