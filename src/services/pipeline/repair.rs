use crate::constants::quiz_prompt::build_repair_prompt;
use crate::errors::PipelineError;
use crate::services::model_gateway::{GenerationRequest, ModelGateway};

use super::PipelineSettings;

/// Asks the gateway once to rewrite `raw` as strict JSON. Not retried: a
/// failure here hands over to synthesis.
pub async fn repair(
    gateway: &dyn ModelGateway,
    settings: &PipelineSettings,
    raw: &str,
    expected: usize,
) -> Result<String, PipelineError> {
    let request = GenerationRequest {
        prompt: build_repair_prompt(raw, expected, settings.repair_raw_chars),
        temperature: settings.repair_temperature,
        max_tokens: settings.max_tokens_for(expected),
    };

    log::info!(
        "requesting JSON repair from {} for {} chars of output",
        gateway.name(),
        raw.chars().count()
    );
    gateway.generate(&request).await
}
