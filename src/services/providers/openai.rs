use std::time::Duration;

use async_openai::{config::OpenAIConfig, error::OpenAIError, Client};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::errors::PipelineError;
use crate::services::model_gateway::{GenerationRequest, ModelGateway};

/// OpenAI-compatible chat completions endpoint, e.g. the Hugging Face router.
pub struct OpenAiGateway {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiGateway {
    pub fn new(api_base: &str, model: &str, api_key: SecretString, timeout: Duration) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(api_base.trim_end_matches('/').to_string())
            .with_api_key(api_key.expose_secret().to_string());

        Self {
            client: Client::with_config(config),
            model: model.trim().trim_matches('/').to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl ModelGateway for OpenAiGateway {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, PipelineError> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": request.prompt }],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        let chat = self.client.chat();
        let call = chat.create_byot(body);
        let response: Value = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                PipelineError::GatewayUnreachable(format!(
                    "no response within {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(map_openai_error)?;

        response_text(&response)
    }
}

fn map_openai_error(err: OpenAIError) -> PipelineError {
    match err {
        OpenAIError::Reqwest(e) => PipelineError::GatewayUnreachable(e.to_string()),
        other => PipelineError::GatewayError(other.to_string()),
    }
}

/// Pulls the generated text out of a chat completion, or out of the
/// `generated_text` shape legacy inference endpoints return.
fn response_text(response: &Value) -> Result<String, PipelineError> {
    if let Some(content) = response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
    {
        return Ok(content.to_string());
    }

    let generated = response
        .get("generated_text")
        .or_else(|| response.pointer("/0/generated_text"))
        .and_then(Value::as_str);
    if let Some(text) = generated {
        return Ok(text.to_string());
    }

    if let Some(error) = response.get("error") {
        return Err(PipelineError::GatewayError(format!(
            "inference error: {}",
            error
        )));
    }

    Err(PipelineError::GatewayError(
        "unexpected response format from inference API".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_chat_completion_content() {
        let response = json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": "{\"questions\": []}" } }]
        });
        assert_eq!(response_text(&response).unwrap(), "{\"questions\": []}");
    }

    #[test]
    fn reads_legacy_generated_text() {
        assert_eq!(
            response_text(&json!({ "generated_text": "one" })).unwrap(),
            "one"
        );
        assert_eq!(
            response_text(&json!([{ "generated_text": "two" }])).unwrap(),
            "two"
        );
    }

    #[test]
    fn reports_inference_errors() {
        let err = response_text(&json!({ "error": "model loading" })).unwrap_err();
        assert!(matches!(err, PipelineError::GatewayError(msg) if msg.contains("model loading")));

        let err = response_text(&json!({ "unexpected": true })).unwrap_err();
        assert!(matches!(err, PipelineError::GatewayError(_)));
    }
}
