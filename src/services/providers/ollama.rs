use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::constants::quiz_prompt::truncate_chars;
use crate::errors::PipelineError;
use crate::services::model_gateway::{GenerationRequest, ModelGateway};

const ERROR_DETAIL_CHARS: usize = 500;

/// Local Ollama server, `POST /api/generate` without streaming.
pub struct OllamaGateway {
    client: reqwest::Client,
    url: String,
    model: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaGateway {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/api/generate", base_url.trim_end_matches('/')),
            model: model.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl ModelGateway for OllamaGateway {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, PipelineError> {
        let body = json!({
            "model": self.model,
            "prompt": request.prompt,
            "stream": false,
            "options": {
                "temperature": request.temperature,
                "num_predict": request.max_tokens,
            },
        });

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                PipelineError::GatewayUnreachable(format!(
                    "failed to reach Ollama at {}: {}",
                    self.url, e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PipelineError::GatewayError(format!(
                "Ollama error: {} {}",
                status,
                truncate_chars(&detail, ERROR_DETAIL_CHARS)
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| {
                PipelineError::GatewayError(format!("unexpected Ollama response: {}", e))
            })?;
        Ok(parsed.response)
    }
}
