use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, LlmProvider};
use crate::errors::PipelineError;
use crate::services::providers::{OllamaGateway, OpenAiGateway};

/// One text-generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Black box that turns a prompt into raw model text. Transport problems map to
/// `PipelineError::GatewayUnreachable`, anything else the provider reports to
/// `PipelineError::GatewayError`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelGateway: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, request: &GenerationRequest) -> Result<String, PipelineError>;
}

pub fn build_gateway(config: &Config) -> Arc<dyn ModelGateway> {
    match config.llm_provider {
        LlmProvider::Ollama => Arc::new(OllamaGateway::new(
            &config.ollama_base_url,
            &config.ollama_model,
            config.llm_timeout(),
        )),
        LlmProvider::OpenAiCompatible => Arc::new(OpenAiGateway::new(
            &config.openai_api_base,
            &config.openai_model,
            config.api_token.clone(),
            config.llm_timeout(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_gateway_by_provider() {
        let mut config = Config::test_config();

        config.llm_provider = LlmProvider::Ollama;
        assert_eq!(build_gateway(&config).name(), "ollama");

        config.llm_provider = LlmProvider::OpenAiCompatible;
        assert_eq!(build_gateway(&config).name(), "openai-compatible");
    }
}
