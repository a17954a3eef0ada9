use std::env;
use std::time::Duration;

use secrecy::SecretString;

use crate::services::pipeline::PipelineSettings;

pub const MIN_QUESTIONS: u32 = 5;
pub const MAX_QUESTIONS: u32 = 50;
pub const DEFAULT_QUESTIONS: u32 = 15;
pub const MIN_CONTENT_CHARS: u64 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LlmProvider {
    Ollama,
    /// Any OpenAI-compatible chat completions endpoint (the Hugging Face router by default).
    OpenAiCompatible,
}

impl LlmProvider {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "ollama" => LlmProvider::Ollama,
            _ => LlmProvider::OpenAiCompatible,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub llm_provider: LlmProvider,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub openai_api_base: String,
    pub openai_model: String,
    pub api_token: SecretString,
    pub llm_timeout_secs: u64,
    pub prompt_content_chars: usize,
    pub repair_raw_chars: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            llm_provider: LlmProvider::parse(
                &env::var("LLM_PROVIDER").unwrap_or_else(|_| "huggingface".to_string()),
            ),
            ollama_base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "mistral".to_string()),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://router.huggingface.co/v1".to_string()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "HuggingFaceTB/SmolLM3-3B".to_string()),
            api_token: SecretString::from(env::var("HUGGINGFACE_API_TOKEN").unwrap_or_default()),
            llm_timeout_secs: env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300),
            prompt_content_chars: env::var("PROMPT_CONTENT_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(6000),
            repair_raw_chars: env::var("REPAIR_RAW_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4000),
        }
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Pipeline knobs handed to `QuizPipeline::new`; the pipeline itself never
    /// reads the environment.
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            prompt_content_chars: self.prompt_content_chars,
            repair_raw_chars: self.repair_raw_chars,
            ..PipelineSettings::default()
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            llm_provider: LlmProvider::Ollama,
            ollama_base_url: "http://127.0.0.1:11434".to_string(),
            ollama_model: "test-model".to_string(),
            openai_api_base: "http://127.0.0.1:9/v1".to_string(),
            openai_model: "test-model".to_string(),
            api_token: SecretString::from("test-token".to_string()),
            llm_timeout_secs: 5,
            prompt_content_chars: 6000,
            repair_raw_chars: 4000,
        }
    }
}
