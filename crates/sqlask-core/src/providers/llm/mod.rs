use crate::config::LlmConfig;
use crate::errors::{ConfigError, TranslateError};
use crate::model::LlmResponse;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends one prompt, constraining the reply to `response_schema`.
    ///
    /// Returns the generated text exactly as the provider produced it.
    async fn complete(
        &self,
        prompt: &str,
        response_schema: &serde_json::Value,
    ) -> Result<LlmResponse, TranslateError>;
    fn provider_name(&self) -> &'static str;
}

pub mod fake;
pub mod gemini;

pub fn build_client(cfg: &LlmConfig) -> Result<Arc<dyn LlmClient>, ConfigError> {
    match cfg.provider.as_str() {
        "gemini" => {
            let api_key = cfg
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| ConfigError("gemini provider requires an API key".into()))?;
            let client = gemini::GeminiClient::new(gemini::GeminiSettings {
                base_url: cfg.base_url.clone(),
                model: cfg.model.clone(),
                api_key,
                temperature: cfg.temperature,
                max_output_tokens: cfg.max_output_tokens,
                timeout_ms: cfg.timeout_ms,
            })
            .map_err(|e| ConfigError(format!("failed to build HTTP client: {e}")))?;
            Ok(Arc::new(client))
        }
        "fake" => Ok(Arc::new(fake::FakeClient::with_sql(&cfg.fake_sql))),
        other => Err(ConfigError(format!("unknown llm provider: {}", other))),
    }
}
