use super::LlmClient;
use crate::errors::TranslateError;
use crate::model::LlmResponse;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

#[derive(Clone)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub timeout_ms: u64,
}

/// Client for the `generateContent` endpoint of the Gemini API.
pub struct GeminiClient {
    settings: GeminiSettings,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;
        Ok(Self { settings, client })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    pub fn request_body(&self, prompt: &str, response_schema: &serde_json::Value) -> serde_json::Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.settings.temperature,
                "maxOutputTokens": self.settings.max_output_tokens,
                "responseMimeType": "application/json",
                "responseSchema": response_schema,
            }
        })
    }

    // The key travels in the query string, so reqwest errors must not echo the URL.
    fn classify(&self, e: reqwest::Error) -> TranslateError {
        if e.is_timeout() {
            TranslateError::Timeout(self.settings.timeout_ms)
        } else {
            TranslateError::Transport(e.without_url().to_string())
        }
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(
        &self,
        prompt: &str,
        response_schema: &serde_json::Value,
    ) -> Result<LlmResponse, TranslateError> {
        let body = self.request_body(prompt, response_schema);

        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.settings.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(TranslateError::HttpStatus {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let raw = resp.text().await.map_err(|e| self.classify(e))?;
        let json: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| TranslateError::MalformedJson(e.to_string()))?;

        tracing::debug!(event = "gemini_raw_response", response = %json);

        // candidates[0].content.parts[0].text
        let text = json
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .ok_or(TranslateError::UnexpectedShape)?
            .to_string();

        Ok(LlmResponse {
            text,
            provider: "gemini".to_string(),
            model: self.settings.model.clone(),
            meta: json.get("usageMetadata").cloned().unwrap_or_else(|| json!({})),
        })
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::new(GeminiSettings {
            base_url: "https://example.test/".into(),
            model: "gemini-1.5-flash".into(),
            api_key: "k".into(),
            temperature: 0.1,
            max_output_tokens: 100,
            timeout_ms: 1000,
        })
        .unwrap()
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        assert_eq!(
            client().endpoint(),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn body_requests_json_with_schema() {
        let schema = json!({"type": "OBJECT"});
        let body = client().request_body("hello", &schema);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 100);
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
    }
}
