use super::LlmClient;
use crate::errors::TranslateError;
use crate::model::LlmResponse;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

enum Reply {
    Text(String),
    Fail(fn() -> TranslateError),
}

/// Offline stand-in for a real model: always gives the same reply.
pub struct FakeClient {
    reply: Reply,
    calls: AtomicUsize,
}

impl FakeClient {
    /// Replies with raw generated text, verbatim.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            reply: Reply::Text(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Replies with a well-formed structured answer carrying `sql`.
    pub fn with_sql(sql: &str) -> Self {
        Self::with_text(serde_json::json!({ "sql_query": sql }).to_string())
    }

    pub fn failing(make_err: fn() -> TranslateError) -> Self {
        Self {
            reply: Reply::Fail(make_err),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(
        &self,
        _prompt: &str,
        _response_schema: &serde_json::Value,
    ) -> Result<LlmResponse, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Text(text) => Ok(LlmResponse {
                text: text.clone(),
                provider: "fake".to_string(),
                model: "fake".to_string(),
                meta: serde_json::json!({}),
            }),
            Reply::Fail(make_err) => Err(make_err()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
