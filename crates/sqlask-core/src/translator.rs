use crate::errors::TranslateError;
use crate::providers::llm::LlmClient;
use crate::storage::schema::{TableInfo, KNOWN_TABLES};
use serde_json::json;
use std::sync::Arc;

/// Name of the single field the model must fill in.
pub const SQL_FIELD: &str = "sql_query";

/// Turns a natural-language question into one SQLite statement.
#[derive(Clone)]
pub struct Translator {
    client: Arc<dyn LlmClient>,
    tables: &'static [TableInfo],
}

impl Translator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            tables: KNOWN_TABLES,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.client.provider_name()
    }

    pub fn build_prompt(&self, question: &str) -> String {
        let names: Vec<&str> = self.tables.iter().map(|t| t.name).collect();
        let columns: Vec<String> = self
            .tables
            .iter()
            .map(|t| format!("  {}({})", t.name, t.columns.join(", ")))
            .collect();

        format!(
            "You are an expert SQL generator. Convert the following natural language question \
             into an SQL query for a SQLite database with tables: {}.\n\
             Columns:\n{}\n\
             Provide ONLY the SQL query, without any additional text or explanation.\n\
             Example:\n\
             Question: What are the total sales?\n\
             SQL: SELECT SUM(amount) FROM total_sales;\n\n\
             Question: {}\n",
            names.join(", "),
            columns.join("\n"),
            question
        )
    }

    /// Response shape the model is constrained to: `{"sql_query": "<sql>"}`.
    pub fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "sql_query": { "type": "STRING" }
            },
            "required": [SQL_FIELD]
        })
    }

    pub async fn generate_sql(&self, question: &str) -> Result<String, TranslateError> {
        let prompt = self.build_prompt(question);
        let resp = self
            .client
            .complete(&prompt, &Self::response_schema())
            .await?;
        parse_generated(&resp.text)
    }
}

/// Pulls the statement out of the model's structured reply.
pub fn parse_generated(text: &str) -> Result<String, TranslateError> {
    let parsed: serde_json::Value = serde_json::from_str(text.trim())
        .map_err(|e| TranslateError::MalformedJson(e.to_string()))?;

    let sql = parsed
        .get(SQL_FIELD)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .unwrap_or_default();

    if sql.is_empty() {
        return Err(TranslateError::EmptySql);
    }
    Ok(sql.to_string())
}
