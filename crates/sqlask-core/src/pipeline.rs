use crate::executor::Executor;
use crate::model::{AskResponse, ErrorKind};
use crate::translator::Translator;

/// Question in, rows (or an error payload) out.
#[derive(Clone)]
pub struct AskService {
    translator: Translator,
    executor: Executor,
}

impl AskService {
    pub fn new(translator: Translator, executor: Executor) -> Self {
        Self {
            translator,
            executor,
        }
    }

    /// Never fails: every failure is folded into [`AskResponse::Error`].
    pub async fn ask(&self, question: &str) -> AskResponse {
        tracing::info!(
            event = "question_received",
            provider = self.translator.provider_name(),
            question = %question
        );

        let sql = match self.translator.generate_sql(question).await {
            Ok(sql) => sql,
            Err(e) => {
                tracing::warn!(
                    event = "sql_generation_failed",
                    kind = ?e.kind(),
                    sentinel = %e.sentinel_sql(),
                    error = %e
                );
                return AskResponse::error(e.kind(), e.to_string());
            }
        };

        tracing::info!(event = "sql_generated", sql = %sql);

        match self.executor.execute_sql_async(sql).await {
            Ok(rows) => {
                tracing::info!(event = "sql_answered", rows = rows.len());
                AskResponse::Answer { answer: rows }
            }
            Err(e) => {
                tracing::warn!(event = "sql_execution_failed", error = %e);
                AskResponse::error(ErrorKind::Execution, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TranslateError;
    use crate::model::SqlValue;
    use crate::providers::llm::fake::FakeClient;
    use crate::storage::store::Store;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn service(client: FakeClient) -> (TempDir, AskService) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ecommerce.db");
        Store::rebuild(&path).unwrap();
        let svc = AskService::new(Translator::new(Arc::new(client)), Executor::new(path));
        (dir, svc)
    }

    #[tokio::test]
    async fn answers_with_rows() {
        let (_dir, svc) = service(FakeClient::with_sql("SELECT SUM(amount) FROM total_sales"));
        let resp = svc.ask("What are the total sales?").await;
        assert_eq!(
            resp,
            AskResponse::Answer {
                answer: vec![vec![SqlValue::Real(2800.5)]]
            }
        );
    }

    #[tokio::test]
    async fn translation_failure_is_not_executed() {
        let client = Arc::new(FakeClient::failing(|| {
            TranslateError::Transport("dns error".into())
        }));
        let dir = TempDir::new().unwrap();
        // no database file: executing anything would fail with an execution error
        let svc = AskService::new(
            Translator::new(client.clone()),
            Executor::new(dir.path().join("absent.db")),
        );
        let resp = svc.ask("total sales").await;
        assert_eq!(client.calls(), 1);
        match resp {
            AskResponse::Error { kind, error } => {
                assert_eq!(kind, ErrorKind::Transport);
                assert!(error.contains("dns error"));
            }
            other => panic!("expected error payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn execution_failure_becomes_payload() {
        let (_dir, svc) = service(FakeClient::with_sql("DROP TABLE nope"));
        let resp = svc.ask("break it").await;
        match resp {
            AskResponse::Error { kind, error } => {
                assert_eq!(kind, ErrorKind::Execution);
                assert!(error.contains("no such table"), "{error}");
            }
            other => panic!("expected error payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_question_yields_payload() {
        let (_dir, svc) = service(FakeClient::with_text(r#"{"sql_query": ""}"#));
        let resp = svc.ask("").await;
        assert_eq!(
            resp,
            AskResponse::error(
                ErrorKind::EmptySql,
                TranslateError::EmptySql.to_string()
            )
        );
    }
}
