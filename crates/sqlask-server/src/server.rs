use crate::routes;
use crate::state::AppState;
use anyhow::{Context, Result};
use sqlask_core::config::AppConfig;
use sqlask_core::executor::Executor;
use sqlask_core::pipeline::AskService;
use sqlask_core::providers::llm::build_client;
use sqlask_core::storage::store::Store;
use sqlask_core::translator::Translator;

pub struct Server;

impl Server {
    /// Rebuilds the fixture database, then serves until Ctrl-C.
    ///
    /// Any startup failure is returned before the listener is bound.
    pub async fn run(cfg: AppConfig) -> Result<()> {
        cfg.validate()?;

        Store::rebuild(&cfg.database_path).context("database setup failed")?;

        let state = Self::build_state(&cfg)?;
        let app = routes::router(state);

        let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
            .await
            .with_context(|| format!("failed to bind {}", cfg.bind_addr))?;
        tracing::info!(event = "server_listening", addr = %listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!(event = "server_stopped");
        Ok(())
    }

    pub fn build_state(cfg: &AppConfig) -> Result<AppState> {
        let client = build_client(&cfg.llm)?;
        let service = AskService::new(
            Translator::new(client),
            Executor::new(cfg.database_path.clone()),
        );
        Ok(AppState::new(service)
            .with_index_path(cfg.index_path.clone())
            .with_static_dir(cfg.static_dir.clone()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(event = "signal_error", error = %e);
        std::future::pending::<()>().await;
    }
    tracing::info!(event = "shutdown_requested");
}
