use super::emit;
use crate::cli::args::AskArgs;
use anyhow::{Context, Result};
use sqlask_core::config::AppConfig;
use sqlask_core::executor::Executor;
use sqlask_core::pipeline::AskService;
use sqlask_core::providers::llm::build_client;
use sqlask_core::storage::store::Store;
use sqlask_core::translator::Translator;

pub async fn cmd_ask(args: AskArgs) -> Result<i32> {
    let mut cfg = AppConfig::resolve(args.config.as_deref(), false)?;
    if !cfg.unknown_fields.is_empty() {
        tracing::warn!(event = "config_unknown_fields", fields = ?cfg.unknown_fields);
    }
    if let Some(db) = args.db {
        cfg.database_path = db;
    }
    if let Some(llm) = args.llm {
        cfg.llm.provider = llm;
    }
    cfg.validate()?;

    if args.reset {
        Store::rebuild(&cfg.database_path).context("database setup failed")?;
    }

    let service = AskService::new(
        Translator::new(build_client(&cfg.llm)?),
        Executor::new(cfg.database_path.clone()),
    );
    let resp = service.ask(&args.question).await;
    emit(&resp)
}
