use anyhow::Result;
use clap::Parser;
use sqlask_core::config::AppConfig;
use sqlask_server::server::Server;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ask questions of the sales fixture in plain language", long_about = None)]
struct Args {
    /// YAML config file; environment variables override it
    #[arg(long, env = "SQLASK_CONFIG")]
    config: Option<PathBuf>,

    /// Reject unknown keys in the config file
    #[arg(long)]
    strict_config: bool,

    #[arg(long)]
    bind: Option<String>,

    #[arg(long)]
    db: Option<PathBuf>,

    /// gemini | fake
    #[arg(long)]
    llm: Option<String>,
}

use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = AppConfig::resolve(args.config.as_deref(), args.strict_config)?;
    if let Some(bind) = args.bind {
        cfg.bind_addr = bind;
    }
    if let Some(db) = args.db {
        cfg.database_path = db;
    }
    if let Some(llm) = args.llm {
        cfg.llm.provider = llm;
    }

    init_logging(&cfg.log_level);

    if !cfg.unknown_fields.is_empty() {
        tracing::warn!(event = "config_unknown_fields", fields = ?cfg.unknown_fields);
    }
    tracing::info!(event = "server_start", config = ?cfg);

    if let Err(e) = Server::run(cfg).await {
        tracing::error!(event = "fatal", error = ?e);
        return Err(e);
    }
    Ok(())
}
