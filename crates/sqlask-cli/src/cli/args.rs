use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sqlask",
    version,
    about = "Ask the sales fixture database questions, or load data into it"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Delete and rebuild the seeded fixture database, then verify it
    InitDb(InitDbArgs),
    /// Load a CSV export of a spreadsheet into a table (replacing it)
    Import(ImportArgs),
    /// Run one SQL statement and print the rows as JSON
    Exec(ExecArgs),
    /// Translate a question to SQL, run it, and print the JSON payload
    Ask(AskArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct InitDbArgs {
    #[arg(long, env = "SQLASK_DB_PATH", default_value = "ecommerce.db")]
    pub db: PathBuf,

    /// Output format: text | json
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ImportArgs {
    /// CSV file (first row holds the column names)
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value = "output.db")]
    pub db: PathBuf,

    #[arg(long, default_value = "table_name")]
    pub table: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ExecArgs {
    #[arg(long, env = "SQLASK_DB_PATH", default_value = "ecommerce.db")]
    pub db: PathBuf,

    pub sql: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AskArgs {
    /// YAML config file; environment variables override it
    #[arg(long, env = "SQLASK_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub db: Option<PathBuf>,

    /// gemini | fake
    #[arg(long)]
    pub llm: Option<String>,

    /// Rebuild the fixture database before asking
    #[arg(long)]
    pub reset: bool,

    pub question: String,
}
