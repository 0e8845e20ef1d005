use crate::cli::args::{Cli, Command};

pub mod ask;
pub mod exec;
pub mod import;
pub mod init_db;

pub mod exit_codes {
    pub const OK: i32 = 0;
    /// The query ran but produced an error payload.
    pub const QUERY_ERROR: i32 = 1;
    pub const FATAL: i32 = 2;
}

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::InitDb(args) => init_db::cmd_init_db(args),
        Command::Import(args) => import::cmd_import(args),
        Command::Exec(args) => exec::cmd_exec(args),
        Command::Ask(args) => ask::cmd_ask(args).await,
    }
}

/// Prints the payload as one JSON line and maps it to an exit code.
pub(crate) fn emit(resp: &sqlask_core::model::AskResponse) -> anyhow::Result<i32> {
    println!("{}", serde_json::to_string(resp)?);
    Ok(if resp.is_error() {
        exit_codes::QUERY_ERROR
    } else {
        exit_codes::OK
    })
}
