use super::emit;
use crate::cli::args::ExecArgs;
use anyhow::Result;
use sqlask_core::executor::Executor;
use sqlask_core::model::{AskResponse, ErrorKind};

pub fn cmd_exec(args: ExecArgs) -> Result<i32> {
    let resp = match Executor::new(&args.db).execute_sql(&args.sql) {
        Ok(rows) => AskResponse::Answer { answer: rows },
        Err(e) => AskResponse::error(ErrorKind::Execution, e.to_string()),
    };
    emit(&resp)
}
