use crate::errors::ExecuteError;
use crate::model::{Row, SqlValue};
use rusqlite::{Batch, Connection, OpenFlags};
use std::path::PathBuf;

/// Runs generated statements against the fixture database.
///
/// Each call opens its own connection; nothing is shared between calls.
#[derive(Debug, Clone)]
pub struct Executor {
    db_path: PathBuf,
}

impl Executor {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Executes `sql` once and returns every row eagerly.
    ///
    /// The statement is run as given: no parameters and no validation.
    /// Input holding more than one statement is rejected before anything
    /// runs. The connection is dropped on every return path.
    pub fn execute_sql(&self, sql: &str) -> Result<Vec<Row>, ExecuteError> {
        // never create a missing database file
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&self.db_path, flags).map_err(|e| {
            ExecuteError::Open {
                path: self.db_path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        let mut batch = Batch::new(&conn, sql);
        let Some(mut stmt) = batch.next()? else {
            return Ok(Vec::new());
        };
        if batch.next()?.is_some() {
            return Err(ExecuteError::Sqlite(
                "only one statement may be executed at a time".into(),
            ));
        }

        let width = stmt.column_count();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                values.push(SqlValue::from(row.get_ref(i)?));
            }
            out.push(values);
        }

        tracing::debug!(event = "sql_executed", rows = out.len(), columns = width);
        Ok(out)
    }

    /// Same as [`Executor::execute_sql`], run on the blocking pool.
    pub async fn execute_sql_async(&self, sql: String) -> Result<Vec<Row>, ExecuteError> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.execute_sql(&sql))
            .await
            .map_err(|e| ExecuteError::Aborted(e.to_string()))?
    }
}
