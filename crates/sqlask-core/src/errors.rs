use crate::model::ErrorKind;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Why a question could not be turned into a SQL statement.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("model API request failed: {0}")]
    Transport(String),

    #[error("model API request timed out after {0} ms")]
    Timeout(u64),

    #[error("model API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("could not generate SQL: unexpected response structure")]
    UnexpectedShape,

    #[error("failed to parse model JSON response: {0}")]
    MalformedJson(String),

    #[error("model generated empty or missing SQL query")]
    EmptySql,
}

impl TranslateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranslateError::Transport(_) => ErrorKind::Transport,
            TranslateError::Timeout(_) => ErrorKind::Timeout,
            TranslateError::HttpStatus { .. } => ErrorKind::HttpStatus,
            TranslateError::UnexpectedShape => ErrorKind::UnexpectedShape,
            TranslateError::MalformedJson(_) => ErrorKind::MalformedJson,
            TranslateError::EmptySql => ErrorKind::EmptySql,
        }
    }

    /// Legacy rendering of the failure as a SQL-shaped string.
    ///
    /// Only meant for logs and diagnostics; the pipeline never executes it.
    pub fn sentinel_sql(&self) -> String {
        format!("SELECT 'Error: {}'", self.to_string().replace('\'', "''"))
    }
}

#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("failed to open database {path}: {message}")]
    Open { path: String, message: String },

    #[error("SQLite error: {0}")]
    Sqlite(String),

    #[error("query task aborted: {0}")]
    Aborted(String),
}

impl From<rusqlite::Error> for ExecuteError {
    fn from(e: rusqlite::Error) -> Self {
        ExecuteError::Sqlite(e.to_string())
    }
}
