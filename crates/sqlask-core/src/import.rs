//! Loads a CSV export of a spreadsheet into a SQLite table.
//!
//! The target table is dropped and recreated (replace semantics); column
//! types are inferred from the data and no index column is added.

use anyhow::Context;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
}

impl ColumnType {
    fn sql(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }

    // Widens Integer -> Real -> Text as cells disagree.
    fn merge(self, cell: &str) -> Self {
        let cell = cell.trim();
        if cell.is_empty() {
            return self;
        }
        match self {
            ColumnType::Integer if cell.parse::<i64>().is_ok() => ColumnType::Integer,
            ColumnType::Integer | ColumnType::Real if cell.parse::<f64>().is_ok() => {
                ColumnType::Real
            }
            _ => ColumnType::Text,
        }
    }

    fn value(self, cell: &str) -> Value {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        match self {
            ColumnType::Integer => trimmed
                .parse()
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::Text(cell.to_string())),
            ColumnType::Real => trimmed
                .parse()
                .map(Value::Real)
                .unwrap_or_else(|_| Value::Text(cell.to_string())),
            ColumnType::Text => Value::Text(cell.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ImportSummary {
    pub table: String,
    pub columns: Vec<(String, String)>,
    pub rows: usize,
}

pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

// Blank headers become `column_N`; repeats get `_2`, `_3`, ... SQLite
// compares column names case-insensitively, so the check does too.
fn column_names(header: &csv::StringRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let base = match h.trim() {
                "" => format!("column_{}", i + 1),
                h => h.to_string(),
            };
            let mut name = base.clone();
            let mut n = 2;
            while !seen.insert(name.to_lowercase()) {
                name = format!("{base}_{n}");
                n += 1;
            }
            name
        })
        .collect()
}

pub fn import_csv_file(db_path: &Path, csv_path: &Path, table: &str) -> anyhow::Result<ImportSummary> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open input {}", csv_path.display()))?;
    let mut conn = Connection::open(db_path)
        .with_context(|| format!("failed to open sqlite db {}", db_path.display()))?;
    import_csv(&mut conn, file, table)
}

pub fn import_csv<R: Read>(conn: &mut Connection, input: R, table: &str) -> anyhow::Result<ImportSummary> {
    if table.trim().is_empty() {
        anyhow::bail!("table name must not be empty");
    }

    let mut reader = csv::ReaderBuilder::new().flexible(false).from_reader(input);
    let headers = column_names(reader.headers().context("failed to read CSV header")?);
    if headers.is_empty() {
        anyhow::bail!("CSV input has no columns");
    }

    let mut records = Vec::new();
    for (i, rec) in reader.records().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let rec = rec.with_context(|| format!("malformed CSV record on line {}", i + 2))?;
        records.push(rec);
    }

    let mut types = vec![ColumnType::Integer; headers.len()];
    for rec in &records {
        for (ty, cell) in types.iter_mut().zip(rec.iter()) {
            *ty = ty.merge(cell);
        }
    }

    let table_q = quote_ident(table);
    let column_defs: Vec<String> = headers
        .iter()
        .zip(&types)
        .map(|(h, t)| format!("{} {}", quote_ident(h), t.sql()))
        .collect();
    let placeholders: Vec<String> = (1..=headers.len()).map(|i| format!("?{i}")).collect();

    let tx = conn.transaction()?;
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {table_q}; CREATE TABLE {table_q} ({});",
        column_defs.join(", ")
    ))
    .with_context(|| format!("failed to create table {table}"))?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {table_q} VALUES ({})",
            placeholders.join(", ")
        ))?;
        for rec in &records {
            let values = rec.iter().zip(&types).map(|(cell, t)| t.value(cell));
            stmt.execute(rusqlite::params_from_iter(values))?;
        }
    }
    tx.commit()?;

    tracing::info!(event = "csv_imported", table = %table, rows = records.len());

    Ok(ImportSummary {
        table: table.to_string(),
        columns: headers
            .into_iter()
            .zip(types.iter().map(|t| t.sql().to_string()))
            .collect(),
        rows: records.len(),
    })
}
