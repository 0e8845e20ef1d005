use crate::storage::schema::{KNOWN_TABLES, DDL, SEED};
use anyhow::Context;
use rusqlite::{params, Connection};
use std::path::Path;

/// Owner of the seeded fixture database.
pub struct Store {
    conn: Connection,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TableCount {
    pub table: String,
    pub rows: u64,
}

impl Store {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open sqlite db {}", path.display()))?;
        Ok(Self { conn })
    }

    pub fn memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory sqlite db")?;
        Ok(Self { conn })
    }

    /// Deletes `path` if present and rebuilds the schema and seed rows from scratch.
    pub fn rebuild(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            std::fs::remove_file(path).with_context(|| {
                format!(
                    "could not delete existing database {} (is it open in another process?)",
                    path.display()
                )
            })?;
            tracing::info!(event = "db_removed", path = %path.display());
        } else {
            tracing::info!(event = "db_absent", path = %path.display());
        }

        let store = Self::open(path)?;
        store.init_schema()?;
        store.seed()?;
        store.verify_fixture()?;
        tracing::info!(event = "db_ready", path = %path.display());
        Ok(store)
    }

    pub fn init_schema(&self) -> anyhow::Result<()> {
        self.conn
            .execute_batch(DDL)
            .context("failed to create fixture tables")?;
        Ok(())
    }

    pub fn seed(&self) -> anyhow::Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch(SEED).context("failed to insert seed rows")?;
        tx.commit()?;
        Ok(())
    }

    pub fn table_exists(&self, name: &str) -> anyhow::Result<bool> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            params![name],
            |r| r.get(0),
        )?;
        Ok(n > 0)
    }

    pub fn table_counts(&self) -> anyhow::Result<Vec<TableCount>> {
        let mut out = Vec::with_capacity(KNOWN_TABLES.len());
        for t in KNOWN_TABLES {
            // table names come from a fixed list, never from input
            let rows: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", t.name), [], |r| {
                    r.get(0)
                })
                .with_context(|| format!("failed to count rows in {}", t.name))?;
            out.push(TableCount {
                table: t.name.to_string(),
                rows: rows as u64,
            });
        }
        Ok(out)
    }

    /// Every known table exists and holds exactly its seed rows.
    pub fn verify_fixture(&self) -> anyhow::Result<()> {
        for t in KNOWN_TABLES {
            if !self.table_exists(t.name)? {
                anyhow::bail!("table '{}' does not exist after setup", t.name);
            }
        }
        for (count, t) in self.table_counts()?.iter().zip(KNOWN_TABLES) {
            if count.rows != t.seed_rows {
                anyhow::bail!(
                    "table '{}' has {} rows after setup, expected {}",
                    t.name,
                    count.rows,
                    t.seed_rows
                );
            }
        }
        Ok(())
    }
}
