//! SQLite connection helper shared by the administrator and vehicle stores.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::time::Duration;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const PRAGMAS_SQL: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
PRAGMA foreign_keys = ON;
"#;

/// Open a connection to the database file at `db_path`.
///
/// Each store operation opens its own connection; SQLite serialises writers.
pub fn open(db_path: &str) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {db_path}"))?;
    conn.busy_timeout(BUSY_TIMEOUT)
        .context("Failed to set busy timeout")?;
    Ok(conn)
}

/// Open a connection and apply the journal pragmas, then run `schema`.
pub fn init_schema(db_path: &str, schema: &str) -> Result<()> {
    let conn = open(db_path)?;
    conn.execute_batch(PRAGMAS_SQL)
        .context("Failed to apply database pragmas")?;
    conn.execute_batch(schema)
        .context("Failed to create database schema")?;
    Ok(())
}
