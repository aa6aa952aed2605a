//! Administrator Storage
//! Credential store backed by SQLite

use crate::auth::models::{Administrator, Role};
use crate::db;
use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};
use tracing::{info, warn};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS administrators (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL,
    password TEXT NOT NULL,
    role TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_administrators_email ON administrators(email);
"#;

/// Verifies a submitted credential pair.
///
/// `Ok(None)` means the credentials matched nobody; `Err` is reserved for
/// storage failures.
pub trait Authenticator: Send + Sync {
    fn login(&self, email: &str, password: &str) -> Result<Option<Administrator>>;
}

/// Administrator storage with SQLite backend
pub struct AdminStore {
    db_path: String,
}

impl AdminStore {
    /// Create a new store and initialize its table
    pub fn new(db_path: &str) -> Result<Self> {
        db::init_schema(db_path, SCHEMA_SQL).context("Failed to initialize administrators")?;
        Ok(Self {
            db_path: db_path.to_string(),
        })
    }

    /// Insert `email`/`password` as an `Adm` when no administrator exists yet.
    ///
    /// Returns whether a record was created.
    pub fn ensure_default_admin(&self, email: &str, password: &str) -> Result<bool> {
        let conn = db::open(&self.db_path)?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM administrators", [], |row| row.get(0))
            .context("Failed to count administrators")?;

        if count > 0 {
            return Ok(false);
        }

        self.create_admin(email, password, Role::Adm)?;
        info!("🔐 Default administrator created ({})", email);
        warn!("⚠️  CHANGE DEFAULT ADMINISTRATOR PASSWORD IN PRODUCTION!");
        Ok(true)
    }

    /// Create a new administrator
    pub fn create_admin(&self, email: &str, password: &str, role: Role) -> Result<Administrator> {
        let conn = db::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO administrators (email, password, role) VALUES (?1, ?2, ?3)",
            params![email, password, role.as_str()],
        )
        .context("Failed to insert administrator")?;

        Ok(Administrator {
            id: conn.last_insert_rowid(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        })
    }
}

impl Authenticator for AdminStore {
    fn login(&self, email: &str, password: &str) -> Result<Option<Administrator>> {
        let conn = db::open(&self.db_path)?;

        // Lowest id wins when several records share the same credentials.
        conn.query_row(
            "SELECT id, email, password, role FROM administrators
             WHERE email = ?1 AND password = ?2
             ORDER BY id LIMIT 1",
            params![email, password],
            |row| {
                Ok(Administrator {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    password: row.get(2)?,
                    role: Role::from(row.get::<_, String>(3)?),
                })
            },
        )
        .optional()
        .context("Failed to look up administrator")
    }
}
