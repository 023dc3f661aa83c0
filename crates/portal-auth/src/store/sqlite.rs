use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use portal_access::Role;
use rusqlite::{Connection, OptionalExtension};

use super::PrincipalStore;
use crate::error::AuthError;
use crate::types::PrincipalRecord;

pub struct SqlitePrincipalStore {
    conn: Mutex<Connection>,
}

impl SqlitePrincipalStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: &str) -> Result<Self, AuthError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self::new(conn))
    }

    pub fn open_in_memory() -> Result<Self, AuthError> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, AuthError> {
        self.conn
            .lock()
            .map_err(|_| AuthError::Internal("principal store lock poisoned".into()))
    }
}

const MIGRATE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS principals (
    subject TEXT PRIMARY KEY,
    role TEXT NOT NULL DEFAULT 'guest',
    permissions TEXT NOT NULL DEFAULT '[]',
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

const SELECT_COLUMNS: &str = "SELECT subject, role, permissions, updated_at FROM principals";

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<PrincipalRecord> {
    let role: String = row.get(1)?;
    let permissions: String = row.get(2)?;
    let permissions = serde_json::from_str(&permissions).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(PrincipalRecord {
        subject: row.get(0)?,
        role: Role::from_claim(Some(role.as_str())),
        permissions,
        updated_at: row.get(3)?,
    })
}

#[async_trait]
impl PrincipalStore for SqlitePrincipalStore {
    async fn migrate(&self) -> Result<(), AuthError> {
        let conn = self.conn()?;
        conn.execute_batch(MIGRATE_SQL)?;
        Ok(())
    }

    async fn get(&self, subject: &str) -> Result<Option<PrincipalRecord>, AuthError> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE subject = ?1"),
                [subject],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    async fn upsert(
        &self,
        subject: &str,
        role: Role,
        permissions: &[String],
    ) -> Result<PrincipalRecord, AuthError> {
        if subject.trim().is_empty() {
            return Err(AuthError::InvalidInput("subject must not be empty".into()));
        }
        let encoded = serde_json::to_string(permissions)
            .map_err(|e| AuthError::Internal(format!("encode permissions: {e}")))?;
        {
            let conn = self.conn()?;
            conn.execute(
                "INSERT INTO principals (subject, role, permissions) VALUES (?1, ?2, ?3)
                 ON CONFLICT(subject) DO UPDATE SET
                    role = excluded.role,
                    permissions = excluded.permissions,
                    updated_at = datetime('now')",
                rusqlite::params![subject, role.as_str(), encoded],
            )?;
        }
        tracing::info!(subject, role = %role, "principal record saved");
        self.get(subject)
            .await?
            .ok_or_else(|| AuthError::Internal(format!("principal '{subject}' vanished after upsert")))
    }

    async fn delete(&self, subject: &str) -> Result<(), AuthError> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM principals WHERE subject = ?1", [subject])?;
        if changed == 0 {
            return Err(AuthError::NotFound(format!("principal '{subject}' not found")));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<PrincipalRecord>, AuthError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY subject"))?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}
