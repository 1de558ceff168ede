//! # Audit Log Repository
//!
//! Append-only audit trail. The application only ever inserts and reads:
//! there is no update or delete statement in this file on purpose.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use torque_core::AuditEntry;

/// Repository for audit log operations.
#[derive(Debug, Clone)]
pub struct AuditRepository {
    pool: SqlitePool,
}

impl AuditRepository {
    /// Creates a new AuditRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AuditRepository { pool }
    }

    /// Appends an audit entry.
    pub async fn append(&self, entry: &AuditEntry) -> DbResult<()> {
        debug!(action = %entry.action, by = %entry.performed_by, "Appending audit entry");

        sqlx::query(
            r#"
            INSERT INTO audit_logs (id, action, performed_by, details, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.action)
        .bind(&entry.performed_by)
        .bind(&entry.details)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists audit entries, newest first.
    pub async fn list(&self) -> DbResult<Vec<AuditEntry>> {
        let entries = sqlx::query_as::<_, AuditEntry>(
            r#"
            SELECT id, action, performed_by, details, created_at
            FROM audit_logs
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
