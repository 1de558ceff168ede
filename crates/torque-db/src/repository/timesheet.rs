//! # Timesheet Repository
//!
//! Clock-in/out state per principal.
//!
//! ## Two-State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            clock_in (inserts open entry)                                │
//! │   offline ─────────────────────────────────► working                    │
//! │      ▲                                          │                       │
//! │      └──────────────────────────────────────────┘                       │
//! │            clock_out (closes the open entry)                            │
//! │                                                                         │
//! │   Wrong-state transitions are silent no-ops:                            │
//! │   • clock_in while an open entry exists  → skip (no second entry)       │
//! │   • clock_out with no open entry         → skip (nothing mutated)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use torque_core::{Timesheet, WorkStatus};

/// Repository for timesheet operations.
#[derive(Debug, Clone)]
pub struct TimesheetRepository {
    pool: SqlitePool,
}

impl TimesheetRepository {
    /// Creates a new TimesheetRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TimesheetRepository { pool }
    }

    /// The principal's open entry, if any.
    pub async fn open_entry(&self, user_id: &str) -> DbResult<Option<Timesheet>> {
        let entry = sqlx::query_as::<_, Timesheet>(
            r#"
            SELECT id, user_id, clock_in, clock_out
            FROM timesheets
            WHERE user_id = ?1 AND clock_out IS NULL
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Opens a timesheet entry for the principal.
    ///
    /// Idempotent-by-skip: if an open entry already exists, nothing is
    /// inserted and `false` is returned.
    pub async fn clock_in(&self, user_id: &str) -> DbResult<bool> {
        if self.open_entry(user_id).await?.is_some() {
            debug!(user_id = %user_id, "Already clocked in, skipping");
            return Ok(false);
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO timesheets (id, user_id, clock_in, clock_out)
            VALUES (?1, ?2, ?3, NULL)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(user_id = %user_id, entry_id = %id, "Clocked in");
        Ok(true)
    }

    /// Closes the principal's open entry.
    ///
    /// No-op when no open entry exists; returns whether one was closed.
    pub async fn clock_out(&self, user_id: &str) -> DbResult<bool> {
        let Some(entry) = self.open_entry(user_id).await? else {
            debug!(user_id = %user_id, "No open entry, skipping clock out");
            return Ok(false);
        };

        let now = Utc::now();
        sqlx::query("UPDATE timesheets SET clock_out = ?2 WHERE id = ?1")
            .bind(&entry.id)
            .bind(now)
            .execute(&self.pool)
            .await?;

        debug!(user_id = %user_id, entry_id = %entry.id, "Clocked out");
        Ok(true)
    }

    /// Derived status: `Working` iff an open entry exists.
    pub async fn status(&self, user_id: &str) -> DbResult<WorkStatus> {
        Ok(match self.open_entry(user_id).await? {
            Some(_) => WorkStatus::Working,
            None => WorkStatus::Offline,
        })
    }

    /// All entries for one principal, newest first (for hour reports).
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<Timesheet>> {
        let entries = sqlx::query_as::<_, Timesheet>(
            r#"
            SELECT id, user_id, clock_in, clock_out
            FROM timesheets
            WHERE user_id = ?1
            ORDER BY clock_in DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_clock_in_is_idempotent_by_skip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.timesheets();

        assert!(repo.clock_in("u1").await.unwrap());
        assert!(!repo.clock_in("u1").await.unwrap()); // second call skips

        let entries = repo.list_for_user("u1").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_open());
    }

    #[tokio::test]
    async fn test_clock_out_without_open_entry_is_noop() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.timesheets();

        assert!(!repo.clock_out("u1").await.unwrap());
        assert!(repo.list_for_user("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_shift_cycle() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.timesheets();

        assert_eq!(repo.status("u1").await.unwrap(), WorkStatus::Offline);

        repo.clock_in("u1").await.unwrap();
        assert_eq!(repo.status("u1").await.unwrap(), WorkStatus::Working);

        assert!(repo.clock_out("u1").await.unwrap());
        assert_eq!(repo.status("u1").await.unwrap(), WorkStatus::Offline);

        // New shift opens a second, separate entry.
        repo.clock_in("u1").await.unwrap();
        assert_eq!(repo.list_for_user("u1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_per_principal_isolation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.timesheets();

        repo.clock_in("u1").await.unwrap();
        assert_eq!(repo.status("u2").await.unwrap(), WorkStatus::Offline);
    }
}
