//! Fire-and-forget audit trail sink.
//!
//! Every mutating operation records what happened, who did it, and when.
//! Recording must never block or fail the operation it describes: entries
//! are queued on an unbounded channel and written by a background task, and
//! write failures go to the diagnostic log only.

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use torque_core::AuditEntry;
use torque_db::AuditRepository;

// =============================================================================
// Action tags
// =============================================================================

/// Action tags as they appear in the audit log.
pub mod actions {
    pub const CREATE_SALE: &str = "CREATE_SALE";
    pub const CREATE_SERVICE: &str = "CREATE_SERVICE";
    pub const UPDATE_SERVICE: &str = "UPDATE_SERVICE";
    pub const DELETE_SERVICE: &str = "DELETE_SERVICE";
    pub const CREATE_USER: &str = "CREATE_USER";
    pub const DELETE_USER: &str = "DELETE_USER";
    pub const CREATE_COUPON: &str = "CREATE_COUPON";
    pub const UPDATE_COUPON: &str = "UPDATE_COUPON";
    pub const DELETE_COUPON: &str = "DELETE_COUPON";
    pub const UPDATE_SETTINGS: &str = "UPDATE_SETTINGS";
    pub const CLOCK_IN: &str = "CLOCK_IN";
    pub const CLOCK_OUT: &str = "CLOCK_OUT";
}

// =============================================================================
// Logger
// =============================================================================

/// Handle for recording audit entries.
///
/// Cloning is cheap; all clones feed the same background writer.
#[derive(Clone)]
pub struct AuditLogger {
    tx: mpsc::UnboundedSender<AuditEntry>,
}

impl AuditLogger {
    /// Spawn the background writer and return a logger handle.
    pub fn spawn(repository: AuditRepository) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<AuditEntry>();

        tokio::spawn(async move {
            while let Some(entry) = rx.recv().await {
                if let Err(e) = repository.append(&entry).await {
                    warn!(
                        action = %entry.action,
                        error = %e,
                        "Failed to persist audit entry"
                    );
                } else {
                    debug!(action = %entry.action, "Audit entry persisted");
                }
            }
            debug!("Audit writer stopped");
        });

        AuditLogger { tx }
    }

    /// Record an audit entry. Never blocks, never fails the caller.
    pub fn record(&self, action: &str, performed_by: &str, details: impl Into<String>) {
        let entry = AuditEntry {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            performed_by: performed_by.to_string(),
            details: details.into(),
            created_at: Utc::now(),
        };

        // Send only fails when the writer task is gone (shutdown); the
        // operation being described must proceed regardless.
        if self.tx.send(entry).is_err() {
            warn!(action = %action, "Audit writer unavailable, entry dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use torque_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_entries_reach_the_log() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let logger = AuditLogger::spawn(db.audit());

        logger.record(actions::CREATE_SALE, "Benny", "Sold 2x Oil Change");
        tokio::time::sleep(Duration::from_millis(10)).await;
        logger.record(actions::CLOCK_IN, "Ana", "Ana clocked in");

        // The writer is asynchronous; give it a moment to drain.
        tokio::time::sleep(Duration::from_millis(100)).await;

        let entries = db.audit().list().await.unwrap();
        assert_eq!(entries.len(), 2);
        // Newest first
        assert_eq!(entries[0].action, actions::CLOCK_IN);
        assert_eq!(entries[1].action, actions::CREATE_SALE);
        assert_eq!(entries[1].performed_by, "Benny");
    }

    #[tokio::test]
    async fn test_record_survives_closed_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let logger = AuditLogger::spawn(db.audit());
        db.close().await;

        // Must not panic or block even though every write will fail.
        logger.record(actions::UPDATE_SETTINGS, "Benny", "Saved settings");
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
