//! # Settings Repository
//!
//! The white-label settings singleton.
//!
//! ## Singleton Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get()                              save(settings)                      │
//! │    │                                   │                                │
//! │    ├── row exists ──► stored values    └── INSERT OR REPLACE row id=1   │
//! │    └── no row ──────► built-in defaults      (whole document, no        │
//! │                                               partial patch path)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use torque_core::AppSettings;

/// Repository for the settings singleton.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Gets the live settings, falling back to built-in defaults when no
    /// row has been saved yet.
    pub async fn get(&self) -> DbResult<AppSettings> {
        let settings = sqlx::query_as::<_, AppSettings>(
            "SELECT company_name, login_title, logo_url, webhook_url FROM settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings.unwrap_or_default())
    }

    /// Saves the settings wholesale, creating the row on first save.
    pub async fn save(&self, settings: &AppSettings) -> DbResult<()> {
        debug!(company = %settings.company_name, "Saving settings");

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO settings (id, company_name, login_title, logo_url, webhook_url)
            VALUES (1, ?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&settings.company_name)
        .bind(&settings.login_title)
        .bind(&settings.logo_url)
        .bind(&settings.webhook_url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use torque_core::DEFAULT_COMPANY_NAME;

    #[tokio::test]
    async fn test_defaults_when_absent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.settings();

        let settings = repo.get().await.unwrap();
        assert_eq!(settings.company_name, DEFAULT_COMPANY_NAME);
        assert!(settings.webhook_url.is_empty());
    }

    #[tokio::test]
    async fn test_save_is_wholesale_replace() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.settings();

        let first = AppSettings {
            company_name: "Rosa's Garage".to_string(),
            login_title: "Staff Entrance".to_string(),
            logo_url: "https://img.test/logo.png".to_string(),
            webhook_url: "https://hooks.test/abc".to_string(),
        };
        repo.save(&first).await.unwrap();
        assert_eq!(repo.get().await.unwrap(), first);

        // Second save replaces the entire document, including fields the
        // caller leaves empty.
        let second = AppSettings {
            webhook_url: String::new(),
            ..first.clone()
        };
        repo.save(&second).await.unwrap();

        let stored = repo.get().await.unwrap();
        assert_eq!(stored, second);
        assert!(stored.webhook_url.is_empty());
    }
}
