//! # Sale Repository
//!
//! Database operations for sales.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. CREATE                                                              │
//! │     └── insert() → Sale with frozen user_name/service_name snapshots    │
//! │                                                                         │
//! │  2. ... that's it.                                                      │
//! │                                                                         │
//! │  Sales are immutable once written: there is no update or delete path.   │
//! │  Deleting the referenced Service later leaves historical sales          │
//! │  untouched (no cascading recompute, no snapshot refresh).               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use torque_core::Sale;

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Inserts a sale.
    ///
    /// ## Snapshot Pattern
    /// The caller has already denormalized `user_name` and `service_name`
    /// into the sale. Those copies are frozen here and never refreshed.
    pub async fn insert(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, service = %sale.service_name, total = sale.total, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, user_id, user_name, service_id, service_name,
                quantity, discount_percent, total, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.user_id)
        .bind(&sale.user_name)
        .bind(&sale.service_id)
        .bind(&sale.service_name)
        .bind(sale.quantity)
        .bind(sale.discount_percent)
        .bind(sale.total)
        .bind(sale.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, user_id, user_name, service_id, service_name,
                   quantity, discount_percent, total, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Lists all sales, newest first.
    ///
    /// Callers with a mechanic principal should use [`Self::list_by_user`]
    /// instead; this returns the unfiltered collection.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, user_id, user_name, service_id, service_name,
                   quantity, discount_percent, total, created_at
            FROM sales
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists the sales created by one principal, newest first.
    pub async fn list_by_user(&self, user_id: &str) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, user_id, user_name, service_id, service_name,
                   quantity, discount_percent, total, created_at
            FROM sales
            WHERE user_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use uuid::Uuid;

    fn sale(user_id: &str, total: f64) -> Sale {
        Sale {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            user_name: "Benny".to_string(),
            service_id: "svc-1".to_string(),
            service_name: "Oil Change".to_string(),
            quantity: 2,
            discount_percent: Some(10.0),
            total,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.sales();

        let s = sale("u1", 180.0);
        repo.insert(&s).await.unwrap();

        let fetched = repo.get_by_id(&s.id).await.unwrap().unwrap();
        assert_eq!(fetched.user_name, "Benny");
        assert_eq!(fetched.quantity, 2);
        assert_eq!(fetched.discount_percent, Some(10.0));
        assert_eq!(fetched.total, 180.0);
    }

    #[tokio::test]
    async fn test_list_by_user_scopes_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.sales();

        repo.insert(&sale("u1", 50.0)).await.unwrap();
        repo.insert(&sale("u2", 75.0)).await.unwrap();
        repo.insert(&sale("u1", 25.0)).await.unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 3);

        let mine = repo.list_by_user("u1").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|s| s.user_id == "u1"));
    }

    #[tokio::test]
    async fn test_snapshots_survive_missing_service() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.sales();

        // Sale referencing a service that no longer exists in the catalog.
        let s = sale("u1", 90.0);
        repo.insert(&s).await.unwrap();

        let fetched = repo.get_by_id(&s.id).await.unwrap().unwrap();
        assert_eq!(fetched.service_name, "Oil Change");
        assert_eq!(fetched.total, 90.0);
    }
}
