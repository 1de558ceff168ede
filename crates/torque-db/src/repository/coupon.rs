//! # Coupon Repository
//!
//! Database operations for discount coupons, including the resolver.
//!
//! ## Resolution Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve("summer10")                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize ──► "SUMMER10"                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... WHERE code = 'SUMMER10' AND active = 1                      │
//! │       │                                                                 │
//! │       ├── active match  ──► Some(Coupon)                                │
//! │       ├── inactive match ─► None   ◄── indistinguishable on purpose     │
//! │       └── no match ───────► None   ◄── (no probing for disabled codes)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Code uniqueness is assumed, not enforced: with duplicates the resolver
//! returns an arbitrary active match, same as the upstream system.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use torque_core::coupon::normalize_code;
use torque_core::Coupon;

/// Repository for coupon database operations.
#[derive(Debug, Clone)]
pub struct CouponRepository {
    pool: SqlitePool,
}

impl CouponRepository {
    /// Creates a new CouponRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CouponRepository { pool }
    }

    /// Inserts a coupon. The code is stored in normalized (upper-cased) form
    /// regardless of how the caller spelled it.
    pub async fn insert(&self, coupon: &Coupon) -> DbResult<()> {
        let code = normalize_code(&coupon.code);
        debug!(id = %coupon.id, code = %code, "Inserting coupon");

        sqlx::query(
            r#"
            INSERT INTO coupons (id, code, discount_percent, active)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&coupon.id)
        .bind(&code)
        .bind(coupon.discount_percent)
        .bind(coupon.active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Resolves a coupon code.
    ///
    /// Returns `None` both when no coupon matches and when a matching coupon
    /// exists but is inactive. Callers cannot tell the two cases apart.
    pub async fn resolve(&self, code: &str) -> DbResult<Option<Coupon>> {
        let normalized = normalize_code(code);

        let coupon = sqlx::query_as::<_, Coupon>(
            r#"
            SELECT id, code, discount_percent, active
            FROM coupons
            WHERE code = ?1 AND active = 1
            "#,
        )
        .bind(&normalized)
        .fetch_optional(&self.pool)
        .await?;

        Ok(coupon)
    }

    /// Lists all coupons (active and inactive), for the management screen.
    pub async fn list(&self) -> DbResult<Vec<Coupon>> {
        let coupons = sqlx::query_as::<_, Coupon>(
            r#"
            SELECT id, code, discount_percent, active
            FROM coupons
            ORDER BY code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(coupons)
    }

    /// Sets the active flag.
    ///
    /// Toggling never touches past sales: totals were computed and frozen at
    /// sale time.
    pub async fn set_active(&self, id: &str, active: bool) -> DbResult<()> {
        let result = sqlx::query("UPDATE coupons SET active = ?2 WHERE id = ?1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Coupon", id));
        }

        Ok(())
    }

    /// Deletes a coupon.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM coupons WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Coupon", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use uuid::Uuid;

    fn coupon(code: &str, pct: f64, active: bool) -> Coupon {
        Coupon {
            id: Uuid::new_v4().to_string(),
            code: code.to_string(),
            discount_percent: pct,
            active,
        }
    }

    #[tokio::test]
    async fn test_resolve_is_case_insensitive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.coupons();

        repo.insert(&coupon("summer10", 15.0, true)).await.unwrap();

        let hit = repo.resolve("SuMmEr10").await.unwrap().unwrap();
        assert_eq!(hit.code, "SUMMER10"); // stored normalized
        assert_eq!(hit.discount_percent, 15.0);
    }

    #[tokio::test]
    async fn test_inactive_equals_missing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.coupons();

        repo.insert(&coupon("WINTER20", 20.0, false)).await.unwrap();

        // Inactive coupon and nonexistent code resolve identically.
        assert!(repo.resolve("WINTER20").await.unwrap().is_none());
        assert!(repo.resolve("NO-SUCH-CODE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_toggle_active() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.coupons();

        let c = coupon("FLASH5", 5.0, true);
        repo.insert(&c).await.unwrap();

        repo.set_active(&c.id, false).await.unwrap();
        assert!(repo.resolve("FLASH5").await.unwrap().is_none());

        repo.set_active(&c.id, true).await.unwrap();
        assert!(repo.resolve("FLASH5").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_toggle_missing_coupon_errors() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.coupons();

        let err = repo.set_active("nope", true).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
