//! # Service Repository
//!
//! CRUD for the service catalog. Deleting a service never touches sales
//! that reference it: sales carry their own name/price-derived snapshots.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use torque_core::Service;

/// Repository for service catalog operations.
#[derive(Debug, Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    /// Creates a new ServiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ServiceRepository { pool }
    }

    /// Lists all services, alphabetical.
    pub async fn list(&self) -> DbResult<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(
            "SELECT id, name, price FROM services ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    /// Gets a service by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Service>> {
        let service = sqlx::query_as::<_, Service>(
            "SELECT id, name, price FROM services WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    /// Inserts a service.
    pub async fn insert(&self, service: &Service) -> DbResult<()> {
        debug!(id = %service.id, name = %service.name, "Inserting service");

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO services (id, name, price, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
        )
        .bind(&service.id)
        .bind(&service.name)
        .bind(service.price)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a service's name and price.
    pub async fn update(&self, service: &Service) -> DbResult<()> {
        debug!(id = %service.id, "Updating service");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE services SET name = ?2, price = ?3, updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&service.id)
        .bind(&service.name)
        .bind(service.price)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Service", &service.id));
        }

        Ok(())
    }

    /// Deletes a service. Historical sales are unaffected.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting service");

        let result = sqlx::query("DELETE FROM services WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Service", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use uuid::Uuid;

    fn service(name: &str, price: f64) -> Service {
        Service {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_crud_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.services();

        let mut svc = service("Oil Change", 49.9);
        repo.insert(&svc).await.unwrap();

        let fetched = repo.get_by_id(&svc.id).await.unwrap().unwrap();
        assert_eq!(fetched.price, 49.9);

        svc.price = 59.9;
        repo.update(&svc).await.unwrap();
        assert_eq!(repo.get_by_id(&svc.id).await.unwrap().unwrap().price, 59.9);

        repo.delete(&svc.id).await.unwrap();
        assert!(repo.get_by_id(&svc.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_service_errors() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.services();

        let err = repo.update(&service("Ghost", 1.0)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
