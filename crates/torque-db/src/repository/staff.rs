//! # Staff Repository
//!
//! CRUD for staff profiles (principals).
//!
//! Password hashes live in the same row but are never selected into a
//! [`Principal`]: auth fetches them separately via [`StaffRepository::credentials_by_email`]
//! so the hash can't leak through profile serialization.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use torque_core::Principal;

/// The minimal row auth needs to verify a login attempt.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StaffCredentials {
    pub id: String,
    pub password_hash: String,
}

/// Repository for staff database operations.
#[derive(Debug, Clone)]
pub struct StaffRepository {
    pool: SqlitePool,
}

impl StaffRepository {
    /// Creates a new StaffRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StaffRepository { pool }
    }

    /// Lists all staff profiles.
    pub async fn list(&self) -> DbResult<Vec<Principal>> {
        let staff = sqlx::query_as::<_, Principal>(
            "SELECT id, username, email, role, avatar_url FROM staff ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }

    /// Gets a staff profile by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Principal>> {
        let principal = sqlx::query_as::<_, Principal>(
            "SELECT id, username, email, role, avatar_url FROM staff WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(principal)
    }

    /// Gets a staff profile by login email.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<Principal>> {
        let principal = sqlx::query_as::<_, Principal>(
            "SELECT id, username, email, role, avatar_url FROM staff WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(principal)
    }

    /// Gets the credential row for a login email, if the account exists.
    pub async fn credentials_by_email(&self, email: &str) -> DbResult<Option<StaffCredentials>> {
        let creds = sqlx::query_as::<_, StaffCredentials>(
            "SELECT id, password_hash FROM staff WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(creds)
    }

    /// Inserts a staff profile with its password hash.
    pub async fn insert(&self, principal: &Principal, password_hash: &str) -> DbResult<()> {
        debug!(id = %principal.id, username = %principal.username, "Inserting staff profile");

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO staff (id, username, email, role, avatar_url, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&principal.id)
        .bind(&principal.username)
        .bind(&principal.email)
        .bind(principal.role)
        .bind(&principal.avatar_url)
        .bind(password_hash)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes a staff profile. Sales the principal created keep their
    /// denormalized user_name snapshots.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting staff profile");

        let result = sqlx::query("DELETE FROM staff WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Staff", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use torque_core::Role;
    use uuid::Uuid;

    fn principal(email: &str, role: Role) -> Principal {
        Principal {
            id: Uuid::new_v4().to_string(),
            username: "Rosa".to_string(),
            email: email.to_string(),
            role,
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.staff();

        let p = principal("rosa@shop.test", Role::Manager);
        repo.insert(&p, "argon2-hash-here").await.unwrap();

        let by_email = repo.get_by_email("rosa@shop.test").await.unwrap().unwrap();
        assert_eq!(by_email.role, Role::Manager);
        assert_eq!(by_email.id, p.id);

        let creds = repo
            .credentials_by_email("rosa@shop.test")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(creds.password_hash, "argon2-hash-here");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.staff();

        repo.insert(&principal("x@shop.test", Role::Mechanic), "h1")
            .await
            .unwrap();
        let err = repo
            .insert(&principal("x@shop.test", Role::Owner), "h2")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.staff();

        let p = principal("y@shop.test", Role::Mechanic);
        repo.insert(&p, "h").await.unwrap();
        repo.delete(&p.id).await.unwrap();
        assert!(repo.get_by_id(&p.id).await.unwrap().is_none());

        let err = repo.delete(&p.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
