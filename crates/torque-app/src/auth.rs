//! Authentication module.
//!
//! First-party login: argon2 password verification against the staff table,
//! then a signed JWT session token. No third-party identity provider is
//! involved; the token is the whole session.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use torque_core::{Principal, Role};
use torque_db::Database;

use crate::error::{AppError, AppResult};

// =============================================================================
// Password hashing
// =============================================================================

/// Hash a password for storage.
pub fn hash_password(password: &str) -> AppResult<String> {
    use argon2::{
        password_hash::{rand_core::OsRng, SaltString},
        Argon2, PasswordHasher,
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify a password against its stored hash.
///
/// A malformed stored hash is a configuration problem, not a wrong password;
/// the two cases are distinguished so operators can spot corrupt rows.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::InvalidConfiguration(format!("Malformed password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

// =============================================================================
// Session tokens
// =============================================================================

/// JWT claims structure for a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (staff id)
    pub sub: String,

    /// Display name at issue time
    pub username: String,

    /// Role at issue time
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// JWT session token manager.
pub struct SessionManager {
    secret: String,
    session_lifetime_secs: i64,
}

impl SessionManager {
    /// Create a new session manager.
    pub fn new(secret: String, session_lifetime_secs: i64) -> Self {
        SessionManager {
            secret,
            session_lifetime_secs,
        }
    }

    /// Issue a session token for an authenticated principal.
    pub fn issue(&self, principal: &Principal) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.session_lifetime_secs);

        let claims = Claims {
            sub: principal.id.clone(),
            username: principal.username.clone(),
            role: principal.role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to generate session token: {}", e)))
    }

    /// Validate and decode a session token.
    pub fn validate(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::default();

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AppError::InvalidCredentials)?;

        Ok(token_data.claims)
    }

    /// Get remaining lifetime of a token in seconds.
    pub fn remaining_lifetime(&self, token: &str) -> AppResult<i64> {
        let claims = self.validate(token)?;
        let now = Utc::now().timestamp();
        Ok(claims.exp - now)
    }
}

/// Extract bearer token from an authorization header value.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

// =============================================================================
// Login
// =============================================================================

/// A successful login: the principal plus their session token.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub principal: Principal,
    pub token: String,
    pub expires_in: i64,
}

/// Authentication service over the staff table.
pub struct Authenticator {
    db: Database,
    sessions: SessionManager,
}

impl Authenticator {
    /// Create a new authenticator.
    pub fn new(db: Database, sessions: SessionManager) -> Self {
        Authenticator { db, sessions }
    }

    /// Authenticate with email and password.
    ///
    /// Unknown email and wrong password both map to `InvalidCredentials`;
    /// only the diagnostic log distinguishes them.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let credentials = match self.db.staff().credentials_by_email(email).await? {
            Some(c) => c,
            None => {
                warn!(email = %email, "Login attempt for unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !verify_password(password, &credentials.password_hash)? {
            warn!(email = %email, "Login attempt with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let principal = self
            .db
            .staff()
            .get_by_id(&credentials.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let token = self.sessions.issue(&principal)?;

        info!(
            user_id = %principal.id,
            username = %principal.username,
            "Login successful"
        );

        Ok(Session {
            principal,
            expires_in: self.sessions_lifetime(),
            token,
        })
    }

    /// Resolve a session token back to the live staff profile.
    ///
    /// The token carries a snapshot of username and role; the live profile
    /// wins when they diverge (role changes take effect on the next request,
    /// deleted staff lose access immediately).
    pub async fn current_profile(&self, token: &str) -> AppResult<Principal> {
        let claims = self.sessions.validate(token)?;

        self.db
            .staff()
            .get_by_id(&claims.sub)
            .await?
            .ok_or(AppError::InvalidCredentials)
    }

    fn sessions_lifetime(&self) -> i64 {
        self.sessions.session_lifetime_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use torque_db::DbConfig;

    fn test_principal() -> Principal {
        Principal {
            id: "staff-001".to_string(),
            username: "Benny".to_string(),
            email: "benny@example.com".to_string(),
            role: Role::Owner,
            avatar_url: None,
        }
    }

    #[test]
    fn test_session_token_roundtrip() {
        let sessions = SessionManager::new("test-secret".to_string(), 3600);
        let token = sessions.issue(&test_principal()).unwrap();

        let claims = sessions.validate(&token).unwrap();
        assert_eq!(claims.sub, "staff-001");
        assert_eq!(claims.username, "Benny");
        assert_eq!(claims.role, Role::Owner);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let sessions = SessionManager::new("test-secret".to_string(), 3600);
        let token = sessions.issue(&test_principal()).unwrap();

        let other = SessionManager::new("other-secret".to_string(), 3600);
        assert!(matches!(
            other.validate(&token),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("wrench-turner-42").unwrap();
        assert!(verify_password("wrench-turner-42", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_configuration_error() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(AppError::InvalidConfiguration(_))));
    }

    #[tokio::test]
    async fn test_login_flow() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let hash = hash_password("shop-floor-9").unwrap();
        db.staff().insert(&test_principal(), &hash).await.unwrap();

        let auth = Authenticator::new(
            db,
            SessionManager::new("test-secret".to_string(), 3600),
        );

        let session = auth.login("benny@example.com", "shop-floor-9").await.unwrap();
        assert_eq!(session.principal.username, "Benny");

        let profile = auth.current_profile(&session.token).await.unwrap();
        assert_eq!(profile.id, "staff-001");

        // Wrong password and unknown email are indistinguishable
        assert!(matches!(
            auth.login("benny@example.com", "nope").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("ghost@example.com", "nope").await,
            Err(AppError::InvalidCredentials)
        ));
    }
}
