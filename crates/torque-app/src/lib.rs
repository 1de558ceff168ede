//! # Torque ERP Application Layer
//!
//! Wires the pure domain logic (`torque-core`) and the SQLite repositories
//! (`torque-db`) into the operation surface a frontend talks to.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          torque-app                                     │
//! │                                                                         │
//! │  Frontend ───► Authenticator ──► ShopService ──► torque-db              │
//! │                 (argon2+JWT)          │                                 │
//! │                                       ├──► AuditLogger (fire & forget)  │
//! │                                       └──► Notifier    (best effort)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod audit;
pub mod auth;
pub mod backup;
pub mod config;
pub mod error;
pub mod notify;
pub mod shop;

pub use audit::{actions, AuditLogger};
pub use auth::{Authenticator, Claims, Session, SessionManager};
pub use backup::BackupSnapshot;
pub use config::{Config, ConfigError};
pub use error::{AppError, AppResult};
pub use notify::Notifier;
pub use shop::{NewStaff, ShopService};

use torque_db::{Database, DbConfig};
use tracing::info;

/// Fully wired application state.
pub struct App {
    pub config: Config,
    pub db: Database,
    pub auth: Authenticator,
    pub shop: ShopService,
}

impl App {
    /// Bootstrap the application from a loaded configuration: open the
    /// database (running migrations), then wire auth, audit, and webhooks.
    pub async fn bootstrap(config: Config) -> AppResult<Self> {
        let db = Database::new(DbConfig::new(&config.database_path)).await?;

        let sessions = SessionManager::new(
            config.jwt_secret.clone(),
            config.jwt_session_lifetime_secs,
        );
        let auth = Authenticator::new(db.clone(), sessions);
        let shop = ShopService::over(db.clone());

        info!(db_path = %config.database_path, "Application bootstrapped");

        Ok(App {
            config,
            db,
            auth,
            shop,
        })
    }
}

/// Initialize the tracing subscriber from the `RUST_LOG` environment
/// variable, defaulting to `info`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();
}
