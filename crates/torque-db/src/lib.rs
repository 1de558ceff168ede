//! # torque-db: Database Layer for Torque ERP
//!
//! This crate provides database access for Torque ERP.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Torque ERP Data Flow                             │
//! │                                                                         │
//! │  App operation (create_sale)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     torque-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ SaleRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CouponRepo    │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │ StaffRepo ... │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (torque.db)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations, one per collection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use torque_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/torque.db")).await?;
//! let coupon = db.coupons().resolve("SUMMER10").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::audit::AuditRepository;
pub use repository::coupon::CouponRepository;
pub use repository::sale::SaleRepository;
pub use repository::service::ServiceRepository;
pub use repository::settings::SettingsRepository;
pub use repository::staff::{StaffCredentials, StaffRepository};
pub use repository::timesheet::TimesheetRepository;
