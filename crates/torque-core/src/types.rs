//! # Domain Types
//!
//! Core domain types used throughout Torque ERP.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Principal     │   │     Service     │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  username       │   │  name           │   │  user_id (FK)   │       │
//! │  │  role           │   │  price          │   │  service_id(FK) │       │
//! │  │  avatar_url     │   │                 │   │  total          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Coupon      │   │   AppSettings   │   │   Timesheet     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code (UPPER)   │   │  singleton      │   │  clock_in       │       │
//! │  │  active flag    │   │  whole-doc save │   │  clock_out?     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `Sale` carries denormalized `user_name` and `service_name` copies frozen
//! at creation time. They are never refreshed when the source Service or
//! Principal changes later: historical accuracy wins over storage duplication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{DEFAULT_COMPANY_NAME, DEFAULT_LOGIN_TITLE, DEFAULT_LOGO_URL};

// =============================================================================
// Role
// =============================================================================

/// Staff role, ordered by increasing privilege.
///
/// ## Why a Closed Enum?
/// The source data stores roles as strings. Modeling them as a closed enum
/// means every role-based branch is exhaustiveness-checked by the compiler;
/// adding a fourth role breaks the build until every policy table is updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Shop-floor staff. Sees only their own sales.
    Mechanic,
    /// Supervises the floor. Sees all sales, manages services and team.
    Manager,
    /// Full access, including white-label settings.
    Owner,
}

impl Role {
    /// Privilege rank: mechanic < manager < owner.
    #[inline]
    pub const fn rank(&self) -> u8 {
        match self {
            Role::Mechanic => 0,
            Role::Manager => 1,
            Role::Owner => 2,
        }
    }

    /// Whether this role holds at least the privilege of `other`.
    #[inline]
    pub const fn at_least(&self, other: Role) -> bool {
        self.rank() >= other.rank()
    }

    /// The lowercase name used in storage and logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Mechanic => "mechanic",
            Role::Manager => "manager",
            Role::Owner => "owner",
        }
    }
}

// =============================================================================
// Principal
// =============================================================================

/// An authenticated actor with an assigned role.
///
/// Principals are created by an administrator action, never self-registered,
/// and deleted explicitly. The identifier is stable for the account's life.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Principal {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the sidebar and denormalized into sales.
    pub username: String,

    /// Login email.
    pub email: String,

    /// One of exactly three roles.
    pub role: Role,

    /// Optional avatar image reference.
    pub avatar_url: Option<String>,
}

// =============================================================================
// Service
// =============================================================================

/// A catalog entry the shop sells (oil change, engine swap, ...).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Service {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, denormalized into sales at creation time.
    pub name: String,

    /// Unit price. Non-negative; raw numeric as the source system stores it.
    pub price: f64,
}

// =============================================================================
// Sale
// =============================================================================

/// A confirmed sale. Created exactly once, immutable thereafter: there is
/// no update or delete path for sales.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    pub id: String,

    /// The principal who made the sale.
    pub user_id: String,

    /// Principal display name at time of sale (frozen).
    pub user_name: String,

    pub service_id: String,

    /// Service name at time of sale (frozen).
    pub service_name: String,

    /// Quantity sold. Positive integer.
    pub quantity: i64,

    /// Percentage discount in [0, 100], absent when none was applied.
    pub discount_percent: Option<f64>,

    /// Computed total: `price * quantity * (1 - discount/100)`.
    /// Stored unrounded; rounding happens only at display time.
    pub total: f64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Coupon
// =============================================================================

/// A named discount rule.
///
/// Codes are persisted upper-cased; lookups compare on that normalized form.
/// Toggling `active` never retroactively affects past sales.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Coupon {
    pub id: String,

    /// Stored in normalized (upper-cased) form.
    pub code: String,

    /// Percentage discount in [1, 100].
    pub discount_percent: f64,

    /// Only active coupons resolve. Inactive coupons are indistinguishable
    /// from nonexistent ones at the resolver boundary.
    pub active: bool,
}

// =============================================================================
// Settings
// =============================================================================

/// White-label settings. Exactly one live instance; read at load by every
/// screen and saved wholesale (no partial patch path).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct AppSettings {
    pub company_name: String,
    pub login_title: String,
    pub logo_url: String,

    /// Outbound notification target. Empty string means notifications are
    /// disabled (no-op dispatch).
    pub webhook_url: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            login_title: DEFAULT_LOGIN_TITLE.to_string(),
            logo_url: DEFAULT_LOGO_URL.to_string(),
            webhook_url: String::new(),
        }
    }
}

// =============================================================================
// Audit Log
// =============================================================================

/// An append-only audit record. One entry per mutating operation that
/// reached the write; never mutated or deleted by the application.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct AuditEntry {
    pub id: String,

    /// Action tag, e.g. `CREATE_SALE`, `DELETE_SERVICE`.
    pub action: String,

    /// Actor display name (not id; matches what the log screen shows).
    pub performed_by: String,

    /// Free-text details.
    pub details: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Timesheet
// =============================================================================

/// A clock-in record. An entry with no `clock_out` value is "open"; at most
/// one open entry may exist per principal at a time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Timesheet {
    pub id: String,
    pub user_id: String,
    #[ts(as = "String")]
    pub clock_in: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub clock_out: Option<DateTime<Utc>>,
}

impl Timesheet {
    /// An open entry has no clock-out value yet.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }
}

/// Derived presence status for a principal.
///
/// `Working` iff an open timesheet entry exists, else `Offline`. This is a
/// two-state machine per principal: clockIn/clockOut in the wrong state are
/// silently ignored rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum WorkStatus {
    Working,
    Offline,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Owner.at_least(Role::Manager));
        assert!(Role::Manager.at_least(Role::Mechanic));
        assert!(!Role::Mechanic.at_least(Role::Manager));
        assert!(Role::Manager.at_least(Role::Manager));
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Mechanic).unwrap(), "\"mechanic\"");
        let role: Role = serde_json::from_str("\"owner\"").unwrap();
        assert_eq!(role, Role::Owner);
    }

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.company_name, DEFAULT_COMPANY_NAME);
        assert_eq!(settings.login_title, DEFAULT_LOGIN_TITLE);
        assert!(settings.webhook_url.is_empty());
    }

    #[test]
    fn test_timesheet_open() {
        let entry = Timesheet {
            id: "t1".to_string(),
            user_id: "u1".to_string(),
            clock_in: Utc::now(),
            clock_out: None,
        };
        assert!(entry.is_open());

        let closed = Timesheet {
            clock_out: Some(Utc::now()),
            ..entry
        };
        assert!(!closed.is_open());
    }
}
