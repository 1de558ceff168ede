//! # torque-core: Pure Business Logic for Torque ERP
//!
//! This crate is the **heart** of Torque ERP, the back office for a small
//! vehicle-repair shop. It contains all business logic as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Torque ERP Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (SPA)                               │   │
//! │  │    Dashboard ──► New Sale ──► Services ──► Team ──► Settings    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    torque-app                                   │   │
//! │  │    login, create_sale, clock_in, save_settings, backup, ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ torque-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │  policy   │  │ validation│  │   │
//! │  │   │ Principal │  │  totals   │  │ role gates│  │   rules   │  │   │
//! │  │   │ Sale, ... │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    torque-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Principal, Service, Sale, Coupon, ...)
//! - [`pricing`] - The sale-total formula
//! - [`policy`] - Role-scoped visibility rules and route resolution
//! - [`coupon`] - Coupon code normalization
//! - [`reporting`] - Dashboard summary aggregates
//! - [`validation`] - Input range and shape checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Closed Role Enum**: role branching is exhaustiveness-checked by the compiler
//! 4. **Explicit Errors**: validation failures are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coupon;
pub mod policy;
pub mod pricing;
pub mod reporting;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use torque_core::Role` instead of
// `use torque_core::types::Role`

pub use policy::{MenuItem, Screen, MENU_ITEMS};
pub use reporting::{SalesSummary, ServiceBreakdown};
pub use types::*;
pub use validation::ValidationError;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default shop name shown until the owner saves settings.
pub const DEFAULT_COMPANY_NAME: &str = "Benny's Motorworks";

/// Default login screen title.
pub const DEFAULT_LOGIN_TITLE: &str = "Mechanic Portal Access";

/// Default logo reference.
pub const DEFAULT_LOGO_URL: &str = "https://picsum.photos/200/200";

/// Maximum quantity on a single sale line
///
/// ## Business Reason
/// Prevents accidental over-entry (e.g., typing 1000 instead of 10).
/// The UI caps at the same value; this is the server-side backstop.
pub const MAX_SALE_QUANTITY: i64 = 999;
