//! # Repository Module
//!
//! Database repository implementations for Torque ERP.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  App operation                                                         │
//! │       │                                                                 │
//! │       │  db.coupons().resolve("SUMMER10")                              │
//! │       ▼                                                                 │
//! │  CouponRepository                                                      │
//! │  ├── resolve(&self, code)                                              │
//! │  ├── insert(&self, coupon)                                             │
//! │  └── set_active(&self, id, active)                                     │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place per collection                         │
//! │  • Easy to test against an in-memory database                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`staff::StaffRepository`] - Staff profiles and login credentials
//! - [`service::ServiceRepository`] - Service catalog CRUD
//! - [`sale::SaleRepository`] - Insert-only sales with snapshots
//! - [`coupon::CouponRepository`] - Coupon CRUD and the resolver
//! - [`settings::SettingsRepository`] - The white-label singleton
//! - [`timesheet::TimesheetRepository`] - Clock-in/out state
//! - [`audit::AuditRepository`] - Append-only audit trail

pub mod audit;
pub mod coupon;
pub mod sale;
pub mod service;
pub mod settings;
pub mod staff;
pub mod timesheet;
