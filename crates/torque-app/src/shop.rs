//! # Shop Service
//!
//! The application-facing operation surface. Every mutating operation runs a
//! fixed sequence over the repositories:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Operation Sequence                               │
//! │                                                                         │
//! │  authorize ──► validate ──► primary write ──► audit ──► notify          │
//! │                                    │             │         │            │
//! │                                    │             └── fire-and-forget ───┤
//! │                                    ▼                                    │
//! │                              the only step                              │
//! │                              that can fail the call                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Later steps never roll back earlier ones: a sale whose audit write fails
//! is still a sale.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use torque_core::{
    coupon::normalize_code,
    policy::{self, Screen},
    pricing::{compute_total, round_display},
    reporting, validation,
    AppSettings, AuditEntry, Coupon, Principal, Role, Sale, SalesSummary, Service, Timesheet,
    WorkStatus,
};
use torque_db::Database;

use crate::audit::{actions, AuditLogger};
use crate::backup::BackupSnapshot;
use crate::error::{AppError, AppResult};
use crate::notify::Notifier;

// =============================================================================
// Requests
// =============================================================================

/// Payload for creating a staff account.
#[derive(Debug, Clone)]
pub struct NewStaff {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password: String,
    pub avatar_url: Option<String>,
}

// =============================================================================
// ShopService
// =============================================================================

/// Orchestrates shop operations over the database, audit trail and webhook.
#[derive(Clone)]
pub struct ShopService {
    db: Database,
    audit: AuditLogger,
    notifier: Notifier,
}

impl ShopService {
    /// Create a new shop service.
    pub fn new(db: Database, audit: AuditLogger, notifier: Notifier) -> Self {
        ShopService { db, audit, notifier }
    }

    /// Convenience constructor wiring the audit writer and notifier to the
    /// same database handle.
    pub fn over(db: Database) -> Self {
        let audit = AuditLogger::spawn(db.audit());
        let notifier = Notifier::new(db.clone());
        ShopService::new(db, audit, notifier)
    }

    /// Require that the caller's role may access the given screen.
    ///
    /// Route resolution silently redirects unauthorized navigation, but the
    /// operations behind a screen re-check and refuse outright.
    fn authorize(&self, caller: &Principal, screen: Screen) -> AppResult<()> {
        if policy::can_view(caller.role, screen) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "{} role may not access {}",
                caller.role.as_str(),
                screen.path()
            )))
        }
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Record a sale.
    ///
    /// The discount is either entered manually (0-100) or derived from a
    /// coupon code; when both are supplied the coupon wins, since the sale
    /// form fills the discount field from the resolved coupon.
    ///
    /// Sequence: resolve coupon (when a code is given) → fetch the service
    /// (missing aborts before any write) → compute the total → insert with
    /// name snapshots → audit → notify.
    pub async fn create_sale(
        &self,
        caller: &Principal,
        service_id: &str,
        quantity: i64,
        manual_discount: Option<f64>,
        coupon_code: Option<&str>,
    ) -> AppResult<Sale> {
        self.authorize(caller, Screen::Sales)?;
        validation::validate_quantity(quantity)?;
        if let Some(pct) = manual_discount {
            validation::validate_discount_percent(pct)?;
        }

        let discount_percent = match coupon_code {
            Some(code) => {
                let normalized = normalize_code(code);
                let coupon = self
                    .db
                    .coupons()
                    .resolve(&normalized)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Coupon {}", normalized)))?;
                debug!(code = %coupon.code, discount = coupon.discount_percent, "Coupon applied");
                Some(coupon.discount_percent)
            }
            None => manual_discount,
        };

        let service = self
            .db
            .services()
            .get_by_id(service_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Service {}", service_id)))?;

        let total = compute_total(service.price, quantity, discount_percent);

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            user_id: caller.id.clone(),
            user_name: caller.username.clone(),
            service_id: service.id.clone(),
            service_name: service.name.clone(),
            quantity,
            discount_percent,
            total,
            created_at: Utc::now(),
        };

        self.db.sales().insert(&sale).await?;

        info!(
            sale_id = %sale.id,
            user = %caller.username,
            service = %service.name,
            total = round_display(total),
            "Sale recorded"
        );

        self.audit.record(
            actions::CREATE_SALE,
            &caller.username,
            format!(
                "Sold {}x {} for ${:.2}",
                quantity,
                service.name,
                round_display(total)
            ),
        );
        self.notifier.notify(format!(
            "New sale: {}x {} by {} (${:.2})",
            quantity,
            service.name,
            caller.username,
            round_display(total)
        ));

        Ok(sale)
    }

    /// List sales visible to the caller: mechanics see only their own,
    /// managers and owners see all.
    pub async fn list_sales(&self, caller: &Principal) -> AppResult<Vec<Sale>> {
        self.authorize(caller, Screen::Sales)?;

        if policy::sees_all_sales(caller) {
            Ok(self.db.sales().list().await?)
        } else {
            Ok(self.db.sales().list_by_user(&caller.id).await?)
        }
    }

    /// Dashboard summary over the sales visible to the caller: a mechanic's
    /// numbers cover only their own sales, a manager's the whole shop.
    pub async fn dashboard_stats(&self, caller: &Principal) -> AppResult<SalesSummary> {
        let sales = self.list_sales(caller).await?;
        Ok(reporting::summarize_sales(&sales))
    }

    // =========================================================================
    // Service catalog
    // =========================================================================

    /// List the service catalog. Visible to every authenticated role; the
    /// sale form needs it even for mechanics.
    pub async fn list_services(&self, _caller: &Principal) -> AppResult<Vec<Service>> {
        Ok(self.db.services().list().await?)
    }

    /// Add a catalog entry (manager and above).
    pub async fn create_service(
        &self,
        caller: &Principal,
        name: &str,
        price: f64,
    ) -> AppResult<Service> {
        self.authorize(caller, Screen::Services)?;
        validation::validate_display_name("name", name)?;
        validation::validate_price(price)?;

        let service = Service {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price,
        };

        self.db.services().insert(&service).await?;

        self.audit.record(
            actions::CREATE_SERVICE,
            &caller.username,
            format!("Added service {} at ${:.2}", service.name, price),
        );

        Ok(service)
    }

    /// Update a catalog entry (manager and above). Past sales keep their
    /// creation-time name and price snapshots.
    pub async fn update_service(&self, caller: &Principal, service: &Service) -> AppResult<()> {
        self.authorize(caller, Screen::Services)?;
        validation::validate_display_name("name", &service.name)?;
        validation::validate_price(service.price)?;

        self.db.services().update(service).await?;

        self.audit.record(
            actions::UPDATE_SERVICE,
            &caller.username,
            format!("Updated service {}", service.name),
        );

        Ok(())
    }

    /// Remove a catalog entry (manager and above). Sales referencing it
    /// survive unharmed thanks to their denormalized snapshots.
    pub async fn delete_service(&self, caller: &Principal, service_id: &str) -> AppResult<()> {
        self.authorize(caller, Screen::Services)?;

        let service = self
            .db
            .services()
            .get_by_id(service_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Service {}", service_id)))?;

        self.db.services().delete(service_id).await?;

        self.audit.record(
            actions::DELETE_SERVICE,
            &caller.username,
            format!("Deleted service {}", service.name),
        );

        Ok(())
    }

    // =========================================================================
    // Team
    // =========================================================================

    /// List staff accounts (manager and above).
    pub async fn list_staff(&self, caller: &Principal) -> AppResult<Vec<Principal>> {
        self.authorize(caller, Screen::Team)?;
        Ok(self.db.staff().list().await?)
    }

    /// Create a staff account (manager and above). Accounts are always
    /// provisioned by an administrator, never self-registered.
    pub async fn create_staff(&self, caller: &Principal, req: NewStaff) -> AppResult<Principal> {
        self.authorize(caller, Screen::Team)?;
        validation::validate_display_name("username", &req.username)?;

        let password_hash = crate::auth::hash_password(&req.password)?;

        let principal = Principal {
            id: Uuid::new_v4().to_string(),
            username: req.username,
            email: req.email,
            role: req.role,
            avatar_url: req.avatar_url,
        };

        self.db.staff().insert(&principal, &password_hash).await?;

        self.audit.record(
            actions::CREATE_USER,
            &caller.username,
            format!("Created account for {}", principal.username),
        );
        self.notifier
            .notify(format!("{} joined the team", principal.username));

        Ok(principal)
    }

    /// Delete a staff account (manager and above). Historical sales keep
    /// the departed member's name snapshot.
    pub async fn delete_staff(&self, caller: &Principal, staff_id: &str) -> AppResult<()> {
        self.authorize(caller, Screen::Team)?;

        let member = self
            .db
            .staff()
            .get_by_id(staff_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Staff {}", staff_id)))?;

        self.db.staff().delete(staff_id).await?;

        self.audit.record(
            actions::DELETE_USER,
            &caller.username,
            format!("Deleted account for {}", member.username),
        );

        Ok(())
    }

    // =========================================================================
    // Coupons
    // =========================================================================

    /// List all coupons, active and inactive (owner only).
    pub async fn list_coupons(&self, caller: &Principal) -> AppResult<Vec<Coupon>> {
        self.authorize(caller, Screen::Settings)?;
        Ok(self.db.coupons().list().await?)
    }

    /// Create a coupon (owner only). The code is persisted upper-cased.
    pub async fn create_coupon(
        &self,
        caller: &Principal,
        code: &str,
        discount_percent: f64,
    ) -> AppResult<Coupon> {
        self.authorize(caller, Screen::Settings)?;
        validation::validate_coupon_code(code)?;
        validation::validate_coupon_discount(discount_percent)?;

        let coupon = Coupon {
            id: Uuid::new_v4().to_string(),
            code: normalize_code(code),
            discount_percent,
            active: true,
        };

        self.db.coupons().insert(&coupon).await?;

        self.audit.record(
            actions::CREATE_COUPON,
            &caller.username,
            format!("Created coupon {} ({}% off)", coupon.code, discount_percent),
        );

        Ok(coupon)
    }

    /// Toggle a coupon's active flag (owner only). Never touches past sales.
    pub async fn set_coupon_active(
        &self,
        caller: &Principal,
        coupon_id: &str,
        active: bool,
    ) -> AppResult<()> {
        self.authorize(caller, Screen::Settings)?;

        self.db.coupons().set_active(coupon_id, active).await?;

        self.audit.record(
            actions::UPDATE_COUPON,
            &caller.username,
            format!(
                "Coupon {} {}",
                coupon_id,
                if active { "activated" } else { "deactivated" }
            ),
        );

        Ok(())
    }

    /// Delete a coupon (owner only).
    pub async fn delete_coupon(&self, caller: &Principal, coupon_id: &str) -> AppResult<()> {
        self.authorize(caller, Screen::Settings)?;

        self.db.coupons().delete(coupon_id).await?;

        self.audit.record(
            actions::DELETE_COUPON,
            &caller.username,
            format!("Deleted coupon {}", coupon_id),
        );

        Ok(())
    }

    // =========================================================================
    // Timesheets
    // =========================================================================

    /// Clock the caller in. A second clock-in while already working is a
    /// silent no-op: no write, no audit entry, no notification.
    ///
    /// Returns whether a new entry was opened.
    pub async fn clock_in(&self, caller: &Principal) -> AppResult<bool> {
        let opened = self.db.timesheets().clock_in(&caller.id).await?;

        if opened {
            self.audit.record(
                actions::CLOCK_IN,
                &caller.username,
                format!("{} clocked in", caller.username),
            );
            self.notifier
                .notify(format!("{} clocked in", caller.username));
        } else {
            debug!(user = %caller.username, "Clock-in skipped, already working");
        }

        Ok(opened)
    }

    /// Clock the caller out. Clocking out while offline is a silent no-op.
    ///
    /// Returns whether an open entry was closed.
    pub async fn clock_out(&self, caller: &Principal) -> AppResult<bool> {
        let closed = self.db.timesheets().clock_out(&caller.id).await?;

        if closed {
            self.audit.record(
                actions::CLOCK_OUT,
                &caller.username,
                format!("{} clocked out", caller.username),
            );
            self.notifier
                .notify(format!("{} clocked out", caller.username));
        } else {
            debug!(user = %caller.username, "Clock-out skipped, not working");
        }

        Ok(closed)
    }

    /// Derived presence status for the caller.
    pub async fn work_status(&self, caller: &Principal) -> AppResult<WorkStatus> {
        Ok(self.db.timesheets().status(&caller.id).await?)
    }

    /// The caller's timesheet history, newest first.
    pub async fn timesheet_history(&self, caller: &Principal) -> AppResult<Vec<Timesheet>> {
        Ok(self.db.timesheets().list_for_user(&caller.id).await?)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Read the settings singleton. Available to every role; the login
    /// screen itself renders the configured branding.
    pub async fn settings(&self) -> AppResult<AppSettings> {
        Ok(self.db.settings().get().await?)
    }

    /// Replace the settings singleton wholesale (owner only).
    pub async fn save_settings(
        &self,
        caller: &Principal,
        settings: &AppSettings,
    ) -> AppResult<()> {
        self.authorize(caller, Screen::Settings)?;
        validation::validate_display_name("company_name", &settings.company_name)?;
        validation::validate_display_name("login_title", &settings.login_title)?;

        self.db.settings().save(settings).await?;

        self.audit.record(
            actions::UPDATE_SETTINGS,
            &caller.username,
            "Updated application settings",
        );

        Ok(())
    }

    // =========================================================================
    // Audit & backup
    // =========================================================================

    /// List the audit trail, newest first (manager and above).
    pub async fn list_audit(&self, caller: &Principal) -> AppResult<Vec<AuditEntry>> {
        if !caller.role.at_least(Role::Manager) {
            return Err(AppError::forbidden("audit log requires manager role"));
        }
        Ok(self.db.audit().list().await?)
    }

    /// Export a backup snapshot. Sales are filtered by the caller's
    /// visibility before the document is assembled.
    pub async fn backup(&self, caller: &Principal) -> AppResult<BackupSnapshot> {
        let sales = self.list_sales(caller).await?;
        let services = self.db.services().list().await?;
        let coupons = self.db.coupons().list().await?;
        let settings = self.db.settings().get().await?;

        info!(
            user = %caller.username,
            sales = sales.len(),
            services = services.len(),
            "Backup exported"
        );

        Ok(BackupSnapshot {
            exported_at: Utc::now(),
            sales,
            services,
            coupons,
            settings,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
