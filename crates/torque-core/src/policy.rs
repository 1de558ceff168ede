//! # Role-Scoped Visibility Policy
//!
//! Determines which screens and records a principal may see, based on the
//! three-tier role.
//!
//! ## Policy Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen      │  mechanic  │  manager  │  owner                          │
//! │  ──────────  │  ────────  │  ───────  │  ─────                          │
//! │  Dashboard   │     ✓      │     ✓     │    ✓                            │
//! │  Sales       │     ✓      │     ✓     │    ✓                            │
//! │  Services    │            │     ✓     │    ✓                            │
//! │  Team        │            │     ✓     │    ✓                            │
//! │  Settings    │            │           │    ✓                            │
//! │                                                                         │
//! │  Sales rows  │  own only  │    all    │   all                           │
//! │  Audit log   │            │     ✓     │    ✓                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Enforcement Point
//! Route resolution never errors: a principal navigating to a screen above
//! its privilege is redirected to the default (Dashboard) route. Mutating
//! operations additionally re-check the screen requirement in the app layer,
//! so a caller bypassing the navigation surface still hits the same table.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Principal, Role, Sale};

// =============================================================================
// Screens
// =============================================================================

/// The navigable screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Dashboard,
    Sales,
    Services,
    Team,
    Settings,
}

impl Screen {
    /// Fixed allow-list of roles per screen.
    pub const fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Screen::Dashboard | Screen::Sales => {
                &[Role::Mechanic, Role::Manager, Role::Owner]
            }
            Screen::Services | Screen::Team => &[Role::Manager, Role::Owner],
            Screen::Settings => &[Role::Owner],
        }
    }

    /// Route path as served to the frontend router.
    pub const fn path(&self) -> &'static str {
        match self {
            Screen::Dashboard => "/",
            Screen::Sales => "/sales",
            Screen::Services => "/services",
            Screen::Team => "/team",
            Screen::Settings => "/settings",
        }
    }
}

/// A navigation menu entry: a screen plus its display metadata.
#[derive(Debug, Clone, Copy, Serialize, TS)]
#[ts(export)]
pub struct MenuItem {
    pub label: &'static str,
    pub screen: Screen,
    pub icon: &'static str,
}

/// The full navigation menu, in display order.
pub const MENU_ITEMS: [MenuItem; 5] = [
    MenuItem { label: "Dashboard", screen: Screen::Dashboard, icon: "fa-chart-pie" },
    MenuItem { label: "New Sale", screen: Screen::Sales, icon: "fa-wrench" },
    MenuItem { label: "Services", screen: Screen::Services, icon: "fa-list" },
    MenuItem { label: "Team", screen: Screen::Team, icon: "fa-users" },
    MenuItem { label: "Settings", screen: Screen::Settings, icon: "fa-cogs" },
];

// =============================================================================
// Visibility Rules
// =============================================================================

/// Whether `role` may view `screen`: true iff the role is in the screen's
/// allow-list.
pub fn can_view(role: Role, screen: Screen) -> bool {
    screen.allowed_roles().contains(&role)
}

/// The menu entries visible to `role`, in display order.
pub fn visible_menu(role: Role) -> Vec<MenuItem> {
    MENU_ITEMS
        .iter()
        .filter(|item| can_view(role, item.screen))
        .copied()
        .collect()
}

/// Resolves a navigation request.
///
/// A principal directly navigating to a screen requiring higher privilege is
/// redirected to the default route rather than shown an error.
pub fn resolve_route(role: Role, requested: Screen) -> Screen {
    if can_view(role, requested) {
        requested
    } else {
        Screen::Dashboard
    }
}

/// Filters a sales list down to what `principal` may see.
///
/// A mechanic sees only sales it created; manager and owner see everything.
pub fn filter_sales(principal: &Principal, sales: Vec<Sale>) -> Vec<Sale> {
    match principal.role {
        Role::Mechanic => sales
            .into_iter()
            .filter(|sale| sale.user_id == principal.id)
            .collect(),
        Role::Manager | Role::Owner => sales,
    }
}

/// Whether `principal` sees the full sales collection (vs. only its own).
pub fn sees_all_sales(principal: &Principal) -> bool {
    principal.role.at_least(Role::Manager)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn principal(id: &str, role: Role) -> Principal {
        Principal {
            id: id.to_string(),
            username: format!("user-{id}"),
            email: format!("{id}@shop.test"),
            role,
            avatar_url: None,
        }
    }

    fn sale(id: &str, user_id: &str) -> Sale {
        Sale {
            id: id.to_string(),
            user_id: user_id.to_string(),
            user_name: "someone".to_string(),
            service_id: "svc-1".to_string(),
            service_name: "Oil Change".to_string(),
            quantity: 1,
            discount_percent: None,
            total: 50.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_menu_allow_lists() {
        assert!(can_view(Role::Mechanic, Screen::Dashboard));
        assert!(can_view(Role::Mechanic, Screen::Sales));
        assert!(!can_view(Role::Mechanic, Screen::Services));
        assert!(!can_view(Role::Mechanic, Screen::Team));
        assert!(!can_view(Role::Mechanic, Screen::Settings));

        assert!(can_view(Role::Manager, Screen::Services));
        assert!(can_view(Role::Manager, Screen::Team));
        assert!(!can_view(Role::Manager, Screen::Settings));

        for item in MENU_ITEMS {
            assert!(can_view(Role::Owner, item.screen));
        }
    }

    #[test]
    fn test_visible_menu_sizes() {
        assert_eq!(visible_menu(Role::Mechanic).len(), 2);
        assert_eq!(visible_menu(Role::Manager).len(), 4);
        assert_eq!(visible_menu(Role::Owner).len(), 5);
    }

    #[test]
    fn test_route_guard_redirects_to_dashboard() {
        assert_eq!(resolve_route(Role::Mechanic, Screen::Settings), Screen::Dashboard);
        assert_eq!(resolve_route(Role::Manager, Screen::Settings), Screen::Dashboard);
        assert_eq!(resolve_route(Role::Manager, Screen::Team), Screen::Team);
        assert_eq!(resolve_route(Role::Owner, Screen::Settings), Screen::Settings);
    }

    #[test]
    fn test_mechanic_sees_only_own_sales() {
        let mechanic = principal("m1", Role::Mechanic);
        let sales = vec![sale("s1", "m1"), sale("s2", "m2"), sale("s3", "m1")];

        let visible = filter_sales(&mechanic, sales);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|s| s.user_id == "m1"));
    }

    #[test]
    fn test_manager_and_owner_see_all_sales() {
        let sales = vec![sale("s1", "m1"), sale("s2", "m2")];

        for role in [Role::Manager, Role::Owner] {
            let boss = principal("boss", role);
            assert!(sees_all_sales(&boss));
            let visible = filter_sales(&boss, sales.clone());
            assert_eq!(visible.len(), 2);
        }
    }
}
