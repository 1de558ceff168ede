//! # Sales Reporting
//!
//! Dashboard summary aggregates: total revenue, sale count, and the
//! per-service breakdown behind the distribution chart.
//!
//! The input is a sales list the caller is already allowed to see (the app
//! layer filters by visibility first), so a mechanic's dashboard totals
//! cover only their own sales while a manager's cover the whole shop.

use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

use crate::pricing::round_display;
use crate::types::Sale;

/// Dashboard summary over a visible sales list.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    /// Sum of stored totals, rounded for display.
    pub total_revenue: f64,

    /// Number of sales.
    pub sale_count: usize,

    /// Per-service breakdown, highest revenue first.
    pub services: Vec<ServiceBreakdown>,
}

/// One service's share of the summary.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ServiceBreakdown {
    /// Grouped on the denormalized snapshot, so sales of a since-renamed
    /// or deleted service still report under the name they were sold as.
    pub service_name: String,

    pub sale_count: usize,
    pub units_sold: i64,

    /// Revenue for this service, rounded for display.
    pub revenue: f64,
}

/// Computes the dashboard summary for a sales list.
pub fn summarize_sales(sales: &[Sale]) -> SalesSummary {
    let mut by_service: BTreeMap<&str, (usize, i64, f64)> = BTreeMap::new();
    let mut total = 0.0;

    for sale in sales {
        total += sale.total;
        let slot = by_service.entry(sale.service_name.as_str()).or_default();
        slot.0 += 1;
        slot.1 += sale.quantity;
        slot.2 += sale.total;
    }

    let mut services: Vec<ServiceBreakdown> = by_service
        .into_iter()
        .map(|(name, (sale_count, units_sold, revenue))| ServiceBreakdown {
            service_name: name.to_string(),
            sale_count,
            units_sold,
            revenue: round_display(revenue),
        })
        .collect();

    // Highest revenue first; BTreeMap iteration already fixed the name
    // order for ties.
    services.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));

    SalesSummary {
        total_revenue: round_display(total),
        sale_count: sales.len(),
        services,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
