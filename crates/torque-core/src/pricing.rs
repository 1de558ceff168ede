//! # Pricing Module
//!
//! The sale-total formula and its display rounding.
//!
//! ## Where Pricing Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sale Confirmation Flow                              │
//! │                                                                         │
//! │  Coupon Resolver (optional) ──► discount_percent                        │
//! │                                      │                                  │
//! │  Service.price ──────────────────────┼──► compute_total() ── THIS FILE  │
//! │  quantity ───────────────────────────┘         │                        │
//! │                                                ▼                        │
//! │                                       Sale.total (stored raw)           │
//! │                                                │                        │
//! │                                                ▼                        │
//! │                                  round_display() at render time only    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why f64 and Not Integer Cents?
//! The upstream store keeps prices as raw numerics and the stored total is
//! defined as the unrounded product. Converting to integer cents would bake
//! a rounding step into the computation and change historical totals, so the
//! engine works on f64 and leaves rounding to the display boundary.

// =============================================================================
// Total Computation
// =============================================================================

/// Computes a sale's monetary total.
///
/// Formula: `total = unit_price * quantity * (1 - discount_percent / 100)`.
///
/// ## Contract
/// * `unit_price`: non-negative
/// * `quantity`: positive integer
/// * `discount_percent`: in [0, 100]; `None` means no discount
///
/// The engine performs **no validation and no rounding**: callers are
/// responsible for range checks (see [`crate::validation`]) and the returned
/// value is the raw floating-point product.
///
/// ## Example
/// ```rust
/// use torque_core::pricing::compute_total;
///
/// assert_eq!(compute_total(100.0, 2, Some(10.0)), 180.0);
/// assert_eq!(compute_total(50.0, 1, None), 50.0);
/// assert_eq!(compute_total(0.0, 5, Some(50.0)), 0.0);
/// ```
#[inline]
pub fn compute_total(unit_price: f64, quantity: i64, discount_percent: Option<f64>) -> f64 {
    let discount = discount_percent.unwrap_or(0.0);
    unit_price * quantity as f64 * (1.0 - discount / 100.0)
}

/// Rounds a stored total to two decimals for display.
///
/// Rounding happens **only** here; stored totals stay raw.
#[inline]
pub fn round_display(total: f64) -> f64 {
    (total * 100.0).round() / 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_total_known_values() {
        assert_eq!(compute_total(100.0, 2, Some(10.0)), 180.0);
        assert_eq!(compute_total(50.0, 1, Some(0.0)), 50.0);
        assert_eq!(compute_total(0.0, 5, Some(50.0)), 0.0);
        // Coupon scenario: 200 * 3 at 15% off
        assert_eq!(compute_total(200.0, 3, Some(15.0)), 510.0);
    }

    #[test]
    fn test_missing_discount_defaults_to_zero() {
        assert_eq!(compute_total(80.0, 2, None), compute_total(80.0, 2, Some(0.0)));
    }

    #[test]
    fn test_full_discount_is_free() {
        assert_eq!(compute_total(199.99, 3, Some(100.0)), 0.0);
    }

    /// Total is non-increasing in discount, non-decreasing in quantity and
    /// unit price.
    #[test]
    fn test_monotonicity() {
        let base = compute_total(120.0, 4, Some(25.0));

        assert!(compute_total(120.0, 4, Some(30.0)) <= base);
        assert!(compute_total(120.0, 4, Some(20.0)) >= base);
        assert!(compute_total(120.0, 5, Some(25.0)) >= base);
        assert!(compute_total(120.0, 3, Some(25.0)) <= base);
        assert!(compute_total(130.0, 4, Some(25.0)) >= base);
        assert!(compute_total(110.0, 4, Some(25.0)) <= base);
    }

    /// The stored total is the raw product; only display rounds.
    #[test]
    fn test_no_rounding_at_computation_time() {
        let total = compute_total(19.99, 1, Some(15.0));
        assert!((total - 16.9915).abs() < 1e-9);
        assert_eq!(round_display(total), 16.99);
    }

    #[test]
    fn test_round_display() {
        assert_eq!(round_display(3.14159), 3.14);
        assert_eq!(round_display(2.718), 2.72);
        assert_eq!(round_display(510.0), 510.0);
    }
}
