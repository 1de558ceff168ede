//! # Coupon Code Normalization
//!
//! Coupon codes are persisted upper-cased and resolved by exact match on the
//! stored form, so lookups are case-insensitive-equivalent as long as both
//! sides pass through [`normalize_code`] first.
//!
//! Resolution itself is a store lookup (see the coupon repository): only
//! active coupons resolve, and an inactive coupon is indistinguishable from
//! a nonexistent one at the resolver boundary. That is deliberate: callers
//! must not be able to probe whether a disabled code exists.

/// Normalizes a coupon code to its stored comparison form.
///
/// Leading/trailing whitespace is stripped and the code is upper-cased.
///
/// ## Example
/// ```rust
/// use torque_core::coupon::normalize_code;
///
/// assert_eq!(normalize_code("  summer10 "), "SUMMER10");
/// assert_eq!(normalize_code("SUMMER10"), "SUMMER10");
/// ```
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
