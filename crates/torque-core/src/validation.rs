//! # Validation Module
//!
//! Input validation for Torque ERP.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend inputs (min/max attributes)                          │
//! │  └── Immediate user feedback, trivially bypassable                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (app layer calls before every write)              │
//! │  └── The pricing engine itself stays non-validating; range checks       │
//! │      live here so a caller bypassing the UI cannot store out-of-range   │
//! │      discounts or zero quantities                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (NOT NULL, CHECK constraints)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::MAX_SALE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements. Used for early
/// validation before any persistence write happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad coupon code characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_SALE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_SALE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_SALE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a manual sale discount percentage.
///
/// ## Rules
/// - Must be within [0, 100]
/// - Must be a finite number
pub fn validate_discount_percent(pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a coupon discount percentage.
///
/// Coupons grant at least 1%; a 0% coupon is meaningless.
pub fn validate_coupon_discount(pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() || !(1.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: 1,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a service unit price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: courtesy services)
/// - Must be a finite number
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (service name, staff username, company name).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_display_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a coupon code (pre-normalization).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 32 characters
/// - Only letters, digits, hyphens, underscores
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 32,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_discount_percent() {
        assert!(validate_discount_percent(0.0).is_ok());
        assert!(validate_discount_percent(15.5).is_ok());
        assert!(validate_discount_percent(100.0).is_ok());

        assert!(validate_discount_percent(-1.0).is_err());
        assert!(validate_discount_percent(100.1).is_err());
        assert!(validate_discount_percent(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_coupon_discount() {
        assert!(validate_coupon_discount(1.0).is_ok());
        assert!(validate_coupon_discount(100.0).is_ok());
        assert!(validate_coupon_discount(0.0).is_err());
        assert!(validate_coupon_discount(0.5).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(149.9).is_ok());
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_display_name() {
        assert!(validate_display_name("name", "Oil Change").is_ok());
        assert!(validate_display_name("name", "").is_err());
        assert!(validate_display_name("name", "   ").is_err());
        assert!(validate_display_name("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_coupon_code() {
        assert!(validate_coupon_code("SUMMER10").is_ok());
        assert!(validate_coupon_code("summer-10").is_ok());
        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code("has space").is_err());
        assert!(validate_coupon_code(&"X".repeat(40)).is_err());
    }
}
