//! Validation rules for the Chocorocks inventory dashboard
//!
//! These are fast local checks; the backend remains the authority for every
//! rule here. Writers re-validate against a fresh snapshot immediately
//! before submitting, accepting that races with other sessions are possible.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::ProductBatch;

// ============================================================================
// Batch Validations
// ============================================================================

pub const BATCH_CODE_MIN_LEN: usize = 3;
pub const BATCH_CODE_MAX_LEN: usize = 50;

/// Upper bound for a batch's initial quantity
pub const MAX_BATCH_QUANTITY: i32 = 10_000;

/// Validate a batch code: non-empty, 3-50 characters after trimming
pub fn validate_batch_code(code: &str) -> Result<(), &'static str> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err("Batch code is required");
    }
    if trimmed.len() < BATCH_CODE_MIN_LEN {
        return Err("Batch code must be at least 3 characters");
    }
    if trimmed.len() > BATCH_CODE_MAX_LEN {
        return Err("Batch code must be at most 50 characters");
    }
    Ok(())
}

/// Uniqueness among the currently-loaded batches, ignoring case and
/// surrounding whitespace. Advisory: the server never enforces this.
pub fn is_batch_code_taken(code: &str, existing: &[ProductBatch]) -> bool {
    let needle = code.trim().to_lowercase();
    existing
        .iter()
        .any(|b| b.batch_code.trim().to_lowercase() == needle)
}

pub fn validate_production_date(
    production: NaiveDate,
    today: NaiveDate,
) -> Result<(), &'static str> {
    if production > today {
        return Err("Production date cannot be in the future");
    }
    Ok(())
}

/// For new batches: after production, and not already past
pub fn validate_expiration_date(
    production: NaiveDate,
    expiration: NaiveDate,
    today: NaiveDate,
) -> Result<(), &'static str> {
    if expiration <= production {
        return Err("Expiration date must be after production date");
    }
    if expiration < today {
        return Err("Expiration date is already in the past");
    }
    Ok(())
}

pub fn validate_initial_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Initial quantity must be a positive integer");
    }
    if quantity > MAX_BATCH_QUANTITY {
        return Err("Initial quantity exceeds the allowed maximum");
    }
    Ok(())
}

/// Edits never push a batch outside `[0, initial_quantity]`
pub fn clamp_current_quantity(requested: i32, initial_quantity: i32) -> i32 {
    requested.max(0).min(initial_quantity.max(0))
}

// ============================================================================
// General Validations
// ============================================================================

pub fn validate_positive_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be a positive integer");
    }
    Ok(())
}

pub fn validate_unit_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Unit price cannot be negative");
    }
    Ok(())
}

/// Basic email shape check for client records
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn batch_with_code(code: &str) -> ProductBatch {
        ProductBatch {
            id: 1,
            batch_code: code.to_string(),
            product_id: 1,
            store_id: None,
            production_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            expiration_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            initial_quantity: 100,
            current_quantity: 100,
            batch_cost: Decimal::from(50),
            is_active: true,
        }
    }

    #[test]
    fn test_validate_batch_code_valid() {
        assert!(validate_batch_code("ABC").is_ok());
        assert!(validate_batch_code("CHOC-2025-0042").is_ok());
        assert!(validate_batch_code(&"X".repeat(50)).is_ok());
    }

    #[test]
    fn test_validate_batch_code_invalid() {
        assert!(validate_batch_code("").is_err());
        assert!(validate_batch_code("   ").is_err());
        assert!(validate_batch_code("AB").is_err());
        assert!(validate_batch_code(&"X".repeat(51)).is_err());
    }

    #[test]
    fn test_batch_code_uniqueness_case_insensitive() {
        let existing = vec![batch_with_code("CHOC-001"), batch_with_code("CHOC-002 ")];
        assert!(is_batch_code_taken("choc-001", &existing));
        assert!(is_batch_code_taken("  CHOC-002", &existing));
        assert!(!is_batch_code_taken("CHOC-003", &existing));
    }

    #[test]
    fn test_validate_production_date() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert!(validate_production_date(today, today).is_ok());
        assert!(validate_production_date(today.pred_opt().unwrap(), today).is_ok());
        assert!(validate_production_date(today.succ_opt().unwrap(), today).is_err());
    }

    #[test]
    fn test_validate_expiration_date() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let production = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();

        assert!(validate_expiration_date(
            production,
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            today
        )
        .is_ok());
        // not after production
        assert!(validate_expiration_date(production, production, today).is_err());
        // already past
        assert!(validate_expiration_date(
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 15).unwrap(),
            today
        )
        .is_err());
    }

    #[test]
    fn test_validate_initial_quantity() {
        assert!(validate_initial_quantity(1).is_ok());
        assert!(validate_initial_quantity(MAX_BATCH_QUANTITY).is_ok());
        assert!(validate_initial_quantity(0).is_err());
        assert!(validate_initial_quantity(-5).is_err());
        assert!(validate_initial_quantity(MAX_BATCH_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_clamp_current_quantity() {
        assert_eq!(clamp_current_quantity(50, 100), 50);
        assert_eq!(clamp_current_quantity(150, 100), 100);
        assert_eq!(clamp_current_quantity(-10, 100), 0);
        assert_eq!(clamp_current_quantity(0, 100), 0);
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Decimal::ZERO).is_ok());
        assert!(validate_unit_price(Decimal::from(10)).is_ok());
        assert!(validate_unit_price(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("cliente@example.com").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@.").is_err());
    }
}
