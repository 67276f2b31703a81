//! # Validation Module
//!
//! Input validation for checkout requests and report queries.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP boundary (axum)                                         │
//! │  └── Shape of the JSON body / query string (deserialization)           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── quantities > 0, product ids > 0, 1..=100 lines                    │
//! │  └── report dates are YYYY-MM-DD and start <= end                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database                                                     │
//! │  ├── CHECK (stock >= 0), CHECK (price >= 0)                            │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here runs before a unit of work is opened, so a rejected
//! request never touches the store.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{CheckoutItem, DateRange};
use crate::MAX_CHECKOUT_ITEMS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Wire format of report dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Checkout Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Example
/// ```rust
/// use kasir_core::validation::validate_product_id;
///
/// assert!(validate_product_id(1).is_ok());
/// assert!(validate_product_id(0).is_err());
/// ```
pub fn validate_product_id(product_id: i64) -> ValidationResult<()> {
    if product_id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "product_id".to_string(),
        });
    }
    Ok(())
}

/// Validates the quantity of one checkout line.
pub fn validate_quantity(item: &CheckoutItem) -> CoreResult<()> {
    if item.quantity <= 0 {
        return Err(CoreError::InvalidQuantity {
            product_id: item.product_id,
            quantity: item.quantity,
        });
    }
    Ok(())
}

/// Validates a whole checkout request.
///
/// ## Rules
/// - At least one line, at most [`MAX_CHECKOUT_ITEMS`]
/// - Every product id is positive
/// - Every quantity is positive
///
/// The same product may appear on several lines.
pub fn validate_checkout_items(items: &[CheckoutItem]) -> CoreResult<()> {
    if items.is_empty() {
        return Err(CoreError::EmptyCheckout);
    }

    if items.len() > MAX_CHECKOUT_ITEMS {
        return Err(ValidationError::TooMany {
            field: "items".to_string(),
            max: MAX_CHECKOUT_ITEMS,
        }
        .into());
    }

    for item in items {
        validate_product_id(item.product_id)?;
        validate_quantity(item)?;
    }

    Ok(())
}

// =============================================================================
// Report Validators
// =============================================================================

/// Parses an optional report date.
///
/// An empty or blank value means "no bound", matching an absent query
/// parameter.
///
/// ## Example
/// ```rust
/// use kasir_core::validation::parse_report_date;
///
/// assert!(parse_report_date("start_date", "").unwrap().is_none());
/// assert!(parse_report_date("start_date", "2026-01-31").unwrap().is_some());
/// assert!(parse_report_date("start_date", "31/01/2026").is_err());
/// ```
pub fn parse_report_date(field: &str, value: &str) -> ValidationResult<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|e| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("expected YYYY-MM-DD ({})", e),
        })
}

/// Builds a report range from raw query values.
pub fn validate_date_range(start: Option<&str>, end: Option<&str>) -> ValidationResult<DateRange> {
    let start = start
        .map(|s| parse_report_date("start_date", s))
        .transpose()?
        .flatten();
    let end = end
        .map(|s| parse_report_date("end_date", s))
        .transpose()?
        .flatten();

    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            return Err(ValidationError::InvertedRange {
                start_field: "start_date".to_string(),
                end_field: "end_date".to_string(),
            });
        }
    }

    Ok(DateRange::new(start, end))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_validate_checkout_items() {
        assert!(validate_checkout_items(&[CheckoutItem::new(1, 3)]).is_ok());
        // Same product on two lines is allowed
        assert!(validate_checkout_items(&[CheckoutItem::new(1, 3), CheckoutItem::new(1, 2)]).is_ok());

        assert_eq!(
            validate_checkout_items(&[]).unwrap_err(),
            CoreError::EmptyCheckout
        );

        let err = validate_checkout_items(&[CheckoutItem::new(1, 2), CheckoutItem::new(2, 0)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidQuantity);

        let err = validate_checkout_items(&[CheckoutItem::new(0, 1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_too_many_lines() {
        let items = vec![CheckoutItem::new(1, 1); MAX_CHECKOUT_ITEMS + 1];
        let err = validate_checkout_items(&items).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::TooMany { .. })
        ));
    }

    #[test]
    fn test_negative_quantity_is_invalid_quantity() {
        let err = validate_quantity(&CheckoutItem::new(5, -2)).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidQuantity {
                product_id: 5,
                quantity: -2
            }
        );
    }

    #[test]
    fn test_parse_report_date() {
        assert_eq!(parse_report_date("start_date", "  ").unwrap(), None);
        assert_eq!(
            parse_report_date("start_date", "2026-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28)
        );
        assert!(parse_report_date("start_date", "2026-02-30").is_err());
        assert!(parse_report_date("end_date", "yesterday").is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let range = validate_date_range(Some("2026-01-01"), None).unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(range.end, None);

        assert_eq!(validate_date_range(None, None).unwrap(), DateRange::unbounded());
        assert_eq!(validate_date_range(Some(""), Some("")).unwrap(), DateRange::unbounded());

        assert!(matches!(
            validate_date_range(Some("2026-02-01"), Some("2026-01-01")),
            Err(ValidationError::InvertedRange { .. })
        ));
        // Same day on both ends is a valid one-day window
        assert!(validate_date_range(Some("2026-02-01"), Some("2026-02-01")).is_ok());
    }
}
