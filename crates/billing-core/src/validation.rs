//! # Validation Module
//!
//! The form rules that guard a document before it is saved.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form inputs                                                  │
//! │  ├── min=0 / min=0.01 constraints                                      │
//! │  └── Unparsable text coerced to safe defaults (invoice-editor::form)   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Calculators (line_item, totals, editor)                      │
//! │  └── NO validation: compute whatever they are given                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Submission (THIS MODULE)                                     │
//! │  └── quantity > 0, price ≥ 0, rates within 0–100%                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use billing_core::money::Money;
//! use billing_core::types::Quantity;
//! use billing_core::validation::{validate_quantity, validate_unit_price};
//!
//! assert!(validate_quantity(Quantity::from_milli(500)).is_ok());
//! assert!(validate_unit_price(Money::from_cents(-1)).is_err());
//! ```

use crate::error::ValidationError;
use crate::line_item::LineItem;
use crate::money::Money;
use crate::totals::DocumentDiscount;
use crate::types::{DiscountRate, Quantity, TaxRate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest description a line may carry.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// 100% in basis points.
const MAX_RATE_BPS: u32 = 10_000;

// =============================================================================
// Field Validators
// =============================================================================

/// Quantity must be strictly positive.
pub fn validate_quantity(qty: Quantity) -> ValidationResult<()> {
    if !qty.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Unit price must be non-negative. Zero is allowed (free items).
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "unit_price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Discount must lie in [0, 100]%.
pub fn validate_discount_rate(rate: DiscountRate) -> ValidationResult<()> {
    if rate.bps() > MAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Tax rate must lie in [0, 100]%.
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.bps() > MAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a line description.
///
/// ## Rules
/// - Required on free-text lines (no catalog product)
/// - At most [`MAX_DESCRIPTION_LEN`] characters
pub fn validate_description(description: &str, has_product: bool) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() && !has_product {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Line and Document Validators
// =============================================================================

/// Validates every field of a line. The first failure wins.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_description(&item.description, item.product_id.is_some())?;
    validate_quantity(item.quantity)?;
    validate_unit_price(item.unit_price)?;
    if let Some(discount) = item.discount {
        validate_discount_rate(discount)?;
    }
    validate_tax_rate(item.tax_rate)?;

    Ok(())
}

/// Validates the document-level discount.
pub fn validate_document_discount(discount: &DocumentDiscount) -> ValidationResult<()> {
    if let Some(amount) = discount.amount {
        if amount.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: "discount_amount".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }
    }
    if let Some(percent) = discount.percent {
        validate_discount_rate(percent)?;
    }

    Ok(())
}

/// Validates a whole document before submission.
///
/// ## Rules
/// - At least one line
/// - Every line valid; the error names the 1-based line number
///
/// ```rust
/// use billing_core::error::ValidationError;
/// use billing_core::line_item::LineItem;
/// use billing_core::types::TaxRate;
/// use billing_core::validation::validate_document;
///
/// let blank = LineItem::blank(TaxRate::zero());
/// let err = validate_document(&[blank]).unwrap_err();
/// assert!(matches!(err, ValidationError::InvalidLine { line: 1, .. }));
/// ```
pub fn validate_document(items: &[LineItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required {
            field: "lines".to_string(),
        });
    }

    for (index, item) in items.iter().enumerate() {
        validate_line_item(item).map_err(|source| ValidationError::InvalidLine {
            line: index + 1,
            source: Box::new(source),
        })?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
