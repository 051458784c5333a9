//! # Validation Module
//!
//! Input validation utilities for Kasir POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (apps/api)                                              │
//! │  └── Type validation (JSON deserialization, path parsing)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation (cart shape, names, prices)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::validation::{validate_cart, validate_quantity};
//! use kasir_core::CartLine;
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_cart(&[CartLine::new(1, 2)]).is_ok());
//! assert!(validate_cart(&[]).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{CartLine, NewCategory, NewProduct};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name, 200)
}

/// Validates a category name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 100 characters
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name, 100)
}

fn validate_name(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart line quantity. Any positive amount is accepted; the
/// resulting subtotal is overflow-checked at checkout.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_unit_price(price: i64) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::OutOfRange {
            field: "unit_price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level set through product create/update.
pub fn validate_stock_quantity(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock_quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates a full checkout cart.
///
/// ## Rules
/// - At least one line
/// - Every quantity passes [`validate_quantity`]
///
/// Duplicate product ids are allowed; each line is processed on its own.
pub fn validate_cart(lines: &[CartLine]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    lines
        .iter()
        .try_for_each(|line| validate_quantity(line.quantity))
}

/// Validates a product create/update payload.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_unit_price(product.unit_price)?;
    validate_stock_quantity(product.stock_quantity)
}

/// Validates a category create/update payload.
pub fn validate_new_category(category: &NewCategory) -> ValidationResult<()> {
    validate_category_name(&category.name)?;

    if let Some(description) = &category.description {
        if description.chars().count() > 500 {
            return Err(ValidationError::TooLong {
                field: "description".to_string(),
                max: 500,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses a `YYYY-MM-DD` report date.
///
/// ## Example
/// ```rust
/// use kasir_core::validation::parse_report_date;
///
/// assert!(parse_report_date("start_date", "2026-01-31").is_ok());
/// assert!(parse_report_date("start_date", "31/01/2026").is_err());
/// ```
pub fn parse_report_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("expected YYYY-MM-DD ({})", e),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
