//! # Error Types
//!
//! Domain-specific error types for kasir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasir-core errors (this file)                                         │
//! │  ├── CoreError        - Checkout / report failures                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kasir-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                        (becomes CoreError::Storage at the trait seam)  │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → JSON response          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Checkout and reporting errors.
///
/// Every variant is terminal for the call that produced it. Nothing in this
/// crate retries automatically.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A cart line references a product id with no row in the store.
    ///
    /// ## When This Occurs
    /// - Product id never existed
    /// - Product was deleted between browsing and checkout
    ///
    /// The whole checkout is discarded; no stock or transaction rows change.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The cart (or a derived amount) failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Any I/O or transport failure from the underlying store.
    ///
    /// The unit of work has been rolled back when this is returned from
    /// checkout, so a caller may retry the whole request.
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl CoreError {
    /// Creates a storage error from any displayable lower-level error.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        CoreError::Storage(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any store access happens.
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

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An amount does not fit in the money representation.
    #[error("{field} overflows the supported amount range")]
    Overflow { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
