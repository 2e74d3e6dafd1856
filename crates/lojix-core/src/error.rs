//! # Error Types
//!
//! Domain-specific error types for lojix-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lojix-core errors (this file)                                         │
//! │  ├── CoreError        - Sale-level business rule violations            │
//! │  └── ValidationError  - Input text that failed to parse/validate       │
//! │                                                                         │
//! │  apps/pdv errors                                                        │
//! │  └── ApiError         - What the command front end prints (JSON)       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → stdout                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart arithmetic itself never fails: every cart operation is total.
//! These errors only come from the input boundary and the sale session.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised around the cart.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Catalog has no product with this id or barcode.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Customer directory has no customer with this id.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// A line operation named a product that is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(String),

    /// Finalizing a sale with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Finalizing a sale before a payment method was chosen.
    ///
    /// ## User Workflow
    /// ```text
    /// Finalizar Venda
    ///      │
    ///      ▼
    /// payment method set? ── no ──► PaymentMethodRequired
    ///      │                         (front end opens the payment dialog)
    ///     yes
    ///      ▼
    /// SaleOrder issued
    /// ```
    #[error("Choose a payment method before finalizing the sale")]
    PaymentMethodRequired,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by [`crate::validation`] when text typed at the counter does not
/// describe a well-formed value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must not be negative")]
    Negative { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
