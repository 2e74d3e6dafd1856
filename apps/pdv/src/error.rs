//! # API Error Type
//!
//! Unified error type for PDV commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lojix-core                     apps/pdv                 stdout         │
//! │  ──────────                     ────────                 ──────         │
//! │  ValidationError ─┐                                                     │
//! │                   ├──► From ──► ApiError { code, message } ──► JSON     │
//! │  CoreError ───────┘                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure carries a machine-readable `code` and a human-readable
//! `message`.

use serde::Serialize;
use thiserror::Error;

use lojix_core::{CoreError, ValidationError};

/// Error returned from a PDV command.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 7890000000000"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or customer not found
    NotFound,

    /// Input text failed validation
    ValidationError,

    /// Line operation on a product that is not in the cart
    CartError,

    /// Sale cannot be finalized without a payment method
    PaymentRequired,

    /// First word of the line is not a known command
    UnknownCommand,

    /// Unexpected failure
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn unknown_command(name: &str) -> Self {
        ApiError::new(
            ErrorCode::UnknownCommand,
            format!("Unknown command: {}", name),
        )
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        tracing::warn!(error = %err, "Rejected input");
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::CustomerNotFound(id) => ApiError::not_found("Customer", &id),
            CoreError::NotInCart(_) => ApiError::new(ErrorCode::CartError, err.to_string()),
            CoreError::EmptyCart => ApiError::validation(err.to_string()),
            CoreError::PaymentMethodRequired => {
                ApiError::new(ErrorCode::PaymentRequired, err.to_string())
            }
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}
