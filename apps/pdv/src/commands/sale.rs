//! # Sale Commands
//!
//! Sale details (customer, notes, payment) and sale completion.

use serde::{Deserialize, Serialize};
use tracing::debug;

use lojix_core::validation::parse_payment_method;
use lojix_core::{Customer, PaymentMethod};

use crate::commands::cart::{get_cart, CartResponse, TotalsDisplay};
use crate::error::ApiError;
use crate::state::{CustomerDirectory, PdvConfig, SaleOrder, SaleSession};

/// Sale details as shown beside the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetailsResponse {
    pub customer: Option<Customer>,
    pub seller: String,
    pub notes: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    /// Total a pagar
    pub total_display: String,
}

impl SaleDetailsResponse {
    fn new(session: &SaleSession, config: &PdvConfig) -> Self {
        SaleDetailsResponse {
            customer: session.customer().cloned(),
            seller: session.seller().to_string(),
            notes: session.notes().map(str::to_string),
            payment_method: session.payment_method(),
            total_display: config.format_currency(session.cart().compute_total().cents()),
        }
    }
}

/// Finalized order plus display strings for the order view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order: SaleOrder,
    pub display: TotalsDisplay,
}

pub fn select_customer(
    session: &mut SaleSession,
    directory: &dyn CustomerDirectory,
    config: &PdvConfig,
    customer_id: &str,
) -> Result<SaleDetailsResponse, ApiError> {
    debug!(customer_id, "select_customer command");
    session.select_customer(directory, customer_id)?;
    Ok(SaleDetailsResponse::new(session, config))
}

/// Removes the customer from the sale (`customer -`).
pub fn clear_customer(session: &mut SaleSession, config: &PdvConfig) -> SaleDetailsResponse {
    debug!("clear_customer command");
    session.clear_customer();
    SaleDetailsResponse::new(session, config)
}

/// Sets the order notes (observações). Empty text clears them.
pub fn set_notes(session: &mut SaleSession, config: &PdvConfig, notes: &str) -> SaleDetailsResponse {
    debug!("set_notes command");
    session.set_notes(notes);
    SaleDetailsResponse::new(session, config)
}

pub fn set_payment_method(
    session: &mut SaleSession,
    config: &PdvConfig,
    method: &str,
) -> Result<SaleDetailsResponse, ApiError> {
    let method = parse_payment_method(method)?;
    debug!(%method, "set_payment_method command");
    session.set_payment_method(method);
    Ok(SaleDetailsResponse::new(session, config))
}

/// Finalizes the sale (finalizar venda).
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  finish                                                                 │
/// │    │                                                                    │
/// │    ├── cart empty?          ──► VALIDATION_ERROR                        │
/// │    ├── no payment method?   ──► PAYMENT_REQUIRED (front end opens the   │
/// │    │                            payment dialog)                         │
/// │    └── ok                   ──► SaleOrder, session reset for next sale  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn finalize_sale(
    session: &mut SaleSession,
    config: &PdvConfig,
) -> Result<OrderResponse, ApiError> {
    debug!("finalize_sale command");
    let order = session.finalize()?;

    let display = TotalsDisplay {
        subtotal: config.format_currency(order.subtotal.cents()),
        discount: config.format_currency(order.discount_amount.cents()),
        total: config.format_currency(order.total.cents()),
    };
    Ok(OrderResponse { order, display })
}

/// Cancels the open sale and returns the (now empty) cart.
pub fn cancel_sale(session: &mut SaleSession, config: &PdvConfig) -> CartResponse {
    debug!("cancel_sale command");
    session.cancel();
    get_cart(session, config)
}
