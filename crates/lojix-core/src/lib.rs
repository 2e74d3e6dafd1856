//! # lojix-core: Pure Business Logic for the LojixApp PDV
//!
//! Cart pricing, discounts and margin math as pure functions over integer
//! money. Nothing in this crate touches a clock, a file or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LojixApp Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end (web PDV screen)                   │   │
//! │  │    Search ──► Cart ──► Desconto Geral ──► Pagamento ──► Pedido  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/pdv (SaleSession)                       │   │
//! │  │    add, scan, qty, discount, pay, finish, cancel               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lojix-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │  pricing  │  │ validation│  │   │
//! │  │   │   Money   │  │   Cart    │  │  margin   │  │  parsers  │  │   │
//! │  │   │  Percent  │  │ CartLine  │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money` in integer centavos
//! - [`types`] - `Percent`, `ProductRef`, `OverallDiscount`, `PaymentMethod`, ...
//! - [`cart`] - `Cart`, `CartLine`, `CartSnapshot`
//! - [`pricing`] - margin calculator
//! - [`validation`] - text → typed values at the input boundary
//! - [`error`] - domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use lojix_core::{Cart, Money, OverallDiscount, ProductRef};
//!
//! let mut cart = Cart::new();
//! let charger = ProductRef::new("4", "CHARGER", "Carregador iPhone", Money::from_cents(14_990));
//!
//! cart.add_item(&charger);
//! cart.set_overall_discount(OverallDiscount::FixedAmount(Money::from_cents(990)));
//!
//! assert_eq!(cart.compute_total().cents(), 14_000);
//! assert_eq!(cart.compute_total().to_string(), "R$ 140,00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartSnapshot, LineSnapshot};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{margin, MarginQuote};
pub use types::*;

// =============================================================================
// Constants
// =============================================================================

/// Maximum quantity of a single line accepted at the counter.
///
/// ## Business Reason
/// Catches slips like typing 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Largest amount (price, discount, cost) accepted from the counter:
/// R$ 999.999.999,99.
///
/// `MAX_ITEM_QUANTITY × MAX_AMOUNT_CENTS` is about 10^14, so no cart built
/// from validated input comes near the i64 range of [`Money`].
pub const MAX_AMOUNT_CENTS: i64 = 99_999_999_999;
