//! # Domain Types
//!
//! Value types shared by the cart, the sale session and the front end.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ProductRef    │   │ OverallDiscount │   │  PaymentMethod  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  Percentage(%)  │   │  Cash           │       │
//! │  │  code           │   │  FixedAmount(R$)│   │  Card           │       │
//! │  │  name           │   └─────────────────┘   │  Pix            │       │
//! │  │  unit_price     │                         └─────────────────┘       │
//! │  │  barcode?       │   ┌─────────────────┐   ┌─────────────────┐       │
//! │  └─────────────────┘   │    Percent      │   │    Customer     │       │
//! │                        │  bps (u32)      │   │  id, name, ...  │       │
//! │                        │  1000 = 10%     │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Percent
// =============================================================================

/// A percentage in basis points (1 bp = 0.01%).
///
/// ## Why Basis Points?
/// Cashiers type discounts like `12,5%`. Basis points keep that exact
/// (1250) without floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(u32);

impl Percent {
    /// 100%.
    pub const FULL: Percent = Percent(10_000);

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percent(bps)
    }

    /// Whole-number percentage: `from_percent(10)` is 10%.
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        Percent(pct * 100)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// `12,50%`
impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{:02}%", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// Product Reference
// =============================================================================

/// The product descriptor the cart consumes.
///
/// Supplied by the catalog; the cart copies what it needs into its line
/// so later catalog changes never reprice an open sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub id: String,
    /// Short internal code shown on the order (e.g. `SAMS24`).
    pub code: String,
    pub name: String,
    pub unit_price: Money,
    /// EAN-13 read by the scanner, when the product has one.
    pub barcode: Option<String>,
}

impl ProductRef {
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
    ) -> Self {
        ProductRef {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            unit_price,
            barcode: None,
        }
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }
}

// =============================================================================
// Overall Discount
// =============================================================================

/// Which flavour of overall discount the cashier picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percentage,
    FixedAmount,
}

/// A single discount applied to the whole cart, on top of per-line discounts.
///
/// ## Wire Format
/// ```json
/// { "kind": "percentage",   "value": 1000 }   // 10%
/// { "kind": "fixed_amount", "value": 500 }    // R$ 5,00
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OverallDiscount {
    Percentage(Percent),
    FixedAmount(Money),
}

impl OverallDiscount {
    /// No discount. The PDV screen starts in percentage mode at zero.
    pub const NONE: OverallDiscount = OverallDiscount::Percentage(Percent::zero());

    pub fn kind(&self) -> DiscountKind {
        match self {
            OverallDiscount::Percentage(_) => DiscountKind::Percentage,
            OverallDiscount::FixedAmount(_) => DiscountKind::FixedAmount,
        }
    }

    /// The amount this discount takes off `subtotal`, before any clamping.
    ///
    /// ```rust
    /// use lojix_core::{Money, OverallDiscount, Percent};
    ///
    /// let subtotal = Money::from_cents(2000);
    /// let pct = OverallDiscount::Percentage(Percent::from_percent(10));
    /// assert_eq!(pct.amount_on(subtotal).cents(), 200);
    ///
    /// let fixed = OverallDiscount::FixedAmount(Money::from_cents(350));
    /// assert_eq!(fixed.amount_on(subtotal).cents(), 350);
    /// ```
    pub fn amount_on(&self, subtotal: Money) -> Money {
        match self {
            OverallDiscount::Percentage(rate) => subtotal.percentage(*rate),
            OverallDiscount::FixedAmount(amount) => *amount,
        }
    }

    pub fn is_none(&self) -> bool {
        match self {
            OverallDiscount::Percentage(rate) => rate.is_zero(),
            OverallDiscount::FixedAmount(amount) => amount.is_zero(),
        }
    }
}

impl Default for OverallDiscount {
    fn default() -> Self {
        OverallDiscount::NONE
    }
}

// =============================================================================
// Discount Policy
// =============================================================================

/// Whether discounts may push amounts below zero.
///
/// ```text
/// Unbounded: line_total = gross − line_discount        (may go negative)
///            total      = subtotal − discount_amount   (may go negative)
///
/// Clamped:   line_total      ∈ [0, gross]
///            discount_amount ∈ [0, max(subtotal, 0)]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountPolicy {
    #[default]
    Unbounded,
    Clamped,
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Dinheiro.
    Cash,
    /// Cartão (credit or debit, external terminal).
    Card,
    /// Instant transfer.
    Pix,
}

impl PaymentMethod {
    /// Label printed on the order.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::Card => "Cartão",
            PaymentMethod::Pix => "PIX",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer attached to a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// CPF or CNPJ as typed.
    pub document: Option<String>,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Customer {
            id: id.into(),
            name: name.into(),
            phone: None,
            email: None,
            document: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
