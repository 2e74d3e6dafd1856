//! # Cart
//!
//! The sale cart: line items, per-line discounts, one overall discount,
//! and every total derived from them.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Cashier Action           Cart Method               Lines Change        │
//! │  ──────────────           ───────────               ────────────        │
//! │                                                                         │
//! │  Click / scan product ──► add_item() ─────────────► push or qty += 1    │
//! │                                                                         │
//! │  [-] / [+] / type qty ──► update_quantity() ──────► qty = n, or remove  │
//! │                                                       when n <= 0       │
//! │                                                                         │
//! │  Cancel item ───────────► remove_item() ──────────► remove              │
//! │                                                                         │
//! │  Item discount ─────────► apply_line_discount() ──► line_discount = d   │
//! │                                                                         │
//! │  Desconto Geral ────────► set_overall_discount() ─► (lines untouched)   │
//! │                                                                         │
//! │  Finish / cancel sale ──► clear() ────────────────► empty, discount 0   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id; lines keep insertion order
//! - `quantity >= 1` on every stored line
//! - Totals are never cached, so they cannot drift from the lines
//!
//! ## Example
//! ```rust
//! use lojix_core::{Cart, Money, OverallDiscount, Percent, ProductRef};
//!
//! let mut cart = Cart::new();
//! let product = ProductRef::new("1", "CAP001", "Capinha", Money::from_cents(1000));
//!
//! cart.add_item(&product);
//! cart.add_item(&product);
//! assert_eq!(cart.subtotal().cents(), 2000);
//!
//! cart.set_overall_discount(OverallDiscount::Percentage(Percent::from_percent(10)));
//! assert_eq!(cart.discount_amount().cents(), 200);
//! assert_eq!(cart.compute_total().cents(), 1800);
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{DiscountPolicy, OverallDiscount, ProductRef};

// =============================================================================
// Cart Line
// =============================================================================

/// One product entry in the cart.
///
/// Product data is frozen when the line is created: a catalog price change
/// after the item was scanned does not reprice the open sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub code: String,
    pub name: String,
    pub unit_price: Money,
    /// Always >= 1 while the line is in a cart.
    pub quantity: i64,
    pub line_discount: Money,
}

impl CartLine {
    fn from_product(product: &ProductRef) -> Self {
        CartLine {
            product_id: product.id.clone(),
            code: product.code.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            quantity: 1,
            line_discount: Money::zero(),
        }
    }

    /// `unit_price × quantity`, before the line discount.
    #[inline]
    pub fn gross(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// `unit_price × quantity − line_discount`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.gross() - self.line_discount
    }

    /// Line total with `policy` applied.
    pub fn line_total_under(&self, policy: DiscountPolicy) -> Money {
        let total = self.line_total();
        match policy {
            DiscountPolicy::Unbounded => total,
            DiscountPolicy::Clamped => total
                .min(self.gross())
                .max(Money::zero()),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart of one sale session.
///
/// Owned by the session controller and mutated through `&mut self`;
/// there is no shared or global cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
    discount: OverallDiscount,
    policy: DiscountPolicy,
}

impl Cart {
    /// Creates an empty cart with unbounded discounts.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Creates an empty cart that applies `policy` to every total.
    pub fn with_policy(policy: DiscountPolicy) -> Self {
        Cart {
            policy,
            ..Cart::default()
        }
    }

    pub fn policy(&self) -> DiscountPolicy {
        self.policy
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity goes up by exactly 1,
    ///   its discount and every other line are untouched
    /// - Otherwise: a new line is appended with quantity 1 and no discount
    ///
    /// Returns the affected line.
    pub fn add_item(&mut self, product: &ProductRef) -> &CartLine {
        let index = match self.position(&product.id) {
            Some(index) => {
                self.lines[index].quantity += 1;
                index
            }
            None => {
                self.lines.push(CartLine::from_product(product));
                self.lines.len() - 1
            }
        };

        let line = &self.lines[index];
        trace!(product_id = %line.product_id, quantity = line.quantity, "cart add_item");
        line
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `new_quantity <= 0`: the line is removed (not an error)
    /// - otherwise: quantity is replaced, the line discount is kept
    ///
    /// Returns `false` when the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: &str, new_quantity: i64) -> bool {
        if new_quantity <= 0 {
            return self.remove_item(product_id).is_some();
        }

        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = new_quantity;
                trace!(product_id, quantity = new_quantity, "cart update_quantity");
                true
            }
            None => false,
        }
    }

    /// Deletes the line for `product_id`, returning it if it existed.
    pub fn remove_item(&mut self, product_id: &str) -> Option<CartLine> {
        let index = self.position(product_id)?;
        trace!(product_id, "cart remove_item");
        Some(self.lines.remove(index))
    }

    /// Sets the discount of one line.
    ///
    /// Replaces any previous discount on that line. No upper bound is
    /// enforced here; see [`DiscountPolicy`].
    ///
    /// Returns `false` when the product is not in the cart.
    pub fn apply_line_discount(&mut self, product_id: &str, amount: Money) -> bool {
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.line_discount = amount;
                trace!(product_id, discount = amount.cents(), "cart apply_line_discount");
                true
            }
            None => false,
        }
    }

    /// Stores the overall discount mode and value.
    pub fn set_overall_discount(&mut self, discount: OverallDiscount) {
        trace!(?discount, "cart set_overall_discount");
        self.discount = discount;
    }

    /// Empties the cart and resets the overall discount to zero.
    ///
    /// The discount policy is configuration, not sale state, so it survives.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = OverallDiscount::NONE;
        trace!("cart clear");
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn overall_discount(&self) -> OverallDiscount {
        self.discount
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of every line total.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .map(|l| l.line_total_under(self.policy))
            .sum()
    }

    /// What the overall discount takes off the subtotal.
    ///
    /// ## Rules
    /// ```text
    /// Percentage(p)  ──► subtotal × p / 100
    /// FixedAmount(v) ──► v
    ///
    /// Clamped policy ──► result limited to [0, max(subtotal, 0)]
    /// ```
    pub fn discount_amount(&self) -> Money {
        let subtotal = self.subtotal();
        let amount = self.discount.amount_on(subtotal);
        match self.policy {
            DiscountPolicy::Unbounded => amount,
            DiscountPolicy::Clamped => amount
                .min(subtotal.max(Money::zero()))
                .max(Money::zero()),
        }
    }

    /// `subtotal − discount_amount`.
    pub fn compute_total(&self) -> Money {
        self.subtotal() - self.discount_amount()
    }

    /// Freezes the current state for display and receipts.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(self)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// A line as shown to the cashier, with its derived total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineSnapshot {
    pub product_id: String,
    pub code: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub line_discount: Money,
    pub line_total: Money,
}

/// Read-only view of a cart for the display and receipt collaborators.
///
/// ```json
/// {
///   "lines": [{ "productId": "1", "quantity": 2, "lineTotal": 2000, ... }],
///   "itemCount": 1,
///   "totalQuantity": 2,
///   "subtotal": 2000,
///   "discount": { "kind": "percentage", "value": 1000 },
///   "discountAmount": 200,
///   "total": 1800
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub lines: Vec<LineSnapshot>,
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    pub discount: OverallDiscount,
    pub discount_amount: Money,
    pub total: Money,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        let discount_amount = cart.discount_amount();
        CartSnapshot {
            lines: cart
                .lines
                .iter()
                .map(|l| LineSnapshot {
                    product_id: l.product_id.clone(),
                    code: l.code.clone(),
                    name: l.name.clone(),
                    unit_price: l.unit_price,
                    quantity: l.quantity,
                    line_discount: l.line_discount,
                    line_total: l.line_total_under(cart.policy),
                })
                .collect(),
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal,
            discount: cart.discount,
            discount_amount,
            total: subtotal - discount_amount,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
