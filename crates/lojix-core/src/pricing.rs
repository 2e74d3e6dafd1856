//! # Pricing
//!
//! Margin calculator used by the finance screen.
//!
//! ```text
//! cost  R$ 100,00 ─┐
//!                  ├──► profit = price − cost        = R$ 50,00
//! price R$ 150,00 ─┘    margin = profit / price      = 33,33%
//! ```
//!
//! Margin is over the selling price, not markup over cost. Selling below
//! cost gives a negative margin: cost 12, price 10 is -20,00%.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{div_round_half_away, Money};

/// Result of a margin calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MarginQuote {
    pub cost: Money,
    pub price: Money,
    /// Gross profit per unit (`price − cost`). Negative when selling at a loss.
    pub profit: Money,
    /// `profit / price`, in signed basis points (`-2000` is -20%).
    pub margin_bps: i64,
    /// True when `price < cost`.
    pub is_loss: bool,
}

/// Computes profit and margin for a unit cost and selling price.
///
/// Returns `None` unless both values are positive; the finance screen
/// shows nothing in that case.
///
/// ```rust
/// use lojix_core::money::Money;
/// use lojix_core::pricing::margin;
///
/// let quote = margin(Money::from_cents(10_000), Money::from_cents(15_000)).unwrap();
/// assert_eq!(quote.profit.cents(), 5_000);
/// assert_eq!(quote.margin_bps, 3_333);
/// assert_eq!(quote.margin_display(), "33,33%");
///
/// assert!(margin(Money::zero(), Money::from_cents(15_000)).is_none());
/// ```
pub fn margin(cost: Money, price: Money) -> Option<MarginQuote> {
    if !cost.is_positive() || !price.is_positive() {
        return None;
    }

    let profit = price - cost;
    let bps = div_round_half_away(profit.cents() as i128 * 10_000, price.cents() as i128);

    Some(MarginQuote {
        cost,
        price,
        profit,
        margin_bps: bps.clamp(i64::MIN as i128, i64::MAX as i128) as i64,
        is_loss: profit.is_negative(),
    })
}

impl MarginQuote {
    /// `33,33%`, `-20,00%`
    pub fn margin_display(&self) -> String {
        let sign = if self.margin_bps < 0 { "-" } else { "" };
        let bps = self.margin_bps.unsigned_abs();
        format!("{}{},{:02}%", sign, bps / 100, bps % 100)
    }
}
