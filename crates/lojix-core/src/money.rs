//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    29.90 × 3 = 89.69999999999999  ❌ WRONG!                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    2990 × 3 = 8970 centavos = R$ 89,70  ✅                              │
//! │                                                                         │
//! │  Percentages are applied in basis points and rounded ONCE,             │
//! │  half away from zero, to the nearest centavo.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lojix_core::money::Money;
//!
//! let price = Money::from_cents(2990);   // R$ 29,90
//! let line = price * 2;                  // R$ 59,80
//! assert_eq!(line.to_string(), "R$ 59,80");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Percent;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (1/100 of a real).
///
/// ## Design Decisions
/// - **i64 (signed)**: totals may legitimately go negative when discounts
///   are not clamped, and the type has to represent that faithfully
/// - **Saturating arithmetic**: every operator saturates at the i64 bounds
///   instead of panicking or wrapping. Input validation keeps real amounts
///   far below them (see [`crate::MAX_AMOUNT_CENTS`])
/// - **Serialized as a bare integer**: `{"subtotal": 2000}` means R$ 20,00
///
/// ## Where Money Flows
/// ```text
/// ProductRef.unit_price ──► CartLine.unit_price ──► CartLine.line_total
///                                                        │
///                                  Cart.subtotal ◄───────┘
///                                        │
///                     OverallDiscount ──►├──► discount_amount
///                                        ▼
///                                    Cart.total ──► SaleOrder.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ```rust
    /// use lojix_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-reais portion (truncated toward zero).
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ```rust
    /// use lojix_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2990); // R$ 29,90
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 8970);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `rate` of this amount, rounded half away from zero.
    ///
    /// ## Implementation
    /// `amount × bps / 10000` in i128 so large carts cannot overflow,
    /// then a single rounding step to the nearest centavo.
    ///
    /// ```rust
    /// use lojix_core::money::Money;
    /// use lojix_core::types::Percent;
    ///
    /// let subtotal = Money::from_cents(2000);          // R$ 20,00
    /// let ten_percent = Percent::from_bps(1000);       // 10%
    /// assert_eq!(subtotal.percentage(ten_percent).cents(), 200);
    /// ```
    pub fn percentage(&self, rate: Percent) -> Money {
        let scaled = self.0 as i128 * rate.bps() as i128;
        let rounded = div_round_half_away(scaled, 10_000);
        Money::from_cents(rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

/// Integer division rounding half away from zero. `divisor` must be positive.
pub(crate) fn div_round_half_away(dividend: i128, divisor: i128) -> i128 {
    let quotient = dividend / divisor;
    let remainder = dividend % divisor;
    if remainder.abs() * 2 >= divisor {
        quotient + dividend.signum()
    } else {
        quotient
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl Money {
    /// Brazilian number format behind `symbol`: `R$ 1.234,56`, `-R$ 5,50`.
    ///
    /// ```rust
    /// use lojix_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(123_456).format_with_symbol("US$"), "US$ 1.234,56");
    /// ```
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{} {},{:02}",
            sign,
            symbol,
            group_thousands(self.reais().unsigned_abs()),
            self.cents_part()
        )
    }
}

/// Brazilian display format: `R$ 1.234,56`, `-R$ 5,50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("R$"))
    }
}

/// Formats an integer with `.` as the thousands separator.
pub(crate) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.reais(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display_brazilian_format() {
        assert_eq!(Money::from_cents(1099).to_string(), "R$ 10,99");
        assert_eq!(Money::from_cents(0).to_string(), "R$ 0,00");
        assert_eq!(Money::from_cents(-550).to_string(), "-R$ 5,50");
        assert_eq!(Money::from_cents(699_900).to_string(), "R$ 6.999,00");
        assert_eq!(Money::from_cents(123_456_789).to_string(), "R$ 1.234.567,89");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_cents(100), Money::from_cents(250), Money::from_cents(-50)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 300);

        let empty: Vec<Money> = Vec::new();
        assert_eq!(empty.into_iter().sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_percentage_exact() {
        let subtotal = Money::from_cents(2000);
        assert_eq!(subtotal.percentage(Percent::from_bps(1000)).cents(), 200);
        assert_eq!(subtotal.percentage(Percent::from_bps(0)).cents(), 0);
        assert_eq!(subtotal.percentage(Percent::from_bps(10_000)).cents(), 2000);
    }

    #[test]
    fn test_percentage_rounds_half_away_from_zero() {
        // R$ 0,05 × 10% = 0.5 centavo → 1
        assert_eq!(Money::from_cents(5).percentage(Percent::from_bps(1000)).cents(), 1);
        // R$ 0,04 × 10% = 0.4 centavo → 0
        assert_eq!(Money::from_cents(4).percentage(Percent::from_bps(1000)).cents(), 0);
        // Negative amounts mirror positive ones
        assert_eq!(Money::from_cents(-5).percentage(Percent::from_bps(1000)).cents(), -1);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);

        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(min - Money::from_cents(1), min);
        assert_eq!(max.multiply_quantity(2), max);
        assert_eq!(max.multiply_quantity(-2), min);
        assert_eq!((-min).cents(), i64::MAX);

        let mut total = max;
        total += max;
        assert_eq!(total, max);

        let summed: Money = [max, max, Money::from_cents(-5)].iter().sum();
        assert!(summed.is_positive());
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(-550).format_with_symbol("R$"), "-R$ 5,50");
        assert_eq!(Money::from_cents(100_000_000).format_with_symbol("BRL"), "BRL 1.000.000,00");
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_cents(1099)).unwrap();
        assert_eq!(json, "1099");
    }
}
