//! # Validation Module
//!
//! Turns text typed at the counter into typed values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                     │
//! │  └── Immediate feedback (empty fields, obviously bad input)            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── "1.234,56" / "10.5" / "R$ 29,90"  ──► Money                       │
//! │  ├── "12,5%"                           ──► Percent                     │
//! │  └── "3"                               ──► quantity                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart                                                          │
//! │  └── Assumes well-formed numbers; never fails                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lojix_core::validation::{parse_money, parse_percent};
//!
//! assert_eq!(parse_money("1.234,56", "price").unwrap().cents(), 123_456);
//! assert_eq!(parse_percent("12,5", "discount").unwrap().bps(), 1_250);
//! assert!(parse_money("abc", "price").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{PaymentMethod, Percent};
use crate::{MAX_AMOUNT_CENTS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_SEARCH_LEN: usize = 100;

// =============================================================================
// Numeric Parsers
// =============================================================================

/// Parses a non-negative decimal with at most two fraction digits and
/// returns it scaled by 100.
///
/// Accepts Brazilian (`1.234,56`) and plain (`1234.56`) notation. With only
/// dots present, a single dot followed by one or two digits is the decimal
/// point; any other dots are thousands separators.
fn parse_centi_units(text: &str, field: &str) -> ValidationResult<u64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(required(field));
    }
    if text.starts_with('-') {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    let (int_part, frac_part) = match text.rsplit_once(',') {
        Some((int_part, frac_part)) => (int_part.replace('.', ""), frac_part),
        None => match text.split_once('.') {
            Some((int_part, frac_part))
                if !frac_part.contains('.') && (1..=2).contains(&frac_part.len()) =>
            {
                (int_part.to_string(), frac_part)
            }
            _ => (text.replace('.', ""), ""),
        },
    };

    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if int_part.is_empty() || !is_digits(&int_part) || !is_digits(frac_part) {
        return Err(invalid(field, "must be a number"));
    }
    if frac_part.len() > 2 {
        return Err(invalid(field, "at most two decimal places"));
    }

    let whole: u64 = int_part
        .parse()
        .map_err(|_| invalid(field, "value is too large"))?;
    let frac: u64 = match frac_part.len() {
        0 => 0,
        1 => frac_part.parse::<u64>().unwrap_or(0) * 10,
        _ => frac_part.parse::<u64>().unwrap_or(0),
    };

    whole
        .checked_mul(100)
        .and_then(|v| v.checked_add(frac))
        .ok_or_else(|| invalid(field, "value is too large"))
}

/// Parses an amount of money.
///
/// ## Accepted Forms
/// `10`, `10,5`, `10,50`, `10.50`, `1.234,56`, `R$ 29,90`
///
/// ## Rejected
/// Empty text, negative values, letters, more than two decimal places,
/// anything above [`MAX_AMOUNT_CENTS`].
pub fn parse_money(text: &str, field: &str) -> ValidationResult<Money> {
    let text = text.trim();
    let text = text.strip_prefix("R$").unwrap_or(text);
    let cents = parse_centi_units(text, field)?;

    match i64::try_from(cents) {
        Ok(cents) if cents <= MAX_AMOUNT_CENTS => Ok(Money::from_cents(cents)),
        _ => Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT_CENTS / 100,
        }),
    }
}

/// Parses a percentage between 0 and 100, with up to two decimals.
///
/// A trailing `%` is allowed: `10`, `12,5`, `12.75%`.
pub fn parse_percent(text: &str, field: &str) -> ValidationResult<Percent> {
    let text = text.trim();
    let text = text.strip_suffix('%').unwrap_or(text);
    let bps = parse_centi_units(text, field)?;

    if bps > u64::from(Percent::FULL.bps()) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(Percent::from_bps(bps as u32))
}

/// Parses a quantity typed into the cart.
///
/// Zero and negative values are valid here: the cart treats them as
/// "remove this line". Anything above [`MAX_ITEM_QUANTITY`] is rejected.
pub fn parse_quantity(text: &str) -> ValidationResult<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(required("quantity"));
    }

    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("quantity", "must be a whole number"));
    }

    match text.parse::<i64>() {
        Ok(qty) if qty <= MAX_ITEM_QUANTITY => Ok(qty),
        // Huge negatives still mean "remove"
        Err(_) if text.starts_with('-') => Ok(0),
        _ => Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        }),
    }
}

// =============================================================================
// String Validators
// =============================================================================

/// Parses a payment method, in English or Portuguese.
///
/// ```rust
/// use lojix_core::validation::parse_payment_method;
/// use lojix_core::PaymentMethod;
///
/// assert_eq!(parse_payment_method("dinheiro").unwrap(), PaymentMethod::Cash);
/// assert_eq!(parse_payment_method("PIX").unwrap(), PaymentMethod::Pix);
/// ```
pub fn parse_payment_method(text: &str) -> ValidationResult<PaymentMethod> {
    match text.trim().to_lowercase().as_str() {
        "cash" | "dinheiro" => Ok(PaymentMethod::Cash),
        "card" | "cartao" | "cartão" => Ok(PaymentMethod::Card),
        "pix" => Ok(PaymentMethod::Pix),
        "" => Err(required("payment method")),
        _ => Err(ValidationError::NotAllowed {
            field: "payment method".to_string(),
            allowed: vec!["cash".to_string(), "card".to_string(), "pix".to_string()],
        }),
    }
}

/// Validates a scanned barcode (EAN-8 up to GTIN-14).
///
/// Returns the trimmed barcode.
pub fn validate_barcode(barcode: &str) -> ValidationResult<String> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(required("barcode"));
    }
    if !barcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("barcode", "must contain only digits"));
    }
    if !(8..=14).contains(&barcode.len()) {
        return Err(ValidationError::OutOfRange {
            field: "barcode length".to_string(),
            min: 8,
            max: 14,
        });
    }

    Ok(barcode.to_string())
}

/// Validates a product search query.
///
/// Empty is fine (lists everything). Returns the trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

fn invalid(field: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn money(text: &str) -> i64 {
        parse_money(text, "amount").unwrap().cents()
    }

    #[test]
    fn test_parse_money_accepted_forms() {
        assert_eq!(money("10"), 1000);
        assert_eq!(money("10,5"), 1050);
        assert_eq!(money("10,50"), 1050);
        assert_eq!(money("10.50"), 1050);
        assert_eq!(money("0,99"), 99);
        assert_eq!(money("1.234,56"), 123_456);
        assert_eq!(money("1.234"), 123_400);
        assert_eq!(money("1.234.567"), 123_456_700);
        assert_eq!(money("R$ 29,90"), 2990);
        assert_eq!(money("  6999  "), 699_900);
    }

    #[test]
    fn test_parse_money_rejects_bad_input() {
        assert!(matches!(
            parse_money("", "amount"),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_money("-5", "amount"),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            parse_money("abc", "amount"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_money("10,555", "amount"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_money(",50", "amount"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(parse_money("99999999999999999999", "amount").is_err());
    }

    #[test]
    fn test_parse_money_rejects_over_max() {
        assert_eq!(money("999.999.999,99"), MAX_AMOUNT_CENTS);
        assert_eq!(
            parse_money("1.000.000.000", "item discount"),
            Err(ValidationError::OutOfRange {
                field: "item discount".to_string(),
                min: 0,
                max: 999_999_999,
            })
        );
        assert!(matches!(
            parse_money("900000000000000,00", "amount"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("10", "discount").unwrap(), Percent::from_percent(10));
        assert_eq!(parse_percent("12,5", "discount").unwrap().bps(), 1250);
        assert_eq!(parse_percent("12.75%", "discount").unwrap().bps(), 1275);
        assert_eq!(parse_percent("100", "discount").unwrap(), Percent::FULL);
        assert_eq!(parse_percent("0", "discount").unwrap(), Percent::zero());
    }

    #[test]
    fn test_parse_percent_out_of_range() {
        assert_eq!(
            parse_percent("100,01", "discount"),
            Err(ValidationError::OutOfRange {
                field: "discount".to_string(),
                min: 0,
                max: 100,
            })
        );
        assert!(parse_percent("-1", "discount").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3").unwrap(), 3);
        assert_eq!(parse_quantity(" 0 ").unwrap(), 0);
        assert_eq!(parse_quantity("-2").unwrap(), -2);
        assert!(parse_quantity("2.5").is_err());
        assert!(parse_quantity("").is_err());
        assert!(parse_quantity("-").is_err());
        assert!(parse_quantity("1e3").is_err());
    }

    #[test]
    fn test_parse_quantity_rejects_over_max() {
        assert_eq!(parse_quantity("999").unwrap(), MAX_ITEM_QUANTITY);

        let over = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        };
        assert_eq!(parse_quantity("1000"), Err(over.clone()));
        assert_eq!(parse_quantity("9223372036854775807"), Err(over.clone()));
        assert_eq!(parse_quantity("99999999999999999999"), Err(over));

        assert_eq!(parse_quantity("-99999999999999999999").unwrap(), 0);
    }

    #[test]
    fn test_parse_payment_method() {
        assert_eq!(parse_payment_method("cash").unwrap(), PaymentMethod::Cash);
        assert_eq!(parse_payment_method("Cartão").unwrap(), PaymentMethod::Card);
        assert_eq!(parse_payment_method("cartao").unwrap(), PaymentMethod::Card);
        assert_eq!(parse_payment_method("pix").unwrap(), PaymentMethod::Pix);
        assert!(matches!(
            parse_payment_method("cheque"),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_validate_barcode() {
        assert_eq!(validate_barcode(" 7891234567890 ").unwrap(), "7891234567890");
        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("78912A4567890").is_err());
        assert!(validate_barcode("1234").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  galaxy ").unwrap(), "galaxy");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"a".repeat(101)).is_err());
    }
}
