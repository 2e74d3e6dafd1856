//! # Cart Commands
//!
//! Commands for cart manipulation and discounts.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Payment  │────►│  Order   │       │
//! │  │  Cart    │     │          │     │          │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                                │
//! │                   add / scan / qty                                      │
//! │                   remove / item-discount                                │
//! │                   discount                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use lojix_core::validation::{parse_money, parse_percent, parse_quantity, validate_barcode};
use lojix_core::{CartSnapshot, OverallDiscount};

use crate::error::ApiError;
use crate::state::{InMemoryCatalog, PdvConfig, SaleSession};

/// Cart response: the snapshot plus display strings for the totals panel.
///
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  Resumo do Pedido                                              │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Subtotal                                      R$ 299,80       │
/// │  Desconto                                     -R$ 29,98        │
/// │  ──────────────────────────────────────────────────            │
/// │  Total                                         R$ 269,82       │
/// └────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    #[serde(flatten)]
    pub cart: CartSnapshot,
    pub display: TotalsDisplay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsDisplay {
    pub subtotal: String,
    pub discount: String,
    pub total: String,
}

impl CartResponse {
    pub fn new(cart: CartSnapshot, config: &PdvConfig) -> Self {
        let display = TotalsDisplay {
            subtotal: config.format_currency(cart.subtotal.cents()),
            discount: config.format_currency(cart.discount_amount.cents()),
            total: config.format_currency(cart.total.cents()),
        };
        CartResponse { cart, display }
    }
}

/// Gets the current cart contents.
pub fn get_cart(session: &SaleSession, config: &PdvConfig) -> CartResponse {
    CartResponse::new(session.snapshot(), config)
}

/// Adds one unit of a catalog product.
///
/// ## Behavior
/// - Product already in cart: quantity goes up by 1
/// - Product not in cart: added as a new line at its current price
pub fn add_to_cart(
    session: &mut SaleSession,
    catalog: &InMemoryCatalog,
    config: &PdvConfig,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, "add_to_cart command");
    session.add_product(catalog, product_id)?;
    Ok(get_cart(session, config))
}

/// Adds one unit of the product with this barcode.
pub fn scan_barcode(
    session: &mut SaleSession,
    catalog: &InMemoryCatalog,
    config: &PdvConfig,
    barcode: &str,
) -> Result<CartResponse, ApiError> {
    let barcode = validate_barcode(barcode)?;
    debug!(barcode = %barcode, "scan_barcode command");
    session.add_by_barcode(catalog, &barcode)?;
    Ok(get_cart(session, config))
}

/// Sets the quantity of a line. `0` or less removes it.
pub fn update_cart_item(
    session: &mut SaleSession,
    config: &PdvConfig,
    product_id: &str,
    quantity: &str,
) -> Result<CartResponse, ApiError> {
    let quantity = parse_quantity(quantity)?;
    debug!(product_id, quantity, "update_cart_item command");
    session.update_quantity(product_id, quantity)?;
    Ok(get_cart(session, config))
}

/// Removes a line (cancelar item).
pub fn remove_from_cart(
    session: &mut SaleSession,
    config: &PdvConfig,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, "remove_from_cart command");
    session.remove_item(product_id)?;
    Ok(get_cart(session, config))
}

/// Sets the discount of one line, in money.
pub fn apply_item_discount(
    session: &mut SaleSession,
    config: &PdvConfig,
    product_id: &str,
    amount: &str,
) -> Result<CartResponse, ApiError> {
    let amount = parse_money(amount, "item discount")?;
    debug!(product_id, amount = amount.cents(), "apply_item_discount command");
    session.apply_line_discount(product_id, amount)?;
    Ok(get_cart(session, config))
}

/// Sets the overall discount (desconto geral).
///
/// ## Arguments
/// * `kind` - `percent` / `percentual` or `fixed` / `valor`
/// * `value` - percentage (0-100) or amount of money
pub fn set_overall_discount(
    session: &mut SaleSession,
    config: &PdvConfig,
    kind: &str,
    value: &str,
) -> Result<CartResponse, ApiError> {
    let discount = match kind.trim().to_lowercase().as_str() {
        "percent" | "percentual" | "%" => {
            OverallDiscount::Percentage(parse_percent(value, "discount")?)
        }
        "fixed" | "valor" => OverallDiscount::FixedAmount(parse_money(value, "discount")?),
        other => {
            return Err(ApiError::validation(format!(
                "discount kind must be percent or fixed, got '{}'",
                other
            )))
        }
    };

    debug!(?discount, "set_overall_discount command");
    session.set_overall_discount(discount);
    Ok(get_cart(session, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn setup() -> (SaleSession, InMemoryCatalog, PdvConfig) {
        let config = PdvConfig::default();
        (SaleSession::new(&config), InMemoryCatalog::demo(), config)
    }

    #[test]
    fn test_add_and_display() {
        let (mut session, catalog, config) = setup();

        add_to_cart(&mut session, &catalog, &config, "4").unwrap();
        let response = add_to_cart(&mut session, &catalog, &config, "4").unwrap();

        assert_eq!(response.cart.total_quantity, 2);
        assert_eq!(response.display.subtotal, "R$ 299,80");
        assert_eq!(response.display.total, "R$ 299,80");
    }

    #[test]
    fn test_scan_rejects_malformed_barcode() {
        let (mut session, catalog, config) = setup();

        let err = scan_barcode(&mut session, &catalog, &config, "abc").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = scan_barcode(&mut session, &catalog, &config, "7890000000000").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let response = scan_barcode(&mut session, &catalog, &config, "7891234567893").unwrap();
        assert_eq!(response.cart.item_count, 1);
    }

    #[test]
    fn test_update_quantity_text() {
        let (mut session, catalog, config) = setup();
        add_to_cart(&mut session, &catalog, &config, "4").unwrap();

        let response = update_cart_item(&mut session, &config, "4", "3").unwrap();
        assert_eq!(response.cart.lines[0].quantity, 3);

        let err = update_cart_item(&mut session, &config, "4", "três").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let response = update_cart_item(&mut session, &config, "4", "0").unwrap();
        assert_eq!(response.cart.item_count, 0);
    }

    #[test]
    fn test_remove_missing_line_is_cart_error() {
        let (mut session, _catalog, config) = setup();
        let err = remove_from_cart(&mut session, &config, "1").unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_item_discount() {
        let (mut session, catalog, config) = setup();
        add_to_cart(&mut session, &catalog, &config, "5").unwrap();

        let response = apply_item_discount(&mut session, &config, "5", "29,90").unwrap();
        assert_eq!(response.cart.lines[0].line_total.cents(), 27_000);

        let err = apply_item_discount(&mut session, &config, "5", "-1").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_overall_discount_percent_and_fixed() {
        let (mut session, catalog, config) = setup();
        add_to_cart(&mut session, &catalog, &config, "4").unwrap();
        add_to_cart(&mut session, &catalog, &config, "4").unwrap();

        let response = set_overall_discount(&mut session, &config, "percent", "10").unwrap();
        assert_eq!(response.cart.discount_amount.cents(), 2_998);
        assert_eq!(response.display.total, "R$ 269,82");

        let response = set_overall_discount(&mut session, &config, "valor", "R$ 9,80").unwrap();
        assert_eq!(response.cart.total.cents(), 29_000);
    }

    #[test]
    fn test_overall_discount_rejects_bad_input() {
        let (mut session, _catalog, config) = setup();

        let err = set_overall_discount(&mut session, &config, "percent", "dez").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = set_overall_discount(&mut session, &config, "percent", "120").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = set_overall_discount(&mut session, &config, "bogo", "1").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(session.cart().overall_discount().is_none());
    }

    #[test]
    fn test_response_flattens_snapshot() {
        let (mut session, catalog, config) = setup();
        let response = add_to_cart(&mut session, &catalog, &config, "1").unwrap();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["subtotal"], 429_900);
        assert_eq!(json["display"]["total"], "R$ 4.299,00");
    }
}
