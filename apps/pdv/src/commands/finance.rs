//! # Finance Commands
//!
//! Margin calculator (calculadora de margem).

use serde::{Deserialize, Serialize};
use tracing::debug;

use lojix_core::validation::parse_money;
use lojix_core::{margin, MarginQuote};

use crate::error::ApiError;
use crate::state::PdvConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginResponse {
    /// `None` unless both cost and price are positive.
    pub quote: Option<MarginQuote>,
    pub profit_display: Option<String>,
    /// `33,33%`
    pub margin_display: Option<String>,
}

/// Computes gross profit and margin for a cost and a selling price.
pub fn calculate_margin(
    config: &PdvConfig,
    cost: &str,
    price: &str,
) -> Result<MarginResponse, ApiError> {
    let cost = parse_money(cost, "cost")?;
    let price = parse_money(price, "price")?;
    let quote = margin(cost, price);

    debug!(cost = cost.cents(), price = price.cents(), ?quote, "calculate_margin command");

    Ok(MarginResponse {
        profit_display: quote.map(|q| config.format_currency(q.profit.cents())),
        margin_display: quote.map(|q| q.margin_display()),
        quote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_margin() {
        let config = PdvConfig::default();
        let response = calculate_margin(&config, "100", "150,00").unwrap();

        let quote = response.quote.unwrap();
        assert_eq!(quote.profit.cents(), 5_000);
        assert_eq!(response.profit_display.as_deref(), Some("R$ 50,00"));
        assert_eq!(response.margin_display.as_deref(), Some("33,33%"));
    }

    #[test]
    fn test_calculate_margin_below_cost_is_negative() {
        let config = PdvConfig::default();
        let response = calculate_margin(&config, "12", "10").unwrap();

        let quote = response.quote.unwrap();
        assert_eq!(quote.margin_bps, -2_000);
        assert!(quote.is_loss);
        assert_eq!(response.profit_display.as_deref(), Some("-R$ 2,00"));
        assert_eq!(response.margin_display.as_deref(), Some("-20,00%"));
    }

    #[test]
    fn test_calculate_margin_zero_cost_gives_no_quote() {
        let config = PdvConfig::default();
        let response = calculate_margin(&config, "0", "150").unwrap();
        assert!(response.quote.is_none());
        assert!(response.margin_display.is_none());
    }

    #[test]
    fn test_calculate_margin_rejects_text() {
        let config = PdvConfig::default();
        assert!(calculate_margin(&config, "cem", "150").is_err());
    }
}
