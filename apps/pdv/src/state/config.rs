//! # Configuration State
//!
//! Stores PDV configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`LOJIX_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after startup.

use serde::{Deserialize, Serialize};

use lojix_core::{DiscountPolicy, Money};

/// PDV configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdvConfig {
    /// Store name (printed on orders)
    pub store_name: String,

    /// Seller attributed to sales opened on this terminal
    pub seller: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Whether discounts may drive totals negative
    pub discount_policy: DiscountPolicy,

    /// Prefix for sale order numbers (`PED-250101-0001`)
    pub order_prefix: String,
}

impl Default for PdvConfig {
    /// ## Default Values
    /// - Store: "LojixApp"
    /// - Seller: "João Silva"
    /// - Currency symbol: R$
    /// - Discounts: unbounded
    /// - Order prefix: "PED"
    fn default() -> Self {
        PdvConfig {
            store_name: "LojixApp".to_string(),
            seller: "João Silva".to_string(),
            currency_symbol: "R$".to_string(),
            discount_policy: DiscountPolicy::Unbounded,
            order_prefix: "PED".to_string(),
        }
    }
}

impl PdvConfig {
    /// Creates a PdvConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `LOJIX_STORE_NAME`: Override store name
    /// - `LOJIX_SELLER`: Override default seller
    /// - `LOJIX_CURRENCY_SYMBOL`: Override currency symbol
    /// - `LOJIX_CLAMP_DISCOUNTS`: `true`/`1` keeps totals from going negative
    /// - `LOJIX_ORDER_PREFIX`: Override order number prefix
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = PdvConfig::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(store_name) = non_blank("LOJIX_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(seller) = non_blank("LOJIX_SELLER") {
            config.seller = seller;
        }

        if let Some(symbol) = non_blank("LOJIX_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(clamp) = non_blank("LOJIX_CLAMP_DISCOUNTS") {
            match clamp.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => config.discount_policy = DiscountPolicy::Clamped,
                "0" | "false" | "no" => config.discount_policy = DiscountPolicy::Unbounded,
                other => tracing::warn!(value = other, "Ignoring invalid LOJIX_CLAMP_DISCOUNTS"),
            }
        }

        if let Some(prefix) = non_blank("LOJIX_ORDER_PREFIX") {
            config.order_prefix = prefix;
        }

        config
    }

    /// Formats a centavo amount for display.
    ///
    /// ## Example
    /// ```rust
    /// use lojix_pdv::state::PdvConfig;
    ///
    /// let config = PdvConfig::default();
    /// assert_eq!(config.format_currency(123_456), "R$ 1.234,56");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        Money::from_cents(cents).format_with_symbol(&self.currency_symbol)
    }
}
