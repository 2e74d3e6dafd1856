//! # Product Commands
//!
//! Product search for the PDV search box.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types "galaxy" in the search box                                  │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  search galaxy                                                          │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  validate_search_query ──► catalog.search ──► Vec<ProductDto>           │
//! │                                                                         │
//! │  Empty query lists the whole catalog.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use lojix_core::validation::validate_search_query;
use lojix_core::ProductRef;

use crate::error::ApiError;
use crate::state::{PdvConfig, ProductCatalog};

/// Product as listed in search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub code: String,
    pub name: String,
    pub barcode: Option<String>,
    pub unit_price_cents: i64,
    /// `R$ 149,90`
    pub price_display: String,
}

impl ProductDto {
    fn new(product: ProductRef, config: &PdvConfig) -> Self {
        ProductDto {
            price_display: config.format_currency(product.unit_price.cents()),
            unit_price_cents: product.unit_price.cents(),
            id: product.id,
            code: product.code,
            name: product.name,
            barcode: product.barcode,
        }
    }
}

/// Searches products by name or code.
pub fn search_products(
    catalog: &dyn ProductCatalog,
    config: &PdvConfig,
    query: &str,
) -> Result<Vec<ProductDto>, ApiError> {
    let query = validate_search_query(query)?;
    let products: Vec<ProductDto> = catalog
        .search(&query)
        .into_iter()
        .map(|p| ProductDto::new(p, config))
        .collect();

    debug!(query = %query, results = products.len(), "search_products command");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InMemoryCatalog;

    #[test]
    fn test_search_products() {
        let catalog = InMemoryCatalog::demo();
        let config = PdvConfig::default();

        let results = search_products(&catalog, &config, "carregador").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code, "CHARGER");
        assert_eq!(results[0].price_display, "R$ 149,90");
    }

    #[test]
    fn test_search_rejects_long_query() {
        let catalog = InMemoryCatalog::demo();
        let config = PdvConfig::default();
        assert!(search_products(&catalog, &config, &"x".repeat(101)).is_err());
    }
}
