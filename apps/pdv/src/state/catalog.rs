//! # Catalog State
//!
//! Where the sale session looks products and customers up.
//!
//! ## Lookup Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cashier input              Catalog method          Result              │
//! │  ─────────────              ──────────────          ──────              │
//! │  click search result ─────► get_by_id("3") ───────► ProductRef         │
//! │  barcode scanner ─────────► find_by_barcode(ean) ─► ProductRef         │
//! │  search box ──────────────► search("galaxy") ─────► Vec<ProductRef>    │
//! │  customer picker ─────────► get_customer("2") ────► Customer           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The traits are the seam for a real product service; this crate ships
//! the in-memory implementation the terminal runs with.

use lojix_core::{Customer, Money, ProductRef};

/// Read access to the product catalog.
pub trait ProductCatalog {
    fn get_by_id(&self, id: &str) -> Option<ProductRef>;

    fn find_by_barcode(&self, barcode: &str) -> Option<ProductRef>;

    /// Case-insensitive match on name or code. An empty query lists every
    /// product.
    fn search(&self, query: &str) -> Vec<ProductRef>;
}

/// Read access to registered customers.
pub trait CustomerDirectory {
    fn get_customer(&self, id: &str) -> Option<Customer>;
}

/// Catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<ProductRef>,
    customers: Vec<Customer>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<ProductRef>, customers: Vec<Customer>) -> Self {
        InMemoryCatalog {
            products,
            customers,
        }
    }

    /// The storefront's demo products and customers.
    pub fn demo() -> Self {
        let products = vec![
            ProductRef::new("1", "SAMS24", "Samsung Galaxy S24", Money::from_cents(429_900))
                .with_barcode("7891234567890"),
            ProductRef::new("2", "AIRPODS2", "AirPods Pro 2ª Gen", Money::from_cents(289_900))
                .with_barcode("7891234567891"),
            ProductRef::new("3", "XRED13", "Xiaomi Redmi Note 13", Money::from_cents(189_900))
                .with_barcode("7891234567892"),
            ProductRef::new("4", "CHARGER", "Carregador iPhone", Money::from_cents(14_990))
                .with_barcode("7891234567893"),
            ProductRef::new("5", "SONY001", "Fone Bluetooth Sony", Money::from_cents(29_990))
                .with_barcode("7891234567894"),
        ];

        let customers = vec![
            demo_customer("1", "João Silva", "(11) 99999-9999", "joao@email.com", "123.456.789-00"),
            demo_customer("2", "Maria Santos", "(11) 88888-8888", "maria@email.com", "987.654.321-00"),
            demo_customer("3", "Pedro Costa", "(11) 77777-7777", "pedro@email.com", "456.789.123-00"),
        ];

        InMemoryCatalog::new(products, customers)
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}

fn demo_customer(id: &str, name: &str, phone: &str, email: &str, document: &str) -> Customer {
    Customer {
        phone: Some(phone.to_string()),
        email: Some(email.to_string()),
        document: Some(document.to_string()),
        ..Customer::new(id, name)
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn get_by_id(&self, id: &str) -> Option<ProductRef> {
        self.products.iter().find(|p| p.id == id).cloned()
    }

    fn find_by_barcode(&self, barcode: &str) -> Option<ProductRef> {
        self.products
            .iter()
            .find(|p| p.barcode.as_deref() == Some(barcode))
            .cloned()
    }

    fn search(&self, query: &str) -> Vec<ProductRef> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.code.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}

impl CustomerDirectory for InMemoryCatalog {
    fn get_customer(&self, id: &str) -> Option<Customer> {
        self.customers.iter().find(|c| c.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_id() {
        let catalog = InMemoryCatalog::demo();
        let product = catalog.get_by_id("4").unwrap();
        assert_eq!(product.code, "CHARGER");
        assert_eq!(product.unit_price.cents(), 14_990);
        assert!(catalog.get_by_id("99").is_none());
    }

    #[test]
    fn test_find_by_barcode() {
        let catalog = InMemoryCatalog::demo();
        assert_eq!(catalog.find_by_barcode("7891234567892").unwrap().id, "3");
        assert!(catalog.find_by_barcode("0000000000000").is_none());
    }

    #[test]
    fn test_search_matches_name_or_code_case_insensitively() {
        let catalog = InMemoryCatalog::demo();

        let by_name: Vec<String> = catalog.search("GALAXY").into_iter().map(|p| p.id).collect();
        assert_eq!(by_name, vec!["1"]);

        let by_code: Vec<String> = catalog.search("sony0").into_iter().map(|p| p.id).collect();
        assert_eq!(by_code, vec!["5"]);

        assert!(catalog.search("geladeira").is_empty());
    }

    #[test]
    fn test_empty_search_lists_everything() {
        let catalog = InMemoryCatalog::demo();
        assert_eq!(catalog.search("  ").len(), catalog.product_count());
    }

    #[test]
    fn test_get_customer() {
        let catalog = InMemoryCatalog::demo();
        let customer = catalog.get_customer("2").unwrap();
        assert_eq!(customer.name, "Maria Santos");
        assert_eq!(customer.document.as_deref(), Some("987.654.321-00"));
        assert!(catalog.get_customer("9").is_none());
    }
}
