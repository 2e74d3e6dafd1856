//! # Sale Session
//!
//! One open sale at the counter: the cart plus everything the order needs
//! besides prices (customer, seller, notes, payment method).
//!
//! ## Ownership
//! The session owns its `Cart` outright and is itself owned by the command
//! loop, which lends it out as `&mut SaleSession` one command at a time.
//! There is exactly one writer, so no lock is involved.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Payment  │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  chosen  │     │  issued  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └────┬─────┘       │
//! │       ▲                │                                  │             │
//! │       │           add / scan / qty                        │             │
//! │       │           discounts / customer                    │             │
//! │       │                │                                  │             │
//! │       │                ▼                                  │             │
//! │       └────────── cancel() ◄──────────── finalize() ──────┘             │
//! │                   (reset: cart, discount, customer, notes, payment)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use lojix_core::{
    Cart, CartLine, CartSnapshot, CoreError, CoreResult, Customer, LineSnapshot, Money,
    OverallDiscount, PaymentMethod,
};

use super::catalog::{CustomerDirectory, ProductCatalog};
use super::config::PdvConfig;

/// A finalized sale, handed to the receipt / order-printing collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleOrder {
    pub id: Uuid,
    /// Human-facing order number (`PED-250101-0001`).
    pub number: String,
    pub store_name: String,
    pub opened_at: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
    pub customer: Option<Customer>,
    pub seller: String,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub lines: Vec<LineSnapshot>,
    pub subtotal: Money,
    pub discount: OverallDiscount,
    pub discount_amount: Money,
    pub total: Money,
}

/// The sale currently open at this terminal.
#[derive(Debug, Clone)]
pub struct SaleSession {
    cart: Cart,
    store_name: String,
    seller: String,
    customer: Option<Customer>,
    notes: Option<String>,
    payment_method: Option<PaymentMethod>,
    opened_at: DateTime<Utc>,
    order_prefix: String,
    orders_issued: u32,
}

impl SaleSession {
    /// Opens an empty session using the configured seller and discount policy.
    pub fn new(config: &PdvConfig) -> Self {
        SaleSession {
            cart: Cart::with_policy(config.discount_policy),
            store_name: config.store_name.clone(),
            seller: config.seller.clone(),
            customer: None,
            notes: None,
            payment_method: None,
            opened_at: Utc::now(),
            order_prefix: config.order_prefix.clone(),
            orders_issued: 0,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn seller(&self) -> &str {
        &self.seller
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Orders finalized since the terminal started.
    pub fn orders_issued(&self) -> u32 {
        self.orders_issued
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Looks `product_id` up in the catalog and adds one unit.
    pub fn add_product(
        &mut self,
        catalog: &dyn ProductCatalog,
        product_id: &str,
    ) -> CoreResult<&CartLine> {
        let product = catalog
            .get_by_id(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;
        Ok(self.cart.add_item(&product))
    }

    /// Adds one unit of the product carrying `barcode`.
    ///
    /// A blank scan is ignored and yields `Ok(None)`.
    pub fn add_by_barcode(
        &mut self,
        catalog: &dyn ProductCatalog,
        barcode: &str,
    ) -> CoreResult<Option<&CartLine>> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Ok(None);
        }

        let product = catalog
            .find_by_barcode(barcode)
            .ok_or_else(|| CoreError::ProductNotFound(barcode.to_string()))?;
        Ok(Some(self.cart.add_item(&product)))
    }

    /// Sets a line's quantity; `<= 0` removes the line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if self.cart.update_quantity(product_id, quantity) {
            Ok(())
        } else {
            Err(CoreError::NotInCart(product_id.to_string()))
        }
    }

    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<CartLine> {
        self.cart
            .remove_item(product_id)
            .ok_or_else(|| CoreError::NotInCart(product_id.to_string()))
    }

    pub fn apply_line_discount(&mut self, product_id: &str, amount: Money) -> CoreResult<()> {
        if self.cart.apply_line_discount(product_id, amount) {
            Ok(())
        } else {
            Err(CoreError::NotInCart(product_id.to_string()))
        }
    }

    pub fn set_overall_discount(&mut self, discount: OverallDiscount) {
        self.cart.set_overall_discount(discount);
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    // =========================================================================
    // Sale details
    // =========================================================================

    pub fn select_customer(
        &mut self,
        directory: &dyn CustomerDirectory,
        customer_id: &str,
    ) -> CoreResult<&Customer> {
        let customer = directory
            .get_customer(customer_id)
            .ok_or_else(|| CoreError::CustomerNotFound(customer_id.to_string()))?;
        Ok(self.customer.insert(customer))
    }

    /// Detaches the customer; the sale goes out as an anonymous one.
    pub fn clear_customer(&mut self) {
        debug!("Customer cleared");
        self.customer = None;
    }

    /// Sets the order notes (observações). Blank text clears them.
    pub fn set_notes(&mut self, notes: &str) {
        let notes = notes.trim();
        self.notes = (!notes.is_empty()).then(|| notes.to_string());
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
    }

    // =========================================================================
    // Completion
    // =========================================================================

    /// Closes the sale and issues its order.
    ///
    /// ## Rules
    /// - Empty cart → [`CoreError::EmptyCart`], nothing changes
    /// - No payment method → [`CoreError::PaymentMethodRequired`], nothing changes
    /// - Otherwise the order is built from a snapshot and the session resets
    pub fn finalize(&mut self) -> CoreResult<SaleOrder> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        let payment_method = self
            .payment_method
            .ok_or(CoreError::PaymentMethodRequired)?;

        let snapshot = self.cart.snapshot();
        let issued_at = Utc::now();
        let sequence = self.orders_issued + 1;

        let order = SaleOrder {
            id: Uuid::new_v4(),
            number: format!(
                "{}-{}-{:04}",
                self.order_prefix,
                issued_at.format("%y%m%d"),
                sequence
            ),
            store_name: self.store_name.clone(),
            opened_at: self.opened_at,
            issued_at,
            customer: self.customer.clone(),
            seller: self.seller.clone(),
            payment_method,
            notes: self.notes.clone(),
            lines: snapshot.lines,
            subtotal: snapshot.subtotal,
            discount: snapshot.discount,
            discount_amount: snapshot.discount_amount,
            total: snapshot.total,
        };

        self.orders_issued = sequence;
        self.reset();

        info!(
            order = %order.number,
            total = %order.total,
            payment = %order.payment_method,
            lines = order.lines.len(),
            "Sale finalized"
        );
        Ok(order)
    }

    /// Abandons the open sale.
    pub fn cancel(&mut self) {
        info!(lines = self.cart.item_count(), "Sale cancelled");
        self.reset();
    }

    /// Seller and terminal settings survive; everything about the sale goes.
    fn reset(&mut self) {
        self.cart.clear();
        self.customer = None;
        self.notes = None;
        self.payment_method = None;
        self.opened_at = Utc::now();
        debug!("Session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InMemoryCatalog;
    use lojix_core::{DiscountPolicy, Percent};

    fn session() -> SaleSession {
        SaleSession::new(&PdvConfig::default())
    }

    #[test]
    fn test_add_product_from_catalog() {
        let catalog = InMemoryCatalog::demo();
        let mut session = session();

        session.add_product(&catalog, "4").unwrap();
        session.add_product(&catalog, "4").unwrap();

        let line = session.cart().line("4").unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(session.snapshot().subtotal.cents(), 29_980);
    }

    #[test]
    fn test_add_unknown_product() {
        let catalog = InMemoryCatalog::demo();
        let mut session = session();

        let err = session.add_product(&catalog, "99").unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(id) if id == "99"));
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_add_by_barcode() {
        let catalog = InMemoryCatalog::demo();
        let mut session = session();

        let line = session.add_by_barcode(&catalog, " 7891234567894 ").unwrap();
        assert_eq!(line.map(|l| l.product_id.clone()), Some("5".to_string()));

        assert!(session.add_by_barcode(&catalog, "   ").unwrap().is_none());
        assert!(matches!(
            session.add_by_barcode(&catalog, "7890000000000"),
            Err(CoreError::ProductNotFound(_))
        ));
        assert_eq!(session.cart().item_count(), 1);
    }

    #[test]
    fn test_line_operations_on_missing_product() {
        let mut session = session();
        assert!(matches!(
            session.update_quantity("1", 2),
            Err(CoreError::NotInCart(_))
        ));
        assert!(matches!(session.remove_item("1"), Err(CoreError::NotInCart(_))));
        assert!(matches!(
            session.apply_line_discount("1", Money::from_cents(100)),
            Err(CoreError::NotInCart(_))
        ));
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let catalog = InMemoryCatalog::demo();
        let mut session = session();
        session.add_product(&catalog, "1").unwrap();

        session.update_quantity("1", 0).unwrap();
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_finalize_requires_items() {
        let mut session = session();
        session.set_payment_method(PaymentMethod::Pix);
        assert!(matches!(session.finalize(), Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_finalize_requires_payment_method() {
        let catalog = InMemoryCatalog::demo();
        let mut session = session();
        session.add_product(&catalog, "4").unwrap();

        assert!(matches!(
            session.finalize(),
            Err(CoreError::PaymentMethodRequired)
        ));
        assert_eq!(session.cart().item_count(), 1);
    }

    #[test]
    fn test_finalize_builds_order_and_resets() {
        let catalog = InMemoryCatalog::demo();
        let mut session = session();

        session.add_product(&catalog, "4").unwrap();
        session.add_product(&catalog, "4").unwrap();
        session.add_product(&catalog, "5").unwrap();
        session.apply_line_discount("5", Money::from_cents(990)).unwrap();
        session.set_overall_discount(OverallDiscount::Percentage(Percent::from_percent(10)));
        session.select_customer(&catalog, "2").unwrap();
        session.set_notes("Entregar embrulhado");
        session.set_payment_method(PaymentMethod::Card);

        let order = session.finalize().unwrap();

        // 2 × 149,90 + (299,90 − 9,90) = 589,80; 10% = 58,98
        assert_eq!(order.subtotal.cents(), 58_980);
        assert_eq!(order.discount_amount.cents(), 5_898);
        assert_eq!(order.total.cents(), 53_082);
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.customer.as_ref().map(|c| c.name.as_str()), Some("Maria Santos"));
        assert_eq!(order.seller, "João Silva");
        assert_eq!(order.payment_method, PaymentMethod::Card);
        assert_eq!(order.notes.as_deref(), Some("Entregar embrulhado"));
        assert!(order.number.starts_with("PED-"));
        assert!(order.number.ends_with("-0001"));

        assert!(session.cart().is_empty());
        assert!(session.cart().overall_discount().is_none());
        assert!(session.customer().is_none());
        assert!(session.notes().is_none());
        assert!(session.payment_method().is_none());
        assert_eq!(session.seller(), "João Silva");
        assert_eq!(session.orders_issued(), 1);
    }

    #[test]
    fn test_order_numbers_increase() {
        let catalog = InMemoryCatalog::demo();
        let mut session = session();

        for expected in ["-0001", "-0002"] {
            session.add_product(&catalog, "1").unwrap();
            session.set_payment_method(PaymentMethod::Cash);
            let order = session.finalize().unwrap();
            assert!(order.number.ends_with(expected));
        }
    }

    #[test]
    fn test_cancel_resets_without_order() {
        let catalog = InMemoryCatalog::demo();
        let mut session = session();
        session.add_product(&catalog, "1").unwrap();
        session.set_payment_method(PaymentMethod::Pix);
        session.set_notes("teste");

        session.cancel();

        assert!(session.cart().is_empty());
        assert!(session.payment_method().is_none());
        assert!(session.notes().is_none());
        assert_eq!(session.orders_issued(), 0);
    }

    #[test]
    fn test_clear_customer() {
        let catalog = InMemoryCatalog::demo();
        let mut session = session();

        session.select_customer(&catalog, "1").unwrap();
        session.clear_customer();
        assert!(session.customer().is_none());

        session.add_product(&catalog, "4").unwrap();
        session.set_payment_method(PaymentMethod::Cash);
        assert!(session.finalize().unwrap().customer.is_none());
    }

    #[test]
    fn test_sale_order_typescript_binding() {
        assert_eq!(SaleOrder::name(), "SaleOrder");

        let decl = SaleOrder::decl();
        assert!(decl.contains("paymentMethod"));
        assert!(decl.contains("issuedAt"));
        assert!(decl.contains("discountAmount"));
    }

    #[test]
    fn test_blank_notes_clear() {
        let mut session = session();
        session.set_notes("  algo  ");
        assert_eq!(session.notes(), Some("algo"));
        session.set_notes("   ");
        assert!(session.notes().is_none());
    }

    #[test]
    fn test_session_uses_configured_policy() {
        let config = PdvConfig {
            discount_policy: DiscountPolicy::Clamped,
            ..PdvConfig::default()
        };
        let catalog = InMemoryCatalog::demo();
        let mut session = SaleSession::new(&config);
        session.add_product(&catalog, "4").unwrap();
        session.set_overall_discount(OverallDiscount::FixedAmount(Money::from_cents(1_000_000)));

        assert_eq!(session.snapshot().total, Money::zero());
        session.cancel();
        assert_eq!(session.cart().policy(), DiscountPolicy::Clamped);
    }
}
