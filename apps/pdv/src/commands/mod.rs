//! # Commands Module
//!
//! The line protocol spoken on stdin, and the command handlers behind it.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (parsing + dispatch)
//! ├── product.rs  ◄─── Product search
//! ├── cart.rs     ◄─── Cart manipulation and discounts
//! ├── sale.rs     ◄─── Customer, notes, payment, finish, cancel
//! ├── finance.rs  ◄─── Margin calculator
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin (one command per line)          stdout (one JSON per line)       │
//! │  ─────────────────────────────         ──────────────────────────       │
//! │  search galaxy                  ──►    {"status":"ok","data":[...]}     │
//! │  add 1                          ──►    {"status":"ok","data":{cart}}    │
//! │  scan 7891234567893             ──►    {"status":"ok","data":{cart}}    │
//! │  qty 1 3                        ──►    {"status":"ok","data":{cart}}    │
//! │  remove 1                       ──►    {"status":"ok","data":{cart}}    │
//! │  item-discount 1 49,90          ──►    {"status":"ok","data":{cart}}    │
//! │  discount percent 10            ──►    {"status":"ok","data":{cart}}    │
//! │  discount fixed 25,00           ──►    {"status":"ok","data":{cart}}    │
//! │  customer 2                     ──►    {"status":"ok","data":{sale}}    │
//! │  customer -                     ──►    {"status":"ok","data":{sale}}    │
//! │  notes presente para Ana        ──►    {"status":"ok","data":{sale}}    │
//! │  pay pix                        ──►    {"status":"ok","data":{sale}}    │
//! │  show                           ──►    {"status":"ok","data":{cart}}    │
//! │  finish                         ──►    {"status":"ok","data":{order}}   │
//! │  cancel                         ──►    {"status":"ok","data":{cart}}    │
//! │  margin 100 150                 ──►    {"status":"ok","data":{quote}}   │
//! │  config                         ──►    {"status":"ok","data":{config}}  │
//! │                                                                         │
//! │  any failure                    ──►    {"status":"error","error":{..}}  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Arguments stay raw text until the handler validates them, so malformed
//! input is rejected here and never reaches the cart.

pub mod cart;
pub mod config;
pub mod finance;
pub mod product;
pub mod sale;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{InMemoryCatalog, PdvConfig, SaleSession};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Search(String),
    Add(String),
    Scan(String),
    Quantity { product_id: String, quantity: String },
    Remove(String),
    ItemDiscount { product_id: String, amount: String },
    Discount { kind: String, value: String },
    Customer(String),
    ClearCustomer,
    Notes(String),
    Pay(String),
    Finish,
    Cancel,
    Margin { cost: String, price: String },
    Config,
}

impl Command {
    /// Parses one input line.
    ///
    /// The first word names the command; `search` and `notes` take the rest
    /// of the line verbatim.
    pub fn parse(line: &str) -> Result<Command, ApiError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match name.to_lowercase().as_str() {
            "show" => Command::Show,
            "search" => Command::Search(rest.to_string()),
            "add" => Command::Add(arg(&args, 0, "product id")?),
            "scan" => Command::Scan(arg(&args, 0, "barcode")?),
            "qty" => Command::Quantity {
                product_id: arg(&args, 0, "product id")?,
                quantity: arg(&args, 1, "quantity")?,
            },
            "remove" => Command::Remove(arg(&args, 0, "product id")?),
            "item-discount" => Command::ItemDiscount {
                product_id: arg(&args, 0, "product id")?,
                amount: args_from(&args, 1, "amount")?,
            },
            "discount" => Command::Discount {
                kind: arg(&args, 0, "discount kind")?,
                value: args_from(&args, 1, "discount value")?,
            },
            "customer" => match arg(&args, 0, "customer id")?.as_str() {
                "-" => Command::ClearCustomer,
                id => Command::Customer(id.to_string()),
            },
            "notes" => Command::Notes(rest.to_string()),
            "pay" => Command::Pay(arg(&args, 0, "payment method")?),
            "finish" => Command::Finish,
            "cancel" => Command::Cancel,
            "margin" => Command::Margin {
                cost: arg(&args, 0, "cost")?,
                price: arg(&args, 1, "price")?,
            },
            "config" => Command::Config,
            "" => return Err(ApiError::validation("Empty command")),
            other => return Err(ApiError::unknown_command(other)),
        };

        Ok(command)
    }
}

fn arg(args: &[&str], index: usize, field: &str) -> Result<String, ApiError> {
    args.get(index)
        .map(|s| s.to_string())
        .ok_or_else(|| ApiError::validation(format!("{} is required", field)))
}

/// Joins the remaining words, so `R$ 29,90` survives as one argument.
fn args_from(args: &[&str], index: usize, field: &str) -> Result<String, ApiError> {
    match args.get(index..) {
        Some(rest) if !rest.is_empty() => Ok(rest.join(" ")),
        _ => Err(ApiError::validation(format!("{} is required", field))),
    }
}

/// Runs one command against the terminal state.
pub fn execute(
    command: Command,
    session: &mut SaleSession,
    catalog: &InMemoryCatalog,
    config: &PdvConfig,
) -> Result<Value, ApiError> {
    debug!(?command, "execute command");

    match command {
        Command::Show => respond(Ok(cart::get_cart(session, config))),
        Command::Search(query) => respond(product::search_products(catalog, config, &query)),
        Command::Add(product_id) => respond(cart::add_to_cart(session, catalog, config, &product_id)),
        Command::Scan(barcode) => respond(cart::scan_barcode(session, catalog, config, &barcode)),
        Command::Quantity {
            product_id,
            quantity,
        } => respond(cart::update_cart_item(session, config, &product_id, &quantity)),
        Command::Remove(product_id) => respond(cart::remove_from_cart(session, config, &product_id)),
        Command::ItemDiscount { product_id, amount } => respond(cart::apply_item_discount(
            session,
            config,
            &product_id,
            &amount,
        )),
        Command::Discount { kind, value } => {
            respond(cart::set_overall_discount(session, config, &kind, &value))
        }
        Command::Customer(customer_id) => {
            respond(sale::select_customer(session, catalog, config, &customer_id))
        }
        Command::ClearCustomer => respond(Ok(sale::clear_customer(session, config))),
        Command::Notes(notes) => respond(Ok(sale::set_notes(session, config, &notes))),
        Command::Pay(method) => respond(sale::set_payment_method(session, config, &method)),
        Command::Finish => respond(sale::finalize_sale(session, config)),
        Command::Cancel => respond(Ok(sale::cancel_sale(session, config))),
        Command::Margin { cost, price } => respond(finance::calculate_margin(config, &cost, &price)),
        Command::Config => respond(Ok(config::get_config(config))),
    }
}

fn respond<T: Serialize>(result: Result<T, ApiError>) -> Result<Value, ApiError> {
    let data = result?;
    serde_json::to_value(data).map_err(|e| ApiError::internal(e.to_string()))
}
