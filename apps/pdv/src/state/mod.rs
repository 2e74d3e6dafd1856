//! # State Module
//!
//! Everything the command loop keeps between commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │   SaleSession    │  │ InMemoryCatalog  │  │    PdvConfig     │      │
//! │  │                  │  │                  │  │                  │      │
//! │  │  Cart (owned)    │  │  products        │  │  store_name      │      │
//! │  │  customer        │  │  customers       │  │  seller          │      │
//! │  │  payment method  │  │                  │  │  discount policy │      │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────┘      │
//! │     &mut per command      read-only             read-only              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the pieces it needs.

mod catalog;
mod config;
mod session;

pub use catalog::{CustomerDirectory, InMemoryCatalog, ProductCatalog};
pub use config::PdvConfig;
pub use session::{SaleOrder, SaleSession};
