//! # LojixApp PDV Library
//!
//! The sale terminal behind the LojixApp point-of-sale screen. Commands
//! arrive one per line on stdin and every reply is one JSON line on stdout.
//!
//! ## Module Organization
//! ```text
//! lojix_pdv/
//! ├── lib.rs          ◄─── You are here (logging, PdvApp, stdin loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── SaleSession (owns the Cart)
//! │   ├── catalog.rs  ◄─── Product / customer lookup
//! │   └── config.rs   ◄─── PdvConfig
//! ├── commands/
//! │   ├── mod.rs      ◄─── Line parsing and dispatch
//! │   ├── product.rs  ◄─── Product search
//! │   ├── cart.rs     ◄─── Cart manipulation and discounts
//! │   ├── sale.rs     ◄─── Customer, payment, finish, cancel
//! │   ├── finance.rs  ◄─── Margin calculator
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Reply Envelope
//! ```json
//! {"status":"ok","data":{...}}
//! {"status":"error","error":{"code":"NOT_FOUND","message":"Product not found: 9"}}
//! ```
//!
//! Logs go to stderr so stdout carries nothing but replies.

pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, BufRead, Write};

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::Command;
use error::ApiError;
use state::{InMemoryCatalog, PdvConfig, SaleSession};

/// One reply line.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Reply {
    Ok { data: Value },
    Error { error: ApiError },
}

/// Everything the terminal holds between commands.
#[derive(Debug)]
pub struct PdvApp {
    config: PdvConfig,
    catalog: InMemoryCatalog,
    session: SaleSession,
}

impl PdvApp {
    pub fn new(config: PdvConfig, catalog: InMemoryCatalog) -> Self {
        let session = SaleSession::new(&config);
        PdvApp {
            config,
            catalog,
            session,
        }
    }

    pub fn config(&self) -> &PdvConfig {
        &self.config
    }

    pub fn session(&self) -> &SaleSession {
        &self.session
    }

    /// Parses and runs one line, returning the JSON reply.
    pub fn handle_line(&mut self, line: &str) -> String {
        let result = Command::parse(line).and_then(|command| {
            commands::execute(command, &mut self.session, &self.catalog, &self.config)
        });

        let reply = match result {
            Ok(data) => Reply::Ok { data },
            Err(error) => {
                warn!(code = ?error.code, message = %error.message, "Command failed");
                Reply::Error { error }
            }
        };

        serde_json::to_string(&reply).unwrap_or_else(|e| {
            format!(
                r#"{{"status":"error","error":{{"code":"INTERNAL","message":"{}"}}}}"#,
                e.to_string().replace('"', "'")
            )
        })
    }
}

/// Runs the terminal on stdin/stdout until EOF or `quit`.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging ───► EnvFilter, default info,lojix=debug         │
/// │  2. Load Configuration ───► PdvConfig::from_env (LOJIX_*)               │
/// │  3. Load Catalog ─────────► InMemoryCatalog::demo                       │
/// │  4. Open Sale Session ────► empty cart, configured seller               │
/// │  5. Command Loop ─────────► one reply per non-blank line                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> io::Result<()> {
    init_tracing();

    let config = PdvConfig::from_env();
    let catalog = InMemoryCatalog::demo();
    info!(
        store = %config.store_name,
        seller = %config.seller,
        policy = ?config.discount_policy,
        products = catalog.product_count(),
        "Starting LojixApp PDV"
    );

    let mut app = PdvApp::new(config, catalog);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line.to_lowercase().as_str(), "quit" | "exit") {
            break;
        }

        writeln!(stdout, "{}", app.handle_line(line))?;
        stdout.flush()?;
    }

    info!(
        orders = app.session().orders_issued(),
        "PDV shutting down"
    );
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=lojix=trace` - Show every cart mutation
/// - Default: `info,lojix=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lojix=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
