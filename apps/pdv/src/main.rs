//! # LojixApp PDV Entry Point
//!
//! Line-oriented sale terminal. See [`lojix_pdv::run`] for the startup
//! sequence and `lojix_pdv::commands` for the command set.
//!
//! ```text
//! $ printf 'add 4\nqty 4 2\ndiscount percent 10\npay pix\nfinish\n' | lojix-pdv
//! ```

fn main() -> std::io::Result<()> {
    // The actual setup is in lib.rs for testability
    lojix_pdv::run()
}
