//! # Config Commands

use tracing::debug;

use crate::state::PdvConfig;

/// Returns the running configuration.
pub fn get_config(config: &PdvConfig) -> PdvConfig {
    debug!("get_config command");
    config.clone()
}
