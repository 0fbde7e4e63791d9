//! # Network Configuration
//!
//! Configuration embedded at build time by `build.rs` from `network.cfg`
//! (see `network.example.cfg` at the repository root) with environment
//! variables of the same names taking precedence.

use netconfig::{ConfigError, KeyValueText, NetworkConfig};

pub const CONFIG: &str = include_str!(concat!(env!("OUT_DIR"), "/network.cfg"));

/// Carica e valida la configurazione di rete incorporata.
///
/// # Ritorna
/// * Result<NetworkConfig, ConfigError> - Credenziali WiFi e IP statico,
///   oppure l'errore se i valori reali non sono stati forniti
pub fn load_network_config() -> Result<NetworkConfig, ConfigError> {
    NetworkConfig::load(&KeyValueText::new(CONFIG))
}
