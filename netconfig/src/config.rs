use core::fmt::Write;

use crate::address::{StaticIpv4, static_ipv4};
use crate::credentials::{WifiCredentials, wifi_credentials};
use crate::error::{ConfigError, InvalidReason};
use crate::key::Key;
use crate::source::{ConfigSource, unquote};

/// Everything the board needs to reach the network.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetworkConfig {
    pub wifi: WifiCredentials,
    pub ethernet: StaticIpv4,
}

impl NetworkConfig {
    /// Loads and validates the whole configuration. WiFi errors are
    /// reported before Ethernet errors.
    ///
    /// # Arguments
    /// * `source` - Where the values are looked up
    ///
    /// # Returns
    /// * Result<NetworkConfig, ConfigError> - Credentials and static address
    pub fn load<S: ConfigSource>(source: &S) -> Result<Self, ConfigError> {
        let wifi = wifi_credentials(source)?;
        let ethernet = static_ipv4(source)?;
        log::info!("network configuration loaded: wifi {wifi}, ethernet {ethernet}");
        Ok(Self { wifi, ethernet })
    }
}

impl core::fmt::Display for NetworkConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "wifi {}, ethernet {}", self.wifi, self.ethernet)
    }
}

/// Writes every key `source` defines as a `KEY=VALUE` line.
///
/// Used to flatten layered sources (environment over file) into a single
/// text that [`crate::KeyValueText`] reads back unchanged. Values that the
/// reader would trim or unquote are written in double quotes.
///
/// # Arguments
/// * `source` - Source to flatten
/// * `out` - Destination of the text
///
/// # Returns
/// * Result<usize, SnapshotError> - Number of lines written, or
///   `InvalidValue { reason: LineBreak }` for a value spanning several lines
pub fn snapshot<S: ConfigSource, W: Write>(
    source: &S,
    out: &mut W,
) -> Result<usize, SnapshotError> {
    let mut written = 0;
    for key in Key::ALL {
        if let Some(value) = source.lookup(key)? {
            if value.contains(['\r', '\n']) {
                return Err(ConfigError::InvalidValue {
                    key,
                    reason: InvalidReason::LineBreak,
                }
                .into());
            }
            if needs_quotes(&value) {
                writeln!(out, "{}=\"{}\"", key.name(), value.as_str())?;
            } else {
                writeln!(out, "{}={}", key.name(), value.as_str())?;
            }
            written += 1;
        }
    }
    Ok(written)
}

// the reader trims, then strips one pair of surrounding quotes
fn needs_quotes(value: &str) -> bool {
    value.trim() != value || unquote(value) != value
}

/// Error returned by [`snapshot`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write the snapshot")]
    Write(#[from] core::fmt::Error),
}
