//! WiFi network credentials.

use heapless::String;

use crate::error::{ConfigError, InvalidReason, MissingCause};
use crate::key::Key;
use crate::source::{ConfigSource, Value};
use crate::template::is_placeholder;

/// Longest SSID allowed by 802.11.
pub const SSID_MAX_LEN: usize = 32;
/// WPA2 passphrase bounds (64 means a raw hex key).
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 64;

/// SSID and password of the WiFi network the board joins.
#[derive(Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    ssid: String<SSID_MAX_LEN>,
    password: String<PASSWORD_MAX_LEN>,
}

impl WifiCredentials {
    /// Validates a credential pair.
    ///
    /// Empty or placeholder values are reported as
    /// [`ConfigError::MissingConfiguration`].
    ///
    /// # Arguments
    /// * `ssid` - Network name, 1..=32 bytes
    /// * `password` - WPA2 passphrase, 8..=64 bytes
    ///
    /// # Returns
    /// * Result<WifiCredentials, ConfigError> - The validated pair
    pub fn new(ssid: &str, password: &str) -> Result<Self, ConfigError> {
        let ssid = required(Key::WifiSsid, ssid)?;
        let password = required(Key::WifiPassword, password)?;

        let ssid = String::try_from(ssid).map_err(|_| ConfigError::InvalidValue {
            key: Key::WifiSsid,
            reason: InvalidReason::TooLong,
        })?;
        if password.len() < PASSWORD_MIN_LEN {
            return Err(ConfigError::InvalidValue {
                key: Key::WifiPassword,
                reason: InvalidReason::TooShort,
            });
        }
        let password = String::try_from(password).map_err(|_| ConfigError::InvalidValue {
            key: Key::WifiPassword,
            reason: InvalidReason::TooLong,
        })?;

        Ok(Self { ssid, password })
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

fn required(key: Key, value: &str) -> Result<&str, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::MissingConfiguration {
            key,
            cause: MissingCause::Empty,
        });
    }
    if is_placeholder(key, value) {
        log::warn!("{key} still holds the template placeholder");
        return Err(ConfigError::MissingConfiguration {
            key,
            cause: MissingCause::Placeholder,
        });
    }
    Ok(value)
}

// never print the password
impl core::fmt::Debug for WifiCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WifiCredentials")
            .field("ssid", &self.ssid.as_str())
            .field("password", &"***")
            .finish()
    }
}

impl core::fmt::Display for WifiCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (password: {} chars)", self.ssid, self.password.len())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WifiCredentials {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} (password: {} chars)", self.ssid.as_str(), self.password.len())
    }
}

/// Reads `WIFI_SSID` and `WIFI_PASSWORD` from `source`.
///
/// # Arguments
/// * `source` - Where the values are looked up
///
/// # Returns
/// * Result<WifiCredentials, ConfigError> - The credentials, or
///   `MissingConfiguration` when absent, empty or still the placeholders
pub fn wifi_credentials<S: ConfigSource>(source: &S) -> Result<WifiCredentials, ConfigError> {
    let ssid = fetch(source, Key::WifiSsid)?;
    let password = fetch(source, Key::WifiPassword)?;
    WifiCredentials::new(&ssid, &password)
}

fn fetch<S: ConfigSource>(source: &S, key: Key) -> Result<Value, ConfigError> {
    source
        .lookup(key)?
        .ok_or(ConfigError::MissingConfiguration {
            key,
            cause: MissingCause::Absent,
        })
}
