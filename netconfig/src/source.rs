//! Where configuration values come from.

use crate::error::{ConfigError, InvalidReason};
use crate::key::Key;

/// Longest value any source may hand out (a 64 hex digit WPA2 key).
pub const MAX_VALUE_LEN: usize = 64;

pub type Value = heapless::String<MAX_VALUE_LEN>;

/// A read-only store of configuration values.
pub trait ConfigSource {
    /// Returns the raw value of `key`, or `None` when this source does not
    /// define it.
    fn lookup(&self, key: Key) -> Result<Option<Value>, ConfigError>;
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn lookup(&self, key: Key) -> Result<Option<Value>, ConfigError> {
        (**self).lookup(key)
    }
}

fn to_value(key: Key, raw: &str) -> Result<Value, ConfigError> {
    Value::try_from(raw).map_err(|_| ConfigError::InvalidValue {
        key,
        reason: InvalidReason::TooLong,
    })
}

/// `KEY=VALUE` configuration text, one entry per line.
///
/// Blank lines and lines starting with `#` or `//` are skipped. Keys and
/// values are trimmed and a value wrapped in double quotes is unquoted.
/// When a key is repeated the first entry wins.
#[derive(Debug, Clone, Copy)]
pub struct KeyValueText<'a> {
    text: &'a str,
}

impl<'a> KeyValueText<'a> {
    pub const fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Iterates over `(key, value)` pairs, including keys this crate does not know.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, &'a str)> + use<'a> {
        self.text.lines().filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                return None;
            }
            let (name, value) = line.split_once('=')?;
            Some((name.trim(), unquote(value.trim())))
        })
    }

    /// Raw lookup by name, without the length check of [`ConfigSource::lookup`].
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.entries()
            .find(|(entry, _)| *entry == name)
            .map(|(_, value)| value)
    }
}

pub(crate) fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

impl ConfigSource for KeyValueText<'_> {
    fn lookup(&self, key: Key) -> Result<Option<Value>, ConfigError> {
        self.get(key.name()).map(|raw| to_value(key, raw)).transpose()
    }
}

/// Process environment, one variable per key name.
///
/// Values follow the file rules: trimmed, then unquoted.
#[cfg(any(feature = "std", test))]
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

#[cfg(any(feature = "std", test))]
impl ConfigSource for EnvSource {
    fn lookup(&self, key: Key) -> Result<Option<Value>, ConfigError> {
        match std::env::var(key.name()) {
            Ok(raw) => to_value(key, unquote(raw.trim())).map(Some),
            Err(_) => Ok(None),
        }
    }
}

/// Two sources stacked: `upper` shadows `lower` key by key.
#[derive(Debug, Clone, Copy)]
pub struct Layered<A, B> {
    pub upper: A,
    pub lower: B,
}

impl<A, B> Layered<A, B> {
    pub const fn new(upper: A, lower: B) -> Self {
        Self { upper, lower }
    }
}

impl<A: ConfigSource, B: ConfigSource> ConfigSource for Layered<A, B> {
    fn lookup(&self, key: Key) -> Result<Option<Value>, ConfigError> {
        match self.upper.lookup(key)? {
            Some(value) => Ok(Some(value)),
            None => self.lower.lookup(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = r#"
# comment
// also a comment
WIFI_SSID = "home"
WIFI_PASSWORD=correct horse
WIFI_SSID=ignored
ETHERNET_IP=10, 0, 0, 2
NOT_A_KEY=whatever
garbage line
"#;

    #[test]
    fn parses_and_unquotes() {
        let text = KeyValueText::new(TEXT);
        assert_eq!(text.lookup(Key::WifiSsid).unwrap().as_deref(), Some("home"));
        assert_eq!(
            text.lookup(Key::WifiPassword).unwrap().as_deref(),
            Some("correct horse")
        );
        assert_eq!(text.get("ETHERNET_IP"), Some("10, 0, 0, 2"));
        assert_eq!(text.lookup(Key::Gateway).unwrap(), None);
    }

    #[test]
    fn unknown_keys_are_listed() {
        let text = KeyValueText::new(TEXT);
        assert!(text.entries().any(|(k, v)| k == "NOT_A_KEY" && v == "whatever"));
        assert_eq!(text.entries().count(), 5);
    }

    #[test]
    fn overlong_value_is_rejected() {
        let long = std::format!("WIFI_PASSWORD={}", "x".repeat(MAX_VALUE_LEN + 1));
        let err = KeyValueText::new(&long).lookup(Key::WifiPassword).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: Key::WifiPassword,
                reason: InvalidReason::TooLong
            }
        );
    }

    #[test]
    fn upper_layer_shadows_lower() {
        let upper = KeyValueText::new("WIFI_SSID=office");
        let lower = KeyValueText::new(TEXT);
        let layered = Layered::new(upper, lower);
        assert_eq!(layered.lookup(Key::WifiSsid).unwrap().as_deref(), Some("office"));
        assert_eq!(
            layered.lookup(Key::EthernetIp).unwrap().as_deref(),
            Some("10, 0, 0, 2")
        );
    }
}
