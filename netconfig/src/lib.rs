//! # Network configuration
//!
//! Loads WiFi credentials and the static Ethernet IPv4 address for the board
//! from an untracked `KEY=VALUE` source, refusing the placeholder values of
//! the committed template.
//!
//! ```text
//! WIFI_SSID=my-network
//! WIFI_PASSWORD=my-passphrase
//! ETHERNET_IP=192, 168, 0, 74
//! ```

#![cfg_attr(not(test), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod address;
pub mod config;
pub mod credentials;
pub mod error;
pub mod key;
pub mod source;
pub mod template;

pub use address::{StaticIpv4, static_ipv4};
pub use config::{NetworkConfig, SnapshotError, snapshot};
pub use credentials::{WifiCredentials, wifi_credentials};
pub use error::{ConfigError, InvalidReason, MissingCause};
pub use key::Key;
pub use source::{ConfigSource, KeyValueText, Layered, MAX_VALUE_LEN, Value};

#[cfg(any(feature = "std", test))]
pub use source::EnvSource;
