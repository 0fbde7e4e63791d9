//! The committed template and its placeholder values.
//!
//! Copy `network.example.cfg` to `network.cfg` next to it and fill in the
//! real values. `network.cfg` is ignored by git.

use crate::key::Key;

pub const PLACEHOLDER_SSID: &str = "TU_WIFI_SSID";
pub const PLACEHOLDER_PASSWORD: &str = "TU_WIFI_PASSWORD";

/// Default static address for the Ethernet port. Not a placeholder.
pub const TEMPLATE_ETHERNET_IP: [u8; 4] = [192, 168, 0, 74];

/// Contents of `network.example.cfg`.
// The template sits at the workspace root, next to the ignored `network.cfg`
// the firmware build reads, so this crate only builds inside the workspace.
pub const TEMPLATE: &str = include_str!("../../network.example.cfg");

/// True when `value` is the template placeholder for `key`.
///
/// # Arguments
/// * `key` - Key the value was read for
/// * `value` - Value as read from the source
///
/// # Returns
/// * bool - `true` only for the unchanged WiFi credentials of the template
pub fn is_placeholder(key: Key, value: &str) -> bool {
    match key {
        Key::WifiSsid => value == PLACEHOLDER_SSID,
        Key::WifiPassword => value == PLACEHOLDER_PASSWORD,
        _ => false,
    }
}
