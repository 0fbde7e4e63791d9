//! Static IPv4 configuration of the Ethernet port.

use core::net::Ipv4Addr;

use heapless::Vec;

use crate::error::{ConfigError, InvalidReason, MissingCause};
use crate::key::{Key, Octet};
use crate::source::ConfigSource;

/// Prefix length used when `SUBNET_MASK` is not configured.
pub const DEFAULT_PREFIX_LEN: u8 = 24;

/// Static address of the Ethernet port: four octets, the prefix length and
/// an optional gateway. Every octet is a `u8`, so 0..=255 holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StaticIpv4 {
    octets: [u8; 4],
    prefix_len: u8,
    gateway: Option<[u8; 4]>,
}

impl StaticIpv4 {
    /// Builds a static configuration, checking the prefix length.
    ///
    /// # Arguments
    /// * `octets` - Address in network order
    /// * `prefix_len` - Network prefix length, 0..=32
    /// * `gateway` - Optional default gateway
    ///
    /// # Returns
    /// * Result<StaticIpv4, ConfigError> - The configuration, or
    ///   `InvalidValue { key: SubnetMask, reason: PrefixOutOfRange }`
    pub fn new(
        octets: [u8; 4],
        prefix_len: u8,
        gateway: Option<[u8; 4]>,
    ) -> Result<Self, ConfigError> {
        if prefix_len > 32 {
            return Err(ConfigError::InvalidValue {
                key: Key::SubnetMask,
                reason: InvalidReason::PrefixOutOfRange,
            });
        }
        Ok(Self {
            octets,
            prefix_len,
            gateway,
        })
    }

    pub fn octets(&self) -> [u8; 4] {
        self.octets
    }

    /// The address packed in network order (`192.168.0.74` is `0xC0A8004A`).
    pub fn to_bits(&self) -> u32 {
        u32::from_be_bytes(self.octets)
    }

    pub fn address(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.octets)
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn gateway(&self) -> Option<Ipv4Addr> {
        self.gateway.map(Ipv4Addr::from)
    }
}

impl From<StaticIpv4> for Ipv4Addr {
    fn from(ip: StaticIpv4) -> Self {
        ip.address()
    }
}

impl core::fmt::Display for StaticIpv4 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.address(), self.prefix_len)?;
        if let Some(gw) = self.gateway() {
            write!(f, " via {gw}")?;
        }
        Ok(())
    }
}

/// Parses a decimal number no greater than `max`.
///
/// Anything made only of digits is a number, however large, so oversized
/// values are reported as `out_of_range` rather than [`InvalidReason::NotANumber`].
///
/// # Arguments
/// * `key` - Key reported in the error
/// * `raw` - Value as read from the source
/// * `max` - Largest accepted value
/// * `out_of_range` - Reason reported for values above `max`
///
/// # Returns
/// * Result<u8, ConfigError> - The parsed value
fn parse_bounded(
    key: Key,
    raw: &str,
    max: u8,
    out_of_range: InvalidReason,
) -> Result<u8, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidValue {
            key,
            reason: InvalidReason::NotANumber,
        });
    }
    match raw.parse::<u8>() {
        Ok(value) if value <= max => Ok(value),
        _ => Err(ConfigError::InvalidValue {
            key,
            reason: out_of_range,
        }),
    }
}

/// Parses one address component, rejecting anything outside 0..=255.
fn parse_octet(key: Key, raw: &str) -> Result<u8, ConfigError> {
    parse_bounded(key, raw, u8::MAX, InvalidReason::OctetOutOfRange)
}

/// Parses `192, 168, 0, 74` or `192.168.0.74`.
///
/// # Arguments
/// * `key` - Key reported in the error
/// * `raw` - Address text
///
/// # Returns
/// * Result<[u8; 4], ConfigError> - The four octets
pub fn parse_address(key: Key, raw: &str) -> Result<[u8; 4], ConfigError> {
    let separator = if raw.contains(',') { ',' } else { '.' };
    let mut octets: Vec<u8, 4> = Vec::new();
    for part in raw.split(separator) {
        let octet = parse_octet(key, part)?;
        octets.push(octet).map_err(|_| ConfigError::InvalidValue {
            key,
            reason: InvalidReason::WrongOctetCount,
        })?;
    }
    if octets.len() != 4 {
        return Err(ConfigError::InvalidValue {
            key,
            reason: InvalidReason::WrongOctetCount,
        });
    }
    Ok([octets[0], octets[1], octets[2], octets[3]])
}

fn address_from_octet_keys<S: ConfigSource>(source: &S) -> Result<Option<[u8; 4]>, ConfigError> {
    let mut octets = [None; 4];
    for octet in Octet::ALL {
        let key = Key::EthernetIpOctet(octet);
        octets[octet.index()] = source
            .lookup(key)?
            .map(|raw| parse_octet(key, &raw))
            .transpose()?;
    }
    if octets.iter().all(Option::is_none) {
        return Ok(None);
    }

    let mut address = [0u8; 4];
    for octet in Octet::ALL {
        let value = octets[octet.index()].ok_or(ConfigError::MissingConfiguration {
            key: Key::EthernetIpOctet(octet),
            cause: MissingCause::Absent,
        })?;
        address[octet.index()] = value;
    }
    Ok(Some(address))
}

/// Reads the Ethernet address from `ETHERNET_IP`, falling back to
/// `ETHERNET_IP_1`..`ETHERNET_IP_4`, plus the optional `SUBNET_MASK` and
/// `GATEWAY_ADDRESS`.
///
/// # Arguments
/// * `source` - Where the values are looked up
///
/// # Returns
/// * Result<StaticIpv4, ConfigError> - The validated address, or
///   `MissingConfiguration` when no address key is present
pub fn static_ipv4<S: ConfigSource>(source: &S) -> Result<StaticIpv4, ConfigError> {
    let octets = match source.lookup(Key::EthernetIp)? {
        Some(raw) if raw.trim().is_empty() => {
            return Err(ConfigError::MissingConfiguration {
                key: Key::EthernetIp,
                cause: MissingCause::Empty,
            });
        }
        Some(raw) => parse_address(Key::EthernetIp, &raw)?,
        None => address_from_octet_keys(source)?.ok_or(ConfigError::MissingConfiguration {
            key: Key::EthernetIp,
            cause: MissingCause::Absent,
        })?,
    };

    let prefix_len = match source.lookup(Key::SubnetMask)? {
        Some(raw) if !raw.trim().is_empty() => {
            parse_bounded(Key::SubnetMask, &raw, 32, InvalidReason::PrefixOutOfRange)?
        }
        _ => DEFAULT_PREFIX_LEN,
    };

    let gateway = match source.lookup(Key::Gateway)? {
        Some(raw) if !raw.trim().is_empty() => Some(parse_address(Key::Gateway, &raw)?),
        _ => None,
    };

    let ip = StaticIpv4::new(octets, prefix_len, gateway)?;
    log::debug!("static address {ip}");
    Ok(ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::KeyValueText;
    use crate::template::{TEMPLATE, TEMPLATE_ETHERNET_IP};

    fn load(text: &str) -> Result<StaticIpv4, ConfigError> {
        static_ipv4(&KeyValueText::new(text))
    }

    #[test]
    fn template_address_loads() {
        let ip = load(TEMPLATE).unwrap();
        assert_eq!(ip.octets(), TEMPLATE_ETHERNET_IP);
        assert_eq!(ip.to_bits(), 0xC0A8_004A);
        assert_eq!(ip.prefix_len(), DEFAULT_PREFIX_LEN);
        assert_eq!(ip.gateway(), None);
    }

    #[test]
    fn single_key_formats() {
        assert_eq!(load("ETHERNET_IP=10, 1, 2, 3").unwrap().octets(), [10, 1, 2, 3]);
        assert_eq!(load("ETHERNET_IP=10.1.2.3").unwrap().octets(), [10, 1, 2, 3]);
    }

    #[test]
    fn single_key_wins_over_octets() {
        let ip = load("ETHERNET_IP_1=1\nETHERNET_IP=10.1.2.3").unwrap();
        assert_eq!(Ipv4Addr::from(ip), Ipv4Addr::new(10, 1, 2, 3));
    }

    #[test]
    fn octet_out_of_range() {
        assert_eq!(
            load("ETHERNET_IP=192.168.0.256").unwrap_err(),
            ConfigError::InvalidValue {
                key: Key::EthernetIp,
                reason: InvalidReason::OctetOutOfRange
            }
        );
        assert_eq!(
            load("ETHERNET_IP_1=192\nETHERNET_IP_2=300\nETHERNET_IP_3=0\nETHERNET_IP_4=1")
                .unwrap_err(),
            ConfigError::InvalidValue {
                key: Key::EthernetIpOctet(Octet::Second),
                reason: InvalidReason::OctetOutOfRange
            }
        );
    }

    #[test]
    fn malformed_addresses() {
        assert_eq!(
            load("ETHERNET_IP=10.1.2").unwrap_err(),
            ConfigError::InvalidValue {
                key: Key::EthernetIp,
                reason: InvalidReason::WrongOctetCount
            }
        );
        assert_eq!(
            load("ETHERNET_IP=10.1.2.3.4").unwrap_err(),
            ConfigError::InvalidValue {
                key: Key::EthernetIp,
                reason: InvalidReason::WrongOctetCount
            }
        );
        assert_eq!(
            load("ETHERNET_IP=10.x.2.3").unwrap_err(),
            ConfigError::InvalidValue {
                key: Key::EthernetIp,
                reason: InvalidReason::NotANumber
            }
        );
    }

    #[test]
    fn missing_address() {
        assert_eq!(
            load("WIFI_SSID=x").unwrap_err(),
            ConfigError::MissingConfiguration {
                key: Key::EthernetIp,
                cause: MissingCause::Absent
            }
        );
        assert_eq!(
            load("ETHERNET_IP=").unwrap_err(),
            ConfigError::MissingConfiguration {
                key: Key::EthernetIp,
                cause: MissingCause::Empty
            }
        );
        assert_eq!(
            load("ETHERNET_IP_1=192\nETHERNET_IP_2=168\nETHERNET_IP_4=1").unwrap_err(),
            ConfigError::MissingConfiguration {
                key: Key::EthernetIpOctet(Octet::Third),
                cause: MissingCause::Absent
            }
        );
    }

    #[test]
    fn subnet_and_gateway() {
        let ip = load("ETHERNET_IP=10.0.0.2\nSUBNET_MASK=16\nGATEWAY_ADDRESS=10, 0, 0, 1").unwrap();
        assert_eq!(ip.prefix_len(), 16);
        assert_eq!(ip.gateway(), Some(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(std::format!("{ip}"), "10.0.0.2/16 via 10.0.0.1");

        assert_eq!(
            load("ETHERNET_IP=10.0.0.2\nSUBNET_MASK=33").unwrap_err(),
            ConfigError::InvalidValue {
                key: Key::SubnetMask,
                reason: InvalidReason::PrefixOutOfRange
            }
        );
    }

    #[test]
    fn oversized_numbers_are_out_of_range() {
        assert_eq!(
            load("ETHERNET_IP=4294967296.0.0.1").unwrap_err(),
            ConfigError::InvalidValue {
                key: Key::EthernetIp,
                reason: InvalidReason::OctetOutOfRange
            }
        );
        assert_eq!(
            load("ETHERNET_IP=10.0.0.2\nSUBNET_MASK=300").unwrap_err(),
            ConfigError::InvalidValue {
                key: Key::SubnetMask,
                reason: InvalidReason::PrefixOutOfRange
            }
        );
    }

    #[test]
    fn subnet_mask_must_be_numeric() {
        for raw in ["abc", "-8", "+8", "2 4"] {
            let text = std::format!("ETHERNET_IP=10.0.0.2\nSUBNET_MASK={raw}");
            assert_eq!(
                load(&text).unwrap_err(),
                ConfigError::InvalidValue {
                    key: Key::SubnetMask,
                    reason: InvalidReason::NotANumber
                },
                "{raw}"
            );
        }
        assert_eq!(load("ETHERNET_IP=10.0.0.2\nSUBNET_MASK=32").unwrap().prefix_len(), 32);
        assert_eq!(load("ETHERNET_IP=10.0.0.2\nSUBNET_MASK=0").unwrap().prefix_len(), 0);
    }

    #[test]
    fn malformed_gateway() {
        assert_eq!(
            load("ETHERNET_IP=10.0.0.2\nGATEWAY_ADDRESS=10.0.0").unwrap_err(),
            ConfigError::InvalidValue {
                key: Key::Gateway,
                reason: InvalidReason::WrongOctetCount
            }
        );
        assert_eq!(
            load("ETHERNET_IP=10.0.0.2\nGATEWAY_ADDRESS=10, 0, 0, 999").unwrap_err(),
            ConfigError::InvalidValue {
                key: Key::Gateway,
                reason: InvalidReason::OctetOutOfRange
            }
        );
        assert_eq!(
            load("ETHERNET_IP=10.0.0.2\nGATEWAY_ADDRESS=router").unwrap_err(),
            ConfigError::InvalidValue {
                key: Key::Gateway,
                reason: InvalidReason::NotANumber
            }
        );
    }
}
