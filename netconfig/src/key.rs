//! Configuration keys as they appear in the config file and the environment.

/// One octet of the Ethernet address, in network order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Octet {
    First,
    Second,
    Third,
    Fourth,
}

impl Octet {
    pub const ALL: [Octet; 4] = [Octet::First, Octet::Second, Octet::Third, Octet::Fourth];

    /// Position of the octet in the address, 0..=3.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A single configuration entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    WifiSsid,
    WifiPassword,
    /// Whole address, `192, 168, 0, 74` or `192.168.0.74`.
    EthernetIp,
    /// One octet of the address (`ETHERNET_IP_1`..`ETHERNET_IP_4`).
    EthernetIpOctet(Octet),
    /// Prefix length of the Ethernet network.
    SubnetMask,
    Gateway,
}

impl Key {
    /// Every key, in the order they are written by [`crate::snapshot`].
    pub const ALL: [Key; 9] = [
        Key::WifiSsid,
        Key::WifiPassword,
        Key::EthernetIp,
        Key::EthernetIpOctet(Octet::First),
        Key::EthernetIpOctet(Octet::Second),
        Key::EthernetIpOctet(Octet::Third),
        Key::EthernetIpOctet(Octet::Fourth),
        Key::SubnetMask,
        Key::Gateway,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Key::WifiSsid => "WIFI_SSID",
            Key::WifiPassword => "WIFI_PASSWORD",
            Key::EthernetIp => "ETHERNET_IP",
            Key::EthernetIpOctet(Octet::First) => "ETHERNET_IP_1",
            Key::EthernetIpOctet(Octet::Second) => "ETHERNET_IP_2",
            Key::EthernetIpOctet(Octet::Third) => "ETHERNET_IP_3",
            Key::EthernetIpOctet(Octet::Fourth) => "ETHERNET_IP_4",
            Key::SubnetMask => "SUBNET_MASK",
            Key::Gateway => "GATEWAY_ADDRESS",
        }
    }

    /// Reverse of [`Key::name`].
    ///
    /// # Arguments
    /// * `name` - Key name as written in the config file, case sensitive
    ///
    /// # Returns
    /// * Option<Key> - The key, or `None` for names this crate does not know
    pub fn from_name(name: &str) -> Option<Key> {
        Key::ALL.into_iter().find(|key| key.name() == name)
    }
}

impl core::fmt::Display for Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        for (i, a) in Key::ALL.iter().enumerate() {
            for b in Key::ALL.iter().skip(i + 1) {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn from_name_inverts_name() {
        for key in Key::ALL {
            assert_eq!(Key::from_name(key.name()), Some(key));
        }
        assert_eq!(
            Key::from_name("ETHERNET_IP_3"),
            Some(Key::EthernetIpOctet(Octet::Third))
        );
        assert_eq!(Key::from_name("ETHERNET_IP_5"), None);
        assert_eq!(Key::from_name("wifi_ssid"), None);
    }

    #[test]
    fn octet_indices_follow_address_order() {
        for (i, octet) in Octet::ALL.into_iter().enumerate() {
            assert_eq!(octet.index(), i);
        }
    }
}
