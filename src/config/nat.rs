use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// NAT traversal strategy handed to the peer-to-peer stack.
///
/// Only the choice is described here; the port mapping itself is performed by
/// the networking layer. The textual form is `mechanism[:ip]`, e.g. `any`,
/// `extip:203.0.113.7` or `pmp:192.168.1.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NatStrategy {
    /// Try every available mechanism
    Any,

    /// Do not attempt any port mapping
    None,

    /// Assume the given address is reachable from outside
    ExtIp(IpAddr),

    /// Universal Plug and Play
    Upnp,

    /// NAT-PMP, optionally against a known gateway
    Pmp(Option<IpAddr>),
}

impl Default for NatStrategy {
    fn default() -> Self {
        NatStrategy::Any
    }
}

impl NatStrategy {
    /// The fixed external address, if the strategy declares one.
    pub fn external_ip(&self) -> Option<IpAddr> {
        match self {
            NatStrategy::ExtIp(ip) => Some(*ip),
            _ => None,
        }
    }

    /// Whether any port mapping is attempted at all.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, NatStrategy::None)
    }
}

impl FromStr for NatStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // Split on the first colon only so IPv6 literals survive intact.
        let (mechanism, raw_ip) = match s.split_once(':') {
            Some((mechanism, ip)) => (mechanism, Some(ip)),
            None => (s, None),
        };

        let ip = match raw_ip {
            Some(raw) => Some(
                raw.parse::<IpAddr>()
                    .map_err(|_| ConfigError::InvalidNat(format!("invalid IP address {:?}", raw)))?,
            ),
            None => None,
        };

        match mechanism.to_ascii_lowercase().as_str() {
            "" | "none" | "off" => Ok(NatStrategy::None),
            "any" | "auto" | "on" => Ok(NatStrategy::Any),
            "extip" | "ip" => ip
                .map(NatStrategy::ExtIp)
                .ok_or_else(|| ConfigError::InvalidNat("missing IP address for extip".to_string())),
            "upnp" => Ok(NatStrategy::Upnp),
            "pmp" | "natpmp" | "nat-pmp" => Ok(NatStrategy::Pmp(ip)),
            other => Err(ConfigError::InvalidNat(format!("unknown mechanism {:?}", other))),
        }
    }
}

impl fmt::Display for NatStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NatStrategy::Any => write!(f, "any"),
            NatStrategy::None => write!(f, "none"),
            NatStrategy::ExtIp(ip) => write!(f, "extip:{}", ip),
            NatStrategy::Upnp => write!(f, "upnp"),
            NatStrategy::Pmp(None) => write!(f, "pmp"),
            NatStrategy::Pmp(Some(gateway)) => write!(f, "pmp:{}", gateway),
        }
    }
}

impl Serialize for NatStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NatStrategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_parse_mechanisms() {
        assert_eq!("any".parse::<NatStrategy>().unwrap(), NatStrategy::Any);
        assert_eq!("AUTO".parse::<NatStrategy>().unwrap(), NatStrategy::Any);
        assert_eq!("".parse::<NatStrategy>().unwrap(), NatStrategy::None);
        assert_eq!("off".parse::<NatStrategy>().unwrap(), NatStrategy::None);
        assert_eq!("upnp".parse::<NatStrategy>().unwrap(), NatStrategy::Upnp);
        assert_eq!("nat-pmp".parse::<NatStrategy>().unwrap(), NatStrategy::Pmp(None));
    }

    #[test]
    fn test_parse_with_address() {
        let ext: NatStrategy = "extip:203.0.113.7".parse().unwrap();
        assert_eq!(ext, NatStrategy::ExtIp(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7))));
        assert_eq!(ext.external_ip(), Some(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7))));

        let v6: NatStrategy = "extip:::1".parse().unwrap();
        assert_eq!(v6, NatStrategy::ExtIp(IpAddr::V6(Ipv6Addr::LOCALHOST)));

        let pmp: NatStrategy = "pmp:192.168.1.1".parse().unwrap();
        assert_eq!(pmp, NatStrategy::Pmp(Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)))));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("extip".parse::<NatStrategy>(), Err(ConfigError::InvalidNat(_))));
        assert!(matches!("extip:not-an-ip".parse::<NatStrategy>(), Err(ConfigError::InvalidNat(_))));
        assert!(matches!("stun".parse::<NatStrategy>(), Err(ConfigError::InvalidNat(_))));
    }

    #[test]
    fn test_display_is_parseable() {
        for text in ["any", "none", "upnp", "pmp", "pmp:10.0.0.1", "extip:1.2.3.4"] {
            let nat: NatStrategy = text.parse().unwrap();
            assert_eq!(nat.to_string(), text);
        }
    }

    #[test]
    fn test_default_is_any() {
        assert_eq!(NatStrategy::default(), NatStrategy::Any);
        assert!(NatStrategy::default().is_enabled());
        assert!(!NatStrategy::None.is_enabled());
    }
}
