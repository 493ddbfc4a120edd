use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// The address families the protocol defines endpoint types for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// The endpoint type tag used on the wire ("ipv4" / "ipv6").
    pub fn tag(&self) -> &'static str {
        match self {
            AddressFamily::Ipv4 => "ipv4",
            AddressFamily::Ipv6 => "ipv6",
        }
    }

    /// Number of address bits in this family.
    pub fn bit_len(&self) -> u8 {
        match self {
            AddressFamily::Ipv4 => 32,
            AddressFamily::Ipv6 => 128,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single endpoint address.
///
/// Parses both the plain literal form (`"192.0.2.1"`) and the typed form
/// with an address-type prefix (`"ipv4:192.0.2.1"`). `Display` renders the
/// typed form, which is the key format used in endpoint response tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointAddr {
    addr: IpAddr,
}

impl EndpointAddr {
    pub fn new(addr: IpAddr) -> Self {
        Self { addr }
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn family(&self) -> AddressFamily {
        match self.addr {
            IpAddr::V4(_) => AddressFamily::Ipv4,
            IpAddr::V6(_) => AddressFamily::Ipv6,
        }
    }

    /// The address bits, left-aligned in a u128 so that IPv4 and IPv6
    /// addresses walk the same trie representation.
    pub fn bits(&self) -> u128 {
        match self.addr {
            IpAddr::V4(a) => (u32::from(a) as u128) << 96,
            IpAddr::V6(a) => u128::from(a),
        }
    }
}

impl fmt::Display for EndpointAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family().tag(), self.addr)
    }
}

impl From<IpAddr> for EndpointAddr {
    fn from(addr: IpAddr) -> Self {
        Self::new(addr)
    }
}

impl FromStr for EndpointAddr {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix("ipv4:") {
            let a: Ipv4Addr = rest
                .parse()
                .map_err(|_| CoreError::InvalidAddress(s.to_string()))?;
            return Ok(Self::new(IpAddr::V4(a)));
        }
        if let Some(rest) = s.strip_prefix("ipv6:") {
            let a: Ipv6Addr = rest
                .parse()
                .map_err(|_| CoreError::InvalidAddress(s.to_string()))?;
            return Ok(Self::new(IpAddr::V6(a)));
        }
        // Anything else must be a plain literal; unknown type tags
        // ("mac-48:..." and friends) fall through and fail here.
        s.parse::<IpAddr>()
            .map(Self::new)
            .map_err(|_| CoreError::InvalidAddress(s.to_string()))
    }
}

impl Serialize for EndpointAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EndpointAddr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A CIDR address prefix.
///
/// Host bits beyond the prefix length are masked off on construction, so two
/// spellings of the same block compare equal. A zero-length prefix is the
/// default route for its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prefix {
    addr: IpAddr,
    len: u8,
}

impl Prefix {
    /// Create a prefix, masking host bits.
    pub fn new(addr: IpAddr, len: u8) -> Result<Self, CoreError> {
        let family = EndpointAddr::new(addr).family();
        if len > family.bit_len() {
            return Err(CoreError::InvalidPrefix(format!("{}/{}", addr, len)));
        }
        let masked = mask_bits(EndpointAddr::new(addr).bits(), len);
        let addr = match addr {
            IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::from((masked >> 96) as u32)),
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::from(masked)),
        };
        Ok(Self { addr, len })
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn family(&self) -> AddressFamily {
        EndpointAddr::new(self.addr).family()
    }

    /// Returns `true` for the `/0` default route.
    pub fn is_default_route(&self) -> bool {
        self.len == 0
    }

    /// The prefix bits, left-aligned in a u128.
    pub fn bits(&self) -> u128 {
        EndpointAddr::new(self.addr).bits()
    }

    /// Returns `true` if `addr` falls inside this prefix. Families must
    /// match; an IPv6 address is never inside an IPv4 prefix.
    pub fn contains(&self, addr: &EndpointAddr) -> bool {
        self.family() == addr.family() && mask_bits(addr.bits(), self.len) == self.bits()
    }
}

/// Keep the top `len` bits (in the left-aligned u128 space), zero the rest.
fn mask_bits(bits: u128, len: u8) -> u128 {
    if len == 0 {
        0
    } else {
        bits & (u128::MAX << (128 - len as u32))
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}

impl FromStr for Prefix {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, len) = s
            .split_once('/')
            .ok_or_else(|| CoreError::InvalidPrefix(s.to_string()))?;
        let addr: IpAddr = addr
            .parse()
            .map_err(|_| CoreError::InvalidPrefix(s.to_string()))?;
        let len: u8 = len
            .parse()
            .map_err(|_| CoreError::InvalidPrefix(s.to_string()))?;
        Prefix::new(addr, len)
    }
}

impl Serialize for Prefix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
