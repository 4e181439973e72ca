//! IPv4 address and CIDR arithmetic.
//!
//! Provides [`Network`], a CIDR block whose address is always the block's base,
//! along with the bitwise helpers it is built on. Addresses are handled as
//! `u32` internally; [`Ipv4Addr`] is only used as the value/display type.

use super::ValidationError;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::sync::OnceLock;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Regex for prefix text such as `/24`, ` / 8` or `16`.
static PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_prefix_regex() -> &'static Regex {
    PREFIX_REGEX.get_or_init(|| Regex::new(r"^\s*/?\s*(\d{1,3})\s*$").expect("Invalid Regex"))
}

fn prefix_too_long(len: u8) -> ValidationError {
    ValidationError::PrefixOutOfRange(format!("/{len}"))
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use calcuip::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, ValidationError> {
    if len > MAX_LENGTH {
        Err(prefix_too_long(len))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, ValidationError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, ValidationError> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Number of usable hosts in a block: network and broadcast are excluded,
/// so /31 and /32 have none.
pub fn num_hosts(len: u8) -> Result<u64, ValidationError> {
    if len > MAX_LENGTH {
        Err(prefix_too_long(len))
    } else if len >= MAX_LENGTH - 1 {
        Ok(0)
    } else {
        Ok((1u64 << (MAX_LENGTH - len)) - 2)
    }
}

/// Parse dotted-quad text into an address.
///
/// Each of the four octets must be plain decimal in 0-255 without leading zeros.
pub fn parse_address(text: &str) -> Result<Ipv4Addr, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    let malformed = || ValidationError::MalformedAddress(text.to_string());

    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 4 {
        return Err(malformed());
    }
    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(parts) {
        let well_formed = !part.is_empty()
            && part.len() <= 3
            && part.bytes().all(|b| b.is_ascii_digit())
            && !(part.len() > 1 && part.starts_with('0'));
        if !well_formed {
            return Err(malformed());
        }
        // at most three digits, so this fits u16
        let value: u16 = part.parse().map_err(|_| malformed())?;
        *octet = u8::try_from(value).map_err(|_| malformed())?;
    }
    Ok(Ipv4Addr::from(octets))
}

/// Parse prefix text of the form `/N` (the slash is optional) with N in 0-32.
pub fn parse_prefix(text: &str) -> Result<u8, ValidationError> {
    let out_of_range = || ValidationError::PrefixOutOfRange(text.trim().to_string());
    let caps = get_prefix_regex()
        .captures(text)
        .ok_or_else(out_of_range)?;
    let len: u16 = caps[1].parse().map_err(|_| out_of_range())?;
    if len > MAX_LENGTH as u16 {
        return Err(out_of_range());
    }
    Ok(len as u8)
}

/// First and last usable host of a network.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash, Serialize, Deserialize)]
pub struct HostRange {
    pub first: Ipv4Addr,
    pub last: Ipv4Addr,
}

impl std::fmt::Display for HostRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} - {}", self.first, self.last)
    }
}

/// An IPv4 CIDR block.
///
/// The stored address always has its host bits cleared, whatever address
/// the block was built from.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Network {
    addr: Ipv4Addr,
    prefix: u8,
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Network::from_cidr(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl Network {
    /// Build the block of length `prefix` that contains `addr`.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Network, ValidationError> {
        let addr = cut_addr(addr, prefix)?;
        Ok(Network { addr, prefix })
    }

    /// Create a [`Network`] from CIDR text (e.g. "10.0.0.5/24"); host bits are dropped.
    pub fn from_cidr(addr_cidr: &str) -> Result<Network, ValidationError> {
        let addr_cidr = addr_cidr.trim();
        let (addr, prefix) = addr_cidr
            .split_once('/')
            .ok_or_else(|| ValidationError::PrefixOutOfRange(addr_cidr.to_string()))?;
        let addr = parse_address(addr)?;
        let prefix = parse_prefix(prefix)?;
        Network::new(addr, prefix)
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// The base address of the block.
    pub fn network_address(&self) -> Ipv4Addr {
        self.addr
    }

    /// The last address of the block, all host bits set.
    pub fn broadcast_address(&self) -> Ipv4Addr {
        // prefix is always <= 32 here
        broadcast_addr(self.addr, self.prefix).unwrap_or(self.addr)
    }

    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask_bits())
    }

    pub fn wildcard(&self) -> Ipv4Addr {
        Ipv4Addr::from(!self.mask_bits())
    }

    /// Total number of addresses, including network and broadcast.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.prefix)
    }

    /// Number of usable hosts.
    pub fn num_hosts(&self) -> u64 {
        num_hosts(self.prefix).unwrap_or(0)
    }

    /// Usable hosts, `None` for /31 and /32.
    pub fn host_range(&self) -> Option<HostRange> {
        if self.num_hosts() == 0 {
            return None;
        }
        Some(HostRange {
            first: Ipv4Addr::from(u32::from(self.network_address()) + 1),
            last: Ipv4Addr::from(u32::from(self.broadcast_address()) - 1),
        })
    }

    /// The `index`-th block of length `new_prefix` inside this network, counted from the base.
    ///
    /// `None` when `new_prefix` is shorter than this network's prefix, longer
    /// than /32, or `index` is past the last block.
    pub fn subnet_at(&self, new_prefix: u8, index: u64) -> Option<Network> {
        if new_prefix < self.prefix || new_prefix > MAX_LENGTH {
            return None;
        }
        let count = 1u64 << (new_prefix - self.prefix);
        if index >= count {
            return None;
        }
        let step = 1u64 << (MAX_LENGTH - new_prefix);
        let base = u32::from(self.addr) as u64 + index * step;
        Some(Network {
            addr: Ipv4Addr::from(base as u32),
            prefix: new_prefix,
        })
    }

    fn mask_bits(&self) -> u32 {
        get_cidr_mask(self.prefix).unwrap_or(u32::MAX)
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(31).unwrap(), 0xFFFFFFFE);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_cut_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(cut_addr(ip, 24).unwrap(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(cut_addr(ip, 16).unwrap(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(cut_addr(ip, 8).unwrap(), Ipv4Addr::new(192, 0, 0, 0));
        assert_eq!(cut_addr(ip, 0).unwrap(), Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(cut_addr(ip, 32).unwrap(), Ipv4Addr::new(192, 168, 1, 42));
        assert!(cut_addr(ip, 33).is_err());
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            broadcast_addr(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 1, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 16).unwrap(),
            Ipv4Addr::new(192, 168, 255, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 8).unwrap(),
            Ipv4Addr::new(192, 255, 255, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 32).unwrap(),
            Ipv4Addr::new(192, 168, 1, 0)
        );
        assert!(broadcast_addr(Ipv4Addr::new(255, 255, 255, 255), 24).is_ok());
    }

    #[test]
    fn test_num_hosts() {
        assert_eq!(num_hosts(0).unwrap(), 4294967294); // 2^32 - 2
        assert_eq!(num_hosts(8).unwrap(), 16777214);
        assert_eq!(num_hosts(24).unwrap(), 254);
        assert_eq!(num_hosts(29).unwrap(), 6);
        assert_eq!(num_hosts(30).unwrap(), 2);
        assert_eq!(num_hosts(31).unwrap(), 0);
        assert_eq!(num_hosts(32).unwrap(), 0);
        assert!(num_hosts(33).is_err());
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(
            parse_address(" 192.168.0.5 ").unwrap(),
            Ipv4Addr::new(192, 168, 0, 5)
        );
        assert_eq!(
            parse_address("0.0.0.0").unwrap(),
            Ipv4Addr::new(0, 0, 0, 0)
        );
        assert_eq!(parse_address("   "), Err(ValidationError::EmptyInput));
        for bad in [
            "999.1.1.1",
            "1.2.3",
            "1.2.3.4.5",
            "1..3.4",
            "a.b.c.d",
            "1.2.3.-4",
            "01.2.3.4",
            "1.2.3.4/24",
            "+1.2.3.4",
        ] {
            assert!(
                matches!(parse_address(bad), Err(ValidationError::MalformedAddress(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(parse_prefix("/24").unwrap(), 24);
        assert_eq!(parse_prefix("8").unwrap(), 8);
        assert_eq!(parse_prefix(" / 0 ").unwrap(), 0);
        assert_eq!(parse_prefix("/32").unwrap(), 32);
        assert_eq!(
            parse_prefix("/33"),
            Err(ValidationError::PrefixOutOfRange("/33".to_string()))
        );
        assert!(parse_prefix("/-1").is_err());
        assert!(parse_prefix("").is_err());
        assert!(parse_prefix("/2a").is_err());
        assert!(parse_prefix("/1000").is_err());
    }

    #[test]
    fn test_network_masks_host_bits() {
        let net = Network::new(Ipv4Addr::new(10, 2, 3, 4), 16).unwrap();
        assert_eq!(net.network_address(), Ipv4Addr::new(10, 2, 0, 0));
        assert_eq!(net.broadcast_address(), Ipv4Addr::new(10, 2, 255, 255));
        assert_eq!(net.netmask(), Ipv4Addr::new(255, 255, 0, 0));
        assert_eq!(net.wildcard(), Ipv4Addr::new(0, 0, 255, 255));
        assert_eq!(net.to_string(), "10.2.0.0/16");
        assert_eq!(net, Network::from_cidr("10.2.255.1/16").unwrap());
        assert!(Network::new(Ipv4Addr::new(10, 2, 3, 4), 33).is_err());
        assert_eq!(
            Network::from_cidr("0.0.0.0/0").unwrap().broadcast_address(),
            Ipv4Addr::new(255, 255, 255, 255)
        );
    }

    #[test]
    fn test_network_host_range() {
        let net = Network::from_cidr("192.168.0.5/24").unwrap();
        let hosts = net.host_range().unwrap();
        assert_eq!(hosts.first, Ipv4Addr::new(192, 168, 0, 1));
        assert_eq!(hosts.last, Ipv4Addr::new(192, 168, 0, 254));
        assert_eq!(hosts.to_string(), "192.168.0.1 - 192.168.0.254");

        let p2p = Network::from_cidr("10.0.0.0/30").unwrap();
        assert_eq!(
            p2p.host_range().unwrap().to_string(),
            "10.0.0.1 - 10.0.0.2"
        );

        assert_eq!(Network::from_cidr("10.0.0.0/31").unwrap().host_range(), None);
        assert_eq!(Network::from_cidr("10.0.0.7/32").unwrap().host_range(), None);

        let all = Network::from_cidr("1.2.3.4/0").unwrap();
        assert_eq!(all.size(), 1u64 << 32);
        assert_eq!(all.host_range().unwrap().last, Ipv4Addr::new(255, 255, 255, 254));
    }

    #[test]
    fn test_subnet_at() {
        let net = Network::from_cidr("10.1.1.0/24").unwrap();
        assert_eq!(net.subnet_at(24, 0), Some(net));
        assert_eq!(net.subnet_at(24, 1), None);
        assert_eq!(
            net.subnet_at(28, 1).unwrap(),
            Network::from_cidr("10.1.1.16/28").unwrap()
        );
        assert_eq!(
            net.subnet_at(28, 15).unwrap(),
            Network::from_cidr("10.1.1.240/28").unwrap()
        );
        assert_eq!(net.subnet_at(28, 16), None);
        assert_eq!(net.subnet_at(23, 0), None);
        assert_eq!(net.subnet_at(33, 0), None);

        let top = Network::from_cidr("0.0.0.0/0").unwrap();
        assert_eq!(
            top.subnet_at(32, (1u64 << 32) - 1).unwrap(),
            Network::from_cidr("255.255.255.255/32").unwrap()
        );
    }

    #[test]
    fn test_network_cmp() {
        let ip1 = Network::from_cidr("10.0.10.0/24").unwrap();
        let ip2 = Network::from_cidr("10.0.0.0/8").unwrap();
        let ip3 = Network::from_cidr("10.0.10.64/26").unwrap();

        assert!(ip1 > ip2);
        assert!(ip1 < ip3);
        assert!(ip2 < ip3);
    }

    #[test]
    fn test_network_serde() {
        let net = Network::from_cidr("172.16.5.9/12").unwrap();
        let json = serde_json::to_string(&net).unwrap();
        assert_eq!(json, "\"172.16.0.0/12\"");
        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(back, net);
        assert!(serde_json::from_str::<Network>("\"172.16.0.0\"").is_err());
    }
}
