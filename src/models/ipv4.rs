//! IPv4 addresses as 32-bit [`BitString`]s.

use super::BitString;
use crate::errors::{BitError, Result};
use itertools::Itertools;
use num_traits::ToPrimitive;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Number of bits in an IPv4 address.
pub const MAX_LENGTH: usize = 32;

/// IPv4 address backed by a 32-bit [`BitString`].
///
/// Ordering is numeric over the 32-bit value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IpV4 {
    bits: BitString,
}

impl IpV4 {
    /// Wrap a bit string as an address.
    ///
    /// # Errors
    /// [`BitError::Length`] unless `bits` is exactly 32 bits long.
    pub fn new(bits: BitString) -> Result<IpV4> {
        if bits.len() != MAX_LENGTH {
            return Err(BitError::Length(format!(
                "IPv4 address must be {MAX_LENGTH} bits, got {}",
                bits.len()
            )));
        }
        Ok(IpV4 { bits })
    }

    /// Caller guarantees `bits.len() == MAX_LENGTH`.
    pub(crate) fn from_bits_unchecked(bits: BitString) -> IpV4 {
        debug_assert_eq!(bits.len(), MAX_LENGTH);
        IpV4 { bits }
    }

    /// Parse a dotted quad such as `"10.0.0.1"`.
    ///
    /// # Errors
    /// - [`BitError::Parse`] for a field count other than 4 or a non-numeric field
    /// - [`BitError::Length`] for a field above 255
    ///
    /// # Examples
    /// ```
    /// use bitbased::models::IpV4;
    /// let ip = IpV4::parse("255.0.0.00").unwrap();
    /// assert_eq!(ip.to_string(), "255.0.0.0");
    /// ```
    pub fn parse(s: &str) -> Result<IpV4> {
        let fields: Vec<&str> = s.split('.').collect();
        if fields.len() != 4 {
            return Err(BitError::Parse(format!(
                "Cannot parse {s} as an IPv4 address"
            )));
        }
        let mut bits = BitString::zeroes(0);
        for field in fields {
            let octet: u32 = field
                .trim()
                .parse()
                .map_err(|_| BitError::Parse(format!("Invalid octet {field:?} in {s}")))?;
            bits = bits.concat(&BitString::new(octet, 8)?);
        }
        IpV4::new(bits)
    }

    pub fn bits(&self) -> &BitString {
        &self.bits
    }

    /// The four octets, most significant first.
    pub fn octets(&self) -> [u8; 4] {
        self.to_u32().to_be_bytes()
    }

    pub fn to_u32(&self) -> u32 {
        self.bits.value().to_u32().unwrap_or_default()
    }

    /// The previous address, wrapping from `0.0.0.0` to `255.255.255.255`.
    pub fn prev(&self) -> IpV4 {
        IpV4 {
            bits: self.bits.wrapping_add(-1),
        }
    }

    /// The next address, wrapping from `255.255.255.255` to `0.0.0.0`.
    pub fn next(&self) -> IpV4 {
        IpV4 {
            bits: self.bits.wrapping_add(1),
        }
    }
}

impl std::fmt::Display for IpV4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let octets = self
            .bits
            .iter_bytes(false)
            .map_err(|_| std::fmt::Error)?
            .filter_map(|b| b.to_u64())
            .join(".");
        write!(f, "{octets}")
    }
}

impl std::fmt::Debug for IpV4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "<IpV4: {} / {}>", self, self.bits)
    }
}

impl FromStr for IpV4 {
    type Err = BitError;

    fn from_str(s: &str) -> Result<Self> {
        IpV4::parse(s)
    }
}

impl TryFrom<&str> for IpV4 {
    type Error = BitError;

    fn try_from(s: &str) -> Result<Self> {
        IpV4::parse(s)
    }
}

impl From<u32> for IpV4 {
    fn from(value: u32) -> Self {
        IpV4 {
            bits: BitString::from_value(value).pad_left(value.leading_zeros() as usize),
        }
    }
}

impl From<Ipv4Addr> for IpV4 {
    fn from(addr: Ipv4Addr) -> Self {
        IpV4::from(u32::from(addr))
    }
}

impl From<&IpV4> for Ipv4Addr {
    fn from(ip: &IpV4) -> Self {
        Ipv4Addr::from(ip.to_u32())
    }
}

impl Serialize for IpV4 {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IpV4 {
    fn deserialize<D>(deserializer: D) -> std::result::Result<IpV4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IpV4::parse(&s).map_err(|e| de::Error::custom(format!("invalid IP address {s}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4() {
        let my_ip = IpV4::parse("255.0.0.00").unwrap();
        assert_eq!(my_ip.to_string(), "255.0.0.0");
        assert_eq!(my_ip.bits(), &BitString::parse("0xff_00_00_00").unwrap());
        assert_eq!(my_ip.octets(), [255, 0, 0, 0]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(IpV4::parse("1.2.3"), Err(BitError::Parse(_))));
        assert!(matches!(IpV4::parse("1.2.3.4.5"), Err(BitError::Parse(_))));
        assert!(matches!(IpV4::parse("1.2.x.4"), Err(BitError::Parse(_))));
        assert!(matches!(IpV4::parse("1.2.-3.4"), Err(BitError::Parse(_))));
        assert!(matches!(IpV4::parse("1.2.256.4"), Err(BitError::Length(_))));
    }

    #[test]
    fn test_new_checks_length() {
        assert!(matches!(
            IpV4::new(BitString::zeroes(31)),
            Err(BitError::Length(_))
        ));
        assert_eq!(
            IpV4::new(BitString::zeroes(32)).unwrap(),
            IpV4::parse("0.0.0.0").unwrap()
        );
    }

    #[test]
    fn test_next_prev() {
        let ip = IpV4::parse("10.0.0.255").unwrap();
        assert_eq!(ip.next(), IpV4::parse("10.0.1.0").unwrap());
        assert_eq!(ip.next().prev(), ip);
        assert_eq!(
            IpV4::parse("255.255.255.255").unwrap().next(),
            IpV4::parse("0.0.0.0").unwrap()
        );
        assert_eq!(
            IpV4::parse("0.0.0.0").unwrap().prev(),
            IpV4::parse("255.255.255.255").unwrap()
        );
    }

    #[test]
    fn test_ip4_cmp() {
        let ip1 = IpV4::parse("10.0.0.1").unwrap();
        let ip2 = IpV4::parse("10.0.0.2").unwrap();
        let ip3 = IpV4::parse("9.255.255.255").unwrap();

        assert!(ip1 < ip2);
        assert!(ip3 < ip1);
        assert!(ip2 >= ip1);
    }

    #[test]
    fn test_std_interop() {
        let addr = Ipv4Addr::new(192, 168, 1, 42);
        let ip = IpV4::from(addr);
        assert_eq!(ip, IpV4::parse("192.168.1.42").unwrap());
        assert_eq!(Ipv4Addr::from(&ip), addr);
        assert_eq!(IpV4::from(0u32).to_string(), "0.0.0.0");
        assert_eq!(IpV4::from(u32::MAX).to_string(), "255.255.255.255");
        assert_eq!(IpV4::from(1u32).bits().len(), MAX_LENGTH);
    }

    #[test]
    fn test_serde() {
        let ip = IpV4::parse("10.1.2.3").unwrap();
        let json = serde_json::to_string(&ip).unwrap();
        assert_eq!(json, "\"10.1.2.3\"");
        assert_eq!(serde_json::from_str::<IpV4>(&json).unwrap(), ip);
        assert!(serde_json::from_str::<IpV4>("\"10.1.2\"").is_err());
    }
}
